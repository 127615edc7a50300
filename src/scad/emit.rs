use std::fmt::{self, Write};

use anyhow::{ensure, Result};
use rand::seq::IndexedRandom;

use crate::error::{Prerequisite, ScadError};
use crate::geojson::{Feature, Ring};

/// Rendering switches for [`emit`].
#[derive(Clone, Copy, Debug)]
pub struct EmitOptions<'a> {
    /// Height for shapes whose feature has no numeric bound value.
    pub default_height: f64,
    /// Emit `offset(delta)` before each polygon when non-zero.
    pub offset_delta: f64,
    /// Pick a random `color(...)` for each shape.
    pub colored: bool,
    pub palette: &'a [String],
}

/// Render every exterior ring as an extruded OpenSCAD polygon.
///
/// Shapes are numbered `points_0, points_1, ...` across the whole output, in
/// feature order and then sub-polygon order. `rng` is only drawn from in color mode.
pub fn emit(features: &[Feature], key: &str, options: &EmitOptions, rng: &mut impl rand::Rng) -> Result<String> {
    ensure!(!features.is_empty(), ScadError::State(Prerequisite::EmptyFeatures));
    ensure!(
        !options.colored || !options.palette.is_empty(),
        ScadError::Config("color preview needs a non-empty color bank".into())
    );

    let mut code = String::new();
    let mut count = 0usize;

    for feature in features {
        let height = match key {
            "" => None,
            key => feature.number(key),
        }.unwrap_or(options.default_height);

        for ring in feature.geometry.exterior_rings() {
            write!(code, "points_{count} = ")?;
            write_points(&mut code, ring)?;
            writeln!(code, ";")?;

            if options.colored {
                if let Some(color) = options.palette.choose(rng) {
                    writeln!(code, r#"color("{color}")"#)?;
                }
            }

            writeln!(code, "linear_extrude(height={height})")?;

            if options.offset_delta != 0.0 {
                writeln!(code, "offset({})", options.offset_delta)?;
            }

            writeln!(code, "polygon(points_{count});")?;
            count += 1;
        }
    }

    Ok(code)
}

/// `[[x, y], [x, y], ...]`
fn write_points(out: &mut String, ring: &Ring) -> fmt::Result {
    out.push('[');
    for (i, c) in ring.coords().enumerate() {
        if i > 0 { out.push_str(", ") }
        write!(out, "[{}, {}]", c.x, c.y)?;
    }
    out.push(']');
    Ok(())
}
