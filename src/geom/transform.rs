use anyhow::{ensure, Result};
use geo::{Coord, MapCoordsInPlace};

use crate::error::{Prerequisite, ScadError};
use crate::geojson::Feature;

/// Translate-then-scale parameters, plus a constant bias applied after scaling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Geographic position `[lon, lat]` that maps to the local origin.
    pub origin: [f64; 2],
    pub scale_factor: f64,
    /// Added to every coordinate after scaling so that neighbouring solids overlap slightly.
    pub seam_offset: f64,
}

impl Transform {
    #[inline]
    pub fn apply(&self, c: Coord<f64>) -> Coord<f64> {
        Coord {
            x: self.scale_factor * (c.x - self.origin[0]) + self.seam_offset,
            y: self.scale_factor * (c.y - self.origin[1]) + self.seam_offset,
        }
    }
}

/// Transform the exterior ring of every polygon in place.
///
/// Works on whatever coordinates are current: calling this twice composes the
/// two transforms rather than starting over from the input.
pub fn transform(features: &mut [Feature], origin: [f64; 2], scale_factor: f64, seam_offset: f64) -> Result<Transform> {
    ensure!(!features.is_empty(), ScadError::State(Prerequisite::EmptyFeatures));
    ensure!(
        origin.iter().chain([&scale_factor, &seam_offset]).all(|v| v.is_finite()),
        ScadError::Config(format!(
            "transform parameters must be finite (origin {origin:?}, scale {scale_factor}, seam {seam_offset})"
        ))
    );

    let t = Transform { origin, scale_factor, seam_offset };

    let overflow = features.iter().enumerate().find_map(|(idx, feature)| {
        feature.geometry.exterior_rings().into_iter()
            .flat_map(|ring| ring.coords())
            .map(|&c| t.apply(c))
            .find(|c| !(c.x.is_finite() && c.y.is_finite()))
            .map(|c| (idx, c))
    });
    if let Some((idx, c)) = overflow {
        return Err(ScadError::Config(format!(
            "feature {idx}: transform with origin {origin:?}, scale {scale_factor} yields non-finite point ({}, {})",
            c.x, c.y,
        )).into());
    }

    for feature in features.iter_mut() {
        for ring in feature.geometry.exterior_rings_mut() {
            ring.map_coords_in_place(|c| t.apply(c));
        }
    }

    Ok(t)
}
