use anyhow::{ensure, Result};
use geo::Simplify;

use crate::error::{Prerequisite, ScadError};
use crate::geojson::{Feature, Ring};

/// Reduce a ring with Ramer-Douglas-Peucker. Keeps the first and last points.
#[inline]
pub fn reduce_ring(ring: &Ring, tolerance: f64) -> Ring {
    ring.simplify(&tolerance)
}

/// Simplify the exterior ring of every polygon, in place.
///
/// Returns the total number of points across all simplified rings. Geometries
/// other than Polygon/MultiPolygon are left alone.
pub fn simplify(features: &mut [Feature], tolerance: f64) -> Result<usize> {
    simplify_with_progress(features, tolerance, |_, _| {})
}

/// Like [`simplify`], calling `progress(done, total)` after each feature.
pub(crate) fn simplify_with_progress(
    features: &mut [Feature],
    tolerance: f64,
    mut progress: impl FnMut(usize, usize),
) -> Result<usize> {
    ensure!(!features.is_empty(), ScadError::State(Prerequisite::EmptyFeatures));
    ensure!(
        tolerance.is_finite() && tolerance >= 0.0,
        ScadError::Config(format!("simplification tolerance must be a non-negative number, got {tolerance}"))
    );

    let total = features.len();
    let mut num_points = 0;

    for (idx, feature) in features.iter_mut().enumerate() {
        for ring in feature.geometry.exterior_rings_mut() {
            *ring = reduce_ring(ring, tolerance);
            num_points += ring.0.len();
        }
        progress(idx + 1, total);
    }

    Ok(num_points)
}
