use anyhow::{ensure, Result};
use serde_json::Value;

use crate::error::{Prerequisite, ScadError};
use crate::geojson::Feature;

/// Linearly remap the value under `key` from `domain` onto `range`, in place.
///
/// Features without the key are left alone. Returns the `(min, max)` of the
/// scaled values; if no feature carries the key this is `(range.1, range.0)`.
pub fn scale_heights(features: &mut [Feature], key: &str, domain: (f64, f64), range: (f64, f64)) -> Result<(f64, f64)> {
    ensure!(!features.is_empty(), ScadError::State(Prerequisite::EmptyFeatures));
    ensure!(!key.is_empty(), ScadError::State(Prerequisite::BoundDataNotFound));

    let domain_diff = domain.1 - domain.0;
    let range_diff = range.1 - range.0;
    ensure!(
        domain_diff != 0.0 && domain_diff.is_finite(),
        ScadError::Config(format!("height domain [{}, {}] must have non-zero finite width", domain.0, domain.1))
    );
    ensure!(
        range_diff.is_finite(),
        ScadError::Config(format!("height range [{}, {}] must be finite", range.0, range.1))
    );

    if let Some((idx, value)) = features.iter().enumerate()
        .find_map(|(idx, f)| f.properties.get(key).filter(|v| !v.is_number()).map(|v| (idx, v)))
    {
        return Err(ScadError::Config(format!("feature {idx} has non-numeric '{key}' value {value}")).into());
    }

    let scaled: Vec<Option<f64>> = features.iter()
        .map(|f| f.number(key).map(|value| range.0 + (value - domain.0) / domain_diff * range_diff))
        .collect();

    if let Some((idx, height)) = scaled.iter().enumerate()
        .find_map(|(idx, h)| h.filter(|h| !h.is_finite()).map(|h| (idx, h)))
    {
        return Err(ScadError::Config(format!(
            "feature {idx}: '{key}' scales to {height} with domain [{}, {}] and range [{}, {}]",
            domain.0, domain.1, range.0, range.1,
        )).into());
    }

    let mut min_max = (range.1, range.0);

    for (feature, height) in features.iter_mut().zip(scaled) {
        let Some(height) = height else { continue };

        feature.properties.insert(key.to_string(), Value::from(height));
        min_max.0 = min_max.0.min(height);
        min_max.1 = min_max.1.max(height);
    }

    Ok(min_max)
}
