use anyhow::{ensure, Result};
use serde_json::Value;

use crate::error::{Prerequisite, ScadError};
use crate::geojson::Feature;

fn check_values<'a>(values: impl IntoIterator<Item = &'a f64>) -> Result<()> {
    for value in values {
        ensure!(value.is_finite(), ScadError::Config(format!("bound values must be finite, got {value}")));
    }
    Ok(())
}

/// Bind `values` to features in order, under property `key`.
///
/// Extra values or extra features are ignored. Returns the number of features bound.
pub fn bind_by_position(features: &mut [Feature], key: &str, values: &[f64]) -> Result<usize> {
    ensure!(!features.is_empty(), ScadError::State(Prerequisite::EmptyFeatures));
    check_values(values)?;

    let mut num_bound = 0;
    for (feature, &value) in features.iter_mut().zip(values) {
        feature.properties.insert(key.to_string(), Value::from(value));
        num_bound += 1;
    }

    Ok(num_bound)
}

/// Identifiers match when they are equal JSON values, or when both are numbers
/// with the same `f64` value (`17` matches `17.0`).
fn same_id(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

/// Bind `(id_value, value)` pairs to the first feature whose `properties[id_key]`
/// matches `id_value`. Pairs without a match are skipped.
///
/// Returns the number of pairs that found a feature.
pub fn bind_by_identifier(features: &mut [Feature], key: &str, pairs: &[(Value, f64)], id_key: &str) -> Result<usize> {
    ensure!(!features.is_empty(), ScadError::State(Prerequisite::EmptyFeatures));
    check_values(pairs.iter().map(|(_, value)| value))?;

    let mut num_matches = 0;
    for (id_value, value) in pairs {
        let target = features.iter_mut()
            .find(|feature| feature.properties.get(id_key).is_some_and(|id| same_id(id, id_value)));

        if let Some(feature) = target {
            feature.properties.insert(key.to_string(), Value::from(*value));
            num_matches += 1;
        }
    }

    Ok(num_matches)
}
