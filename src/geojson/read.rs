use std::path::Path;

use anyhow::Result;
use geo::{Coord, LineString};
use serde_json::{Map, Value};

use crate::error::ScadError;
use crate::geojson::{Feature, FeatureCollection, Geometry, Ring};

/// Parse a GeoJSON document from text.
pub fn read_from_str(text: &str) -> Result<FeatureCollection> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| ScadError::Parse(format!("invalid JSON: {e}")))?;

    let Value::Object(mut members) = value else {
        return Err(ScadError::Parse("top-level GeoJSON value must be an object".into()).into());
    };

    let kind = match members.shift_remove("type") {
        Some(Value::String(kind)) => Some(kind),
        Some(other) => return Err(parse_error(format!("'type' must be a string, got {other}"))),
        None => None,
    };

    let features = match members.shift_remove("features") {
        Some(Value::Array(items)) => Some(
            items.into_iter().enumerate()
                .map(|(idx, item)| parse_feature(idx, item))
                .collect::<Result<Vec<_>>>()?
        ),
        Some(_) => return Err(parse_error("'features' must be an array".into())),
        None => None,
    };

    Ok(FeatureCollection { kind, features, foreign: members })
}

/// Read and parse a GeoJSON file.
pub fn read_from_path(path: &Path) -> Result<FeatureCollection> {
    let text = std::fs::read_to_string(path).map_err(|e| ScadError::io(path, e))?;
    read_from_str(&text)
}

fn parse_error(message: String) -> anyhow::Error {
    ScadError::Parse(message).into()
}

fn parse_feature(idx: usize, value: Value) -> Result<Feature> {
    let Value::Object(mut members) = value else {
        return Err(parse_error(format!("feature {idx} is not an object")));
    };
    members.shift_remove("type");

    let geometry = match members.shift_remove("geometry") {
        Some(geometry) => parse_geometry(idx, geometry)?,
        None => Geometry::Other(Value::Null),
    };

    let properties = match members.shift_remove("properties") {
        Some(Value::Object(properties)) => properties,
        Some(Value::Null) | None => Map::new(),
        Some(_) => return Err(parse_error(format!("feature {idx}: 'properties' must be an object"))),
    };

    Ok(Feature { geometry, properties, extra: members })
}

fn parse_geometry(idx: usize, value: Value) -> Result<Geometry> {
    match value.get("type").and_then(Value::as_str) {
        Some("Polygon") => {
            let coords = coordinates(idx, &value)?;
            Ok(Geometry::Polygon(parse_polygon(idx, coords)?))
        }
        Some("MultiPolygon") => {
            let coords = coordinates(idx, &value)?;
            let polygons = coords.iter()
                .map(|polygon| {
                    let rings = polygon.as_array()
                        .ok_or_else(|| parse_error(format!("feature {idx}: MultiPolygon member must be an array")))?;
                    parse_polygon(idx, rings)
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Geometry::MultiPolygon(polygons))
        }
        _ => Ok(Geometry::Other(value)),
    }
}

fn coordinates(idx: usize, geometry: &Value) -> Result<&Vec<Value>> {
    geometry.get("coordinates")
        .and_then(Value::as_array)
        .ok_or_else(|| parse_error(format!("feature {idx}: missing or non-array 'coordinates'")))
}

/// Parse polygon coordinates: `[[[x, y], ...], ...]`.
fn parse_polygon(idx: usize, rings: &[Value]) -> Result<Vec<Ring>> {
    rings.iter()
        .map(|ring| {
            let positions = ring.as_array()
                .ok_or_else(|| parse_error(format!("feature {idx}: ring must be an array")))?;
            parse_ring(idx, positions)
        })
        .collect()
}

/// Parse a ring: `[[x, y], [x, y], ...]`. Extra position elements (altitude) are dropped.
fn parse_ring(idx: usize, positions: &[Value]) -> Result<Ring> {
    let mut points = Vec::with_capacity(positions.len());

    for position in positions {
        let xy = position.as_array()
            .filter(|p| p.len() >= 2)
            .and_then(|p| Some((p[0].as_f64()?, p[1].as_f64()?)))
            .ok_or_else(|| parse_error(format!("feature {idx}: invalid position {position}")))?;
        points.push(Coord { x: xy.0, y: xy.1 });
    }

    Ok(LineString(points))
}
