use anyhow::Result;
use geo::LineString;
use serde_json::{Map, Value};

use crate::error::{Prerequisite, ScadError};

/// A linear ring of 2D points, in input order. Never closed or reoriented here.
pub type Ring = LineString<f64>;

/// Geometry of a single feature.
///
/// Only the first ring of each polygon (the exterior boundary) is touched by the
/// pipeline; interior rings are carried as parsed.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Polygon(Vec<Ring>),
    MultiPolygon(Vec<Vec<Ring>>),
    /// Any other geometry (including `null`), passed through untouched.
    Other(Value),
}

impl Geometry {
    /// Exterior ring of every shape, in shape order. Polygons without rings are skipped.
    pub fn exterior_rings(&self) -> Vec<&Ring> {
        match self {
            Self::Polygon(rings) => rings.first().into_iter().collect(),
            Self::MultiPolygon(polygons) => polygons.iter().filter_map(|rings| rings.first()).collect(),
            Self::Other(_) => Vec::new(),
        }
    }

    pub fn exterior_rings_mut(&mut self) -> Vec<&mut Ring> {
        match self {
            Self::Polygon(rings) => rings.first_mut().into_iter().collect(),
            Self::MultiPolygon(polygons) => polygons.iter_mut().filter_map(|rings| rings.first_mut()).collect(),
            Self::Other(_) => Vec::new(),
        }
    }
}

/// A GeoJSON feature: geometry plus scalar properties.
#[derive(Clone, Debug, PartialEq)]
pub struct Feature {
    pub geometry: Geometry,
    pub properties: Map<String, Value>,
    /// Remaining members of the feature object (e.g. `id`), in document order.
    pub extra: Map<String, Value>,
}

impl Feature {
    pub fn new(geometry: Geometry) -> Self {
        Self { geometry, properties: Map::new(), extra: Map::new() }
    }

    /// Builder-style property setter.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Numeric value of a property, if present and numeric.
    #[inline]
    pub fn number(&self, key: &str) -> Option<f64> {
        self.properties.get(key).and_then(Value::as_f64)
    }
}

/// A parsed GeoJSON document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeatureCollection {
    /// The top-level `type` tag.
    pub kind: Option<String>,
    /// `None` when the document has no `features` member.
    pub features: Option<Vec<Feature>>,
    /// Other top-level members (`name`, `crs`, `bbox`, ...) in document order.
    pub foreign: Map<String, Value>,
}

impl FeatureCollection {
    /// True if the document had no members at all.
    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.features.is_none() && self.foreign.is_empty()
    }

    /// Names of the top-level members.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys = Vec::with_capacity(self.foreign.len() + 2);
        if self.kind.is_some() { keys.push("type") }
        if self.features.is_some() { keys.push("features") }
        keys.extend(self.foreign.keys().map(String::as_str));
        keys
    }

    /// Copy out the feature sequence.
    pub fn extract_features(&self) -> Result<Vec<Feature>> {
        match &self.features {
            Some(features) => Ok(features.clone()),
            None => Err(ScadError::State(Prerequisite::MissingFeaturesMember).into()),
        }
    }
}
