use serde_json::{json, Map, Value};

use crate::geojson::{Feature, FeatureCollection, Geometry, Ring};

impl Feature {
    /// Serialize the feature in its current (possibly transformed) state.
    pub fn to_geojson(&self) -> Value {
        let mut members = Map::new();
        members.insert("type".into(), json!("Feature"));
        members.extend(self.extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        members.insert("properties".into(), Value::Object(self.properties.clone()));
        members.insert("geometry".into(), geometry_to_geojson(&self.geometry));
        Value::Object(members)
    }
}

impl FeatureCollection {
    /// Serialize the collection, replacing its features with `features`.
    pub fn to_geojson_with(&self, features: &[Feature]) -> Value {
        let mut members = Map::new();
        members.insert("type".into(), json!(self.kind.as_deref().unwrap_or("FeatureCollection")));
        members.insert("features".into(), Value::Array(features.iter().map(Feature::to_geojson).collect()));
        members.extend(self.foreign.iter().map(|(k, v)| (k.clone(), v.clone())));
        Value::Object(members)
    }

    /// Serialize the collection as parsed.
    pub fn to_geojson(&self) -> Value {
        self.to_geojson_with(self.features.as_deref().unwrap_or_default())
    }
}

fn geometry_to_geojson(geometry: &Geometry) -> Value {
    match geometry {
        Geometry::Polygon(rings) => json!({
            "type": "Polygon",
            "coordinates": polygon_coords(rings),
        }),
        Geometry::MultiPolygon(polygons) => json!({
            "type": "MultiPolygon",
            "coordinates": polygons.iter().map(|rings| polygon_coords(rings)).collect::<Vec<_>>(),
        }),
        Geometry::Other(value) => value.clone(),
    }
}

fn polygon_coords(rings: &[Ring]) -> Vec<Vec<[f64; 2]>> {
    rings.iter()
        .map(|ring| ring.coords().map(|c| [c.x, c.y]).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::geojson::read_from_str;

    #[test]
    fn reparse_keeps_structure() {
        let text = r#"{
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "id": "a", "properties": { "k": 1 },
                  "geometry": { "type": "MultiPolygon", "coordinates": [[[[0, 0], [2, 0], [2, 2], [0, 0]]]] } },
                { "type": "Feature", "properties": {}, "geometry": { "type": "Point", "coordinates": [1, 1] } }
            ],
            "crs": { "type": "name" }
        }"#;
        let collection = read_from_str(text).unwrap();
        let value = collection.to_geojson();

        assert_eq!(value["features"][0]["id"], "a");
        assert_eq!(value["features"][0]["geometry"]["coordinates"][0][0][2][0], 2.0);
        assert_eq!(value["features"][1]["geometry"]["type"], "Point");
        assert_eq!(value["crs"]["type"], "name");

        let reparsed = read_from_str(&value.to_string()).unwrap();
        assert_eq!(reparsed, collection);
    }
}
