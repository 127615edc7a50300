mod feature;
mod read;
mod write;

pub use feature::{Feature, FeatureCollection, Geometry, Ring};
pub use read::{read_from_path, read_from_str};
