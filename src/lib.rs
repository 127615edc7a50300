#![doc = "choroscad: GeoJSON choropleths as extruded OpenSCAD models"]
mod builder;
mod config;
mod error;
mod report;

pub mod data;
pub mod geojson;
pub mod geom;
pub mod scad;

#[doc(inline)]
pub use builder::ScadBuilder;

#[doc(inline)]
pub use config::ScadOptions;

#[doc(inline)]
pub use error::{ErrorKind, Prerequisite, ScadError};

#[doc(inline)]
pub use geojson::{Feature, FeatureCollection, Geometry, Ring};
