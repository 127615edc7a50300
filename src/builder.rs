use std::{fs::File, io::{BufWriter, Write}, path::Path};

use anyhow::{ensure, Result};
use serde_json::Value;

use crate::{
    config::ScadOptions,
    data,
    error::{Prerequisite, ScadError},
    geojson::{self, Feature, FeatureCollection},
    geom,
    report::{report, Status},
    scad::{self, EmitOptions, ScadWriter},
};

/// A 3D choropleth model under construction.
///
/// Typical order of calls: read, extract, simplify, transform, bind, scale, write.
/// Each stage mutates the extracted features in place.
#[derive(Clone, Debug)]
pub struct ScadBuilder {
    options: ScadOptions,
    verbose: u8,
    raw: FeatureCollection,
    features: Vec<Feature>,
    num_features: usize,
    bound_data_key_name: String,
    origin: Option<[f64; 2]>,
    scale_factor: f64,
    seam_offset: f64,
    offset_delta: f64,
    is_colored: bool,
}

impl Default for ScadBuilder {
    fn default() -> Self { Self::with_options(ScadOptions::default()) }
}

impl ScadBuilder {
    pub fn new() -> Self { Self::default() }

    pub fn with_options(options: ScadOptions) -> Self {
        Self {
            options,
            verbose: 0,
            raw: FeatureCollection::default(),
            features: Vec::new(),
            num_features: 0,
            bound_data_key_name: String::new(),
            origin: None,
            scale_factor: 1.0,
            seam_offset: 0.0,
            offset_delta: 0.0,
            is_colored: false,
        }
    }

    /// Set the stderr reporting level (0 = silent, 1 = stages, 2 = per-feature progress).
    pub fn verbose(mut self, level: u8) -> Self {
        self.verbose = level;
        self
    }

    #[inline] pub fn options(&self) -> &ScadOptions { &self.options }
    #[inline] pub fn features(&self) -> &[Feature] { &self.features }
    #[inline] pub fn num_features(&self) -> usize { self.num_features }
    #[inline] pub fn bound_data_key_name(&self) -> &str { &self.bound_data_key_name }
    #[inline] pub fn origin(&self) -> Option<[f64; 2]> { self.origin }
    #[inline] pub fn scale_factor(&self) -> f64 { self.scale_factor }
    #[inline] pub fn seam_offset(&self) -> f64 { self.seam_offset }
    #[inline] pub fn offset_delta(&self) -> f64 { self.offset_delta }
    #[inline] pub fn is_colored(&self) -> bool { self.is_colored }

    /// Read a GeoJSON FeatureCollection from a string.
    pub fn read_geojson(&mut self, text: &str) -> Result<()> {
        self.set_raw(geojson::read_from_str(text)?)
    }

    /// Read a GeoJSON FeatureCollection from a file (`.geojson` / `.json`).
    pub fn read_geojson_file(&mut self, path: &Path) -> Result<()> {
        self.set_raw(geojson::read_from_path(path)?)
    }

    fn set_raw(&mut self, raw: FeatureCollection) -> Result<()> {
        report(self.verbose, 1, Status::Read, format!("{:?}", raw.keys()));
        self.raw = raw;
        Ok(())
    }

    /// Copy the `features` array out of the document that was read.
    pub fn extract_features(&mut self) -> Result<usize> {
        ensure!(!self.raw.is_empty(), ScadError::State(Prerequisite::EmptyDocument));
        self.features = self.raw.extract_features()?;
        self.num_features = self.features.len();
        report(self.verbose, 1, Status::Extracted, self.num_features);
        Ok(self.num_features)
    }

    /// Simplify exterior rings with the configured RDP epsilon.
    pub fn simplify(&mut self) -> Result<usize> {
        self.simplify_with(self.options.rdp_epsilon)
    }

    /// Simplify exterior rings with an explicit RDP epsilon. Returns the new point count.
    pub fn simplify_with(&mut self, eps: f64) -> Result<usize> {
        ensure!(!self.features.is_empty(), ScadError::State(Prerequisite::EmptyFeatures));
        report(self.verbose, 1, Status::SimplifyStarted, "");

        let verbose = self.verbose;
        let num_points = geom::simplify_with_progress(&mut self.features, eps, |done, total| {
            if verbose > 1 { eprintln!("[simplify] {done} of {total} complete") }
        })?;

        report(self.verbose, 1, Status::Simplified, num_points);
        Ok(num_points)
    }

    /// Translate by `origin` then scale by `scale_factor`, adding the configured seam offset.
    ///
    /// Must be called at most once: a second call transforms the already
    /// transformed coordinates.
    pub fn transform(&mut self, origin: [f64; 2], scale_factor: f64) -> Result<()> {
        self.transform_with_seam(origin, scale_factor, self.options.seam_offset)
    }

    pub fn transform_with_seam(&mut self, origin: [f64; 2], scale_factor: f64, seam_offset: f64) -> Result<()> {
        let t = geom::transform(&mut self.features, origin, scale_factor, seam_offset)?;
        self.origin = Some(t.origin);
        self.scale_factor = t.scale_factor;
        self.seam_offset = t.seam_offset;
        report(self.verbose, 1, Status::Transformed, "");
        Ok(())
    }

    /// Draw every polygon with its sides offset by `delta`. Zero disables the offset.
    pub fn offset(&mut self, delta: f64) -> Result<()> {
        ensure!(delta.is_finite(), ScadError::Config(format!("offset delta must be finite, got {delta}")));
        self.offset_delta = delta;
        report(self.verbose, 1, Status::Offset, "");
        Ok(())
    }

    /// Bind `values` to features in feature order.
    pub fn bind_data(&mut self, data_key_name: &str, values: &[f64]) -> Result<usize> {
        let num_bound = data::bind_by_position(&mut self.features, data_key_name, values)?;
        self.bound_data_key_name = data_key_name.to_string();
        report(self.verbose, 1, Status::Bound, num_bound);
        Ok(num_bound)
    }

    /// Bind `(id_value, value)` pairs to the features whose `id_key` property matches.
    pub fn bind_data_by_identifier(&mut self, data_key_name: &str, pairs: &[(Value, f64)], id_key: &str) -> Result<usize> {
        let num_matches = data::bind_by_identifier(&mut self.features, data_key_name, pairs, id_key)?;
        self.bound_data_key_name = data_key_name.to_string();
        report(self.verbose, 1, Status::Bound, num_matches);
        Ok(num_matches)
    }

    /// Rescale bound values linearly from `domain` to the height `range`.
    pub fn scale_heights(&mut self, domain: (f64, f64), range: (f64, f64)) -> Result<(f64, f64)> {
        let bounds = data::scale_heights(&mut self.features, &self.bound_data_key_name, domain, range)?;
        report(self.verbose, 1, Status::Scaled, format!("[{}, {}]", bounds.0, bounds.1));
        Ok(bounds)
    }

    /// Give each shape a random color from the configured color bank.
    pub fn color_preview(&mut self) {
        self.is_colored = true;
    }

    /// Generate the OpenSCAD script, drawing preview colors from `rng`.
    pub fn to_scad_with_rng(&self, rng: &mut impl rand::Rng) -> Result<String> {
        let options = EmitOptions {
            default_height: self.options.default_extrude_height,
            offset_delta: self.offset_delta,
            colored: self.is_colored,
            palette: &self.options.color_bank,
        };
        scad::emit(&self.features, &self.bound_data_key_name, &options, rng)
    }

    pub fn to_scad(&self) -> Result<String> {
        self.to_scad_with_rng(&mut rand::rng())
    }

    /// Generate the script and write it to `path`. Returns the number of characters written.
    pub fn write_scad_file(&self, path: &Path) -> Result<usize> {
        let code = self.to_scad()?;
        let written = ScadWriter::new(path)?.write_script(&code)?;
        report(self.verbose, 1, Status::Written, format!("{}, characters written: {written}", path.display()));
        Ok(written)
    }

    /// Current features as a GeoJSON FeatureCollection.
    pub fn to_geojson(&self) -> Result<Value> {
        ensure!(!self.features.is_empty(), ScadError::State(Prerequisite::EmptyFeatures));
        Ok(self.raw.to_geojson_with(&self.features))
    }

    /// Dump the current features to a GeoJSON file, for inspecting intermediate stages.
    pub fn write_geojson_file(&self, path: &Path) -> Result<()> {
        let value = self.to_geojson()?;
        let file = File::create(path).map_err(|e| ScadError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &value)
            .map_err(std::io::Error::from)
            .and_then(|_| writer.flush())
            .map_err(|e| ScadError::io(path, e))?;
        Ok(())
    }
}
