use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::error::ScadError;

/// Tunable defaults for a [`ScadBuilder`](crate::ScadBuilder).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScadOptions {
    /// Extrusion height for features without a bound data value.
    pub default_extrude_height: f64,
    /// Epsilon for Ramer-Douglas-Peucker simplification.
    pub rdp_epsilon: f64,
    /// Constant added to every transformed coordinate so neighbouring solids overlap.
    pub seam_offset: f64,
    /// Colors available in color preview mode.
    pub color_bank: Vec<String>,
}

impl Default for ScadOptions {
    fn default() -> Self {
        Self {
            default_extrude_height: 2.0,
            rdp_epsilon: 0.01,
            seam_offset: 0.02,
            color_bank: ["Red", "Green", "Blue", "Brown", "Purple", "Gold", "Orange"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl ScadOptions {
    /// Parse options from a JSON object. Missing fields keep their defaults.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(text)
            .map_err(|e| ScadError::Config(format!("invalid options: {e}")))?;
        options.validate()?;
        Ok(options)
    }

    /// Read options from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ScadError::io(path, e))?;
        Self::from_json_str(&text)
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("default_extrude_height", self.default_extrude_height),
            ("rdp_epsilon", self.rdp_epsilon),
            ("seam_offset", self.seam_offset),
        ] {
            anyhow::ensure!(value.is_finite(), ScadError::Config(format!("{name} must be finite, got {value}")));
        }
        anyhow::ensure!(
            self.rdp_epsilon >= 0.0,
            ScadError::Config(format!("rdp_epsilon must be non-negative, got {}", self.rdp_epsilon))
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn defaults_match_builder_constants() {
        let options = ScadOptions::default();
        assert_eq!(options.default_extrude_height, 2.0);
        assert_eq!(options.rdp_epsilon, 0.01);
        assert_eq!(options.seam_offset, 0.02);
        assert_eq!(options.color_bank.len(), 7);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let options = ScadOptions::from_json_str(r#"{ "seam_offset": 0.0, "color_bank": ["Teal"] }"#).unwrap();
        assert_eq!(options.seam_offset, 0.0);
        assert_eq!(options.color_bank, vec!["Teal".to_string()]);
        assert_eq!(options.rdp_epsilon, 0.01);
    }

    #[test]
    fn rejects_negative_epsilon() {
        let err = ScadOptions::from_json_str(r#"{ "rdp_epsilon": -1.0 }"#).unwrap_err();
        assert_eq!(ScadError::kind_of(&err), Some(ErrorKind::Config));
    }

    #[test]
    fn malformed_json_is_config_error() {
        let err = ScadOptions::from_json_str("{ nope").unwrap_err();
        assert_eq!(ScadError::kind_of(&err), Some(ErrorKind::Config));
    }

    #[test]
    fn reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "default_extrude_height": 3.5 }}"#).unwrap();
        let options = ScadOptions::from_json_file(file.path()).unwrap();
        assert_eq!(options.default_extrude_height, 3.5);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ScadOptions::from_json_file(&dir.path().join("absent.json")).unwrap_err();
        assert_eq!(ScadError::kind_of(&err), Some(ErrorKind::Io));
    }
}
