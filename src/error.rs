use std::path::PathBuf;

use thiserror::Error;

/// A pipeline step that has to run before another one can.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Prerequisite {
    /// No GeoJSON document has been read.
    EmptyDocument,
    /// The document has no `features` member.
    MissingFeaturesMember,
    /// The feature list is empty (never extracted, or extracted from an empty collection).
    EmptyFeatures,
    /// No bound data key has been set.
    BoundDataNotFound,
}

impl Prerequisite {
    /// Message naming the missing step and the call that supplies it.
    pub fn message(self) -> &'static str {
        match self {
            Self::EmptyDocument =>
                "raw_json_data cannot be empty. Perhaps you forgot to read GeoJSON data?",
            Self::MissingFeaturesMember =>
                "GeoJSON document has no 'features' member. Perhaps the input is not a FeatureCollection?",
            Self::EmptyFeatures =>
                "features list cannot be empty. Perhaps you forgot to call extract_features()?",
            Self::BoundDataNotFound =>
                "bound_data_key_name cannot be empty. Perhaps you forgot to bind data to the model?",
        }
    }
}

/// Broad category of a [`ScadError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Parse,
    Io,
    State,
    Config,
}

#[derive(Debug, Error)]
pub enum ScadError {
    /// The input document is not valid GeoJSON for this pipeline.
    #[error("[parse] {0}")]
    Parse(String),

    /// A file could not be read or written.
    #[error("[io] {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An operation ran before a step it depends on.
    #[error("[state] {}", .0.message())]
    State(Prerequisite),

    /// A parameter or parameter combination is unusable.
    #[error("[config] {0}")]
    Config(String),
}

impl ScadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse(_) => ErrorKind::Parse,
            Self::Io { .. } => ErrorKind::Io,
            Self::State(_) => ErrorKind::State,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// Recover the kind of a crate error carried by an `anyhow::Error`.
    pub fn kind_of(err: &anyhow::Error) -> Option<ErrorKind> {
        err.downcast_ref::<ScadError>().map(ScadError::kind)
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
