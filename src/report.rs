/// Pipeline milestones reported to stderr when the builder is verbose.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Status {
    Read,
    Extracted,
    SimplifyStarted,
    Simplified,
    Transformed,
    Offset,
    Bound,
    Scaled,
    Written,
}

impl Status {
    pub(crate) fn tag(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Extracted => "extract",
            Self::SimplifyStarted | Self::Simplified => "simplify",
            Self::Transformed => "transform",
            Self::Offset => "offset",
            Self::Bound => "bind",
            Self::Scaled => "scale",
            Self::Written => "write",
        }
    }

    pub(crate) fn message(self) -> &'static str {
        match self {
            Self::Read => "Read JSON data into dictionary with keys: ",
            Self::Extracted => "Extracted GeoJSON features, count: ",
            Self::SimplifyStarted => "Running geometry simplification...",
            Self::Simplified => "Finished geometry simplification, new number of points: ",
            Self::Transformed => "Finished transformation",
            Self::Offset => "Finished offset",
            Self::Bound => "Finished data binding, number of features with bound data: ",
            Self::Scaled => "Finished height scaling, [min, max] heights: ",
            Self::Written => "Finished writing to file: ",
        }
    }
}

/// Print a status line if `verbose` is at least `level`.
pub(crate) fn report(verbose: u8, level: u8, status: Status, detail: impl std::fmt::Display) {
    if verbose >= level {
        eprintln!("[{}] {}{}", status.tag(), status.message(), detail);
    }
}
