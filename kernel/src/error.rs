//! Typed golden-test errors.
//!
//! `GoldenError` covers everything that prevents a comparison from producing
//! an [`crate::compare::outcome::Outcome`]. An ordinary mismatch is not an
//! error; it is `Outcome::Fail`.

use std::path::{Path, PathBuf};

/// Failure that aborts a golden comparison or update before an outcome exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoldenError {
    /// Invalid test configuration (e.g. an empty external diff command).
    /// Fatal: raised at construction or before any subprocess is spawned.
    Config { detail: String },
    /// File-system failure on a reference, output, or temporary artifact.
    Io { path: PathBuf, detail: String },
    /// The external comparator could not be spawned, drained, or awaited.
    Process { program: String, detail: String },
    /// A caller-supplied action failed while producing actual output.
    Action { detail: String },
}

impl GoldenError {
    /// Build an `Io` variant from a path and the underlying error.
    pub fn io(path: impl AsRef<Path>, err: &std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            detail: err.to_string(),
        }
    }

    /// Whether this is a fatal configuration error rather than a test error.
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

impl std::fmt::Display for GoldenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config { detail } => write!(f, "configuration error: {detail}"),
            Self::Io { path, detail } => write!(f, "I/O error on {}: {detail}", path.display()),
            Self::Process { program, detail } => {
                write!(f, "external comparator `{program}` failed: {detail}")
            }
            Self::Action { detail } => write!(f, "action failed: {detail}"),
        }
    }
}

impl std::error::Error for GoldenError {}
