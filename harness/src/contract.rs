//! Actual-output contract: what a golden test runs to obtain its output.
//!
//! Sources provide output only. They do NOT read golden files, compare,
//! or write golden files (those are comparator/runner concerns). Every
//! call runs the caller's action again; nothing is cached between a
//! comparison and an accept.

use std::path::PathBuf;

use golden_kernel::compare::comparator::Actual;
use golden_kernel::error::GoldenError;
use golden_kernel::io::binary::read_binary;

/// Error type returned by caller-supplied actions.
pub type ActionError = Box<dyn std::error::Error + Send + Sync>;

/// Action that writes the test output to a known file.
pub type OutputAction = Box<dyn Fn() -> Result<(), ActionError> + Send + Sync>;

/// Action that returns the test output directly.
pub type Producer = Box<dyn Fn() -> Result<Vec<u8>, ActionError> + Send + Sync>;

/// Where a golden test's actual output comes from.
pub enum ActualSource {
    /// Run `action`, which creates `path`; the file is the output.
    OutputFile { path: PathBuf, action: OutputAction },
    /// Run the producer; its return value is the output.
    Producer(Producer),
}

impl std::fmt::Debug for ActualSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutputFile { path, .. } => f
                .debug_struct("OutputFile")
                .field("path", path)
                .finish_non_exhaustive(),
            Self::Producer(_) => f.write_str("Producer(..)"),
        }
    }
}

fn action_failed(err: &ActionError) -> GoldenError {
    GoldenError::Action {
        detail: err.to_string(),
    }
}

impl ActualSource {
    /// Run the action and describe the output for a comparator. File output
    /// is left on disk for the comparator to read or hand to a diff tool.
    ///
    /// # Errors
    ///
    /// Returns [`GoldenError::Action`] if the caller's action fails.
    pub fn produce(&self) -> Result<Actual, GoldenError> {
        match self {
            Self::OutputFile { path, action } => {
                action().map_err(|e| action_failed(&e))?;
                Ok(Actual::File(path.clone()))
            }
            Self::Producer(producer) => producer()
                .map(Actual::Bytes)
                .map_err(|e| action_failed(&e)),
        }
    }

    /// Run the action and return the output bytes.
    ///
    /// # Errors
    ///
    /// Returns [`GoldenError::Action`] if the action fails, or
    /// [`GoldenError::Io`] if the output file cannot be read.
    pub fn fresh_bytes(&self) -> Result<Vec<u8>, GoldenError> {
        match self.produce()? {
            Actual::File(path) => read_binary(&path),
            Actual::Bytes(bytes) => Ok(bytes),
        }
    }
}
