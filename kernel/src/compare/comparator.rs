//! Comparison strategies.
//!
//! A [`Comparator`] turns (reference path, actual artifact) into an
//! [`Outcome`]. The actual artifact is supplied lazily so each strategy
//! controls ordering: byte equality reads the golden file first, external
//! diff only checks that it exists and hands its path to the tool.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::compare::digest::ContentDigest;
use crate::compare::outcome::Outcome;
use crate::error::GoldenError;
use crate::io::binary::read_binary;
use crate::io::scoped_temp::with_scoped_temp_file;
use crate::process::diff_runner::{run_diff, DiffCommand};

/// Maximum number of actual-output bytes rendered into a string-vs-file
/// mismatch diagnostic.
pub const MAX_RENDERED_BYTES: usize = 4096;

/// Builds an external diff command line from (reference path, actual path).
pub type CommandBuilder = Arc<dyn Fn(&Path, &Path) -> Vec<String> + Send + Sync>;

/// Actual output, as produced for one comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actual {
    /// Output already on disk.
    File(PathBuf),
    /// Output held in memory.
    Bytes(Vec<u8>),
}

/// How reference and actual output are compared.
#[derive(Clone)]
pub enum Comparator {
    /// Exact byte equality.
    ByteEquality,
    /// Delegate to an external program; exit status 0 means equal.
    ExternalDiff(CommandBuilder),
}

impl std::fmt::Debug for Comparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ByteEquality => f.write_str("ByteEquality"),
            Self::ExternalDiff(_) => f.write_str("ExternalDiff(..)"),
        }
    }
}

/// Temp-file name template for materialized output: `<basename>.actual`.
#[must_use]
pub fn actual_name_template(reference: &Path) -> String {
    let base = reference
        .file_name()
        .map_or_else(|| "golden".to_string(), |n| n.to_string_lossy().into_owned());
    format!("{base}.actual")
}

/// Stand-in actual path used to validate a command builder before any
/// temp file exists.
#[must_use]
pub fn placeholder_actual_path(reference: &Path) -> PathBuf {
    std::env::temp_dir().join(actual_name_template(reference))
}

impl Comparator {
    /// Wrap a command-builder closure.
    pub fn external_diff<F>(builder: F) -> Self
    where
        F: Fn(&Path, &Path) -> Vec<String> + Send + Sync + 'static,
    {
        Self::ExternalDiff(Arc::new(builder))
    }

    /// Ask the builder for a command and validate it. `ByteEquality` never
    /// has a command and yields `None`.
    ///
    /// # Errors
    ///
    /// Returns [`GoldenError::Config`] if the builder yields an empty command.
    pub fn diff_command(
        &self,
        reference: &Path,
        actual: &Path,
    ) -> Result<Option<DiffCommand>, GoldenError> {
        match self {
            Self::ByteEquality => Ok(None),
            Self::ExternalDiff(builder) => DiffCommand::new(builder(reference, actual)).map(Some),
        }
    }

    /// Compare the golden file at `reference` with the output `produce` yields.
    ///
    /// # Errors
    ///
    /// - [`GoldenError::Io`]: reference or output unreadable, temp file failure
    /// - [`GoldenError::Config`]: diff command builder returned an empty command
    /// - [`GoldenError::Process`]: diff program could not be run
    /// - whatever `produce` returns
    pub fn compare(
        &self,
        reference: &Path,
        produce: impl FnOnce() -> Result<Actual, GoldenError>,
    ) -> Result<Outcome, GoldenError> {
        match self {
            Self::ByteEquality => {
                let expected = read_binary(reference)?;
                match produce()? {
                    Actual::File(path) => {
                        let actual = read_binary(&path)?;
                        Ok(Outcome::from_failure(
                            (actual != expected)
                                .then(|| files_differ(reference, &path, &expected, &actual)),
                        ))
                    }
                    Actual::Bytes(actual) => Ok(Outcome::from_failure(
                        (actual != expected).then(|| output_differs(reference, &actual)),
                    )),
                }
            }
            Self::ExternalDiff(_) => {
                std::fs::metadata(reference).map_err(|e| GoldenError::io(reference, &e))?;
                match produce()? {
                    Actual::File(path) => self.run_external(reference, &path),
                    Actual::Bytes(bytes) => {
                        with_scoped_temp_file(&actual_name_template(reference), |path, file| {
                            file.write_all(&bytes)
                                .and_then(|()| file.flush())
                                .map_err(|e| GoldenError::io(path, &e))?;
                            self.run_external(reference, path)
                        })?
                    }
                }
            }
        }
    }

    fn run_external(&self, reference: &Path, actual: &Path) -> Result<Outcome, GoldenError> {
        let Some(command) = self.diff_command(reference, actual)? else {
            return Err(GoldenError::Config {
                detail: "byte-equality comparator has no diff command".into(),
            });
        };
        Ok(run_diff(&command)?.into_outcome(&command, reference))
    }
}

fn files_differ(reference: &Path, output: &Path, expected: &[u8], actual: &[u8]) -> String {
    format!(
        "Files '{}' and '{}' differ\n  reference: {} bytes, {}\n  actual:    {} bytes, {}",
        reference.display(),
        output.display(),
        expected.len(),
        ContentDigest::of(expected),
        actual.len(),
        ContentDigest::of(actual),
    )
}

fn output_differs(reference: &Path, actual: &[u8]) -> String {
    format!(
        "Test output was different from '{}'. It was:\n{}",
        reference.display(),
        render_bytes(actual)
    )
}

/// Lossy UTF-8 rendering, truncated to [`MAX_RENDERED_BYTES`].
fn render_bytes(bytes: &[u8]) -> String {
    if bytes.len() <= MAX_RENDERED_BYTES {
        return String::from_utf8_lossy(bytes).into_owned();
    }
    format!(
        "{}\n... ({} more bytes)",
        String::from_utf8_lossy(&bytes[..MAX_RENDERED_BYTES]),
        bytes.len() - MAX_RENDERED_BYTES
    )
}
