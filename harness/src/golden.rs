//! Golden test declarations and their four constructors.
//!
//! | Constructor | Actual output | Comparator |
//! |---|---|---|
//! | [`compare_file_vs_file`] | file written by an action | byte equality |
//! | [`compare_string_vs_file`] | bytes returned by a producer | byte equality |
//! | [`diff_file_vs_file`] | file written by an action | external diff on (golden, output) |
//! | [`diff_string_vs_file`] | bytes returned by a producer | external diff on (golden, temp file) |
//!
//! Diff-based constructors check the command builder once at construction,
//! so an empty command is reported before any test runs.

use std::path::{Path, PathBuf};

use golden_kernel::compare::comparator::{placeholder_actual_path, Comparator};
use golden_kernel::error::GoldenError;

use crate::contract::{ActionError, ActualSource};

/// One declared golden test. Immutable once built.
#[derive(Debug)]
pub struct GoldenTest {
    name: String,
    reference: PathBuf,
    source: ActualSource,
    comparator: Comparator,
}

impl GoldenTest {
    /// Assemble a test from parts. Diff comparators are validated against
    /// the output path (or a placeholder when output is in memory).
    ///
    /// # Errors
    ///
    /// Returns [`GoldenError::Config`] if an external diff builder yields an
    /// empty command.
    pub fn new(
        name: impl Into<String>,
        reference: impl Into<PathBuf>,
        source: ActualSource,
        comparator: Comparator,
    ) -> Result<Self, GoldenError> {
        let reference = reference.into();
        let stand_in = match &source {
            ActualSource::OutputFile { path, .. } => path.clone(),
            ActualSource::Producer(_) => placeholder_actual_path(&reference),
        };
        comparator.diff_command(&reference, &stand_in)?;
        Ok(Self {
            name: name.into(),
            reference,
            source,
            comparator,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path of the golden file.
    #[must_use]
    pub fn reference(&self) -> &Path {
        &self.reference
    }

    #[must_use]
    pub fn source(&self) -> &ActualSource {
        &self.source
    }

    #[must_use]
    pub fn comparator(&self) -> &Comparator {
        &self.comparator
    }
}

fn output_source<F, E>(output: impl Into<PathBuf>, action: F) -> ActualSource
where
    F: Fn() -> Result<(), E> + Send + Sync + 'static,
    E: Into<ActionError>,
{
    ActualSource::OutputFile {
        path: output.into(),
        action: Box::new(move || action().map_err(Into::into)),
    }
}

fn producer_source<F, E>(producer: F) -> ActualSource
where
    F: Fn() -> Result<Vec<u8>, E> + Send + Sync + 'static,
    E: Into<ActionError>,
{
    ActualSource::Producer(Box::new(move || producer().map_err(Into::into)))
}

/// Run `action` (which writes `output`), then compare `output` with the
/// golden file byte for byte.
pub fn compare_file_vs_file<F, E>(
    name: impl Into<String>,
    reference: impl Into<PathBuf>,
    output: impl Into<PathBuf>,
    action: F,
) -> GoldenTest
where
    F: Fn() -> Result<(), E> + Send + Sync + 'static,
    E: Into<ActionError>,
{
    GoldenTest {
        name: name.into(),
        reference: reference.into(),
        source: output_source(output, action),
        comparator: Comparator::ByteEquality,
    }
}

/// Compare the bytes returned by `producer` with the golden file.
pub fn compare_string_vs_file<F, E>(
    name: impl Into<String>,
    reference: impl Into<PathBuf>,
    producer: F,
) -> GoldenTest
where
    F: Fn() -> Result<Vec<u8>, E> + Send + Sync + 'static,
    E: Into<ActionError>,
{
    GoldenTest {
        name: name.into(),
        reference: reference.into(),
        source: producer_source(producer),
        comparator: Comparator::ByteEquality,
    }
}

/// Run `action` (which writes `output`), then run the command built from
/// `(reference, output)`. Exit status 0 passes.
///
/// # Errors
///
/// Returns [`GoldenError::Config`] if `command` yields an empty command line.
pub fn diff_file_vs_file<C, F, E>(
    name: impl Into<String>,
    command: C,
    reference: impl Into<PathBuf>,
    output: impl Into<PathBuf>,
    action: F,
) -> Result<GoldenTest, GoldenError>
where
    C: Fn(&Path, &Path) -> Vec<String> + Send + Sync + 'static,
    F: Fn() -> Result<(), E> + Send + Sync + 'static,
    E: Into<ActionError>,
{
    GoldenTest::new(
        name,
        reference,
        output_source(output, action),
        Comparator::external_diff(command),
    )
}

/// Write the bytes returned by `producer` to a scoped temp file, then run
/// the command built from `(reference, temp path)`. Exit status 0 passes.
///
/// # Errors
///
/// Returns [`GoldenError::Config`] if `command` yields an empty command line.
pub fn diff_string_vs_file<C, F, E>(
    name: impl Into<String>,
    command: C,
    reference: impl Into<PathBuf>,
    producer: F,
) -> Result<GoldenTest, GoldenError>
where
    C: Fn(&Path, &Path) -> Vec<String> + Send + Sync + 'static,
    F: Fn() -> Result<Vec<u8>, E> + Send + Sync + 'static,
    E: Into<ActionError>,
{
    GoldenTest::new(
        name,
        reference,
        producer_source(producer),
        Comparator::external_diff(command),
    )
}
