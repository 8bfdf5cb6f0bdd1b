//! Golden runner: executes one golden test in compare or accept mode.
//!
//! # Pipeline
//!
//! ```text
//! Compare: comparator.compare(reference, || source.produce()) → Outcome
//! Accept:  source.fresh_bytes() → create parent dirs → write_binary(reference)
//! ```
//!
//! Compare never writes the golden file. Accept re-runs the source instead
//! of reusing bytes from an earlier comparison.

use golden_kernel::compare::digest::ContentDigest;
use golden_kernel::compare::outcome::Outcome;
use golden_kernel::error::GoldenError;
use golden_kernel::io::binary::write_binary;
use tracing::{debug, info};

use crate::golden::GoldenTest;
use crate::mode::RunMode;
use crate::report::{ReportStatus, TestReport};

/// Compare the test's actual output with its golden file.
///
/// # Errors
///
/// Returns [`GoldenError`] if the golden file, the output, or the external
/// comparator cannot be used. A mismatch is `Ok(Outcome::Fail(..))`.
pub fn compare(test: &GoldenTest) -> Result<Outcome, GoldenError> {
    debug!(test = test.name(), reference = %test.reference().display(), "comparing");
    let outcome = test
        .comparator()
        .compare(test.reference(), || test.source().produce())?;
    debug!(test = test.name(), pass = outcome.is_pass(), "compared");
    Ok(outcome)
}

/// Overwrite the golden file with freshly produced output and return the
/// digest of what was written.
///
/// # Errors
///
/// Returns [`GoldenError`] if the output cannot be produced or the golden
/// file cannot be written. A failed accept is never silent.
pub fn accept(test: &GoldenTest) -> Result<ContentDigest, GoldenError> {
    let bytes = test.source().fresh_bytes()?;
    let reference = test.reference();

    if let Some(parent) = reference.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| GoldenError::io(parent, &e))?;
    }
    write_binary(reference, &bytes)?;

    let digest = ContentDigest::of(&bytes);
    info!(
        test = test.name(),
        reference = %reference.display(),
        bytes = bytes.len(),
        %digest,
        "accepted golden file"
    );
    Ok(digest)
}

/// Run the test in `mode`. Accept mode reports `Pass` once the golden file
/// has been written.
///
/// # Errors
///
/// See [`compare`] and [`accept`].
pub fn run(test: &GoldenTest, mode: RunMode) -> Result<Outcome, GoldenError> {
    match mode {
        RunMode::Compare => compare(test),
        RunMode::Accept => accept(test).map(|_| Outcome::Pass),
    }
}

/// Run the test in `mode` and fold every result (including errors) into a
/// [`TestReport`].
#[must_use]
pub fn run_report(test: &GoldenTest, mode: RunMode) -> TestReport {
    let (status, diagnostic, digest) = match mode {
        RunMode::Compare => match compare(test) {
            Ok(Outcome::Pass) => (ReportStatus::Pass, None, None),
            Ok(Outcome::Fail(message)) => (ReportStatus::Fail, Some(message), None),
            Err(e) => (error_status(&e), Some(e.to_string()), None),
        },
        RunMode::Accept => match accept(test) {
            Ok(digest) => (ReportStatus::Accepted, None, Some(digest)),
            Err(e) => (error_status(&e), Some(e.to_string()), None),
        },
    };
    TestReport {
        name: test.name().to_string(),
        reference: test.reference().to_path_buf(),
        mode,
        status,
        diagnostic,
        digest,
    }
}

fn error_status(err: &GoldenError) -> ReportStatus {
    if err.is_config() {
        ReportStatus::ConfigError
    } else {
        ReportStatus::Error
    }
}

/// Run the test in the mode selected by the environment and panic unless it
/// passed or was accepted. Intended for use inside `#[test]` functions.
///
/// # Panics
///
/// Panics with the diagnostic on mismatch or error.
pub fn assert_golden(test: &GoldenTest) {
    assert_golden_with(test, RunMode::from_env());
}

/// [`assert_golden`] with an explicit mode.
///
/// # Panics
///
/// Panics with the diagnostic on mismatch or error.
pub fn assert_golden_with(test: &GoldenTest, mode: RunMode) {
    let report = run_report(test, mode);
    assert!(
        report.status != ReportStatus::ConfigError,
        "configuration error in golden test {report}"
    );
    assert!(
        report.passed(),
        "{report}\n(rerun with GOLDEN_ACCEPT=1 to accept the current output)"
    );
}
