//! Per-test reports for harness output and archival.
//!
//! A report serializes to a single JSON object:
//!
//! ```json
//! {"name":"hello","reference":"tests/golden/hello.txt","mode":"compare",
//!  "status":"fail","diagnostic":"Test output was different from ...","digest":null}
//! ```

use std::path::PathBuf;

use golden_kernel::compare::digest::ContentDigest;
use serde_json::json;

use crate::mode::RunMode;

/// Final status of one golden test run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStatus {
    /// Output matched the golden file.
    Pass,
    /// Output differed from the golden file.
    Fail,
    /// The test could not be evaluated (I/O, process, action).
    Error,
    /// The test is misconfigured, e.g. its diff command is empty. Fatal:
    /// accepting cannot fix it.
    ConfigError,
    /// Accept mode rewrote the golden file.
    Accepted,
}

impl ReportStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Error => "error",
            Self::ConfigError => "config_error",
            Self::Accepted => "accepted",
        }
    }
}

/// Outcome of one golden test run, including failures and errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestReport {
    pub name: String,
    /// Golden file path.
    pub reference: PathBuf,
    pub mode: RunMode,
    pub status: ReportStatus,
    /// Mismatch diagnostic or error message.
    pub diagnostic: Option<String>,
    /// Digest of the bytes written in accept mode.
    pub digest: Option<ContentDigest>,
}

impl TestReport {
    /// Whether the run should count as success for the harness.
    #[must_use]
    pub fn passed(&self) -> bool {
        matches!(self.status, ReportStatus::Pass | ReportStatus::Accepted)
    }

    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "name": self.name,
            "reference": self.reference.to_string_lossy(),
            "mode": self.mode.as_str(),
            "status": self.status.as_str(),
            "diagnostic": self.diagnostic,
            "digest": self.digest.as_ref().map(ContentDigest::as_str),
        })
    }

    /// Compact single-line JSON, suitable for JSONL logs.
    #[must_use]
    pub fn to_json_line(&self) -> String {
        self.to_json().to_string()
    }
}

impl std::fmt::Display for TestReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} ({})",
            self.name,
            self.status.as_str(),
            self.reference.display()
        )?;
        if let Some(diagnostic) = &self.diagnostic {
            write!(f, ":\n{diagnostic}")?;
        }
        Ok(())
    }
}
