//! Comparison outcome.

/// Result of a completed comparison. There is no inconclusive state:
/// anything that prevents a verdict is a [`crate::error::GoldenError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Actual output matches the golden file.
    Pass,
    /// Actual output differs; the string explains how.
    Fail(String),
}

impl Outcome {
    /// Build an outcome from an optional failure message (`None` = pass).
    #[must_use]
    pub fn from_failure(message: Option<String>) -> Self {
        message.map_or(Self::Pass, Self::Fail)
    }

    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// The failure diagnostic, if any.
    #[must_use]
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            Self::Pass => None,
            Self::Fail(message) => Some(message),
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pass => f.write_str("pass"),
            Self::Fail(message) => write!(f, "fail: {message}"),
        }
    }
}
