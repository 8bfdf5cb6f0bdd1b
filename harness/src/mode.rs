//! Run-mode configuration.
//!
//! A golden test either compares (the default) or accepts: rewrites its
//! golden file with the current output. Accept mode is selected from the
//! environment so that `cargo test` needs no extra flags:
//!
//! ```text
//! GOLDEN_ACCEPT=1 cargo test       # bless current output
//! UPDATE_GOLDEN=1 cargo test       # same, conventional spelling
//! ```

/// Primary environment variable selecting accept mode.
pub const ACCEPT_ENV: &str = "GOLDEN_ACCEPT";

/// Alternate spelling, checked when [`ACCEPT_ENV`] is unset.
pub const ACCEPT_ENV_ALIAS: &str = "UPDATE_GOLDEN";

/// How a golden test is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Compare actual output with the golden file; never writes.
    #[default]
    Compare,
    /// Overwrite the golden file with the actual output.
    Accept,
}

impl RunMode {
    /// Read the mode from [`ACCEPT_ENV`], falling back to [`ACCEPT_ENV_ALIAS`].
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// [`from_env`](Self::from_env) over an arbitrary variable source. A set
    /// [`ACCEPT_ENV`] wins over [`ACCEPT_ENV_ALIAS`] even when it is falsy.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = lookup(ACCEPT_ENV).or_else(|| lookup(ACCEPT_ENV_ALIAS));
        Self::from_env_value(value.as_deref())
    }

    /// Interpret a raw variable value: `1`, `true`, `yes`, `on`
    /// (case-insensitive, surrounding whitespace ignored) mean accept.
    #[must_use]
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => Self::Accept,
            _ => Self::Compare,
        }
    }

    /// Stable lowercase name used in reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compare => "compare",
            Self::Accept => "accept",
        }
    }
}
