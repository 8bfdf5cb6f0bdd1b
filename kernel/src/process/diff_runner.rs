//! External diff invocation.
//!
//! # Protocol
//!
//! ```text
//! DiffCommand::new(argv)      : reject empty argv (configuration error)
//!   → spawn(argv[0], argv[1..]) with stdout piped, stdin null, stderr inherited
//!   → read stdout to EOF
//!   → wait()
//!   → exit 0 = Pass, anything else = Fail(command + reference + captured stdout)
//! ```
//!
//! Stdout is drained completely before the child is awaited. A comparator
//! that writes more than the pipe buffer holds would otherwise block on
//! write while we block on `wait()`.

use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};

use tracing::debug;

use crate::compare::outcome::Outcome;
use crate::error::GoldenError;

/// A validated, non-empty external command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffCommand {
    argv: Vec<String>,
}

impl DiffCommand {
    /// Validate a command line.
    ///
    /// # Errors
    ///
    /// Returns [`GoldenError::Config`] if `argv` is empty or names an empty
    /// program.
    pub fn new(argv: Vec<String>) -> Result<Self, GoldenError> {
        match argv.first() {
            None => Err(GoldenError::Config {
                detail: "external diff command is empty".into(),
            }),
            Some(program) if program.is_empty() => Err(GoldenError::Config {
                detail: "external diff command has an empty program name".into(),
            }),
            Some(_) => Ok(Self { argv }),
        }
    }

    /// The executable (first element).
    #[must_use]
    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    /// Arguments after the program.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.argv[1..]
    }
}

impl std::fmt::Display for DiffCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.argv.join(" "))
    }
}

/// Exit status plus everything the comparator wrote to stdout.
#[derive(Debug, Clone)]
pub struct ExternalProcessResult {
    /// Termination status of the comparator.
    pub status: ExitStatus,
    /// Complete stdout, read to EOF before the process was awaited.
    pub captured: Vec<u8>,
}

impl ExternalProcessResult {
    /// Whether the comparator reported agreement.
    #[must_use]
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Exit code, or `None` if the process was terminated by a signal.
    #[must_use]
    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }

    /// Captured stdout as text (lossy UTF-8).
    #[must_use]
    pub fn captured_text(&self) -> String {
        String::from_utf8_lossy(&self.captured).into_owned()
    }

    /// Classify the result: success is `Pass`, any other status is `Fail`
    /// with the command line and reference path ahead of the captured output.
    #[must_use]
    pub fn into_outcome(self, command: &DiffCommand, reference: &Path) -> Outcome {
        if self.success() {
            return Outcome::Pass;
        }
        Outcome::Fail(format!(
            "`{command}` reported a difference against {} ({}):\n{}",
            reference.display(),
            self.status,
            self.captured_text()
        ))
    }
}

/// Kills and reaps the child if it is dropped before `wait` completed.
struct ChildGuard {
    child: Child,
    reaped: bool,
}

impl ChildGuard {
    fn wait(mut self) -> std::io::Result<ExitStatus> {
        let status = self.child.wait()?;
        self.reaped = true;
        Ok(status)
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if !self.reaped {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}

fn process_error(command: &DiffCommand, stage: &str, err: &std::io::Error) -> GoldenError {
    GoldenError::Process {
        program: command.program().to_string(),
        detail: format!("{stage}: {err}"),
    }
}

/// Run the comparator to completion and capture its stdout.
///
/// # Errors
///
/// Returns [`GoldenError::Process`] if the program cannot be spawned, its
/// output cannot be read, or it cannot be awaited. A non-zero exit is not
/// an error; it is reported through [`ExternalProcessResult::status`].
pub fn run_diff(command: &DiffCommand) -> Result<ExternalProcessResult, GoldenError> {
    debug!(command = %command, "spawning external comparator");

    let child = Command::new(command.program())
        .args(command.args())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|e| process_error(command, "spawn", &e))?;
    let mut guard = ChildGuard {
        child,
        reaped: false,
    };

    let mut captured = Vec::new();
    {
        let mut stdout = guard.child.stdout.take().ok_or_else(|| GoldenError::Process {
            program: command.program().to_string(),
            detail: "stdout was not captured".into(),
        })?;
        stdout
            .read_to_end(&mut captured)
            .map_err(|e| process_error(command, "read stdout", &e))?;
    }

    let status = guard
        .wait()
        .map_err(|e| process_error(command, "wait", &e))?;
    debug!(
        command = %command,
        %status,
        captured_bytes = captured.len(),
        "external comparator finished"
    );

    Ok(ExternalProcessResult { status, captured })
}
