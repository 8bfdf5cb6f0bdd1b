//! Cross-process lock tests for the external diff protocol.
//!
//! Spawns the `flood_diff` fixture, which writes several megabytes to
//! stdout, far beyond any pipe buffer. The runner must drain stdout before
//! waiting for exit; otherwise both processes block and the watchdog fires.

use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

use golden_harness::golden::diff_string_vs_file;
use golden_harness::runner::compare;
use golden_kernel::compare::outcome::Outcome;
use golden_kernel::error::GoldenError;
use golden_kernel::process::diff_runner::{run_diff, DiffCommand};
use lock_tests::test_helpers::{fixture_binary, init_tracing, write_golden};

const FLOOD_BYTES: usize = 8 * 1024 * 1024;
const WATCHDOG: Duration = Duration::from_secs(120);

fn flood_command(exit_code: i32) -> Vec<String> {
    vec![
        fixture_binary("flood_diff").to_string_lossy().into_owned(),
        FLOOD_BYTES.to_string(),
        exit_code.to_string(),
    ]
}

/// Run `f` on a worker thread and fail the test if it does not finish in time.
fn with_watchdog<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let _ = tx.send(f());
    });
    rx.recv_timeout(WATCHDOG)
        .expect("external diff did not finish: stdout was not drained before wait")
}

// --- DIFF-DEADLOCK-FREEDOM ---

#[test]
fn flood_output_with_failure_is_captured_in_full() {
    init_tracing();
    let command = DiffCommand::new(flood_command(1)).unwrap();

    let result = with_watchdog(move || run_diff(&command).unwrap());

    assert_eq!(result.code(), Some(1));
    assert_eq!(result.captured.len(), FLOOD_BYTES + "END-OF-FLOOD\n".len());
    assert!(result.captured.starts_with(b"flood 00000000\n"));
    assert!(result.captured.ends_with(b"END-OF-FLOOD\n"));
}

#[test]
fn flood_output_with_success_is_pass() {
    let command = DiffCommand::new(flood_command(0)).unwrap();

    let outcome = with_watchdog(move || {
        let result = run_diff(&command).unwrap();
        result.into_outcome(&command, Path::new("flood.golden"))
    });
    assert_eq!(outcome, Outcome::Pass);
}

#[test]
fn flood_through_string_diff_lands_in_diagnostic() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let reference = write_golden(dir.path(), "flood.golden", b"tiny\n");

    let test = diff_string_vs_file(
        "flood",
        |r: &Path, a: &Path| {
            let mut argv = flood_command(3);
            argv.push(r.display().to_string());
            argv.push(a.display().to_string());
            argv
        },
        &reference,
        || Ok::<_, std::io::Error>(b"tiny?\n".to_vec()),
    )
    .unwrap();

    let outcome = with_watchdog(move || compare(&test).unwrap());
    let diagnostic = outcome.diagnostic().expect("exit 3 must fail");

    assert!(diagnostic.contains("flood.golden"));
    assert!(diagnostic.len() > FLOOD_BYTES);
    assert!(diagnostic.ends_with("END-OF-FLOOD\n"));
}

// --- DIFF-EMPTY-COMMAND-GUARD ---

#[test]
fn empty_command_never_spawns() {
    let err = DiffCommand::new(Vec::new()).unwrap_err();
    assert!(matches!(err, GoldenError::Config { .. }));
}
