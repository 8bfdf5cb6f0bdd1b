//! Lock tests for the four golden-test constructors.
//!
//! Each constructor is run against real files in a temp directory; diff
//! variants use the `byte_diff` fixture binary as their external comparator.

use std::path::Path;

use golden_harness::contract::ActionError;
use golden_harness::golden::{
    compare_file_vs_file, compare_string_vs_file, diff_file_vs_file, diff_string_vs_file,
};
use golden_harness::mode::RunMode;
use golden_harness::runner::{compare, run};
use golden_kernel::compare::outcome::Outcome;
use golden_kernel::error::GoldenError;
use lock_tests::test_helpers::{byte_diff_command, init_tracing, write_golden};

fn bytes(b: &'static [u8]) -> impl Fn() -> Result<Vec<u8>, ActionError> + Send + Sync {
    move || Ok(b.to_vec())
}

// ---------------------------------------------------------------------------
// compare-string-vs-file
// ---------------------------------------------------------------------------

#[test]
fn string_vs_file_hello_passes() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let reference = write_golden(dir.path(), "hello.golden", b"hello\n");

    let test = compare_string_vs_file("hello", &reference, bytes(b"hello\n"));
    assert_eq!(compare(&test).unwrap(), Outcome::Pass);
}

#[test]
fn string_vs_file_hello_bang_fails_with_path_and_content() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let reference = write_golden(dir.path(), "hello.golden", b"hello\n");

    let test = compare_string_vs_file("hello", &reference, bytes(b"hello!\n"));
    let outcome = compare(&test).unwrap();
    let diagnostic = outcome.diagnostic().expect("mismatch must fail");

    assert!(diagnostic.contains(&reference.display().to_string()));
    assert!(diagnostic.contains("hello!"));
}

#[test]
fn string_vs_file_crlf_is_not_normalized() {
    let dir = tempfile::tempdir().unwrap();
    let reference = write_golden(dir.path(), "crlf.golden", b"a\r\nb\r\n");

    let same = compare_string_vs_file("crlf", &reference, bytes(b"a\r\nb\r\n"));
    assert_eq!(compare(&same).unwrap(), Outcome::Pass);

    let unix = compare_string_vs_file("lf", &reference, bytes(b"a\nb\n"));
    assert!(!compare(&unix).unwrap().is_pass());
}

#[test]
fn string_vs_file_missing_reference_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let reference = dir.path().join("never_blessed.golden");

    let test = compare_string_vs_file("missing", &reference, bytes(b"anything"));
    let err = compare(&test).unwrap_err();
    assert!(matches!(err, GoldenError::Io { ref path, .. } if path == &reference));
}

#[test]
fn string_vs_file_producer_error_propagates() {
    let dir = tempfile::tempdir().unwrap();
    let reference = write_golden(dir.path(), "p.golden", b"x");

    let test = compare_string_vs_file("broken", &reference, || {
        Err::<Vec<u8>, ActionError>("renderer exploded".into())
    });
    let err = compare(&test).unwrap_err();
    assert_eq!(
        err,
        GoldenError::Action {
            detail: "renderer exploded".into()
        }
    );
}

// ---------------------------------------------------------------------------
// compare-file-vs-file
// ---------------------------------------------------------------------------

#[test]
fn file_vs_file_runs_action_then_compares() {
    let dir = tempfile::tempdir().unwrap();
    let reference = write_golden(dir.path(), "report.golden", b"rows=3\n");
    let output = dir.path().join("report.out");
    let target = output.clone();

    let test = compare_file_vs_file("report", &reference, &output, move || {
        std::fs::write(&target, b"rows=3\n")
    });
    assert_eq!(compare(&test).unwrap(), Outcome::Pass);
    assert!(output.exists(), "action must have created the output file");
}

#[test]
fn file_vs_file_mismatch_names_both_files() {
    let dir = tempfile::tempdir().unwrap();
    let reference = write_golden(dir.path(), "report.golden", b"rows=3\n");
    let output = dir.path().join("report.out");
    let target = output.clone();

    let test = compare_file_vs_file("report", &reference, &output, move || {
        std::fs::write(&target, b"rows=4\n")
    });
    let outcome = compare(&test).unwrap();
    let diagnostic = outcome.diagnostic().unwrap();
    assert!(diagnostic.contains("report.golden"));
    assert!(diagnostic.contains("report.out"));
    assert!(diagnostic.contains("sha256:"));
}

#[test]
fn file_vs_file_action_that_skips_output_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let reference = write_golden(dir.path(), "r.golden", b"x");
    let output = dir.path().join("r.out");

    let test = compare_file_vs_file("lazy", &reference, &output, || Ok::<(), ActionError>(()));
    let err = compare(&test).unwrap_err();
    assert!(matches!(err, GoldenError::Io { ref path, .. } if path == &output));
}

// ---------------------------------------------------------------------------
// diff-file-vs-file
// ---------------------------------------------------------------------------

#[test]
fn diff_file_vs_file_pass_and_fail() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let reference = write_golden(dir.path(), "tree.golden", b"root\n  leaf\n");
    let output = dir.path().join("tree.out");

    let target = output.clone();
    let pass = diff_file_vs_file("tree", byte_diff_command, &reference, &output, move || {
        std::fs::write(&target, b"root\n  leaf\n")
    })
    .unwrap();
    assert_eq!(compare(&pass).unwrap(), Outcome::Pass);

    let target = output.clone();
    let fail = diff_file_vs_file("tree", byte_diff_command, &reference, &output, move || {
        std::fs::write(&target, b"root\n  leaf!\n")
    })
    .unwrap();
    let outcome = compare(&fail).unwrap();
    let diagnostic = outcome.diagnostic().unwrap();
    assert!(diagnostic.contains("byte_diff"), "command line prefix: {diagnostic}");
    assert!(diagnostic.contains(&format!("actual={}", output.display())));
    assert!(diagnostic.contains("first_difference=11"));
}

#[test]
fn diff_file_vs_file_missing_reference_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let reference = dir.path().join("absent.golden");
    let output = dir.path().join("absent.out");
    let target = output.clone();

    let test = diff_file_vs_file("absent", byte_diff_command, &reference, &output, move || {
        std::fs::write(&target, b"x")
    })
    .unwrap();
    assert!(matches!(compare(&test).unwrap_err(), GoldenError::Io { .. }));
}

#[test]
fn diff_with_missing_program_is_process_error() {
    let dir = tempfile::tempdir().unwrap();
    let reference = write_golden(dir.path(), "p.golden", b"x");

    let test = diff_string_vs_file(
        "no_tool",
        |r: &Path, a: &Path| {
            vec![
                "golden-lock-no-such-diff-tool".into(),
                r.display().to_string(),
                a.display().to_string(),
            ]
        },
        &reference,
        bytes(b"x"),
    )
    .unwrap();
    assert!(matches!(compare(&test).unwrap_err(), GoldenError::Process { .. }));
}

// ---------------------------------------------------------------------------
// diff-string-vs-file
// ---------------------------------------------------------------------------

#[test]
fn diff_string_vs_file_pass_and_fail() {
    let dir = tempfile::tempdir().unwrap();
    let reference = write_golden(dir.path(), "greeting.golden", b"hello\n");

    let pass = diff_string_vs_file("greeting", byte_diff_command, &reference, bytes(b"hello\n"))
        .unwrap();
    assert_eq!(run(&pass, RunMode::Compare).unwrap(), Outcome::Pass);

    let fail = diff_string_vs_file("greeting", byte_diff_command, &reference, bytes(b"hello!\n"))
        .unwrap();
    let outcome = run(&fail, RunMode::Compare).unwrap();
    let diagnostic = outcome.diagnostic().unwrap();
    assert!(diagnostic.contains(&reference.display().to_string()));
    assert!(diagnostic.contains("greeting.golden"));
    assert!(diagnostic.contains(".actual"));
    assert!(diagnostic.contains("first_difference=5"));
}

#[test]
fn diff_string_vs_file_empty_command_is_config_error() {
    let err = diff_string_vs_file(
        "empty",
        |_: &Path, _: &Path| Vec::new(),
        "golden/never_used.golden",
        bytes(b"x"),
    )
    .unwrap_err();
    assert!(err.is_config(), "got {err:?}");
}

#[test]
fn diff_file_vs_file_empty_command_is_config_error() {
    let err = diff_file_vs_file(
        "empty",
        |_: &Path, _: &Path| Vec::new(),
        "golden/never_used.golden",
        "out/never_used.out",
        || Ok::<(), ActionError>(()),
    )
    .unwrap_err();
    assert!(err.is_config(), "got {err:?}");
}
