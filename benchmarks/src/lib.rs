//! Shared helpers for golden benchmark suites.

use std::path::PathBuf;

use golden_harness::golden::{compare_string_vs_file, GoldenTest};
use golden_kernel::io::binary::write_binary;
use tempfile::TempDir;

/// A golden file in its own temp directory.
pub struct GoldenFixture {
    /// Keeps the directory alive for the duration of the benchmark.
    pub dir: TempDir,
    /// Path of the golden file.
    pub reference: PathBuf,
}

/// Deterministic pseudo-text payload of `len` bytes with CRLF line breaks.
#[must_use]
pub fn payload(len: usize) -> Vec<u8> {
    let line = b"golden benchmark payload line\r\n";
    line.iter().copied().cycle().take(len).collect()
}

/// Write `payload(len)` as a golden file in a fresh temp directory.
///
/// # Panics
///
/// Panics if the temp directory or file cannot be created. Benchmark setup
/// failures are fatal.
#[must_use]
pub fn golden_fixture(len: usize) -> GoldenFixture {
    let dir = tempfile::tempdir().expect("create benchmark temp dir");
    let reference = dir.path().join("bench.golden");
    write_binary(&reference, &payload(len)).expect("write benchmark golden file");
    GoldenFixture { dir, reference }
}

/// A string-vs-file test whose producer returns `bytes`.
#[must_use]
pub fn string_test(fixture: &GoldenFixture, bytes: Vec<u8>) -> GoldenTest {
    compare_string_vs_file("bench", &fixture.reference, move || {
        Ok::<_, std::io::Error>(bytes.clone())
    })
}
