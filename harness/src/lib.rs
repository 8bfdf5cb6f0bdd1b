//! Golden Harness: golden-file tests on top of the kernel.
//!
//! The harness declares golden tests (four constructors), runs them in
//! compare or accept mode, and reports the result. It does NOT compare
//! bytes or spawn comparators itself; it delegates to the kernel.
//! Actual-output sources provide data only; the runner owns orchestration.
//!
//! ```no_run
//! use golden_harness::golden::compare_string_vs_file;
//! use golden_harness::runner::assert_golden;
//!
//! let test = compare_string_vs_file("greeting", "tests/golden/greeting.txt", || {
//!     Ok::<_, std::io::Error>(b"hello\n".to_vec())
//! });
//! assert_golden(&test);
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod contract;
pub mod golden;
pub mod mode;
pub mod report;
pub mod runner;
