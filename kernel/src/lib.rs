//! Golden Kernel: the comparison engine beneath golden-file tests.
//!
//! # API Surface
//!
//! - [`io::binary`] -- byte-exact reads and writes of golden and output files
//! - [`io::scoped_temp::with_scoped_temp_file`] -- temp file that lives for one closure call
//! - [`process::diff_runner::run_diff`] -- spawn an external comparator, drain, wait, classify
//! - [`compare::comparator::Comparator::compare`] -- byte equality or external diff → [`compare::outcome::Outcome`]
//!
//! # Module Dependency Direction
//!
//! `error` ← `io` ← `compare::comparator` → `process`
//!
//! `process` returns `compare::outcome::Outcome` values and depends on
//! nothing else in `compare`.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod compare;
pub mod error;
pub mod io;
pub mod process;
