//! External comparator processes.

pub mod diff_runner;
