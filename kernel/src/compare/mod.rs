//! Comparison strategies, their outcome, and content digests for diagnostics.

pub mod comparator;
pub mod digest;
pub mod outcome;
