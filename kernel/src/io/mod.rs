//! File handling: binary reads/writes and scoped temporary files.

pub mod binary;
pub mod scoped_temp;
