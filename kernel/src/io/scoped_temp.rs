//! Scoped temporary files for handing in-memory output to external tools.
//!
//! The file lives exactly as long as the body closure. Removal is tied to
//! the `NamedTempFile` guard, so it happens on normal return, on an error
//! returned by the body, and on panic unwind.

use std::fs::File;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::GoldenError;

/// Split a name template into the `(prefix, suffix)` the temp-file facility
/// wraps around its random part: `out.golden.actual` becomes
/// `("out.golden", ".actual")`.
fn split_template(template: &str) -> (&str, &str) {
    match template.rfind('.') {
        Some(dot) if dot > 0 => template.split_at(dot),
        _ => (template, ""),
    }
}

/// Create a uniquely named file in the platform temp directory, run `body`
/// with its path and a writable handle, then delete it.
///
/// # Errors
///
/// Returns [`GoldenError::Io`] if the file cannot be created. Errors from
/// `body` are carried in `R` and returned untouched.
pub fn with_scoped_temp_file<R>(
    template: &str,
    body: impl FnOnce(&Path, &mut File) -> R,
) -> Result<R, GoldenError> {
    with_scoped_temp_file_in(&std::env::temp_dir(), template, body)
}

/// Like [`with_scoped_temp_file`], but creates the file under `dir`.
///
/// # Errors
///
/// Returns [`GoldenError::Io`] if the file cannot be created.
pub fn with_scoped_temp_file_in<R>(
    dir: &Path,
    template: &str,
    body: impl FnOnce(&Path, &mut File) -> R,
) -> Result<R, GoldenError> {
    let (prefix, suffix) = split_template(template);
    let mut temp = tempfile::Builder::new()
        .prefix(prefix)
        .suffix(suffix)
        .tempfile_in(dir)
        .map_err(|e| GoldenError::io(dir.join(template), &e))?;

    let path = temp.path().to_path_buf();
    debug!(path = %path.display(), "created scoped temp file");

    let result = body(&path, temp.as_file_mut());

    // The body already produced its result; a failed removal is logged, not raised.
    if let Err(e) = temp.close() {
        warn!(path = %path.display(), error = %e, "failed to remove scoped temp file");
    } else {
        debug!(path = %path.display(), "removed scoped temp file");
    }
    Ok(result)
}
