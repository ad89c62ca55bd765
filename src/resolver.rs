//! Destination name collision handling.

use crate::classifier::split_file_name;
use crate::file_organizer::{OrganizeError, OrganizeResult};
use std::path::{Path, PathBuf};

/// Upper bound on numbered candidates tried for a single destination.
pub const MAX_CONFLICT_ATTEMPTS: u32 = 10_000;

/// Returns a destination path that does not currently exist.
///
/// If `candidate` is free it is returned unchanged. Otherwise a counter is
/// inserted between the file stem and the extension (`report.pdf` becomes
/// `report_1.pdf`, then `report_2.pdf`, ...) until a free name is found.
/// A dotfile has an empty stem, so `.bashrc` becomes `_1.bashrc`.
///
/// The check is not atomic with the move that follows it.
///
/// # Errors
///
/// Returns `OrganizeError::TooManyConflicts` after
/// [`MAX_CONFLICT_ATTEMPTS`] taken names.
///
/// # Examples
///
/// ```no_run
/// use fileorg::resolver::resolve_conflict;
/// use std::path::Path;
///
/// let free = resolve_conflict(Path::new("out/Documents/report.pdf"))?;
/// println!("moving to {}", free.display());
/// # Ok::<(), fileorg::OrganizeError>(())
/// ```
pub fn resolve_conflict(candidate: &Path) -> OrganizeResult<PathBuf> {
    resolve_conflict_within(candidate, MAX_CONFLICT_ATTEMPTS)
}

pub(crate) fn resolve_conflict_within(
    candidate: &Path,
    max_attempts: u32,
) -> OrganizeResult<PathBuf> {
    if !exists(candidate) {
        return Ok(candidate.to_path_buf());
    }

    let (stem, extension) = split_file_name(candidate);

    for counter in 1..=max_attempts {
        let mut name = stem.to_os_string();
        name.push(format!("_{counter}"));
        if let Some(ext) = extension {
            name.push(".");
            name.push(ext);
        }

        let numbered = candidate.with_file_name(name);
        if !exists(&numbered) {
            return Ok(numbered);
        }
    }

    Err(OrganizeError::TooManyConflicts {
        path: candidate.to_path_buf(),
        attempts: max_attempts,
    })
}

// Dangling symlinks count as taken: rename would replace them.
fn exists(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}
