//! Solution directory layout management.
//!
//! Every solution root holds exactly three managed subdirectories: `pages`,
//! `scripts` and `recordings`. Creation is idempotent, re-ensuring an existing
//! layout is a no-op success.

use crate::domain::error::{DirectoryCreateError, ManagedDirectory};
use crate::domain::Solution;
use std::path::Path;

/// Creates the solution root and its managed subdirectories, recursively.
///
/// Pre-existing directories are accepted. On failure the error names which managed
/// directory could not be created; directories created before the failure are left
/// in place.
///
/// # Errors
///
/// Returns a [`DirectoryCreateError`] for the first directory that could not be
/// created, in the order root, pages, scripts, recordings.
///
/// # Examples
///
/// ```no_run
/// use webweaver_studio::domain::Solution;
/// use webweaver_studio::storage::layout::ensure_directory_structure;
///
/// let solution = Solution::new("Demo", "/tmp/x", true, "https://example.com", "firefox");
/// ensure_directory_structure(&solution)?;
/// assert!(solution.recordings_path().is_dir());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn ensure_directory_structure(solution: &Solution) -> Result<(), DirectoryCreateError> {
    let _span = tracing::debug_span!("ensure_directory_structure",
        root = ?solution.effective_root()
    ).entered();

    for directory in ManagedDirectory::ALL {
        let path = solution.managed_path(directory);
        std::fs::create_dir_all(&path).map_err(|source| {
            tracing::debug!(%directory, path = ?path, error = %source, "directory creation failed");
            DirectoryCreateError {
                directory,
                path: path.clone(),
                source,
            }
        })?;
    }

    tracing::debug!("directory structure ensured");
    Ok(())
}

/// Managed directories that do not currently exist as directories.
///
/// An empty result means the layout is complete.
#[must_use]
pub fn missing_directories(solution: &Solution) -> Vec<ManagedDirectory> {
    ManagedDirectory::ALL
        .into_iter()
        .filter(|directory| !solution.managed_path(*directory).is_dir())
        .collect()
}

/// Whether files can be created inside `dir`.
///
/// Probes by creating and removing a temporary file, which catches read-only mounts
/// and ACLs that permission bits alone do not reveal.
#[must_use]
pub fn is_directory_writable(dir: &Path) -> bool {
    if !dir.is_dir() {
        return false;
    }

    let probe = dir.join(".webweaver_write_test.tmp");
    match std::fs::write(&probe, b"") {
        Ok(()) => {
            let _ = std::fs::remove_file(&probe);
            true
        }
        Err(e) => {
            tracing::debug!(dir = ?dir, error = %e, "directory is not writable");
            false
        }
    }
}
