//! Recently opened solutions.
//!
//! A bounded, de-duplicated, most-recently-used list of solution file paths with
//! write-through persistence to the user config directory. Evicted entries carry no
//! resources, so eviction is a plain truncate.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "recentSolutions": ["/home/user/Demo/Demo.wws", "/home/user/Other/Other.wws"]
//! }
//! ```

use crate::domain::error::Result;
use crate::infrastructure::paths::normalize_path;
use crate::storage::json::{read_json_value, write_json_atomic, ReadError};
use crate::storage::models::{RecentSolutionsRecord, FORMAT_VERSION};
use std::path::{Path, PathBuf};

/// Maximum number of remembered solutions.
pub const MAX_RECENT: usize = 10;

/// Most-recently-used list of solution files, newest first.
#[derive(Debug, Clone)]
pub struct RecentSolutions {
    /// Path to the JSON file on disk.
    file_path: PathBuf,
    entries: Vec<PathBuf>,
}

impl RecentSolutions {
    /// Creates an empty list persisted at `file_path`, without touching the disk.
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            entries: Vec::new(),
        }
    }

    /// Loads the list from `file_path`.
    ///
    /// A missing or unparsable file yields an empty list so a first run always
    /// succeeds. Duplicate entries in the file are collapsed and the list is
    /// truncated to [`MAX_RECENT`].
    pub fn load(file_path: impl Into<PathBuf>) -> Self {
        let mut recent = Self::new(file_path);
        let _span = tracing::debug_span!("load_recent_solutions",
            path = ?recent.file_path
        ).entered();

        let raw = match read_json_value(&recent.file_path) {
            Ok(raw) => raw,
            Err(ReadError::NotFound) => {
                tracing::debug!("no recent solutions file, starting empty");
                return recent;
            }
            Err(ReadError::Io(e)) => {
                tracing::warn!(error = %e, "cannot read recent solutions, starting empty");
                return recent;
            }
            Err(ReadError::Parse(e)) => {
                tracing::warn!(error = %e, "recent solutions file is not valid JSON, starting empty");
                return recent;
            }
        };

        let record: RecentSolutionsRecord = match serde_json::from_value(raw) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(error = %e, "recent solutions file is malformed, starting empty");
                return recent;
            }
        };

        for entry in record.recent_solutions {
            let path = normalize_path(Path::new(&entry));
            if !recent.entries.contains(&path) {
                recent.entries.push(path);
            }
        }
        recent.entries.truncate(MAX_RECENT);

        tracing::debug!(count = recent.entries.len(), "recent solutions loaded");
        recent
    }

    /// Remembered solution files, most recent first.
    #[must_use]
    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    #[must_use]
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Moves `path` to the front of the list and persists it.
    ///
    /// Any existing occurrence (compared after normalization) is removed first, and
    /// the list is truncated to [`MAX_RECENT`] entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be saved. The in-memory list is updated
    /// regardless.
    pub fn add(&mut self, path: &Path) -> Result<()> {
        let path = normalize_path(path);
        let _span = tracing::debug_span!("add_recent_solution", path = ?path).entered();

        self.entries.retain(|existing| existing != &path);
        self.entries.insert(0, path);
        self.entries.truncate(MAX_RECENT);

        self.save()
    }

    /// Forgets `path` and persists the list if it was present.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be saved.
    pub fn remove(&mut self, path: &Path) -> Result<bool> {
        let path = normalize_path(path);
        let before = self.entries.len();
        self.entries.retain(|existing| existing != &path);

        if self.entries.len() == before {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Drops entries whose solution file no longer exists and returns them.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be saved.
    pub fn prune_missing(&mut self) -> Result<Vec<PathBuf>> {
        let (kept, missing): (Vec<PathBuf>, Vec<PathBuf>) =
            self.entries.drain(..).partition(|path| path.is_file());
        self.entries = kept;

        if !missing.is_empty() {
            tracing::debug!(pruned = missing.len(), "pruned missing recent solutions");
            self.save()?;
        }
        Ok(missing)
    }

    /// Writes the list to disk, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file written.
    pub fn save(&self) -> Result<()> {
        let _span = tracing::debug_span!("save_recent_solutions",
            path = ?self.file_path,
            count = self.entries.len()
        ).entered();

        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let record = RecentSolutionsRecord {
            version: FORMAT_VERSION,
            recent_solutions: self
                .entries
                .iter()
                .map(|path| path.to_string_lossy().into_owned())
                .collect(),
        };
        write_json_atomic(&self.file_path, &record)?;

        tracing::debug!("recent solutions saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solution_path(i: usize) -> PathBuf {
        PathBuf::from(format!("/projects/s{i}/s{i}.wws"))
    }

    #[test]
    fn adding_same_path_twice_keeps_one_entry() {
        let dir = tempfile::tempdir().unwrap();
        let mut recent = RecentSolutions::new(dir.path().join("recent.json"));

        recent.add(Path::new("/projects/demo/Demo.wws")).unwrap();
        recent.add(Path::new("/projects/demo/./Demo.wws")).unwrap();

        assert_eq!(recent.entries(), &[PathBuf::from("/projects/demo/Demo.wws")]);
    }

    #[test]
    fn re_adding_moves_to_front() {
        let dir = tempfile::tempdir().unwrap();
        let mut recent = RecentSolutions::new(dir.path().join("recent.json"));

        recent.add(&solution_path(1)).unwrap();
        recent.add(&solution_path(2)).unwrap();
        recent.add(&solution_path(1)).unwrap();

        assert_eq!(recent.entries(), &[solution_path(1), solution_path(2)]);
    }

    #[test]
    fn list_is_bounded_to_most_recent_ten() {
        let dir = tempfile::tempdir().unwrap();
        let mut recent = RecentSolutions::new(dir.path().join("recent.json"));

        for i in 0..11 {
            recent.add(&solution_path(i)).unwrap();
        }

        let expected: Vec<PathBuf> = (1..11).rev().map(solution_path).collect();
        assert_eq!(recent.entries(), expected.as_slice());
    }

    #[test]
    fn add_persists_and_load_restores_order() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("config").join("recent_solutions.json");
        let mut recent = RecentSolutions::new(&file);
        recent.add(&solution_path(1)).unwrap();
        recent.add(&solution_path(2)).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&file).unwrap()).unwrap();
        assert_eq!(raw["version"], 1);
        assert_eq!(raw["recentSolutions"][0], "/projects/s2/s2.wws");

        let reloaded = RecentSolutions::load(&file);
        assert_eq!(reloaded.entries(), &[solution_path(2), solution_path(1)]);
    }

    #[test]
    fn missing_or_corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(RecentSolutions::load(dir.path().join("absent.json")).entries().is_empty());

        let corrupt = dir.path().join("corrupt.json");
        std::fs::write(&corrupt, "not json at all").unwrap();
        assert!(RecentSolutions::load(&corrupt).entries().is_empty());

        let wrong_shape = dir.path().join("wrong.json");
        std::fs::write(&wrong_shape, "{\"version\": 1, \"recentSolutions\": 5}").unwrap();
        assert!(RecentSolutions::load(&wrong_shape).entries().is_empty());
    }

    #[test]
    fn remove_and_prune_forget_entries() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join("Demo.wws");
        std::fs::write(&existing, "{}").unwrap();

        let mut recent = RecentSolutions::new(dir.path().join("recent.json"));
        recent.add(&solution_path(1)).unwrap();
        recent.add(&solution_path(2)).unwrap();
        recent.add(&existing).unwrap();

        assert!(recent.remove(&solution_path(2)).unwrap());
        assert!(!recent.remove(&solution_path(2)).unwrap());

        let pruned = recent.prune_missing().unwrap();
        assert_eq!(pruned, vec![solution_path(1)]);
        assert_eq!(recent.entries(), &[existing]);
    }
}
