//! JSON document I/O shared by every file the studio persists.
//!
//! Solution files, recording files and the recent-solutions list are all small,
//! human-readable JSON documents that are rewritten as a whole. Writes go through
//! [`write_json_atomic`] (write-to-temp + rename) so a crash mid-write never leaves a
//! torn document on disk.
//!
//! # Performance Characteristics
//!
//! - **Read**: loads the entire file into memory once
//! - **Write**: O(n), serializes and writes the entire document
//! - **Best for**: documents up to a few MB, interactive write rates

use serde::Serialize;
use serde_json::Value;
use std::io;
use std::path::{Path, PathBuf};

/// Why a JSON document could not be read.
#[derive(Debug)]
pub(crate) enum ReadError {
    /// The file does not exist.
    NotFound,
    /// The file exists but could not be read.
    Io(io::Error),
    /// The contents are not valid JSON.
    Parse(serde_json::Error),
}

/// Reads and parses a whole JSON document.
pub(crate) fn read_json_value(path: &Path) -> Result<Value, ReadError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(ReadError::NotFound),
        Err(e) => return Err(ReadError::Io(e)),
    };

    let value = serde_json::from_str(&contents).map_err(ReadError::Parse)?;
    tracing::trace!(path = ?path, bytes = contents.len(), "read JSON document");
    Ok(value)
}

/// Integer value of a JSON number, signed or unsigned; `None` for anything else.
pub(crate) fn integer_value(value: &Value) -> Option<i128> {
    value
        .as_i64()
        .map(i128::from)
        .or_else(|| value.as_u64().map(i128::from))
}

/// Serializes `value` and atomically replaces the file at `path` with it.
///
/// Writes to a temporary sibling file first, then renames it over the target. The
/// target is either the old document or the new one, never a partial write.
///
/// # Errors
///
/// Returns an error if:
/// - JSON serialization fails
/// - The temporary file cannot be written
/// - The rename fails (the original file is left untouched)
pub(crate) fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    let tmp_path = temporary_path(path);

    tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
    if let Err(e) = std::fs::write(&tmp_path, json) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e);
    }

    tracing::trace!(path = ?path, "renaming temporary file to final location");
    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e);
    }

    Ok(())
}

/// `<file name>.tmp` next to `path`.
fn temporary_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn atomic_write_replaces_contents_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");

        write_json_atomic(&path, &json!({"version": 1})).unwrap();
        write_json_atomic(&path, &json!({"version": 2})).unwrap();

        let value = read_json_value(&path).unwrap();
        assert_eq!(value["version"], 2);
        assert!(!dir.path().join("doc.json.tmp").exists());
    }

    #[test]
    fn read_distinguishes_missing_from_unparsable() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(read_json_value(&missing), Err(ReadError::NotFound)));

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{\"version\": 1,").unwrap();
        assert!(matches!(read_json_value(&broken), Err(ReadError::Parse(_))));
    }

    #[test]
    fn failed_write_keeps_original_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-parent").join("doc.json");

        assert!(write_json_atomic(&path, &json!({"a": 1})).is_err());
        assert!(!path.exists());
    }
}
