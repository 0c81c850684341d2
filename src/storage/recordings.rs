//! Recording metadata store.
//!
//! Discovers recording files in a solution's `recordings` directory and reads just
//! enough of each one to list it. A corrupt recording is reported and skipped; it
//! never hides the others.

use crate::domain::error::{RecordingLoadError, Result, StudioError};
use crate::domain::{generate_next_display_name, RecordingMetadata, Solution, RECORDING_EXTENSION};
use crate::storage::json::{integer_value, read_json_value, write_json_atomic, ReadError};
use crate::storage::models::FORMAT_VERSION;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// A recording file that could not be parsed during discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryFailure {
    pub path: PathBuf,
    pub error: RecordingLoadError,
}

/// Result of scanning a recordings directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    /// Successfully parsed recordings, oldest first.
    pub recordings: Vec<RecordingMetadata>,
    /// Files with the recording extension that could not be parsed.
    pub failures: Vec<DiscoveryFailure>,
}

/// Reads, renames and deletes the recordings of one solution.
#[derive(Debug, Clone)]
pub struct RecordingStore {
    recordings_dir: PathBuf,
}

impl RecordingStore {
    pub fn new(recordings_dir: impl Into<PathBuf>) -> Self {
        Self {
            recordings_dir: recordings_dir.into(),
        }
    }

    /// Store over `solution`'s recordings directory.
    #[must_use]
    pub fn for_solution(solution: &Solution) -> Self {
        Self::new(solution.recordings_path())
    }

    #[must_use]
    pub fn recordings_dir(&self) -> &Path {
        &self.recordings_dir
    }

    /// Lists and parses every `.wwrec` file directly inside the recordings directory.
    ///
    /// Subdirectories are not searched. A missing recordings directory yields an
    /// empty discovery. Per-file parse failures are logged at `warn` and collected in
    /// [`Discovery::failures`].
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::Io`] only if the directory exists but cannot be listed.
    pub fn discover(&self) -> Result<Discovery> {
        let _span = tracing::debug_span!("discover_recordings",
            dir = ?self.recordings_dir
        ).entered();

        let entries = match std::fs::read_dir(&self.recordings_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("recordings directory does not exist");
                return Ok(Discovery::default());
            }
            Err(e) => return Err(e.into()),
        };

        let mut discovery = Discovery::default();

        for entry in entries {
            let path = match entry {
                Ok(entry) => entry.path(),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable directory entry");
                    continue;
                }
            };

            if !is_recording_file(&path) {
                continue;
            }

            match parse_recording(&path) {
                Ok(metadata) => discovery.recordings.push(metadata),
                Err(error) => {
                    tracing::warn!(path = ?path, %error, "skipping unreadable recording");
                    discovery.failures.push(DiscoveryFailure { path, error });
                }
            }
        }

        discovery
            .recordings
            .sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.name.cmp(&b.name)));
        discovery.failures.sort_by(|a, b| a.path.cmp(&b.path));

        tracing::debug!(
            recording_count = discovery.recordings.len(),
            failure_count = discovery.failures.len(),
            "recordings discovered"
        );
        Ok(discovery)
    }

    /// Rewrites the `name` of a recording, leaving every other field intact.
    ///
    /// The whole document is rewritten atomically; if reading or writing fails the
    /// original file is untouched.
    ///
    /// # Errors
    ///
    /// - [`StudioError::Storage`] if `new_name` is blank
    /// - [`StudioError::Recording`] if the file is missing or not a recording
    /// - [`StudioError::Io`] if the file cannot be read or written
    pub fn rename(&self, metadata: &RecordingMetadata, new_name: &str) -> Result<RecordingMetadata> {
        let _span = tracing::debug_span!("rename_recording",
            path = ?metadata.file_path,
            recording_id = %metadata.id,
            new_name = %new_name
        ).entered();

        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(StudioError::Storage("recording name cannot be empty".to_string()));
        }

        let mut document = read_json_value(&metadata.file_path).map_err(|e| match e {
            ReadError::NotFound => StudioError::Recording(RecordingLoadError::FileNotFound),
            ReadError::Io(e) => StudioError::Io(e),
            ReadError::Parse(_) => StudioError::Recording(RecordingLoadError::FileMalformed),
        })?;

        let recording = document
            .get_mut("recording")
            .and_then(Value::as_object_mut)
            .ok_or(RecordingLoadError::MissingRecordingObject)?;
        recording.insert("name".to_string(), Value::from(new_name));

        write_json_atomic(&metadata.file_path, &document)?;

        tracing::debug!("recording renamed");
        Ok(RecordingMetadata {
            name: new_name.to_string(),
            ..metadata.clone()
        })
    }

    /// Deletes the recording file.
    ///
    /// # Errors
    ///
    /// Returns [`RecordingLoadError::FileNotFound`] if the file is already gone, or
    /// [`StudioError::Io`] if it cannot be removed.
    pub fn delete(&self, metadata: &RecordingMetadata) -> Result<()> {
        let _span = tracing::debug_span!("delete_recording",
            path = ?metadata.file_path
        ).entered();

        match std::fs::remove_file(&metadata.file_path) {
            Ok(()) => {
                tracing::debug!("recording deleted");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(RecordingLoadError::FileNotFound.into())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Default display name for the next recording, based on how many exist now.
    ///
    /// # Errors
    ///
    /// Returns an error if the recordings directory cannot be listed.
    pub fn next_display_name(&self) -> Result<String> {
        let discovery = self.discover()?;
        Ok(generate_next_display_name(discovery.recordings.len()))
    }
}

fn is_recording_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == RECORDING_EXTENSION)
}

/// Reads the metadata of a single recording file.
///
/// Requires a `recording` object with string `id`, `name` and RFC 3339 `createdAt`.
/// A `version` other than the current one is rejected; files without a `version`
/// are read as the current version.
///
/// # Errors
///
/// Returns the specific [`RecordingLoadError`]; never a partially filled result.
pub fn parse_recording(path: &Path) -> std::result::Result<RecordingMetadata, RecordingLoadError> {
    let raw = read_json_value(path).map_err(|e| match e {
        ReadError::NotFound => RecordingLoadError::FileNotFound,
        ReadError::Io(_) | ReadError::Parse(_) => RecordingLoadError::FileMalformed,
    })?;

    let document = raw.as_object().ok_or(RecordingLoadError::FileMalformed)?;

    if let Some(version) = document.get("version") {
        let version = integer_value(version).ok_or(RecordingLoadError::FileMalformed)?;
        if version != i128::from(FORMAT_VERSION) {
            return Err(RecordingLoadError::UnsupportedVersion { found: version });
        }
    }

    let recording = document
        .get("recording")
        .and_then(Value::as_object)
        .ok_or(RecordingLoadError::MissingRecordingObject)?;

    let id = required_string(recording, "id")?;
    let name = required_string(recording, "name")?;
    let created_at = required_string(recording, "createdAt")?;

    let created_at = DateTime::parse_from_rfc3339(created_at)
        .map_err(|_| RecordingLoadError::FileMalformed)?
        .with_timezone(&Utc);

    Ok(RecordingMetadata {
        id: id.to_string(),
        name: name.to_string(),
        file_path: path.to_path_buf(),
        created_at,
    })
}

fn required_string<'a>(
    object: &'a Map<String, Value>,
    field: &'static str,
) -> std::result::Result<&'a str, RecordingLoadError> {
    object
        .get(field)
        .ok_or(RecordingLoadError::MissingRequiredField(field))?
        .as_str()
        .ok_or(RecordingLoadError::FileMalformed)
}
