//! Error types for the studio core.
//!
//! This module defines the crate-wide error type [`StudioError`] together with the
//! discriminated sub-errors returned by each subsystem. Load and directory errors are
//! always recovered locally into one of these values and handed back to the caller;
//! nothing in the core panics on malformed input data. All errors are implemented
//! with the `thiserror` crate.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Reasons a solution file could not be turned into a [`Solution`](super::Solution).
///
/// Variants are checked in a fixed precedence order (structure, then field presence,
/// then semantics) so the most specific applicable error is the one reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolutionLoadError {
    /// The solution file does not exist.
    #[error("The solution file could not be found.")]
    FileNotFound,

    /// The document is not JSON, not an object, or a field has the wrong type.
    #[error("The solution file is malformed or corrupted.")]
    FileMalformed,

    /// The top-level `version` field is absent.
    #[error("The solution file does not specify a version.")]
    MissingVersion,

    /// The `version` field holds a value this build does not understand.
    #[error("The solution file has unsupported version {found}; it was probably created with a newer version of Web Weaver.")]
    UnsupportedVersion {
        /// Version number found in the file.
        found: i128,
    },

    /// The nested `solution` object is absent or not an object.
    #[error("The solution file is missing required data.")]
    MissingSolutionObject,

    /// A required field of the `solution` object is absent.
    #[error("The solution file is incomplete: missing '{0}'.")]
    MissingRequiredField(&'static str),

    /// A field is present and well-typed but its value is not acceptable.
    #[error("The solution file has an invalid value for '{0}'.")]
    InvalidField(&'static str),
}

/// Reasons a recording file could not be read as recording metadata.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordingLoadError {
    #[error("Recording file was not found.")]
    FileNotFound,

    #[error("Recording file is malformed.")]
    FileMalformed,

    #[error("Recording file is missing the 'recording' object.")]
    MissingRecordingObject,

    #[error("Recording file is missing required field '{0}'.")]
    MissingRequiredField(&'static str),

    #[error("Recording file has unsupported version {found}.")]
    UnsupportedVersion { found: i128 },
}

/// One of the directories every solution root must contain (the root included).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManagedDirectory {
    Root,
    Pages,
    Scripts,
    Recordings,
}

impl ManagedDirectory {
    /// Every managed directory, in creation order.
    pub const ALL: [Self; 4] = [Self::Root, Self::Pages, Self::Scripts, Self::Recordings];

    /// Directory name below the solution root, `None` for the root itself.
    #[must_use]
    pub const fn dir_name(self) -> Option<&'static str> {
        match self {
            Self::Root => None,
            Self::Pages => Some("pages"),
            Self::Scripts => Some("scripts"),
            Self::Recordings => Some("recordings"),
        }
    }
}

impl fmt::Display for ManagedDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Root => "solution root",
            Self::Pages => "pages",
            Self::Scripts => "scripts",
            Self::Recordings => "recordings",
        };
        f.write_str(label)
    }
}

/// A managed directory could not be created.
///
/// Identifies exactly which directory failed so the caller can report an
/// actionable message.
#[derive(Debug, Error)]
#[error("Cannot create {directory} directory '{}': {source}", .path.display())]
pub struct DirectoryCreateError {
    /// Which managed directory failed.
    pub directory: ManagedDirectory,
    /// Absolute path that was being created.
    pub path: PathBuf,
    /// Underlying filesystem error.
    #[source]
    pub source: std::io::Error,
}

/// Failures of the recording session engine.
#[derive(Debug, Error)]
pub enum SessionError {
    /// `start` was called while a recording is already active.
    #[error("A recording is already active")]
    AlreadyActive,

    /// The recordings directory could not be created.
    #[error("Cannot create recordings directory '{}': {source}", .path.display())]
    CannotCreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The recording document could not be written to disk.
    #[error("Cannot write recording file '{}': {source}", .path.display())]
    CannotWriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The main error type for studio core operations.
///
/// Consolidates the typed sub-errors of every subsystem so the hosting application
/// can propagate them with `?` and still match on the specific cause.
#[derive(Debug, Error)]
pub enum StudioError {
    /// Solution file could not be loaded.
    #[error("Solution error: {0}")]
    Solution(#[from] SolutionLoadError),

    /// Recording file could not be loaded.
    #[error("Recording error: {0}")]
    Recording(#[from] RecordingLoadError),

    /// A managed directory could not be created.
    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryCreateError),

    /// The recording session engine failed.
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Storage operation failed.
    ///
    /// The string contains a description of what went wrong.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The requested action is not legal in the current lifecycle state.
    #[error("'{intent}' is not allowed while {state}")]
    IllegalTransition {
        /// Intent that was rejected.
        intent: String,
        /// Lifecycle state at the time of the request.
        state: String,
    },

    /// The operation needs an open solution.
    #[error("No solution is open")]
    NoSolutionOpen,
}

/// A specialized `Result` type for studio core operations.
pub type Result<T> = std::result::Result<T, StudioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_errors_render_user_facing_messages() {
        assert_eq!(
            SolutionLoadError::MissingVersion.to_string(),
            "The solution file does not specify a version."
        );
        assert_eq!(
            RecordingLoadError::MissingRequiredField("createdAt").to_string(),
            "Recording file is missing required field 'createdAt'."
        );
    }

    #[test]
    fn directory_error_names_the_failing_directory() {
        let err = DirectoryCreateError {
            directory: ManagedDirectory::Scripts,
            path: PathBuf::from("/tmp/demo/scripts"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(err.to_string().starts_with("Cannot create scripts directory '/tmp/demo/scripts'"));
    }
}
