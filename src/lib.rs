//! Web Weaver studio core: durable solutions, recordings and lifecycle state.
//!
//! This crate is the storage and control core of a browser automation studio:
//! - Solution descriptors with a fixed on-disk directory layout
//! - Versioned JSON solution files with precise, typed load errors
//! - Append-only recording sessions with one active recording at a time
//! - Discovery, renaming and deletion of recordings
//! - A bounded most-recently-used list of solutions
//! - A lifecycle state machine that decides which user actions are legal

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Hosting UI (not part of this crate)                │  ← Issues intents
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Lifecycle states and intents                     │  ← Studio facade
//! │  - Affordances per state                            │
//! └─────────────────────────────────────────────────────┘
//!         │                                        │
//! ┌──────────────────────────┐   ┌──────────────────────────┐
//! │ Storage Layer (storage/) │   │ Session Layer (session/) │
//! │ - Solution files         │   │ - Active recording       │
//! │ - Directory layout       │   │ - Event indexing         │
//! │ - Recording discovery    │   │ - Elapsed-time clock     │
//! │ - Recent solutions       │   │                          │
//! └──────────────────────────┘   └──────────────────────────┘
//!         │                                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - User config paths (infrastructure/)              │
//! │  - Error types (domain/error)                       │
//! │  - Solution and recording models (domain/)          │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - tracing subscriber, rotating log file            │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Lifecycle state machine and the [`Studio`] facade
//! - [`domain`]: Core domain types (Solution, recordings, errors)
//! - [`infrastructure`]: Platform-specific utilities (paths)
//! - [`session`]: Recording session engine
//! - [`storage`]: JSON file persistence layer
//! - [`observability`]: Tracing setup
//!
//! # Configuration
//!
//! The studio reads an optional TOML file:
//!
//! ```toml
//! # ~/.config/webweaver/studio.toml
//! config_dir = "/home/me/.config/webweaver"
//! log_level = "debug"
//! ```
//!
//! # On-Disk Layout
//!
//! ```text
//! <solutionDirectory>/[<solutionName>/]    effective root
//! ├── <solutionName>.wws                   solution file
//! ├── pages/
//! ├── scripts/
//! └── recordings/
//!     └── <name>_<YYYYMMDDTHHMMSSZ>.wwrec  one file per recording
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use webweaver_studio::{initialize, RecordingEventType, Solution, StudioConfig};
//! use serde_json::json;
//!
//! let mut studio = initialize(&StudioConfig::default());
//!
//! let solution = Solution::new("Demo", "/tmp/x", true, "https://example.com", "firefox");
//! studio.create_solution(solution)?;
//!
//! studio.start_recording("Run1")?;
//! studio.record_event(RecordingEventType::DomClick, json!({"selector": "#btn"}))?;
//! studio.toggle_recording()?;
//! # Ok::<(), webweaver_studio::StudioError>(())
//! ```
//!
//! # Key Design Decisions
//!
//! ## Always-Valid Files
//!
//! Every JSON document is written to a temporary sibling and renamed into place,
//! and a recording is rewritten in full after each event. A crash loses at most the
//! event being written, never the file.
//!
//! ## State Before Side Effects
//!
//! The [`Studio`] checks an intent against the state machine before touching the
//! disk, and commits the transition only after the disk work succeeded.

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod session;
pub mod storage;

pub use app::{Affordances, Intent, RecordingToggle, Studio, StudioState};
pub use domain::{
    BrowserLaunchOptions, KnownBrowser, RecordingEventType, RecordingMetadata, Result, Solution,
    StudioError,
};
pub use session::RecordingSession;
pub use storage::RecentSolutions;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Studio configuration, usually read from a TOML file.
///
/// # Example
///
/// ```toml
/// config_dir = "/srv/webweaver"
/// log_level = "webweaver_studio=debug"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StudioConfig {
    /// Directory for per-user state (recent solutions, logs).
    ///
    /// Default: `<platform config dir>/webweaver`
    pub config_dir: Option<PathBuf>,

    /// Tracing filter directive.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`, or any `EnvFilter`
    /// directive. `RUST_LOG` takes precedence. Default: `"info"`
    pub log_level: Option<String>,
}

impl StudioConfig {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::Config`] if the text is not valid TOML or contains
    /// unknown keys.
    ///
    /// # Example
    ///
    /// ```rust
    /// use webweaver_studio::StudioConfig;
    ///
    /// let config = StudioConfig::from_toml_str("log_level = \"debug\"")?;
    /// assert_eq!(config.log_level.as_deref(), Some("debug"));
    /// # Ok::<(), webweaver_studio::StudioError>(())
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| StudioError::Config(e.to_string()))
    }

    /// Loads configuration from `path`; a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// - [`StudioError::Config`] if the file cannot be parsed
    /// - [`StudioError::Io`] if the file exists but cannot be read
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = ?path, "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Effective per-user state directory.
    #[must_use]
    pub fn config_dir(&self) -> PathBuf {
        self.config_dir
            .clone()
            .unwrap_or_else(infrastructure::default_config_dir)
    }
}

/// Initializes logging and returns a studio with the persisted recent solutions.
///
/// # Side Effects
///
/// - Installs the tracing subscriber (first call only)
/// - Creates the log directory if it doesn't exist
/// - Reads `<config_dir>/recent_solutions.json`
///
/// # Example
///
/// ```no_run
/// use webweaver_studio::{initialize, StudioConfig, StudioState};
///
/// let studio = initialize(&StudioConfig::default());
/// assert_eq!(studio.state(), StudioState::NoSolution);
/// ```
pub fn initialize(config: &StudioConfig) -> Studio {
    observability::init_tracing(config);

    let config_dir = config.config_dir();
    tracing::debug!(config_dir = ?config_dir, "initializing studio");

    let recent = RecentSolutions::load(infrastructure::recent_solutions_path(&config_dir));
    Studio::new(recent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_when_empty() {
        assert_eq!(StudioConfig::from_toml_str("").unwrap(), StudioConfig::default());
    }

    #[test]
    fn config_rejects_unknown_keys_and_bad_toml() {
        assert!(matches!(
            StudioConfig::from_toml_str("theme = \"dark\""),
            Err(StudioError::Config(_))
        ));
        assert!(matches!(
            StudioConfig::from_toml_str("log_level = "),
            Err(StudioError::Config(_))
        ));
    }

    #[test]
    fn config_load_tolerates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = StudioConfig::load(&dir.path().join("studio.toml")).unwrap();
        assert_eq!(config, StudioConfig::default());
    }

    #[test]
    fn config_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("studio.toml");
        std::fs::write(&path, "config_dir = \"/srv/webweaver\"\nlog_level = \"warn\"\n").unwrap();

        let config = StudioConfig::load(&path).unwrap();

        assert_eq!(config.config_dir(), PathBuf::from("/srv/webweaver"));
        assert_eq!(config.log_level.as_deref(), Some("warn"));
    }

    #[test]
    fn initialize_restores_recent_solutions() {
        let dir = tempfile::tempdir().unwrap();
        let config = StudioConfig {
            config_dir: Some(dir.path().to_path_buf()),
            log_level: None,
        };
        let mut recent = RecentSolutions::new(infrastructure::recent_solutions_path(dir.path()));
        recent.add(Path::new("/projects/Demo/Demo.wws")).unwrap();

        let studio = initialize(&config);

        assert_eq!(studio.state(), StudioState::NoSolution);
        assert_eq!(studio.recent().entries(), &[PathBuf::from("/projects/Demo/Demo.wws")]);
        assert!(dir.path().join("logs").is_dir());
    }
}
