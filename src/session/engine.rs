//! Recording session engine.
//!
//! Owns at most one active, append-only recording file at a time. Every append
//! rewrites the whole document through an atomic write, so the file on disk is
//! always complete, parseable JSON. The cost is O(n) bytes written per event, which
//! is fine for interactive recordings; long captures would need an append-only log
//! with a finalization step, which changes the file format.
//!
//! # Lifecycle
//!
//! ```text
//!          start(name)                 stop()
//!   Idle ─────────────▶ Active ───────────────▶ Idle
//!                        │  ▲
//!                        └──┘ append_event(kind, payload)
//! ```

use super::clock::{Clock, SystemClock};
use crate::domain::error::SessionError;
use crate::domain::{RecordingEventType, RecordingMetadata, Solution, RECORDING_EXTENSION};
use crate::storage::json::write_json_atomic;
use crate::storage::models::{RecordedEvent, RecordingBody, RecordingDocument, FORMAT_VERSION};
use chrono::{SecondsFormat, SubsecRound, Utc};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Characters replaced in the name part of recording file names.
const UNSAFE_FILENAME_CHARS: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

struct ActiveRecording {
    file_path: PathBuf,
    document: RecordingDocument,
    next_index: u64,
    started_at: Instant,
}

enum SessionState {
    Idle,
    Active(ActiveRecording),
}

/// Records interaction events for one open solution.
///
/// The engine owns its copy of the solution: closing or reopening a solution in the
/// host never leaves a session pointing at a stale descriptor. It is single-writer;
/// a multi-threaded host must serialize calls itself.
pub struct RecordingSession<C: Clock = SystemClock> {
    solution: Solution,
    clock: C,
    state: SessionState,
}

impl RecordingSession<SystemClock> {
    /// Creates an idle engine for `solution`.
    #[must_use]
    pub fn new(solution: Solution) -> Self {
        Self::with_clock(solution, SystemClock)
    }
}

impl<C: Clock> RecordingSession<C> {
    /// Creates an idle engine measuring elapsed time with `clock`.
    pub fn with_clock(solution: Solution, clock: C) -> Self {
        Self {
            solution,
            clock,
            state: SessionState::Idle,
        }
    }

    #[must_use]
    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    #[must_use]
    pub fn is_recording(&self) -> bool {
        matches!(self.state, SessionState::Active(_))
    }

    /// File of the active recording, if any.
    #[must_use]
    pub fn active_file_path(&self) -> Option<&Path> {
        match &self.state {
            SessionState::Active(active) => Some(&active.file_path),
            SessionState::Idle => None,
        }
    }

    /// Id of the active recording, if any.
    #[must_use]
    pub fn active_recording_id(&self) -> Option<&str> {
        match &self.state {
            SessionState::Active(active) => Some(&active.document.recording.id),
            SessionState::Idle => None,
        }
    }

    /// Number of events appended to the active recording, 0 when idle.
    #[must_use]
    pub fn event_count(&self) -> usize {
        match &self.state {
            SessionState::Active(active) => active.document.recording.events.len(),
            SessionState::Idle => 0,
        }
    }

    /// Starts a new recording named `name`.
    ///
    /// Ensures the recordings directory exists, writes an initial document with an
    /// empty `events` array to `<name>_<YYYYMMDDTHHMMSSZ>.wwrec`, and becomes active.
    /// If that file already exists a `-2`, `-3`, ... suffix is appended. The id is a
    /// fresh UUIDv4.
    ///
    /// # Errors
    ///
    /// - [`SessionError::AlreadyActive`] if a recording is in progress (no side effects)
    /// - [`SessionError::CannotCreateDirectory`] if the recordings directory cannot be created
    /// - [`SessionError::CannotWriteFile`] if the initial document cannot be written
    pub fn start(&mut self, name: &str) -> Result<RecordingMetadata, SessionError> {
        let _span = tracing::debug_span!("start_recording",
            solution = %self.solution.name,
            recording_name = %name
        ).entered();

        if self.is_recording() {
            tracing::debug!("recording already active");
            return Err(SessionError::AlreadyActive);
        }

        let recordings_dir = self.solution.recordings_path();
        std::fs::create_dir_all(&recordings_dir).map_err(|source| {
            SessionError::CannotCreateDirectory {
                path: recordings_dir.clone(),
                source,
            }
        })?;

        let created_at = Utc::now().trunc_subsecs(0);
        let stamp = created_at.format("%Y%m%dT%H%M%SZ").to_string();
        let file_path = unique_recording_path(&recordings_dir, &sanitize_file_stem(name), &stamp);

        let document = RecordingDocument {
            version: FORMAT_VERSION,
            recording: RecordingBody {
                id: uuid::Uuid::new_v4().to_string(),
                name: name.to_string(),
                created_at: created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
                browser: self.solution.browser.clone(),
                base_url: self.solution.base_url.clone(),
                events: Vec::new(),
            },
        };

        let active = ActiveRecording {
            file_path,
            document,
            next_index: 0,
            started_at: self.clock.now(),
        };
        flush(&active)?;

        let metadata = RecordingMetadata {
            id: active.document.recording.id.clone(),
            name: active.document.recording.name.clone(),
            file_path: active.file_path.clone(),
            created_at,
        };

        tracing::debug!(
            recording_id = %metadata.id,
            path = ?metadata.file_path,
            "recording started"
        );
        self.state = SessionState::Active(active);
        Ok(metadata)
    }

    /// Appends one event to the active recording and flushes the whole document.
    ///
    /// The index and the elapsed-milliseconds timestamp are assigned here. Returns
    /// `Ok(Some(index))` on success and `Ok(None)` when no recording is active, in
    /// which case the event is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::CannotWriteFile`] if the flush fails. The event stays
    /// in memory and is written by the next successful flush.
    pub fn append_event(
        &mut self,
        kind: RecordingEventType,
        payload: Value,
    ) -> Result<Option<u64>, SessionError> {
        let SessionState::Active(active) = &mut self.state else {
            tracing::debug!(event_type = %kind, "no active recording, dropping event");
            return Ok(None);
        };

        let elapsed = self.clock.now().saturating_duration_since(active.started_at);
        let index = active.next_index;
        active.next_index += 1;

        active.document.recording.events.push(RecordedEvent {
            index,
            timestamp: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            kind,
            payload,
        });

        tracing::trace!(index, event_type = %kind, "event appended");
        flush(active)?;
        Ok(Some(index))
    }

    /// Flushes the active recording one last time and returns to idle.
    ///
    /// Returns the recording's file path, or `None` if nothing was active. The file
    /// is never deleted or renamed.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::CannotWriteFile`] if the final flush fails; the engine
    /// is idle either way.
    pub fn stop(&mut self) -> Result<Option<PathBuf>, SessionError> {
        let SessionState::Active(active) = std::mem::replace(&mut self.state, SessionState::Idle)
        else {
            return Ok(None);
        };

        let _span = tracing::debug_span!("stop_recording",
            path = ?active.file_path,
            event_count = active.document.recording.events.len()
        ).entered();

        flush(&active)?;
        tracing::debug!("recording stopped");
        Ok(Some(active.file_path))
    }
}

impl<C: Clock> Drop for RecordingSession<C> {
    fn drop(&mut self) {
        if self.is_recording() {
            tracing::debug!("stopping active recording on drop");
            if let Err(e) = self.stop() {
                tracing::error!(error = %e, "failed to flush recording on drop");
            }
        }
    }
}

impl<C: Clock> std::fmt::Debug for RecordingSession<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingSession")
            .field("solution", &self.solution.name)
            .field("active_file_path", &self.active_file_path())
            .field("event_count", &self.event_count())
            .finish_non_exhaustive()
    }
}

fn flush(active: &ActiveRecording) -> Result<(), SessionError> {
    write_json_atomic(&active.file_path, &active.document).map_err(|source| {
        tracing::debug!(path = ?active.file_path, error = %source, "recording flush failed");
        SessionError::CannotWriteFile {
            path: active.file_path.clone(),
            source,
        }
    })
}

/// Replaces path separators and other characters that are invalid in file names on
/// common platforms.
fn sanitize_file_stem(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_control() || UNSAFE_FILENAME_CHARS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect();

    if sanitized.is_empty() || sanitized.chars().all(|c| c == '.') {
        "Recording".to_string()
    } else {
        sanitized
    }
}

/// First free `<stem>_<stamp>[-N].wwrec` path in `dir`.
fn unique_recording_path(dir: &Path, stem: &str, stamp: &str) -> PathBuf {
    let mut attempt: u32 = 1;
    loop {
        let file_name = if attempt == 1 {
            format!("{stem}_{stamp}.{RECORDING_EXTENSION}")
        } else {
            format!("{stem}_{stamp}-{attempt}.{RECORDING_EXTENSION}")
        };
        let candidate = dir.join(file_name);
        if !candidate.exists() {
            return candidate;
        }
        tracing::debug!(path = ?candidate, "recording file name taken, retrying");
        attempt += 1;
    }
}
