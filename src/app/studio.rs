//! Studio facade tying the lifecycle state to durable operations.
//!
//! Every operation follows the same order:
//!
//! 1. **Legality**: the intent is checked against the current state; an illegal
//!    intent fails with [`StudioError::IllegalTransition`] and touches nothing
//! 2. **Durable work**: directories, solution files, recording files
//! 3. **Transition**: the state changes only after the work succeeded
//!
//! Stopping a recording is the one exception: the engine is idle after `stop`
//! whether or not the final flush succeeded, so the state follows it.

use crate::app::affordances::Affordances;
use crate::app::controller::StudioStateController;
use crate::app::modes::{Intent, StudioState};
use crate::domain::error::{Result, StudioError};
use crate::domain::{RecordingEventType, RecordingMetadata, Solution};
use crate::session::RecordingSession;
use crate::storage::layout::{ensure_directory_structure, missing_directories};
use crate::storage::recent::RecentSolutions;
use crate::storage::recordings::{Discovery, RecordingStore};
use crate::storage::solution_file::{load_solution, save_solution};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Outcome of [`Studio::toggle_recording`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordingToggle {
    /// A new recording was started.
    Started(RecordingMetadata),
    /// The active recording was stopped; holds its file.
    Stopped(PathBuf),
}

/// Everything that exists only while a solution is open.
#[derive(Debug)]
struct OpenSolution {
    solution_file: PathBuf,
    store: RecordingStore,
    session: RecordingSession,
}

/// The studio core as seen by a hosting application.
#[derive(Debug)]
pub struct Studio {
    controller: StudioStateController,
    recent: RecentSolutions,
    open: Option<OpenSolution>,
}

impl Studio {
    /// Creates a studio with no open solution.
    #[must_use]
    pub fn new(recent: RecentSolutions) -> Self {
        Self {
            controller: StudioStateController::new(),
            recent,
            open: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> StudioState {
        self.controller.state()
    }

    #[must_use]
    pub fn affordances(&self) -> Affordances {
        Affordances::for_state(self.state())
    }

    /// Registers the state change observer.
    pub fn on_state_change(&mut self, observer: impl FnMut(StudioState) + 'static) {
        self.controller.set_observer(observer);
    }

    /// The open solution, if any.
    #[must_use]
    pub fn solution(&self) -> Option<&Solution> {
        self.open.as_ref().map(|open| open.session.solution())
    }

    /// Path of the open solution's `.wws` file.
    #[must_use]
    pub fn solution_file(&self) -> Option<&Path> {
        self.open.as_ref().map(|open| open.solution_file.as_path())
    }

    #[must_use]
    pub fn recent(&self) -> &RecentSolutions {
        &self.recent
    }

    pub fn recent_mut(&mut self) -> &mut RecentSolutions {
        &mut self.recent
    }

    /// File of the active recording, if any.
    #[must_use]
    pub fn active_recording(&self) -> Option<&Path> {
        self.open.as_ref().and_then(|open| open.session.active_file_path())
    }

    /// Creates the directory layout and solution file, then opens the solution.
    ///
    /// # Errors
    ///
    /// - [`StudioError::IllegalTransition`] if a solution is already open
    /// - [`StudioError::Solution`] with `InvalidField` if the name is unusable; nothing
    ///   is written
    /// - [`StudioError::Directory`] naming the directory that could not be created
    /// - [`StudioError::Io`] if the solution file cannot be written
    pub fn create_solution(&mut self, solution: Solution) -> Result<PathBuf> {
        self.ensure_legal(Intent::SolutionLoaded)?;
        let _span = tracing::info_span!("create_solution",
            solution_name = %solution.name,
            root = ?solution.effective_root()
        ).entered();

        solution.validate()?;
        ensure_directory_structure(&solution)?;
        let solution_file = save_solution(&solution)?;

        self.finish_open(solution, solution_file.clone());
        Ok(solution_file)
    }

    /// Loads a solution file and opens it, recreating missing directories.
    ///
    /// # Errors
    ///
    /// - [`StudioError::IllegalTransition`] if a solution is already open
    /// - [`StudioError::Solution`] if the file is missing or invalid
    /// - [`StudioError::Directory`] if a missing directory cannot be created
    pub fn open_solution(&mut self, path: &Path) -> Result<&Solution> {
        self.ensure_legal(Intent::SolutionLoaded)?;
        let _span = tracing::info_span!("open_solution", path = ?path).entered();

        let solution = load_solution(path)?;

        let missing = missing_directories(&solution);
        if !missing.is_empty() {
            tracing::warn!(?missing, "solution directories missing, recreating");
            ensure_directory_structure(&solution)?;
        }

        self.finish_open(solution, path.to_path_buf());
        self.solution().ok_or(StudioError::NoSolutionOpen)
    }

    fn finish_open(&mut self, solution: Solution, solution_file: PathBuf) {
        if let Err(e) = self.recent.add(&solution_file) {
            tracing::warn!(error = %e, "failed to update recent solutions");
        }

        self.open = Some(OpenSolution {
            solution_file,
            store: RecordingStore::for_solution(&solution),
            session: RecordingSession::new(solution),
        });
        self.controller.apply(Intent::SolutionLoaded);
    }

    /// Closes the open solution.
    ///
    /// An active recording is stopped and the inspector hidden first, each with
    /// its own state change.
    ///
    /// # Errors
    ///
    /// - [`StudioError::IllegalTransition`] if no solution is open
    /// - [`StudioError::Session`] if the active recording's final flush fails; the
    ///   solution stays open with the recording stopped
    pub fn close_solution(&mut self) -> Result<()> {
        let state = self.state();
        if !state.has_solution() {
            return Err(illegal(Intent::SolutionClosed, state));
        }
        let _span = tracing::info_span!("close_solution").entered();

        if state.is_recording() {
            self.stop_recording()?;
        }
        if self.state() == StudioState::Inspecting {
            self.controller.apply(Intent::InspectorToggle { shown: false });
        }

        self.open = None;
        self.controller.apply(Intent::SolutionClosed);
        Ok(())
    }

    /// Starts a recording named by [`next_recording_name`](Self::next_recording_name),
    /// or stops the active one.
    ///
    /// # Errors
    ///
    /// - [`StudioError::IllegalTransition`] unless a solution is loaded or recording
    /// - [`StudioError::Session`] if the recording file cannot be created or flushed
    pub fn toggle_recording(&mut self) -> Result<RecordingToggle> {
        self.ensure_legal(Intent::RecordStartStop)?;

        if self.state().is_recording() {
            return self.stop_recording().map(RecordingToggle::Stopped);
        }

        let name = self.next_recording_name()?;
        self.start_recording(&name).map(RecordingToggle::Started)
    }

    /// Starts a recording with an explicit display name.
    ///
    /// # Errors
    ///
    /// - [`StudioError::IllegalTransition`] unless the solution is loaded and idle
    /// - [`StudioError::Session`] if the recording file cannot be created
    pub fn start_recording(&mut self, name: &str) -> Result<RecordingMetadata> {
        let state = self.state();
        if state != StudioState::SolutionLoaded {
            return Err(illegal(Intent::RecordStartStop, state));
        }

        let open = self.open.as_mut().ok_or(StudioError::NoSolutionOpen)?;
        let metadata = open.session.start(name)?;

        self.controller.apply(Intent::RecordStartStop);
        Ok(metadata)
    }

    fn stop_recording(&mut self) -> Result<PathBuf> {
        let open = self.open.as_mut().ok_or(StudioError::NoSolutionOpen)?;
        let stopped = open.session.stop();
        self.controller.apply(Intent::RecordStartStop);

        stopped?.ok_or_else(|| StudioError::Storage("no recording was active".to_string()))
    }

    /// Pauses the running recording or resumes the paused one.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::IllegalTransition`] unless a recording is active.
    pub fn toggle_pause(&mut self) -> Result<StudioState> {
        self.ensure_legal(Intent::RecordPause)?;
        self.controller.apply(Intent::RecordPause);
        Ok(self.state())
    }

    /// Shows or hides the inspector.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::IllegalTransition`] unless showing from a loaded
    /// solution or hiding while inspecting.
    pub fn set_inspector(&mut self, shown: bool) -> Result<StudioState> {
        let intent = Intent::InspectorToggle { shown };
        self.ensure_legal(intent)?;
        self.controller.apply(intent);
        Ok(self.state())
    }

    /// Forwards an event to the active recording.
    ///
    /// Events are captured only while [`StudioState::RecordingRunning`]; in any other
    /// state they are dropped and `Ok(None)` is returned.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::Session`] if the recording cannot be flushed.
    pub fn record_event(&mut self, kind: RecordingEventType, payload: Value) -> Result<Option<u64>> {
        if self.state() != StudioState::RecordingRunning {
            tracing::trace!(state = ?self.state(), event_type = %kind, "event dropped");
            return Ok(None);
        }

        let open = self.open.as_mut().ok_or(StudioError::NoSolutionOpen)?;
        Ok(open.session.append_event(kind, payload)?)
    }

    /// Lists the open solution's recordings.
    ///
    /// # Errors
    ///
    /// - [`StudioError::NoSolutionOpen`] if no solution is open
    /// - [`StudioError::Io`] if the recordings directory cannot be listed
    pub fn recordings(&self) -> Result<Discovery> {
        self.store()?.discover()
    }

    /// Renames a recording of the open solution.
    ///
    /// # Errors
    ///
    /// - [`StudioError::NoSolutionOpen`] if no solution is open
    /// - [`StudioError::Storage`] if the recording is the active one
    /// - any error from [`RecordingStore::rename`]
    pub fn rename_recording(&self, metadata: &RecordingMetadata, new_name: &str) -> Result<RecordingMetadata> {
        self.refuse_active(metadata, "rename")?;
        self.store()?.rename(metadata, new_name)
    }

    /// Deletes a recording of the open solution.
    ///
    /// # Errors
    ///
    /// - [`StudioError::NoSolutionOpen`] if no solution is open
    /// - [`StudioError::Storage`] if the recording is the active one
    /// - [`StudioError::Io`] if the file cannot be removed
    pub fn delete_recording(&self, metadata: &RecordingMetadata) -> Result<()> {
        self.refuse_active(metadata, "delete")?;
        self.store()?.delete(metadata)
    }

    /// The engine rewrites the active file on every flush, so edits made beside it
    /// would be lost.
    fn refuse_active(&self, metadata: &RecordingMetadata, action: &str) -> Result<()> {
        if self.active_recording() == Some(metadata.file_path.as_path()) {
            return Err(StudioError::Storage(format!(
                "cannot {action} the active recording '{}'",
                metadata.name
            )));
        }
        Ok(())
    }

    /// Default display name for the next recording.
    ///
    /// # Errors
    ///
    /// - [`StudioError::NoSolutionOpen`] if no solution is open
    /// - [`StudioError::Io`] if the recordings directory cannot be listed
    pub fn next_recording_name(&self) -> Result<String> {
        self.store()?.next_display_name()
    }

    fn store(&self) -> Result<&RecordingStore> {
        self.open
            .as_ref()
            .map(|open| &open.store)
            .ok_or(StudioError::NoSolutionOpen)
    }

    fn ensure_legal(&self, intent: Intent) -> Result<()> {
        if self.controller.is_legal(intent) {
            Ok(())
        } else {
            Err(illegal(intent, self.state()))
        }
    }
}

fn illegal(intent: Intent, state: StudioState) -> StudioError {
    tracing::debug!(%intent, ?state, "illegal intent rejected");
    StudioError::IllegalTransition {
        intent: intent.to_string(),
        state: state.to_string(),
    }
}
