//! User actions enabled in each lifecycle state.
//!
//! A UI re-derives its enabled/disabled controls from these flags after every state
//! change notification instead of tracking them itself.

use crate::app::controller::transition;
use crate::app::modes::{Intent, StudioState};

/// Which user actions are available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct Affordances {
    pub new_solution: bool,
    pub open_solution: bool,
    /// Closing also ends an active recording and hides the inspector.
    pub close_solution: bool,
    pub start_recording: bool,
    pub stop_recording: bool,
    pub pause_recording: bool,
    pub resume_recording: bool,
    pub show_inspector: bool,
    pub hide_inspector: bool,
    /// Events forwarded now are written to the recording.
    pub capture_events: bool,
}

impl Affordances {
    /// Derives the affordances of `state`.
    ///
    /// # Examples
    ///
    /// ```
    /// use webweaver_studio::app::{Affordances, StudioState};
    ///
    /// let paused = Affordances::for_state(StudioState::RecordingPaused);
    /// assert!(paused.resume_recording && paused.stop_recording);
    /// assert!(!paused.capture_events);
    /// ```
    #[must_use]
    pub fn for_state(state: StudioState) -> Self {
        let legal = |intent| transition(state, intent).is_some();

        Self {
            new_solution: legal(Intent::SolutionLoaded),
            open_solution: legal(Intent::SolutionLoaded),
            close_solution: state.has_solution(),
            start_recording: state == StudioState::SolutionLoaded,
            stop_recording: state.is_recording(),
            pause_recording: state == StudioState::RecordingRunning,
            resume_recording: state == StudioState::RecordingPaused,
            show_inspector: legal(Intent::InspectorToggle { shown: true }),
            hide_inspector: legal(Intent::InspectorToggle { shown: false }),
            capture_events: state == StudioState::RecordingRunning,
        }
    }
}
