//! Lifecycle states and intents of the studio.
//!
//! The studio is always in exactly one [`StudioState`]. A host requests changes by
//! issuing an [`Intent`]; the controller decides whether the intent is legal.
//!
//! # State Machine
//!
//! ```text
//!              SolutionLoaded                 InspectorToggle(true)
//!  NoSolution ───────────────▶ SolutionLoaded ──────────────────────▶ Inspecting
//!             ◀─────────────── │    ▲       ◀──────────────────────
//!              SolutionClosed  │    │         InspectorToggle(false)
//!                RecordStartStop    RecordStartStop
//!                              ▼    │
//!                        RecordingRunning ◀──▶ RecordingPaused
//!                                      RecordPause
//! ```
//!
//! `RecordStartStop` from `RecordingPaused` also ends the recording.

use std::fmt;

/// Application-wide mode gating which operations are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StudioState {
    /// Nothing is open. Only creating or opening a solution is possible.
    #[default]
    NoSolution,

    /// A solution is open and idle.
    SolutionLoaded,

    /// A recording is capturing events.
    RecordingRunning,

    /// A recording is active but events are not captured.
    RecordingPaused,

    /// The page inspector is shown. Recording is unavailable.
    Inspecting,
}

impl StudioState {
    /// Every state, for exhaustive checks.
    pub const ALL: [Self; 5] = [
        Self::NoSolution,
        Self::SolutionLoaded,
        Self::RecordingRunning,
        Self::RecordingPaused,
        Self::Inspecting,
    ];

    /// Whether a solution is open in this state.
    #[must_use]
    pub const fn has_solution(self) -> bool {
        !matches!(self, Self::NoSolution)
    }

    /// Whether a recording file is active (running or paused).
    #[must_use]
    pub const fn is_recording(self) -> bool {
        matches!(self, Self::RecordingRunning | Self::RecordingPaused)
    }
}

impl fmt::Display for StudioState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NoSolution => "no solution is open",
            Self::SolutionLoaded => "a solution is loaded",
            Self::RecordingRunning => "recording",
            Self::RecordingPaused => "recording is paused",
            Self::Inspecting => "inspecting",
        };
        f.write_str(label)
    }
}

/// A request to change the lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// A solution was created or opened.
    SolutionLoaded,
    /// The open solution was closed.
    SolutionClosed,
    /// Start a recording, or stop the active one.
    RecordStartStop,
    /// Pause the running recording, or resume the paused one.
    RecordPause,
    /// Show or hide the inspector.
    InspectorToggle { shown: bool },
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SolutionLoaded => f.write_str("SolutionLoaded"),
            Self::SolutionClosed => f.write_str("SolutionClosed"),
            Self::RecordStartStop => f.write_str("RecordStartStop"),
            Self::RecordPause => f.write_str("RecordPause"),
            Self::InspectorToggle { shown } => write!(f, "InspectorToggle({shown})"),
        }
    }
}
