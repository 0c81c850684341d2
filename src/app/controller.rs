//! Lifecycle state controller.
//!
//! [`transition`] is the whole transition table as a pure function; the
//! [`StudioStateController`] holds the current state and notifies a single observer
//! on every change.

use crate::app::modes::{Intent, StudioState};
use std::fmt;

/// Callback invoked once per state change with the new state.
pub type StateObserver = Box<dyn FnMut(StudioState)>;

/// Returns the state `intent` leads to from `state`, or `None` if the intent is a
/// no-op there.
///
/// # Examples
///
/// ```
/// use webweaver_studio::app::{transition, Intent, StudioState};
///
/// assert_eq!(
///     transition(StudioState::SolutionLoaded, Intent::RecordStartStop),
///     Some(StudioState::RecordingRunning)
/// );
/// assert_eq!(transition(StudioState::Inspecting, Intent::RecordStartStop), None);
/// ```
#[must_use]
pub const fn transition(state: StudioState, intent: Intent) -> Option<StudioState> {
    use Intent as I;
    use StudioState as S;

    match (state, intent) {
        (S::NoSolution, I::SolutionLoaded) => Some(S::SolutionLoaded),
        (S::SolutionLoaded, I::SolutionClosed) => Some(S::NoSolution),
        (S::SolutionLoaded, I::RecordStartStop) => Some(S::RecordingRunning),
        (S::RecordingRunning | S::RecordingPaused, I::RecordStartStop) => Some(S::SolutionLoaded),
        (S::RecordingRunning, I::RecordPause) => Some(S::RecordingPaused),
        (S::RecordingPaused, I::RecordPause) => Some(S::RecordingRunning),
        (S::SolutionLoaded, I::InspectorToggle { shown: true }) => Some(S::Inspecting),
        (S::Inspecting, I::InspectorToggle { shown: false }) => Some(S::SolutionLoaded),
        _ => None,
    }
}

/// Single source of truth for the studio's lifecycle state.
pub struct StudioStateController {
    state: StudioState,
    observer: Option<StateObserver>,
}

impl StudioStateController {
    /// Creates a controller in [`StudioState::NoSolution`] with no observer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: StudioState::NoSolution,
            observer: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> StudioState {
        self.state
    }

    /// Registers the observer, replacing any previous one.
    pub fn set_observer(&mut self, observer: impl FnMut(StudioState) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Whether `intent` would change the current state.
    #[must_use]
    pub fn is_legal(&self, intent: Intent) -> bool {
        transition(self.state, intent).is_some()
    }

    /// Applies `intent` and returns `true` if the state changed.
    ///
    /// Intents that are not legal in the current state are ignored.
    pub fn apply(&mut self, intent: Intent) -> bool {
        match transition(self.state, intent) {
            Some(next) => self.set_state(next),
            None => {
                tracing::debug!(state = ?self.state, %intent, "intent ignored");
                false
            }
        }
    }

    /// Moves to `state` and notifies the observer.
    ///
    /// Re-entering the current state does nothing and fires no notification.
    /// Returns `true` if the state changed.
    pub fn set_state(&mut self, state: StudioState) -> bool {
        if self.state == state {
            return false;
        }

        tracing::debug!(from = ?self.state, to = ?state, "studio state changed");
        self.state = state;
        if let Some(observer) = self.observer.as_mut() {
            observer(state);
        }
        true
    }
}

impl Default for StudioStateController {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StudioStateController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StudioStateController")
            .field("state", &self.state)
            .field("has_observer", &self.observer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording_controller() -> (StudioStateController, Rc<RefCell<Vec<StudioState>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut controller = StudioStateController::new();
        controller.set_observer(move |state| sink.borrow_mut().push(state));
        (controller, seen)
    }

    #[test]
    fn starts_without_solution() {
        assert_eq!(StudioStateController::new().state(), StudioState::NoSolution);
    }

    #[test]
    fn transition_table_is_exact() {
        use Intent as I;
        use StudioState as S;

        let intents = [
            I::SolutionLoaded,
            I::SolutionClosed,
            I::RecordStartStop,
            I::RecordPause,
            I::InspectorToggle { shown: true },
            I::InspectorToggle { shown: false },
        ];
        let legal = [
            (S::NoSolution, I::SolutionLoaded, S::SolutionLoaded),
            (S::SolutionLoaded, I::SolutionClosed, S::NoSolution),
            (S::SolutionLoaded, I::RecordStartStop, S::RecordingRunning),
            (S::RecordingRunning, I::RecordStartStop, S::SolutionLoaded),
            (S::RecordingRunning, I::RecordPause, S::RecordingPaused),
            (S::RecordingPaused, I::RecordPause, S::RecordingRunning),
            (S::RecordingPaused, I::RecordStartStop, S::SolutionLoaded),
            (S::SolutionLoaded, I::InspectorToggle { shown: true }, S::Inspecting),
            (S::Inspecting, I::InspectorToggle { shown: false }, S::SolutionLoaded),
        ];

        for state in S::ALL {
            for intent in intents {
                let expected = legal
                    .iter()
                    .find(|(from, via, _)| *from == state && *via == intent)
                    .map(|(_, _, to)| *to);
                assert_eq!(transition(state, intent), expected, "{state:?} + {intent}");
            }
        }
    }

    #[test]
    fn pause_resume_cancels_out() {
        let (mut controller, seen) = recording_controller();
        controller.apply(Intent::SolutionLoaded);
        seen.borrow_mut().clear();

        for intent in [
            Intent::RecordStartStop,
            Intent::RecordPause,
            Intent::RecordPause,
            Intent::RecordStartStop,
        ] {
            assert!(controller.apply(intent));
        }

        assert_eq!(controller.state(), StudioState::SolutionLoaded);
        assert_eq!(
            *seen.borrow(),
            vec![
                StudioState::RecordingRunning,
                StudioState::RecordingPaused,
                StudioState::RecordingRunning,
                StudioState::SolutionLoaded,
            ]
        );
    }

    #[test]
    fn inspector_only_toggles_from_loaded_solution() {
        let (mut controller, seen) = recording_controller();

        assert!(!controller.apply(Intent::InspectorToggle { shown: true }));
        controller.apply(Intent::SolutionLoaded);
        controller.apply(Intent::RecordStartStop);
        assert!(!controller.apply(Intent::InspectorToggle { shown: true }));
        assert_eq!(controller.state(), StudioState::RecordingRunning);

        controller.apply(Intent::RecordStartStop);
        assert!(controller.apply(Intent::InspectorToggle { shown: true }));
        assert!(!controller.apply(Intent::RecordStartStop));
        assert!(controller.apply(Intent::InspectorToggle { shown: false }));

        assert_eq!(seen.borrow().len(), 5);
    }

    #[test]
    fn set_state_is_idempotent() {
        let (mut controller, seen) = recording_controller();

        assert!(controller.set_state(StudioState::SolutionLoaded));
        assert!(!controller.set_state(StudioState::SolutionLoaded));

        assert_eq!(*seen.borrow(), vec![StudioState::SolutionLoaded]);
    }

    #[test]
    fn ignored_intents_do_not_notify() {
        let (mut controller, seen) = recording_controller();

        assert!(!controller.apply(Intent::SolutionClosed));
        assert!(!controller.apply(Intent::RecordPause));

        assert!(seen.borrow().is_empty());
    }
}
