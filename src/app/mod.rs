//! Application layer coordinating lifecycle state and durable operations.
//!
//! This module sits between a hosting UI and the storage/session layers. The host
//! issues intents; the state machine decides whether they are legal; the facade
//! performs the durable work and then commits the transition.
//!
//! # Architecture
//!
//! ```text
//! Host Input → Studio facade → Legality check → Durable operation → Transition
//!                                                                      ↓
//!                           Host ◀──────── state change notification ──┘
//! ```
//!
//! # Modules
//!
//! - [`affordances`]: Enabled user actions derived from a state
//! - [`controller`]: Transition table and the state holder with its observer
//! - [`modes`]: Lifecycle state and intent types
//! - [`studio`]: Facade composing state, solution, recordings and recent list
//!
//! # Example
//!
//! ```
//! use webweaver_studio::app::{Intent, StudioState, StudioStateController};
//!
//! let mut controller = StudioStateController::new();
//! controller.apply(Intent::SolutionLoaded);
//! controller.apply(Intent::RecordStartStop);
//! assert_eq!(controller.state(), StudioState::RecordingRunning);
//! ```

pub mod affordances;
pub mod controller;
pub mod modes;
pub mod studio;

pub use affordances::Affordances;
pub use controller::{transition, StateObserver, StudioStateController};
pub use modes::{Intent, StudioState};
pub use studio::{RecordingToggle, Studio};
