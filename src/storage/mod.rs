//! Storage layer for solution, recording, and user state files.
//!
//! Every document is versioned JSON and every write goes through an atomic
//! write-then-rename, so a crash never leaves a half-written file behind.
//!
//! # Modules
//!
//! - `json`: Atomic JSON read/write helpers
//! - `layout`: Solution directory creation and inspection
//! - `models`: On-disk record types separate from domain models
//! - `recent`: Most-recently-used solutions list
//! - `recordings`: Recording discovery and metadata edits
//! - `solution_file`: Solution document codec and file I/O

pub(crate) mod json;
pub mod layout;
pub mod models;
pub mod recent;
pub mod recordings;
pub mod solution_file;

pub use layout::{ensure_directory_structure, is_directory_writable, missing_directories};
pub use recent::{RecentSolutions, MAX_RECENT};
pub use recordings::{parse_recording, Discovery, DiscoveryFailure, RecordingStore};
pub use solution_file::{load_solution, save_solution};
