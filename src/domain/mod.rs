//! Domain layer for the studio core.
//!
//! Core types independent of any storage format or UI toolkit: the solution
//! descriptor with its derived layout, the recording model, and the error taxonomy.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`solution`]: Solution descriptor, launch options, derived paths
//! - [`recording`]: Recording event kinds and metadata
//!
//! # Examples
//!
//! ```
//! use webweaver_studio::domain::{Result, Solution};
//!
//! fn describe() -> Result<Solution> {
//!     Ok(Solution::new("Demo", "/tmp/x", true, "https://example.com", "firefox"))
//! }
//! ```

pub mod error;
pub mod recording;
pub mod solution;

pub use error::{
    DirectoryCreateError, ManagedDirectory, RecordingLoadError, Result, SessionError,
    SolutionLoadError, StudioError,
};
pub use recording::{generate_next_display_name, RecordingEventType, RecordingMetadata};
pub use solution::{
    compute_effective_root, is_valid_solution_name, BrowserLaunchOptions, KnownBrowser, Solution,
    WindowMode, WindowSize, RECORDING_EXTENSION, SOLUTION_EXTENSION,
};
