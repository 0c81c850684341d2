//! Infrastructure layer for filesystem and environment interactions.
//!
//! Resolves per-user locations and provides path helpers shared by the storage
//! layer.

pub mod paths;

pub use paths::{default_config_dir, log_file_path, normalize_path, recent_solutions_path};
