//! Structured logging to a rotating file.
//!
//! All crate code logs through `tracing` spans and events; this module installs the
//! subscriber that writes them out.
//!
//! # Features
//!
//! - **File Output**: `<config_dir>/logs/studio.log`
//! - **Automatic Rotation**: Files rotate at 10 MiB with 3-backup retention
//! - **Filtering**: `RUST_LOG`, then the configured `log_level`, then `"info"`
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - `file_writer`: Rotating file writer with size-based rotation

mod file_writer;
pub mod init;

pub use init::init_tracing;
