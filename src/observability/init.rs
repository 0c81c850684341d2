//! Tracing initialization and subscriber setup.
//!
//! Configures a `tracing-subscriber` registry with an [`EnvFilter`] and a plain-text
//! `fmt` layer writing to the studio's rotating log file.

use super::file_writer::RotatingLogFile;
use crate::infrastructure::paths::{log_file_path, logs_dir};
use crate::StudioConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when neither `RUST_LOG` nor the configuration sets one.
const DEFAULT_LOG_LEVEL: &str = "info";

/// Initializes the tracing subscriber with file output.
///
/// # Filter Resolution
///
/// 1. `RUST_LOG` environment variable (highest priority)
/// 2. `log_level` from the configuration
/// 3. Default: `"info"`
///
/// # File Location
///
/// Logs are written to `<config_dir>/logs/studio.log`, rotated at 10 MiB with
/// three backups.
///
/// # Initialization Behavior
///
/// - Creates the log directory if it doesn't exist
/// - Silently does nothing if that fails (logging is optional)
/// - Idempotent: only the first call in a process takes effect
///
/// # Example
///
/// ```no_run
/// use webweaver_studio::observability::init_tracing;
/// use webweaver_studio::StudioConfig;
///
/// let config = StudioConfig {
///     log_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &StudioConfig) {
    let config_dir = config.config_dir();
    if std::fs::create_dir_all(logs_dir(&config_dir)).is_err() {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(config.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL))
    });

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(RotatingLogFile::new(log_file_path(&config_dir)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
