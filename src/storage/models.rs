//! On-disk record types for the persistence layer.
//!
//! These mirror the JSON documents byte-for-byte (field names, nesting, optional
//! members) and are kept separate from the domain models so the file format can be
//! versioned without touching business logic.

use crate::domain::{BrowserLaunchOptions, RecordingEventType, WindowMode, WindowSize};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Current version of every document format written by this crate.
pub const FORMAT_VERSION: u32 = 1;

/// The `solution` object of a solution file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionRecord {
    pub solution_name: String,
    pub solution_directory: String,
    pub solution_directory_created: bool,
    pub base_url: String,
    pub browser: String,
    #[serde(default)]
    pub browser_launch_options: LaunchOptionsRecord,
}

/// The `browserLaunchOptions` object of a solution file.
///
/// Missing members take their defaults. `maximised` and `windowSize` together are
/// rejected because they name two window modes at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawLaunchOptions")]
pub struct LaunchOptionsRecord {
    pub private_mode: bool,
    pub disable_extensions: bool,
    pub disable_notifications: bool,
    pub ignore_certificate_errors: bool,
    pub maximised: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_size: Option<WindowSizeRecord>,
}

/// Unvalidated shape of [`LaunchOptionsRecord`], used only while deserializing.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawLaunchOptions {
    private_mode: bool,
    disable_extensions: bool,
    disable_notifications: bool,
    ignore_certificate_errors: bool,
    maximised: bool,
    user_agent: Option<String>,
    window_size: Option<WindowSizeRecord>,
}

impl Default for RawLaunchOptions {
    fn default() -> Self {
        let defaults = LaunchOptionsRecord::default();
        Self {
            private_mode: defaults.private_mode,
            disable_extensions: defaults.disable_extensions,
            disable_notifications: defaults.disable_notifications,
            ignore_certificate_errors: defaults.ignore_certificate_errors,
            maximised: defaults.maximised,
            user_agent: None,
            window_size: None,
        }
    }
}

impl TryFrom<RawLaunchOptions> for LaunchOptionsRecord {
    type Error = &'static str;

    fn try_from(raw: RawLaunchOptions) -> Result<Self, Self::Error> {
        if raw.maximised && raw.window_size.is_some() {
            return Err("'maximised' and 'windowSize' are mutually exclusive");
        }
        Ok(Self {
            private_mode: raw.private_mode,
            disable_extensions: raw.disable_extensions,
            disable_notifications: raw.disable_notifications,
            ignore_certificate_errors: raw.ignore_certificate_errors,
            maximised: raw.maximised,
            user_agent: raw.user_agent,
            window_size: raw.window_size,
        })
    }
}

impl Default for LaunchOptionsRecord {
    fn default() -> Self {
        Self::from(&BrowserLaunchOptions::default())
    }
}

impl From<&BrowserLaunchOptions> for LaunchOptionsRecord {
    fn from(options: &BrowserLaunchOptions) -> Self {
        Self {
            private_mode: options.private_mode,
            disable_extensions: options.disable_extensions,
            disable_notifications: options.disable_notifications,
            ignore_certificate_errors: options.ignore_certificate_errors,
            maximised: matches!(options.window, WindowMode::Maximised),
            user_agent: options.user_agent.clone(),
            window_size: options.window.window_size().map(WindowSizeRecord::from),
        }
    }
}

impl From<LaunchOptionsRecord> for BrowserLaunchOptions {
    fn from(record: LaunchOptionsRecord) -> Self {
        let window = match (record.maximised, record.window_size) {
            (_, Some(size)) => WindowMode::Custom(size.into()),
            (true, None) => WindowMode::Maximised,
            (false, None) => WindowMode::Default,
        };
        Self {
            private_mode: record.private_mode,
            disable_extensions: record.disable_extensions,
            disable_notifications: record.disable_notifications,
            ignore_certificate_errors: record.ignore_certificate_errors,
            user_agent: record.user_agent,
            window,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSizeRecord {
    pub width: u32,
    pub height: u32,
}

impl From<WindowSize> for WindowSizeRecord {
    fn from(size: WindowSize) -> Self {
        Self {
            width: size.width,
            height: size.height,
        }
    }
}

impl From<WindowSizeRecord> for WindowSize {
    fn from(record: WindowSizeRecord) -> Self {
        Self {
            width: record.width,
            height: record.height,
        }
    }
}

/// Top-level recording file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingDocument {
    pub version: u32,
    pub recording: RecordingBody,
}

/// The `recording` object of a recording file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingBody {
    pub id: String,
    pub name: String,
    /// RFC 3339 UTC timestamp, second precision.
    pub created_at: String,
    pub browser: String,
    pub base_url: String,
    #[serde(default)]
    pub events: Vec<RecordedEvent>,
}

/// One entry of the `events` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedEvent {
    /// 0-based, gapless, strictly increasing within a file.
    pub index: u64,
    /// Milliseconds elapsed since the recording started.
    pub timestamp: u64,
    #[serde(rename = "type")]
    pub kind: RecordingEventType,
    #[serde(default)]
    pub payload: Value,
}

/// Recent-solutions file in the user config directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentSolutionsRecord {
    pub version: u32,
    #[serde(default)]
    pub recent_solutions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn launch_options_default_when_members_are_missing() {
        let record: LaunchOptionsRecord = serde_json::from_value(json!({"maximised": true})).unwrap();
        let options = BrowserLaunchOptions::from(record);

        assert!(options.private_mode);
        assert!(options.disable_extensions);
        assert!(!options.ignore_certificate_errors);
        assert_eq!(options.window, WindowMode::Maximised);
    }

    #[test]
    fn conflicting_window_modes_are_rejected() {
        let result = serde_json::from_value::<LaunchOptionsRecord>(json!({
            "maximised": true,
            "windowSize": {"width": 1280, "height": 800}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn custom_window_size_is_written_without_maximised() {
        let options = BrowserLaunchOptions {
            window: WindowMode::Custom(WindowSize { width: 1280, height: 800 }),
            user_agent: Some("agent/1.0".to_string()),
            ..BrowserLaunchOptions::default()
        };
        let value = serde_json::to_value(LaunchOptionsRecord::from(&options)).unwrap();

        assert_eq!(value["maximised"], false);
        assert_eq!(value["windowSize"], json!({"width": 1280, "height": 800}));
        assert_eq!(value["userAgent"], "agent/1.0");
    }

    #[test]
    fn recorded_event_uses_type_and_timestamp_keys() {
        let event = RecordedEvent {
            index: 0,
            timestamp: 42,
            kind: RecordingEventType::DomClick,
            payload: json!({"selector": "#btn"}),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(
            value,
            json!({"index": 0, "timestamp": 42, "type": "dom.click", "payload": {"selector": "#btn"}})
        );
    }
}
