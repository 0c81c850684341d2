//! Recording domain model.
//!
//! A recording is a named, timestamped, append-only sequence of interaction events
//! captured against one solution. This module defines the event kinds and the
//! lightweight [`RecordingMetadata`] summary used when listing recordings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Kind of a captured interaction.
///
/// Serialized as dotted identifiers (`nav.goto`, `dom.click`, ...). Identifiers this
/// build does not know deserialize as [`RecordingEventType::Unknown`] so a newer
/// recording can still be listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordingEventType {
    #[serde(rename = "nav.goto")]
    NavGoto,
    #[serde(rename = "dom.click")]
    DomClick,
    #[serde(rename = "dom.type")]
    DomType,
    #[serde(rename = "wait")]
    Wait,
    #[serde(rename = "unknown", other)]
    Unknown,
}

impl RecordingEventType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NavGoto => "nav.goto",
            Self::DomClick => "dom.click",
            Self::DomType => "dom.type",
            Self::Wait => "wait",
            Self::Unknown => "unknown",
        }
    }

    /// Parses an identifier, mapping anything unrecognised to `Unknown`.
    #[must_use]
    pub fn from_identifier(identifier: &str) -> Self {
        match identifier {
            "nav.goto" => Self::NavGoto,
            "dom.click" => Self::DomClick,
            "dom.type" => Self::DomType,
            "wait" => Self::Wait,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for RecordingEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary of a recording file, enough to list and rename it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingMetadata {
    /// Opaque unique id generated when the recording was created.
    pub id: String,
    /// User-editable display name.
    pub name: String,
    pub file_path: PathBuf,
    pub created_at: DateTime<Utc>,
}

/// Display name for the next recording of a solution: `"Recording N"` where `N` is
/// one more than the number of recordings that already exist.
///
/// This is a counter, not a uniqueness guarantee; deleting a recording can make the
/// generated name collide with an existing one.
///
/// # Examples
///
/// ```
/// use webweaver_studio::domain::generate_next_display_name;
///
/// assert_eq!(generate_next_display_name(0), "Recording 1");
/// assert_eq!(generate_next_display_name(4), "Recording 5");
/// ```
#[must_use]
pub fn generate_next_display_name(existing_count: usize) -> String {
    format!("Recording {}", existing_count.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_serializes_as_dotted_identifier() {
        let json = serde_json::to_string(&RecordingEventType::DomClick).unwrap();
        assert_eq!(json, "\"dom.click\"");
    }

    #[test]
    fn unrecognised_event_type_reads_back_as_unknown() {
        let parsed: RecordingEventType = serde_json::from_str("\"dom.hover\"").unwrap();
        assert_eq!(parsed, RecordingEventType::Unknown);
        assert_eq!(RecordingEventType::from_identifier("dom.hover"), RecordingEventType::Unknown);
    }

    #[test]
    fn identifiers_match_serde_names() {
        for kind in [
            RecordingEventType::NavGoto,
            RecordingEventType::DomClick,
            RecordingEventType::DomType,
            RecordingEventType::Wait,
        ] {
            assert_eq!(RecordingEventType::from_identifier(kind.as_str()), kind);
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, serde_json::Value::from(kind.as_str()));
        }
    }
}
