//! Calendar event model.
//!
//! Mirrors the shape of the Microsoft Graph `calendarView` resource: a
//! subject line plus start/end wall-clock timestamps, each with its own
//! zone name.

use serde::{Deserialize, Serialize};

/// A single calendar event for one mailbox.
///
/// Events are produced by the event provider and consumed once by the
/// aggregator; nothing mutates them in between.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// The subject line. Absent subjects classify into the default bucket.
    #[serde(default)]
    pub subject: Option<String>,
    /// When the event starts.
    pub start: EventDateTime,
    /// When the event ends.
    pub end: EventDateTime,
}

/// A Graph-style timestamp: wall-clock time plus a zone name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTime {
    /// Wall-clock timestamp, e.g. `2025-05-12T09:30:00.0000000`.
    pub date_time: String,
    /// IANA zone name; the request default applies when absent.
    #[serde(default)]
    pub time_zone: Option<String>,
}

impl EventDateTime {
    /// Builds a timestamp in a named zone.
    pub fn new(date_time: impl Into<String>, time_zone: Option<&str>) -> Self {
        Self {
            date_time: date_time.into(),
            time_zone: time_zone.map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_graph_event() {
        let json = r#"{
            "subject": "Daily Standup",
            "start": { "dateTime": "2025-05-12T09:00:00.0000000", "timeZone": "America/Bogota" },
            "end": { "dateTime": "2025-05-12T09:30:00.0000000", "timeZone": "America/Bogota" }
        }"#;

        let event: CalendarEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.subject.as_deref(), Some("Daily Standup"));
        assert_eq!(event.start.date_time, "2025-05-12T09:00:00.0000000");
        assert_eq!(event.end.time_zone.as_deref(), Some("America/Bogota"));
    }

    #[test]
    fn test_deserialize_event_without_subject_or_zone() {
        let json = r#"{
            "start": { "dateTime": "2025-05-12T09:00:00" },
            "end": { "dateTime": "2025-05-12T10:00:00" }
        }"#;

        let event: CalendarEvent = serde_json::from_str(json).unwrap();
        assert!(event.subject.is_none());
        assert!(event.start.time_zone.is_none());
    }

    #[test]
    fn test_serialization_round_trip() {
        let event = CalendarEvent {
            subject: Some("Refinamiento".to_string()),
            start: EventDateTime::new("2025-05-12T14:00:00", Some("America/Bogota")),
            end: EventDateTime::new("2025-05-12T15:00:00", Some("America/Bogota")),
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"dateTime\":\"2025-05-12T14:00:00\""));
        assert!(json.contains("\"timeZone\":\"America/Bogota\""));

        let deserialized: CalendarEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, event);
    }
}
