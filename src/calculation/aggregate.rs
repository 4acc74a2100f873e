//! Per-person aggregation of calendar events into category hour totals.
//!
//! Focus-time blocks are dropped before any accounting; every remaining
//! event contributes its rounded minute duration to the bucket its subject
//! classifies into. Buckets convert to hours only once, at the end.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{CalendarEvent, EventDateTime};

use super::classify::{Category, classify};

/// Subjects marking focus-time blocks; these are not real meetings and are
/// excluded before duration accounting.
const FOCUS_TIME_MARKERS: &[&str] = &[
    "día sin reuniones",
    "dia sin reuniones",
    "tiempo de concentración",
];

/// Accumulated hours per category for one mailbox.
///
/// Created fresh per person and immutable once computed. A back-dated event
/// (end before start) contributes a negative duration uncorrected, so
/// buckets are not guaranteed non-negative for malformed input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonTotals {
    /// Hours spent in agile ceremonies.
    pub ceremony: Decimal,
    /// Hours spent in unclassified meetings.
    pub meeting: Decimal,
    /// Hours spent in learning-route sessions.
    pub route: Decimal,
    /// Hours spent in seeker program sessions.
    pub seeker: Decimal,
    /// Hours spent in knowledge transfers.
    pub transfer: Decimal,
    /// Hours spent in career plan conversations.
    pub career_plan: Decimal,
    /// Sum of all six category buckets.
    pub total: Decimal,
}

impl PersonTotals {
    /// Returns the accumulated hours for one category.
    pub fn hours(&self, category: Category) -> Decimal {
        match category {
            Category::Ceremony => self.ceremony,
            Category::Meeting => self.meeting,
            Category::Route => self.route,
            Category::Seeker => self.seeker,
            Category::Transfer => self.transfer,
            Category::CareerPlan => self.career_plan,
        }
    }
}

/// Aggregates one mailbox's events into per-category hour totals.
///
/// Events whose subject contains a focus-time marker are excluded entirely.
/// Each remaining event's duration is `end - start` in minutes, rounded to
/// the nearest whole minute, with each endpoint resolved in its own declared
/// zone when present and known, else `default_zone`.
///
/// # Errors
///
/// Returns [`EngineError::EventTime`] when an event timestamp cannot be
/// parsed; an unknown zone name is not an error and falls back to
/// `default_zone`.
pub fn aggregate_events(
    events: &[CalendarEvent],
    default_zone: Tz,
) -> EngineResult<PersonTotals> {
    let mut minutes: HashMap<Category, i64> = HashMap::new();

    for event in events {
        if is_focus_time(event.subject.as_deref()) {
            continue;
        }

        let start = resolve_instant(&event.start, default_zone)?;
        let end = resolve_instant(&event.end, default_zone)?;
        let duration = round_to_minutes(end - start);

        *minutes
            .entry(classify(event.subject.as_deref()))
            .or_insert(0) += duration;
    }

    let hours = |category: Category| {
        Decimal::new(minutes.get(&category).copied().unwrap_or(0), 0) / Decimal::new(60, 0)
    };

    let ceremony = hours(Category::Ceremony);
    let meeting = hours(Category::Meeting);
    let route = hours(Category::Route);
    let seeker = hours(Category::Seeker);
    let transfer = hours(Category::Transfer);
    let career_plan = hours(Category::CareerPlan);
    let total = ceremony + meeting + route + seeker + transfer + career_plan;

    Ok(PersonTotals {
        ceremony,
        meeting,
        route,
        seeker,
        transfer,
        career_plan,
        total,
    })
}

/// Whether a subject marks a focus-time block.
fn is_focus_time(subject: Option<&str>) -> bool {
    let Some(subject) = subject else {
        return false;
    };
    let subject = subject.to_lowercase();
    FOCUS_TIME_MARKERS
        .iter()
        .any(|marker| subject.contains(marker))
}

/// Resolves a Graph wall-clock timestamp into an instant.
///
/// The event's own zone wins when it names a known IANA zone; otherwise the
/// caller default applies.
fn resolve_instant(moment: &EventDateTime, default_zone: Tz) -> EngineResult<DateTime<Tz>> {
    let naive = parse_wall_clock(&moment.date_time)?;
    let zone = moment
        .time_zone
        .as_deref()
        .and_then(|name| name.parse::<Tz>().ok())
        .unwrap_or(default_zone);

    zone.from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| EngineError::EventTime {
            value: moment.date_time.clone(),
        })
}

/// Parses the Graph wall-clock format, with or without fractional seconds.
fn parse_wall_clock(value: &str) -> EngineResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").map_err(|_| {
        EngineError::EventTime {
            value: value.to_string(),
        }
    })
}

/// Rounds a duration to the nearest whole minute.
fn round_to_minutes(duration: chrono::TimeDelta) -> i64 {
    (duration.num_seconds() as f64 / 60.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::Bogota;

    fn event(subject: Option<&str>, start: &str, end: &str) -> CalendarEvent {
        CalendarEvent {
            subject: subject.map(str::to_string),
            start: EventDateTime::new(start, Some("America/Bogota")),
            end: EventDateTime::new(end, Some("America/Bogota")),
        }
    }

    fn dec(s: &str) -> Decimal {
        use std::str::FromStr;
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_single_daily_accumulates_into_ceremony() {
        let events = vec![event(
            Some("Daily"),
            "2025-05-12T09:00:00",
            "2025-05-12T09:30:00",
        )];

        let totals = aggregate_events(&events, Bogota).unwrap();
        assert_eq!(totals.ceremony, dec("0.5"));
        assert_eq!(totals.meeting, Decimal::ZERO);
        assert_eq!(totals.total, dec("0.5"));
    }

    #[test]
    fn test_focus_time_is_excluded_before_accounting() {
        // A focus block of any length plus a 30-minute daily: only the
        // daily counts.
        let events = vec![
            event(
                Some("Tiempo de concentración"),
                "2025-05-12T08:00:00",
                "2025-05-12T12:00:00",
            ),
            event(Some("Daily"), "2025-05-12T09:00:00", "2025-05-12T09:30:00"),
        ];

        let totals = aggregate_events(&events, Bogota).unwrap();
        assert_eq!(totals.ceremony, dec("0.5"));
        assert_eq!(totals.total, dec("0.5"));
    }

    #[test]
    fn test_all_focus_markers_are_excluded() {
        for marker in [
            "Día sin reuniones",
            "dia sin reuniones",
            "TIEMPO DE CONCENTRACIÓN",
        ] {
            let events = vec![event(
                Some(marker),
                "2025-05-12T08:00:00",
                "2025-05-12T10:00:00",
            )];
            let totals = aggregate_events(&events, Bogota).unwrap();
            assert_eq!(totals.total, Decimal::ZERO, "{marker}");
        }
    }

    #[test]
    fn test_subjectless_event_lands_in_meeting() {
        let events = vec![event(None, "2025-05-12T10:00:00", "2025-05-12T11:00:00")];

        let totals = aggregate_events(&events, Bogota).unwrap();
        assert_eq!(totals.meeting, Decimal::ONE);
    }

    #[test]
    fn test_minutes_round_to_nearest_whole_minute() {
        // 29 minutes 40 seconds rounds up to 30 minutes.
        let events = vec![event(
            Some("Daily"),
            "2025-05-12T09:00:00",
            "2025-05-12T09:29:40",
        )];

        let totals = aggregate_events(&events, Bogota).unwrap();
        assert_eq!(totals.ceremony, dec("0.5"));
    }

    #[test]
    fn test_fractional_second_timestamps_parse() {
        let events = vec![event(
            Some("Review"),
            "2025-05-12T09:00:00.0000000",
            "2025-05-12T10:00:00.0000000",
        )];

        let totals = aggregate_events(&events, Bogota).unwrap();
        assert_eq!(totals.ceremony, Decimal::ONE);
    }

    #[test]
    fn test_negative_duration_propagates() {
        // End before start is left uncorrected; the bucket goes negative.
        let events = vec![event(
            Some("Daily"),
            "2025-05-12T10:00:00",
            "2025-05-12T09:00:00",
        )];

        let totals = aggregate_events(&events, Bogota).unwrap();
        assert_eq!(totals.ceremony, dec("-1"));
        assert_eq!(totals.total, dec("-1"));
    }

    #[test]
    fn test_unknown_zone_falls_back_to_default() {
        let events = vec![CalendarEvent {
            subject: Some("Daily".to_string()),
            start: EventDateTime::new("2025-05-12T09:00:00", Some("Not/AZone")),
            end: EventDateTime::new("2025-05-12T09:30:00", Some("Not/AZone")),
        }];

        let totals = aggregate_events(&events, Bogota).unwrap();
        assert_eq!(totals.ceremony, dec("0.5"));
    }

    #[test]
    fn test_mixed_zones_compare_as_instants() {
        // 09:00 Bogota (UTC-5) to 15:00 UTC is one hour.
        let events = vec![CalendarEvent {
            subject: Some("Daily".to_string()),
            start: EventDateTime::new("2025-05-12T09:00:00", Some("America/Bogota")),
            end: EventDateTime::new("2025-05-12T15:00:00", Some("UTC")),
        }];

        let totals = aggregate_events(&events, Bogota).unwrap();
        assert_eq!(totals.ceremony, Decimal::ONE);
    }

    #[test]
    fn test_malformed_timestamp_is_an_error() {
        let events = vec![event(Some("Daily"), "yesterday", "2025-05-12T09:30:00")];

        let result = aggregate_events(&events, Bogota);
        assert!(matches!(
            result,
            Err(EngineError::EventTime { value }) if value == "yesterday"
        ));
    }

    #[test]
    fn test_categories_accumulate_independently() {
        let events = vec![
            event(Some("Daily"), "2025-05-12T09:00:00", "2025-05-12T09:30:00"),
            event(Some("Ruta backend"), "2025-05-12T10:00:00", "2025-05-12T11:00:00"),
            event(Some("Sync"), "2025-05-12T11:00:00", "2025-05-12T11:45:00"),
            event(Some("Plan carrera"), "2025-05-12T12:00:00", "2025-05-12T12:30:00"),
        ];

        let totals = aggregate_events(&events, Bogota).unwrap();
        assert_eq!(totals.ceremony, dec("0.5"));
        assert_eq!(totals.route, Decimal::ONE);
        assert_eq!(totals.meeting, dec("0.75"));
        assert_eq!(totals.career_plan, dec("0.5"));
        assert_eq!(totals.total, dec("2.75"));
    }

    #[test]
    fn test_empty_event_list_yields_zero_totals() {
        let totals = aggregate_events(&[], Bogota).unwrap();
        assert_eq!(totals.total, Decimal::ZERO);
        assert_eq!(totals.hours(Category::Meeting), Decimal::ZERO);
    }

    #[test]
    fn test_totals_serialization_round_trip() {
        let events = vec![event(
            Some("Daily"),
            "2025-05-12T09:00:00",
            "2025-05-12T09:30:00",
        )];
        let totals = aggregate_events(&events, Bogota).unwrap();

        let json = serde_json::to_string(&totals).unwrap();
        let deserialized: PersonTotals = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, totals);
    }
}
