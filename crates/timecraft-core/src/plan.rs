//! Plan output types.
//!
//! A [`Plan`] is the shared output of both the local planner and any external
//! generator. Consumers (timeline views, calendar export) read it as-is.

use chrono::{DateTime, Datelike, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

use crate::clock::Day;
use crate::error::ValidationError;
use crate::request::Priority;

/// Kind of scheduled event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventType {
    Task,
    Break,
    Anchor,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Task => "TASK",
            EventType::Break => "BREAK",
            EventType::Anchor => "ANCHOR",
        }
    }

    /// Task and anchor events occupy time; breaks are presentation-only.
    pub fn is_blocking(&self) -> bool {
        matches!(self, EventType::Task | EventType::Anchor)
    }
}

/// One block on the weekly timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEvent {
    pub id: String,
    pub title: String,
    pub day: Day,
    #[serde(deserialize_with = "deserialize_instant")]
    pub start_iso: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_instant")]
    pub end_iso: DateTime<Utc>,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl ScheduleEvent {
    pub fn duration_minutes(&self) -> i64 {
        (self.end_iso - self.start_iso).num_minutes()
    }

    /// Check if this event overlaps another in time.
    pub fn overlaps(&self, other: &ScheduleEvent) -> bool {
        self.start_iso < other.end_iso && self.end_iso > other.start_iso
    }
}

/// Parse an RFC 3339 instant. Older saved plans omit the offset; such
/// timestamps are read as UTC.
pub fn parse_instant(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(at) => Ok(at.with_timezone(&Utc)),
        Err(e) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
            .map(|naive| naive.and_utc())
            .map_err(|_| e),
    }
}

fn deserialize_instant<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_instant(&raw).map_err(serde::de::Error::custom)
}

/// A weekly schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub summary: String,
    /// Emission order, not time order.
    pub events: Vec<ScheduleEvent>,
    #[serde(default)]
    pub unplaced_tasks: Vec<String>,
    /// Input entries that were dropped while building the plan.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl Plan {
    /// Check the shape guarantees consumers rely on: non-empty unique ids,
    /// `start < end`, and a `day` label that agrees with the start instant.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();
        for event in &self.events {
            let invalid = |message: &str| ValidationError::InvalidEvent {
                id: event.id.clone(),
                message: message.to_string(),
            };

            if event.id.is_empty() {
                return Err(invalid("empty id"));
            }
            if !seen.insert(event.id.as_str()) {
                return Err(invalid("duplicate id"));
            }
            if event.end_iso <= event.start_iso {
                return Err(invalid("end must be after start"));
            }
            if Day::from_weekday(event.start_iso.weekday()) != event.day {
                return Err(invalid("day label does not match start timestamp"));
            }
        }
        Ok(())
    }

    /// Events of one kind, in emission order.
    pub fn events_of(&self, event_type: EventType) -> impl Iterator<Item = &ScheduleEvent> {
        self.events.iter().filter(move |e| e.event_type == event_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event(id: &str, day: Day, start_h: u32, end_h: u32) -> ScheduleEvent {
        // 2024-01-01 is a Monday
        let base_day = 1 + day.index() as u32;
        ScheduleEvent {
            id: id.to_string(),
            title: "x".to_string(),
            day,
            start_iso: Utc.with_ymd_and_hms(2024, 1, base_day, start_h, 0, 0).unwrap(),
            end_iso: Utc.with_ymd_and_hms(2024, 1, base_day, end_h, 0, 0).unwrap(),
            event_type: EventType::Task,
            priority: None,
        }
    }

    #[test]
    fn event_serializes_with_wire_names() {
        let json = serde_json::to_value(event("tsk-0-540-600-1", Day::Mon, 9, 10)).unwrap();
        assert_eq!(json["type"], "TASK");
        assert_eq!(json["day"], "Mon");
        assert_eq!(json["start_iso"], "2024-01-01T09:00:00Z");
        assert!(json.get("priority").is_none());
    }

    #[test]
    fn plan_omits_empty_warnings() {
        let plan = Plan {
            summary: "s".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&plan).unwrap();
        assert!(json.get("warnings").is_none());
        assert_eq!(json["unplaced_tasks"], serde_json::json!([]));
    }

    #[test]
    fn validate_accepts_consistent_plan() {
        let plan = Plan {
            summary: "ok".into(),
            events: vec![event("a", Day::Mon, 9, 10), event("b", Day::Thu, 14, 15)],
            ..Default::default()
        };
        assert!(plan.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_events() {
        let mut dup = Plan::default();
        dup.events = vec![event("a", Day::Mon, 9, 10), event("a", Day::Tue, 9, 10)];
        assert!(dup.validate().is_err());

        let mut inverted = Plan::default();
        inverted.events = vec![event("a", Day::Mon, 11, 10)];
        assert!(inverted.validate().is_err());

        let mut wrong_day = Plan::default();
        let mut e = event("a", Day::Mon, 9, 10);
        e.day = Day::Fri;
        wrong_day.events = vec![e];
        assert!(wrong_day.validate().is_err());

        let mut empty_id = Plan::default();
        empty_id.events = vec![event("", Day::Mon, 9, 10)];
        assert!(empty_id.validate().is_err());
    }

    #[test]
    fn timestamps_without_offset_read_as_utc() {
        let json = r#"{"id": "a", "title": "x", "day": "Mon", "type": "TASK",
            "start_iso": "2024-01-01T09:00:00", "end_iso": "2024-01-01T10:00"}"#;
        let e: ScheduleEvent = serde_json::from_str(json).unwrap();
        assert_eq!(e, event("a", Day::Mon, 9, 10));
        assert_eq!(
            parse_instant("2024-01-01T10:00:00+01:00").unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
        );
        assert!(parse_instant("Monday 9am").is_err());
    }

    #[test]
    fn overlap_is_half_open() {
        let a = event("a", Day::Mon, 9, 10);
        let b = event("b", Day::Mon, 10, 11);
        let c = event("c", Day::Mon, 9, 11);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
    }
}
