//! Plan assembly: event minting, de-duplication and the summary line.

use chrono::{DateTime, Utc};
use std::collections::HashSet;

use crate::clock::{instant, Day};
use crate::plan::{EventType, Plan, ScheduleEvent};
use crate::request::Priority;

use super::constraints::Interval;

/// Suffix appended to the title of every placed work chunk.
pub const FOCUS_SUFFIX: &str = " (focus)";
pub const BREAK_TITLE: &str = "Break";

/// Collects events in emission order and mints their ids.
///
/// Ids have the form `<kind>-<day>-<start>-<end>-<seq>`; `seq` increases with
/// every event so ids are unique within a run and reproducible across runs.
#[derive(Debug)]
pub struct EventLog {
    base: DateTime<Utc>,
    next_seq: u64,
    events: Vec<ScheduleEvent>,
}

impl EventLog {
    pub fn new(base: DateTime<Utc>) -> Self {
        Self {
            base,
            next_seq: 0,
            events: Vec::new(),
        }
    }

    fn prefix(event_type: EventType) -> &'static str {
        match event_type {
            EventType::Task => "tsk",
            EventType::Break => "brk",
            EventType::Anchor => "anc",
        }
    }

    pub fn push(
        &mut self,
        event_type: EventType,
        title: String,
        day: Day,
        span: Interval,
        priority: Option<Priority>,
    ) {
        self.next_seq += 1;
        let id = format!(
            "{}-{}-{}-{}-{}",
            Self::prefix(event_type),
            day.index(),
            span.start,
            span.end,
            self.next_seq
        );
        self.events.push(ScheduleEvent {
            id,
            title,
            day,
            start_iso: instant(self.base, day, span.start),
            end_iso: instant(self.base, day, span.end),
            event_type,
            priority,
        });
    }

    pub fn anchor(&mut self, day: Day, span: Interval, title: &str) {
        self.push(EventType::Anchor, title.to_string(), day, span, None);
    }

    pub fn task(&mut self, day: Day, span: Interval, title: &str, priority: Option<Priority>) {
        self.push(EventType::Task, format!("{title}{FOCUS_SUFFIX}"), day, span, priority);
    }

    pub fn rest(&mut self, day: Day, span: Interval) {
        self.push(EventType::Break, BREAK_TITLE.to_string(), day, span, None);
    }

    pub fn into_events(self) -> Vec<ScheduleEvent> {
        self.events
    }
}

/// Drop events whose id was already seen, keeping first occurrences in order.
pub fn dedupe_events(events: Vec<ScheduleEvent>) -> Vec<ScheduleEvent> {
    let mut seen = HashSet::new();
    events
        .into_iter()
        .filter(|e| seen.insert(e.id.clone()))
        .collect()
}

/// Fixed-format summary line.
pub fn summarize(events: &[ScheduleEvent], unplaced: usize) -> String {
    let tasks = events.iter().filter(|e| e.event_type == EventType::Task).count();
    let days: HashSet<Day> = events
        .iter()
        .filter(|e| e.event_type == EventType::Task)
        .map(|e| e.day)
        .collect();
    format!(
        "Local plan: {tasks} focus blocks across {} days, {unplaced} unplaced; \
         conflict-free blocks; anchors respected; ISO times with Z.",
        days.len()
    )
}

/// Assemble the final plan.
pub fn assemble(
    log: EventLog,
    unplaced_tasks: Vec<String>,
    warnings: Vec<String>,
) -> Plan {
    let events = dedupe_events(log.into_events());
    let summary = summarize(&events, unplaced_tasks.len());
    Plan {
        summary,
        events,
        unplaced_tasks,
        warnings,
    }
}
