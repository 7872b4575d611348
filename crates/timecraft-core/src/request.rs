//! Scheduling request types: tasks, availability, anchors, preferences.
//!
//! These mirror the JSON payload accepted by the planner. Day labels and
//! clock strings stay as raw strings here so that malformed entries can be
//! dropped individually instead of failing the whole request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task priority. Lower rank is scheduled first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    P1,
    P2,
    P3,
}

impl Priority {
    /// Rank used for ordering: P1=0, P2=1, P3=2.
    pub fn rank(self) -> u8 {
        match self {
            Priority::P1 => 0,
            Priority::P2 => 1,
            Priority::P3 => 2,
        }
    }
}

/// Rank of an optional priority; unset sorts after P3.
pub fn priority_rank(priority: Option<Priority>) -> u8 {
    priority.map_or(3, Priority::rank)
}

/// A task to be split into focus blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskInput {
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "est_minutes", alias = "duration")]
    pub minutes: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl TaskInput {
    pub fn new(title: impl Into<String>, minutes: i64) -> Self {
        Self {
            title: title.into(),
            minutes,
            priority: None,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// A window of availability on one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityInput {
    pub day: String,
    pub start: String, // HH:MM
    pub end: String,   // HH:MM
}

impl AvailabilityInput {
    pub fn new(day: impl Into<String>, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            day: day.into(),
            start: start.into(),
            end: end.into(),
        }
    }
}

/// A fixed commitment that placement must work around.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub day: String,
    pub start: String, // HH:MM
    pub end: String,   // HH:MM
}

impl AnchorInput {
    pub fn new(
        title: impl Into<String>,
        day: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            day: day.into(),
            start: start.into(),
            end: end.into(),
        }
    }
}

/// User preferences. Every field is optional; unset fields take built-in
/// defaults when resolved into a [`crate::planner::SchedulingPolicy`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub focus_block_min: Option<u32>,
    #[serde(default)]
    pub break_min: Option<u32>,
    #[serde(default)]
    pub earliest_start: Option<String>,
    #[serde(default)]
    pub latest_end: Option<String>,
    #[serde(default)]
    pub min_gap_min: Option<u32>,
    #[serde(default)]
    pub max_blocks_per_day: Option<u32>,
    #[serde(default)]
    pub prefer_spread: Option<bool>,
    #[serde(default)]
    pub max_daily_focus_min: Option<u32>,
}

impl Preferences {
    /// Fill every unset field from `base`.
    pub fn layered_over(&self, base: &Preferences) -> Preferences {
        Preferences {
            focus_block_min: self.focus_block_min.or(base.focus_block_min),
            break_min: self.break_min.or(base.break_min),
            earliest_start: self
                .earliest_start
                .clone()
                .or_else(|| base.earliest_start.clone()),
            latest_end: self.latest_end.clone().or_else(|| base.latest_end.clone()),
            min_gap_min: self.min_gap_min.or(base.min_gap_min),
            max_blocks_per_day: self.max_blocks_per_day.or(base.max_blocks_per_day),
            prefer_spread: self.prefer_spread.or(base.prefer_spread),
            max_daily_focus_min: self.max_daily_focus_min.or(base.max_daily_focus_min),
        }
    }
}

/// Full input to one planning run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    #[serde(default)]
    pub tasks: Vec<TaskInput>,
    #[serde(default)]
    pub availability: Vec<AvailabilityInput>,
    #[serde(default)]
    pub anchors: Vec<AnchorInput>,
    #[serde(default)]
    pub preferences: Preferences,
    /// Any instant inside the target week; defaults to the current week.
    #[serde(rename = "baseDateISO", default, skip_serializing_if = "Option::is_none")]
    pub base_date: Option<DateTime<Utc>>,
}
