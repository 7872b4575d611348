//! Resolved scheduling policy.
//!
//! Preferences arrive as optional, loosely-typed fields. They are resolved
//! exactly once into a [`SchedulingPolicy`] that every planner stage reads.

use crate::clock::{format_clock, parse_clock, MINUTES_PER_DAY};
use crate::request::Preferences;

pub const DEFAULT_FOCUS_BLOCK_MIN: u32 = 60;
pub const DEFAULT_BREAK_MIN: u32 = 10;
pub const DEFAULT_EARLIEST_START: u32 = 9 * 60;
pub const DEFAULT_LATEST_END: u32 = 20 * 60;
pub const DEFAULT_MIN_GAP_MIN: u32 = 45;
pub const DEFAULT_MAX_BLOCKS_PER_DAY: u32 = 3;

/// Upper bounds for duration preferences; larger values are clamped.
pub const MAX_FOCUS_BLOCK_MIN: u32 = 240;
pub const MAX_BREAK_MIN: u32 = 60;
pub const MAX_GAP_MIN: u32 = MINUTES_PER_DAY;

/// Step between candidate start times inside a free interval (minutes).
pub const CANDIDATE_STEP_MIN: u32 = 10;

/// Immutable configuration for one planning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulingPolicy {
    /// Longest single work chunk (minutes, > 0)
    pub focus_block_min: u32,
    /// Break emitted after each placed chunk; 0 disables breaks
    pub break_min: u32,
    /// Global lower bound for windows and anchors (minutes since midnight)
    pub earliest_start: u32,
    /// Global upper bound for windows and anchors (minutes since midnight)
    pub latest_end: u32,
    /// Minimum idle time between a placed chunk and any other block
    pub min_gap_min: u32,
    /// Task blocks allowed per day; `None` is uncapped
    pub max_blocks_per_day: Option<u32>,
    /// Exclude gap violations and favor lightly loaded days
    pub prefer_spread: bool,
    /// Focused task minutes allowed per day; `None` is uncapped
    pub max_daily_focus_min: Option<u32>,
}

impl Default for SchedulingPolicy {
    fn default() -> Self {
        Self {
            focus_block_min: DEFAULT_FOCUS_BLOCK_MIN,
            break_min: DEFAULT_BREAK_MIN,
            earliest_start: DEFAULT_EARLIEST_START,
            latest_end: DEFAULT_LATEST_END,
            min_gap_min: DEFAULT_MIN_GAP_MIN,
            max_blocks_per_day: Some(DEFAULT_MAX_BLOCKS_PER_DAY),
            prefer_spread: true,
            max_daily_focus_min: None,
        }
    }
}

impl SchedulingPolicy {
    /// Resolve preferences against the built-in defaults.
    ///
    /// Returns the policy plus a note for every preference that could not be
    /// used as given.
    pub fn from_preferences(prefs: &Preferences) -> (Self, Vec<String>) {
        let mut notes = Vec::new();
        let defaults = Self::default();

        let focus_block_min = match prefs.focus_block_min {
            Some(0) => {
                notes.push(format!(
                    "focus_block_min must be positive; using {}",
                    defaults.focus_block_min
                ));
                defaults.focus_block_min
            }
            Some(m) => bounded(&mut notes, "focus_block_min", m, MAX_FOCUS_BLOCK_MIN),
            None => defaults.focus_block_min,
        };
        let break_min = prefs
            .break_min
            .map_or(defaults.break_min, |m| bounded(&mut notes, "break_min", m, MAX_BREAK_MIN));
        let min_gap_min = prefs
            .min_gap_min
            .map_or(defaults.min_gap_min, |m| bounded(&mut notes, "min_gap_min", m, MAX_GAP_MIN));

        let mut clock = |name: &str, value: &Option<String>, fallback: u32| match value {
            Some(raw) => match parse_clock(raw) {
                Ok(m) => m,
                Err(e) => {
                    notes.push(format!("{name}: {e}; using {}", format_clock(fallback)));
                    fallback
                }
            },
            None => fallback,
        };
        let earliest_start = clock("earliest_start", &prefs.earliest_start, defaults.earliest_start);
        let latest_end = clock("latest_end", &prefs.latest_end, defaults.latest_end);

        if latest_end <= earliest_start {
            notes.push(format!(
                "latest_end {} is not after earliest_start {}; no time is schedulable",
                format_clock(latest_end),
                format_clock(earliest_start)
            ));
        }

        let policy = Self {
            focus_block_min,
            break_min,
            earliest_start,
            latest_end,
            min_gap_min,
            max_blocks_per_day: match prefs.max_blocks_per_day {
                Some(0) => None,
                Some(n) => Some(n),
                None => defaults.max_blocks_per_day,
            },
            prefer_spread: prefs.prefer_spread.unwrap_or(defaults.prefer_spread),
            max_daily_focus_min: prefs.max_daily_focus_min.filter(|m| *m > 0),
        };

        (policy, notes)
    }

    /// Clip `[start, end)` to the global bounds; `None` if nothing remains.
    pub fn clip(&self, start: u32, end: u32) -> Option<(u32, u32)> {
        let s = start.max(self.earliest_start);
        let e = end.min(self.latest_end);
        (e > s).then_some((s, e))
    }
}

/// Clamp `value` to `max`, noting the adjustment.
fn bounded(notes: &mut Vec<String>, name: &str, value: u32, max: u32) -> u32 {
    if value > max {
        notes.push(format!("{name} {value} exceeds {max}; using {max}"));
        max
    } else {
        value
    }
}
