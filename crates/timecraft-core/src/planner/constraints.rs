//! Per-day constraint state: availability windows and busy blocks.
//!
//! Availability and anchors are clipped to the policy bounds and folded into
//! one [`DayState`] per weekday. Busy blocks on a day are kept sorted by start
//! and never overlap; the free-interval sweep depends on that ordering.

use crate::clock::{format_clock, parse_clock, Day};
use crate::error::ValidationError;
use crate::request::{AnchorInput, AvailabilityInput};

use super::policy::SchedulingPolicy;

/// Title used for anchors supplied without one.
pub const DEFAULT_ANCHOR_TITLE: &str = "Anchor";

/// Half-open span `[start, end)` in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Interval {
    pub start: u32,
    pub end: u32,
}

impl Interval {
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(end > start, "interval must be non-empty");
        Self { start, end }
    }

    pub fn minutes(&self) -> u32 {
        self.end - self.start
    }
}

/// Who occupies a busy block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Anchor,
    Task,
}

/// Occupied time on one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusyBlock {
    pub span: Interval,
    pub title: String,
    pub kind: BlockKind,
}

/// Mutable scheduling state of one weekday.
#[derive(Debug, Clone, Default)]
pub struct DayState {
    pub windows: Vec<Interval>,
    /// Sorted by start, non-overlapping.
    pub busy: Vec<BusyBlock>,
    pub placed_tasks: u32,
    /// Minutes of placed task blocks.
    pub focus_minutes: u32,
}

impl DayState {
    /// Total occupied minutes, anchors included.
    pub fn busy_minutes(&self) -> u32 {
        self.busy.iter().map(|b| b.span.minutes()).sum()
    }

    /// Gaps inside `window` not covered by any busy block, in ascending order.
    pub fn free_intervals(&self, window: Interval) -> Vec<Interval> {
        let mut gaps = Vec::new();
        let mut cursor = window.start;

        for block in &self.busy {
            if block.span.start >= window.end {
                break;
            }
            if block.span.end <= cursor {
                continue;
            }
            if block.span.start > cursor {
                gaps.push(Interval::new(cursor, block.span.start.min(window.end)));
            }
            cursor = cursor.max(block.span.end);
        }

        if cursor < window.end {
            gaps.push(Interval::new(cursor, window.end));
        }
        gaps
    }

    /// True if `span` keeps at least `gap` idle minutes to every busy block.
    pub fn respects_gap(&self, span: Interval, gap: u32) -> bool {
        self.busy
            .iter()
            .all(|b| {
                span.end.saturating_add(gap) <= b.span.start
                    || b.span.end.saturating_add(gap) <= span.start
            })
    }

    /// Record a placed task block, keeping busy blocks sorted.
    pub fn commit_task(&mut self, span: Interval, title: &str) {
        self.busy.push(BusyBlock {
            span,
            title: title.to_string(),
            kind: BlockKind::Task,
        });
        self.busy.sort_by_key(|b| b.span.start);
        self.placed_tasks += 1;
        self.focus_minutes = self.focus_minutes.saturating_add(span.minutes());
    }
}

/// Per-weekday states, created lazily.
#[derive(Debug, Clone, Default)]
pub struct WeekState {
    days: [Option<DayState>; 7],
}

impl WeekState {
    pub fn day(&self, day: Day) -> Option<&DayState> {
        self.days[day.index()].as_ref()
    }

    pub fn day_mut(&mut self, day: Day) -> Option<&mut DayState> {
        self.days[day.index()].as_mut()
    }

    fn entry(&mut self, day: Day) -> &mut DayState {
        self.days[day.index()].get_or_insert_with(DayState::default)
    }

    /// Days that have state, in weekday order.
    pub fn iter(&self) -> impl Iterator<Item = (Day, &DayState)> {
        Day::ALL
            .iter()
            .zip(self.days.iter())
            .filter_map(|(d, s)| s.as_ref().map(|s| (*d, s)))
    }
}

/// An anchor that survived clipping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedAnchor {
    pub day: Day,
    pub span: Interval,
    pub title: String,
}

/// Output of the constraint builder.
#[derive(Debug, Clone, Default)]
pub struct Constraints {
    pub week: WeekState,
    /// Accepted anchors in input order.
    pub anchors: Vec<AcceptedAnchor>,
    pub warnings: Vec<String>,
}

/// Parse day and clock fields of an entry and clip them to the policy bounds.
fn resolve_entry(
    kind: &str,
    day: &str,
    start: &str,
    end: &str,
    policy: &SchedulingPolicy,
) -> Result<(Day, Interval), String> {
    let day: Day = day.parse().map_err(|e| format!("{kind} dropped: {e}"))?;
    let s = parse_clock(start).map_err(|e| format!("{kind} on {day} dropped: {e}"))?;
    let e = parse_clock(end).map_err(|e| format!("{kind} on {day} dropped: {e}"))?;
    if e <= s {
        let inverted = ValidationError::InvalidTimeRange {
            start: start.to_string(),
            end: end.to_string(),
        };
        return Err(format!("{kind} on {day} dropped: {inverted}"));
    }

    let (cs, ce) = policy.clip(s, e).ok_or_else(|| {
        format!(
            "{kind} on {day} {}-{} dropped: empty after clipping to {}-{}",
            format_clock(s),
            format_clock(e),
            format_clock(policy.earliest_start),
            format_clock(policy.latest_end)
        )
    })?;
    Ok((day, Interval::new(cs, ce)))
}

/// Build per-day state from availability windows and anchors.
pub fn build_constraints(
    availability: &[AvailabilityInput],
    anchors: &[AnchorInput],
    policy: &SchedulingPolicy,
) -> Constraints {
    let mut out = Constraints::default();

    for window in availability {
        match resolve_entry("availability", &window.day, &window.start, &window.end, policy) {
            Ok((day, span)) => out.week.entry(day).windows.push(span),
            Err(note) => {
                tracing::warn!("{note}");
                out.warnings.push(note);
            }
        }
    }

    for anchor in anchors {
        let title = anchor
            .title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_ANCHOR_TITLE);
        match resolve_entry("anchor", &anchor.day, &anchor.start, &anchor.end, policy) {
            Ok((day, span)) => {
                out.week.entry(day).busy.push(BusyBlock {
                    span,
                    title: title.to_string(),
                    kind: BlockKind::Anchor,
                });
                out.anchors.push(AcceptedAnchor {
                    day,
                    span,
                    title: title.to_string(),
                });
            }
            Err(note) => {
                tracing::warn!("{note}");
                out.warnings.push(note);
            }
        }
    }

    for state in out.week.days.iter_mut().flatten() {
        state.busy.sort_by_key(|b| b.span.start);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor_block(start: u32, end: u32) -> BusyBlock {
        BusyBlock {
            span: Interval::new(start, end),
            title: "A".into(),
            kind: BlockKind::Anchor,
        }
    }

    #[test]
    fn windows_are_clipped_to_bounds() {
        let policy = SchedulingPolicy::default();
        let avail = vec![
            AvailabilityInput::new("Mon", "07:00", "10:00"),
            AvailabilityInput::new("Mon", "19:00", "23:00"),
        ];
        let c = build_constraints(&avail, &[], &policy);
        let mon = c.week.day(Day::Mon).unwrap();
        assert_eq!(mon.windows, vec![Interval::new(540, 600), Interval::new(1140, 1200)]);
        assert!(c.warnings.is_empty());
    }

    #[test]
    fn invalid_entries_are_dropped_with_warnings() {
        let policy = SchedulingPolicy::default();
        let avail = vec![
            AvailabilityInput::new("Someday", "09:00", "10:00"),
            AvailabilityInput::new("Tue", "06:00", "08:00"),
            AvailabilityInput::new("Wed", "12:00", "11:00"),
            AvailabilityInput::new("Thu", "9am", "11:00"),
        ];
        let anchors = vec![AnchorInput::new("Late", "Fri", "21:00", "22:00")];
        let c = build_constraints(&avail, &anchors, &policy);
        assert_eq!(c.week.iter().count(), 0);
        assert!(c.anchors.is_empty());
        assert_eq!(c.warnings.len(), 5);
        assert_eq!(
            c.warnings[2],
            "availability on Wed dropped: Invalid time range: end (11:00) must be greater than start (12:00)"
        );
        assert!(c.warnings[1].contains("empty after clipping"));
    }

    #[test]
    fn anchors_are_sorted_and_create_day_state() {
        let policy = SchedulingPolicy::default();
        let anchors = vec![
            AnchorInput::new("Late", "Tue", "15:00", "16:00"),
            AnchorInput::new("Early", "Tue", "10:00", "11:00"),
        ];
        let c = build_constraints(&[], &anchors, &policy);
        let tue = c.week.day(Day::Tue).unwrap();
        assert!(tue.windows.is_empty());
        let starts: Vec<u32> = tue.busy.iter().map(|b| b.span.start).collect();
        assert_eq!(starts, vec![600, 900]);
        // accepted anchors keep input order
        assert_eq!(c.anchors[0].title, "Late");
        assert_eq!(tue.busy_minutes(), 120);
    }

    #[test]
    fn anchor_without_title_gets_default() {
        let policy = SchedulingPolicy::default();
        let anchors = vec![AnchorInput {
            title: None,
            day: "Mon".into(),
            start: "10:00".into(),
            end: "11:00".into(),
        }];
        let c = build_constraints(&[], &anchors, &policy);
        assert_eq!(c.anchors[0].title, DEFAULT_ANCHOR_TITLE);
    }

    #[test]
    fn free_intervals_subtract_busy_blocks() {
        let state = DayState {
            busy: vec![anchor_block(600, 660), anchor_block(720, 780)],
            ..Default::default()
        };
        let free = state.free_intervals(Interval::new(540, 840));
        assert_eq!(
            free,
            vec![
                Interval::new(540, 600),
                Interval::new(660, 720),
                Interval::new(780, 840)
            ]
        );
    }

    #[test]
    fn free_intervals_handle_blocks_straddling_window() {
        let state = DayState {
            busy: vec![anchor_block(500, 560), anchor_block(620, 700)],
            ..Default::default()
        };
        let free = state.free_intervals(Interval::new(540, 660));
        assert_eq!(free, vec![Interval::new(560, 620)]);

        let covered = state.free_intervals(Interval::new(630, 690));
        assert!(covered.is_empty());
    }

    #[test]
    fn gap_check_is_inclusive_at_boundary() {
        let state = DayState {
            busy: vec![anchor_block(600, 660)],
            ..Default::default()
        };
        // ends exactly 30 before the anchor
        assert!(state.respects_gap(Interval::new(510, 570), 30));
        // touches the anchor
        assert!(!state.respects_gap(Interval::new(540, 600), 30));
        // starts exactly 30 after
        assert!(state.respects_gap(Interval::new(690, 750), 30));
        assert!(!state.respects_gap(Interval::new(680, 740), 30));
    }

    #[test]
    fn commit_task_keeps_order_and_counters() {
        let mut state = DayState {
            busy: vec![anchor_block(720, 780)],
            ..Default::default()
        };
        state.commit_task(Interval::new(540, 600), "Study");
        assert_eq!(state.busy[0].kind, BlockKind::Task);
        assert_eq!(state.busy[1].kind, BlockKind::Anchor);
        assert_eq!(state.placed_tasks, 1);
        assert_eq!(state.focus_minutes, 60);
        assert_eq!(state.busy_minutes(), 120);
    }
}
