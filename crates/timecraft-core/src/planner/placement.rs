//! Greedy slot search for work chunks.
//!
//! Every eligible day is swept for free intervals; each interval yields
//! candidate starts on a fixed step. Candidates are scored and the lowest
//! score wins, earliest-enumerated on ties. The winner is committed as a busy
//! block before the next chunk is considered. Placed chunks are never moved.

use crate::clock::Day;

use super::constraints::{DayState, Interval, WeekState};
use super::policy::{SchedulingPolicy, CANDIDATE_STEP_MIN};

/// Penalty unit for a slot closer than `min_gap_min` to another block.
const ADJACENCY_PENALTY: f64 = 1000.0;

/// A feasible slot for one chunk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub day: Day,
    pub span: Interval,
    pub score: f64,
}

/// Lower is better.
///
/// Early starts are favored through `start / 60`; gap violations cost
/// `3 * 1000`; with spreading on, each busy minute already on the day costs 2.
pub fn slot_score(state: &DayState, start: u32, respects_gap: bool, policy: &SchedulingPolicy) -> f64 {
    let adjacency = if respects_gap { 0.0 } else { ADJACENCY_PENALTY };
    let spread = if policy.prefer_spread {
        2.0 * f64::from(state.busy_minutes())
    } else {
        0.0
    };
    3.0 * adjacency + spread + f64::from(start) / 60.0
}

/// False once a day has hit its block cap or focus-minute cap.
pub fn day_has_capacity(state: &DayState, policy: &SchedulingPolicy) -> bool {
    if let Some(cap) = policy.max_blocks_per_day {
        if state.placed_tasks >= cap {
            return false;
        }
    }
    if let Some(cap) = policy.max_daily_focus_min {
        if state.focus_minutes >= cap {
            return false;
        }
    }
    true
}

/// All feasible slots for a chunk of `minutes`, in enumeration order
/// (day, then window, then free interval, then start).
pub fn candidates(week: &WeekState, minutes: u32, policy: &SchedulingPolicy) -> Vec<Candidate> {
    let mut out = Vec::new();
    if minutes == 0 {
        return out;
    }

    for (day, state) in week.iter() {
        if !day_has_capacity(state, policy) {
            continue;
        }
        if let Some(cap) = policy.max_daily_focus_min {
            if state.focus_minutes.saturating_add(minutes) > cap {
                continue;
            }
        }

        for window in &state.windows {
            for free in state.free_intervals(*window) {
                let mut start = free.start;
                while let Some(end) = start.checked_add(minutes).filter(|end| *end <= free.end) {
                    let span = Interval::new(start, end);
                    let ok = state.respects_gap(span, policy.min_gap_min);
                    if ok || !policy.prefer_spread {
                        out.push(Candidate {
                            day,
                            span,
                            score: slot_score(state, start, ok, policy),
                        });
                    }
                    start += CANDIDATE_STEP_MIN;
                }
            }
        }
    }

    out
}

/// Lowest-scoring candidate; the first one enumerated wins a tie.
pub fn best_candidate(week: &WeekState, minutes: u32, policy: &SchedulingPolicy) -> Option<Candidate> {
    let all = candidates(week, minutes, policy);
    tracing::debug!(minutes, count = all.len(), "enumerated candidates");

    all.into_iter().fold(None, |best: Option<Candidate>, c| match best {
        Some(b) if b.score <= c.score => Some(b),
        _ => Some(c),
    })
}

/// Find and commit the best slot for one work chunk.
pub fn place_chunk(
    week: &mut WeekState,
    title: &str,
    minutes: u32,
    policy: &SchedulingPolicy,
) -> Option<Candidate> {
    let best = best_candidate(week, minutes, policy)?;
    let state = week.day_mut(best.day)?;
    state.commit_task(best.span, title);
    Some(best)
}
