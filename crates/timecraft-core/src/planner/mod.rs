//! Deterministic local planner.
//!
//! Produces a conflict-free weekly plan without any external service:
//! - Builds per-day windows and anchor blocks clipped to the policy bounds
//! - Splits tasks into focus-sized chunks ordered by priority then title
//! - Places each chunk greedily in its best-scoring slot across the week
//! - Emits task, break and anchor events, de-duplicated by id
//!
//! The planner never fails. Unusable input is dropped and reported through
//! [`Plan::warnings`]; chunks that fit nowhere land in
//! [`Plan::unplaced_tasks`].

mod assembly;
mod chunker;
mod constraints;
mod placement;
mod policy;

pub use assembly::{dedupe_events, summarize, EventLog, BREAK_TITLE, FOCUS_SUFFIX};
pub use chunker::{chunk_task, chunk_tasks, order_tasks, Chunk};
pub use constraints::{
    build_constraints, AcceptedAnchor, BlockKind, BusyBlock, Constraints, DayState, Interval,
    WeekState, DEFAULT_ANCHOR_TITLE,
};
pub use placement::{best_candidate, candidates, day_has_capacity, place_chunk, slot_score, Candidate};
pub use policy::{
    SchedulingPolicy, CANDIDATE_STEP_MIN, DEFAULT_BREAK_MIN, DEFAULT_EARLIEST_START,
    DEFAULT_FOCUS_BLOCK_MIN, DEFAULT_LATEST_END, DEFAULT_MAX_BLOCKS_PER_DAY, DEFAULT_MIN_GAP_MIN,
};

use chrono::{DateTime, Utc};

use crate::clock::week_start;
use crate::plan::Plan;
use crate::request::ScheduleRequest;

/// Local planner bound to one policy and one target week.
#[derive(Debug, Clone)]
pub struct LocalPlanner {
    policy: SchedulingPolicy,
    base: DateTime<Utc>,
}

impl LocalPlanner {
    /// Create a planner; `base` is normalized to Monday 00:00 UTC of its week.
    pub fn new(policy: SchedulingPolicy, base: DateTime<Utc>) -> Self {
        Self {
            policy,
            base: week_start(base),
        }
    }

    pub fn policy(&self) -> &SchedulingPolicy {
        &self.policy
    }

    /// Monday 00:00 UTC of the target week.
    pub fn week_base(&self) -> DateTime<Utc> {
        self.base
    }

    /// Plan tasks, availability and anchors from `request` under this
    /// planner's policy. The request's own preferences are not consulted.
    pub fn plan(&self, request: &ScheduleRequest) -> Plan {
        self.plan_with_notes(request, Vec::new())
    }

    fn plan_with_notes(&self, request: &ScheduleRequest, mut warnings: Vec<String>) -> Plan {
        let policy = &self.policy;
        let mut log = EventLog::new(self.base);

        let Constraints {
            mut week,
            anchors,
            warnings: dropped,
        } = build_constraints(&request.availability, &request.anchors, policy);
        warnings.extend(dropped);

        for anchor in &anchors {
            log.anchor(anchor.day, anchor.span, &anchor.title);
        }

        let (chunks, dropped) = chunk_tasks(&request.tasks, policy);
        warnings.extend(dropped);

        let mut unplaced_tasks = Vec::new();
        for chunk in &chunks {
            // breaks are emitted as tails of placed work chunks
            let Chunk::Work {
                title,
                minutes,
                priority,
            } = chunk
            else {
                continue;
            };

            match place_chunk(&mut week, title, *minutes, policy) {
                Some(slot) => {
                    tracing::debug!(
                        title = %title,
                        day = %slot.day,
                        start = slot.span.start,
                        end = slot.span.end,
                        score = slot.score,
                        "placed chunk"
                    );
                    log.task(slot.day, slot.span, title, *priority);

                    let rest_end = slot.span.end.saturating_add(policy.break_min);
                    if policy.break_min > 0 && rest_end <= policy.latest_end {
                        log.rest(slot.day, Interval::new(slot.span.end, rest_end));
                    }
                }
                None => {
                    tracing::debug!(title = %title, minutes, "no feasible slot");
                    unplaced_tasks.push(title.clone());
                }
            }
        }

        let plan = assembly::assemble(log, unplaced_tasks, warnings);
        tracing::info!(
            events = plan.events.len(),
            unplaced = plan.unplaced_tasks.len(),
            warnings = plan.warnings.len(),
            "{}",
            plan.summary
        );
        plan
    }
}

/// Plan a request with its own preferences, in the week of `baseDateISO`
/// (or the current week when absent).
pub fn generate_local_plan(request: &ScheduleRequest) -> Plan {
    let (policy, notes) = SchedulingPolicy::from_preferences(&request.preferences);
    for note in &notes {
        tracing::warn!("{note}");
    }
    let base = request.base_date.unwrap_or_else(Utc::now);
    LocalPlanner::new(policy, base).plan_with_notes(request, notes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::Day;
    use crate::plan::EventType;
    use crate::request::{AnchorInput, AvailabilityInput, Preferences, Priority, TaskInput};
    use chrono::TimeZone;

    fn monday() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn request(tasks: Vec<TaskInput>, avail: Vec<AvailabilityInput>, anchors: Vec<AnchorInput>) -> ScheduleRequest {
        ScheduleRequest {
            tasks,
            availability: avail,
            anchors,
            preferences: Preferences::default(),
            base_date: Some(monday()),
        }
    }

    #[test]
    fn anchors_are_emitted_first() {
        let req = request(
            vec![TaskInput::new("Study", 60)],
            vec![AvailabilityInput::new("Mon", "09:00", "17:00")],
            vec![AnchorInput::new("Lecture", "Mon", "10:00", "11:00")],
        );
        let plan = generate_local_plan(&req);
        assert_eq!(plan.events[0].event_type, EventType::Anchor);
        assert_eq!(plan.events[0].title, "Lecture");
        assert_eq!(plan.events[1].event_type, EventType::Task);
        assert!(plan.validate().is_ok());
    }

    #[test]
    fn anchors_emit_even_without_availability() {
        let req = request(
            vec![TaskInput::new("Study", 60)],
            vec![],
            vec![AnchorInput::new("Gym", "Sat", "10:00", "11:00")],
        );
        let plan = generate_local_plan(&req);
        assert_eq!(plan.events.len(), 1);
        assert_eq!(plan.events[0].day, Day::Sat);
        assert_eq!(plan.unplaced_tasks, vec!["Study".to_string()]);
    }

    #[test]
    fn break_follows_each_placed_chunk() {
        let req = request(
            vec![TaskInput::new("Read", 60).with_priority(Priority::P2)],
            vec![AvailabilityInput::new("Tue", "09:00", "12:00")],
            vec![],
        );
        let plan = generate_local_plan(&req);
        assert_eq!(plan.events.len(), 2);
        let (task, rest) = (&plan.events[0], &plan.events[1]);
        assert_eq!(task.title, "Read (focus)");
        assert_eq!(task.priority, Some(Priority::P2));
        assert_eq!(rest.event_type, EventType::Break);
        assert_eq!(rest.start_iso, task.end_iso);
        assert_eq!(rest.duration_minutes(), 10);
    }

    #[test]
    fn break_is_skipped_past_latest_end() {
        let mut req = request(
            vec![TaskInput::new("Late", 60)],
            vec![AvailabilityInput::new("Mon", "19:00", "20:00")],
            vec![],
        );
        req.preferences.latest_end = Some("20:00".into());
        let plan = generate_local_plan(&req);
        assert_eq!(plan.events.len(), 1);
        assert_eq!(plan.events[0].event_type, EventType::Task);
    }

    #[test]
    fn planner_uses_its_own_policy() {
        let policy = SchedulingPolicy {
            focus_block_min: 30,
            break_min: 0,
            min_gap_min: 0,
            ..Default::default()
        };
        let planner = LocalPlanner::new(policy, Utc.with_ymd_and_hms(2024, 1, 3, 12, 0, 0).unwrap());
        assert_eq!(planner.week_base(), monday());

        let req = request(
            vec![TaskInput::new("Code", 60)],
            vec![AvailabilityInput::new("Mon", "09:00", "10:00")],
            vec![],
        );
        let plan = planner.plan(&req);
        let tasks: Vec<_> = plan.events_of(EventType::Task).collect();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[1].start_iso, Utc.with_ymd_and_hms(2024, 1, 1, 9, 30, 0).unwrap());
        assert!(plan.unplaced_tasks.is_empty());
    }

    #[test]
    fn dropped_inputs_surface_as_warnings() {
        let mut req = request(
            vec![TaskInput::new("", 30), TaskInput::new("Ok", 30)],
            vec![AvailabilityInput::new("Moonday", "09:00", "12:00")],
            vec![],
        );
        req.preferences.earliest_start = Some("bogus".into());
        let plan = generate_local_plan(&req);
        assert_eq!(plan.warnings.len(), 3);
        assert_eq!(plan.unplaced_tasks, vec!["Ok".to_string()]);
    }
}
