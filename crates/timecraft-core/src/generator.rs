//! External plan generator seam.
//!
//! A generator (typically a hosted model) may be tried before the local
//! planner. Whatever it returns must pass [`Plan::validate`]; any failure
//! falls back to [`generate_local_plan`], so callers always get a plan.

use crate::error::GeneratorError;
use crate::plan::Plan;
use crate::planner::generate_local_plan;
use crate::request::ScheduleRequest;

/// A producer of plans outside this crate.
pub trait PlanGenerator {
    /// Produce a plan for `request`.
    fn generate(&self, request: &ScheduleRequest) -> Result<Plan, GeneratorError>;

    /// Revise `previous` according to a free-form instruction.
    fn refine(&self, _previous: &Plan, _instruction: &str) -> Result<Plan, GeneratorError> {
        Err(GeneratorError::Unavailable("refine not supported".to_string()))
    }
}

/// Plan text produced elsewhere, e.g. a saved model response.
#[derive(Debug, Clone)]
pub struct CandidatePlan {
    raw: String,
}

impl CandidatePlan {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    fn parse(&self) -> Result<Plan, GeneratorError> {
        Ok(serde_json::from_str(&self.raw)?)
    }
}

impl PlanGenerator for CandidatePlan {
    fn generate(&self, _request: &ScheduleRequest) -> Result<Plan, GeneratorError> {
        self.parse()
    }

    fn refine(&self, _previous: &Plan, _instruction: &str) -> Result<Plan, GeneratorError> {
        self.parse()
    }
}

fn accepted(plan: Result<Plan, GeneratorError>) -> Result<Plan, GeneratorError> {
    let plan = plan?;
    plan.validate()?;
    Ok(plan)
}

/// Try `generator` first, fall back to the local planner on any failure.
pub fn schedule(request: &ScheduleRequest, generator: Option<&dyn PlanGenerator>) -> Plan {
    if let Some(generator) = generator {
        match accepted(generator.generate(request)) {
            Ok(plan) => return plan,
            Err(e) => tracing::warn!("generator failed, using local planner: {e}"),
        }
    }
    generate_local_plan(request)
}

/// Try `generator` to refine `previous`; on failure keep the previous plan and
/// note the instruction in its summary.
pub fn refine(previous: &Plan, instruction: &str, generator: Option<&dyn PlanGenerator>) -> Plan {
    if let Some(generator) = generator {
        match accepted(generator.refine(previous, instruction)) {
            Ok(plan) => return plan,
            Err(e) => tracing::warn!("generator refine failed, keeping previous plan: {e}"),
        }
    }
    Plan {
        summary: format!(
            "{} • Local refine note: {instruction} (generator unavailable)",
            previous.summary
        ),
        ..previous.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{AvailabilityInput, TaskInput};
    use chrono::{TimeZone, Utc};

    struct Offline;

    impl PlanGenerator for Offline {
        fn generate(&self, _request: &ScheduleRequest) -> Result<Plan, GeneratorError> {
            Err(GeneratorError::Unavailable("offline".to_string()))
        }
    }

    fn request() -> ScheduleRequest {
        ScheduleRequest {
            tasks: vec![TaskInput::new("Study", 60)],
            availability: vec![AvailabilityInput::new("Mon", "09:00", "12:00")],
            base_date: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            ..Default::default()
        }
    }

    const VALID: &str = r#"{
        "summary": "from model",
        "events": [{
            "id": "m1", "title": "Study", "day": "Mon",
            "start_iso": "2024-01-01T09:00:00Z", "end_iso": "2024-01-01T10:00:00Z",
            "type": "TASK", "priority": "P1"
        }]
    }"#;

    #[test]
    fn valid_generator_plan_is_used() {
        let generator = CandidatePlan::new(VALID);
        let plan = schedule(&request(), Some(&generator));
        assert_eq!(plan.summary, "from model");
        assert!(plan.unplaced_tasks.is_empty());
    }

    #[test]
    fn malformed_output_falls_back() {
        let generator = CandidatePlan::new("```json\n{ nope");
        let plan = schedule(&request(), Some(&generator));
        assert!(plan.summary.starts_with("Local plan"));
        assert_eq!(plan.events.len(), 2);
    }

    #[test]
    fn invalid_plan_falls_back() {
        // Tuesday timestamp labelled Monday
        let wrong_day = VALID.replace("2024-01-01T09", "2024-01-02T09");
        let generator = CandidatePlan::new(wrong_day);
        let plan = schedule(&request(), Some(&generator));
        assert!(plan.summary.starts_with("Local plan"));
    }

    #[test]
    fn unavailable_generator_falls_back() {
        let plan = schedule(&request(), Some(&Offline));
        assert!(plan.summary.starts_with("Local plan"));
        assert!(schedule(&request(), None).summary.starts_with("Local plan"));
    }

    #[test]
    fn refine_without_generator_annotates_summary() {
        let previous = schedule(&request(), None);
        let refined = refine(&previous, "move study to afternoon", Some(&Offline));
        assert!(refined
            .summary
            .ends_with("• Local refine note: move study to afternoon (generator unavailable)"));
        assert_eq!(refined.events, previous.events);
    }
}
