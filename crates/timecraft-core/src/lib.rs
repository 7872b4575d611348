//! # TimeCraft Core Library
//!
//! This library turns tasks, fixed commitments ("anchors") and weekly
//! availability into a conflict-free time-block plan. Plans may come from an
//! external generator; the deterministic local planner here is the fallback
//! that always produces one.
//!
//! ## Architecture
//!
//! - **Planner**: constraint builder, task chunker and greedy placement engine
//! - **Generator**: seam for an external plan producer with local fallback
//! - **Export**: iCalendar rendering of a plan
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`generate_local_plan`]: Plan a [`ScheduleRequest`] locally
//! - [`LocalPlanner`]: Planner bound to an explicit [`SchedulingPolicy`] and week
//! - [`schedule`]: Generator-first planning with local fallback
//! - [`Config`]: Application configuration management

pub mod clock;
pub mod error;
pub mod export;
pub mod generator;
pub mod plan;
pub mod planner;
pub mod request;
pub mod storage;

pub use clock::Day;
pub use error::{ConfigError, CoreError, GeneratorError, Result, ValidationError};
pub use export::plan_to_ics;
pub use generator::{refine, schedule, CandidatePlan, PlanGenerator};
pub use plan::{EventType, Plan, ScheduleEvent};
pub use planner::{generate_local_plan, LocalPlanner, SchedulingPolicy};
pub use request::{AnchorInput, AvailabilityInput, Preferences, Priority, ScheduleRequest, TaskInput};
pub use storage::Config;
