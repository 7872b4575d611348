//! Plan generation command.

use chrono::{DateTime, Utc};
use clap::Args;
use std::path::PathBuf;
use timecraft_core::{plan_to_ics, schedule, CandidatePlan, Config, PlanGenerator, ScheduleRequest};

use crate::common::{read_json, read_text};

#[derive(Args)]
pub struct PlanArgs {
    /// Scheduling request JSON file (reads stdin when omitted)
    #[arg(short, long)]
    pub input: Option<PathBuf>,
    /// Pre-generated plan JSON to use if it validates
    #[arg(long)]
    pub candidate: Option<PathBuf>,
    /// Print iCalendar text instead of JSON
    #[arg(long)]
    pub ics: bool,
    /// Any RFC 3339 instant in the target week (overrides baseDateISO)
    #[arg(long)]
    pub base_date: Option<DateTime<Utc>>,
}

pub fn run(args: PlanArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut request: ScheduleRequest = read_json(args.input.as_deref())?;
    request.preferences = request.preferences.layered_over(&config.preferences);
    if args.base_date.is_some() {
        request.base_date = args.base_date;
    }

    let candidate = match &args.candidate {
        Some(path) => Some(CandidatePlan::new(read_text(Some(path))?)),
        None => None,
    };
    let generator = candidate.as_ref().map(|c| c as &dyn PlanGenerator);

    let plan = schedule(&request, generator);
    if args.ics {
        println!("{}", plan_to_ics(&plan, &config.export.calendar_name));
    } else {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    }
    Ok(())
}
