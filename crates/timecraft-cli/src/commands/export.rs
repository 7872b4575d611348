//! Calendar export command.

use clap::Args;
use std::path::PathBuf;
use timecraft_core::{plan_to_ics, Config, Plan};

use crate::common::read_json;

#[derive(Args)]
pub struct ExportArgs {
    /// Plan JSON file (reads stdin when omitted)
    #[arg(short, long)]
    pub plan: Option<PathBuf>,
    /// Calendar name (defaults to export.calendar_name)
    #[arg(long)]
    pub name: Option<String>,
}

pub fn run(args: ExportArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let plan: Plan = read_json(args.plan.as_deref())?;
    plan.validate()?;
    let name = args.name.as_deref().unwrap_or(&config.export.calendar_name);
    println!("{}", plan_to_ics(&plan, name));
    Ok(())
}
