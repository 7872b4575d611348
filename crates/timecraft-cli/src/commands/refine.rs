//! Plan refinement command.

use clap::Args;
use std::path::PathBuf;
use timecraft_core::{refine, Plan};

use crate::common::read_json;

#[derive(Args)]
pub struct RefineArgs {
    /// Previous plan JSON file (reads stdin when omitted)
    #[arg(short, long)]
    pub plan: Option<PathBuf>,
    /// Requested change, in plain words
    #[arg(long)]
    pub instruction: String,
}

pub fn run(args: RefineArgs) -> Result<(), Box<dyn std::error::Error>> {
    let previous: Plan = read_json(args.plan.as_deref())?;
    let refined = refine(&previous, &args.instruction, None);
    println!("{}", serde_json::to_string_pretty(&refined)?);
    Ok(())
}
