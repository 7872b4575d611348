use clap::{Parser, Subcommand};
use timecraft_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "timecraft", version, about = "TimeCraft weekly time-block planner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a weekly plan from a scheduling request
    Plan(commands::plan::PlanArgs),
    /// Export a plan as iCalendar text
    Export(commands::export::ExportArgs),
    /// Revise a plan; without a generator this annotates the summary
    Refine(commands::refine::RefineArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Plan(_) => "plan",
            Commands::Export(_) => "export",
            Commands::Refine(_) => "refine",
            Commands::Config { .. } => "config",
        }
    }
}

/// Install the stderr subscriber: `TIMECRAFT_LOG`, then the configured level.
fn init_tracing(fallback_level: &str) {
    let filter = EnvFilter::try_from_env("TIMECRAFT_LOG")
        .or_else(|_| EnvFilter::try_new(fallback_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    let config = Config::load_or_default();
    init_tracing(&config.logging.level);

    tracing::debug!(command = cli.command.name(), level = %config.logging.level, "dispatching");

    let result = match cli.command {
        Commands::Plan(args) => commands::plan::run(args, &config),
        Commands::Export(args) => commands::export::run(args, &config),
        Commands::Refine(args) => commands::refine::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        tracing::debug!("command failed: {e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
