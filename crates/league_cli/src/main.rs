//! League MC CLI
//!
//! Monte Carlo qualification odds from a schedule file

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "league_mc")]
#[command(about = "Estimate qualification odds by simulating the rest of a season", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Simulate remaining games and report qualification odds
    Run {
        /// Schedule file (TEAM/GAME records)
        #[arg(long, default_value = "games.txt")]
        schedule: PathBuf,

        /// JSON config file (falls back to LEAGUE_MC_CONFIG_PATH)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Number of simulated seasons
        #[arg(long)]
        trials: Option<u64>,

        /// Qualifying rank (top-N)
        #[arg(long)]
        cutoff: Option<usize>,

        /// Parallel workers
        #[arg(long)]
        workers: Option<usize>,

        /// Base random seed (default: current time)
        #[arg(long)]
        seed: Option<u64>,

        /// Also write the report as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Load a schedule file and print a summary without simulating
    Check {
        /// Schedule file (TEAM/GAME records)
        #[arg(long, default_value = "games.txt")]
        schedule: PathBuf,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            schedule,
            config,
            trials,
            cutoff,
            workers,
            seed,
            json,
        } => {
            let overrides = league_cli::ConfigOverrides { trials, cutoff, workers, seed };
            let config = league_cli::resolve_config(config.as_deref(), &overrides)?;

            log::info!("loading schedule from {}", schedule.display());
            let schedule = league_cli::load_schedule(&schedule)?;

            let report = league_core::run_simulation(&schedule, &config)?;
            print!("{}", league_cli::render_report(&report));

            if let Some(path) = json {
                league_cli::save_report_json(&path, &report)?;
                log::info!("report saved to {}", path.display());
            }
        }

        Commands::Check { schedule } => {
            let schedule = league_cli::load_schedule(&schedule)?;
            print!("{}", league_cli::render_schedule_summary(&schedule));
        }
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("league_mc CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
