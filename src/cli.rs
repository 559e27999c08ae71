use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "smartagro", version, about = "Simulated field irrigation advisor TUI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the export data directory
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Plot to select on start (defaults to the first configured plot)
    #[arg(short, long, global = true)]
    pub plot: Option<String>,

    /// Seed for the sensor simulator, overrides simulation.seed
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Re-run interactive setup
    Init,
    /// Validate config and print the effective thresholds
    Check,
    /// Take one reading for the selected plot and print the decision
    Evaluate {
        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write the configuration export file
    Export {
        /// Output file (defaults to the data directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    /// Default tracing filter for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}
