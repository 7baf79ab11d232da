//! HandOrbit CLI: replay recorded hand tracking, preview camera motion,
//! and run the real-time poll loop.
//!
//! Usage:
//!   handorbit replay <FILE>          Run a recording on a virtual clock
//!   handorbit preview --x --y        Show convergence for a held gesture
//!   handorbit live <FILE>            Run the poll loop in wall-clock time
//!   handorbit config                 Show the effective configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use handorbit_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "handorbit",
    about = "Hand-gesture orbit camera control",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to the user config location)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a recording through the gesture session on a virtual clock
    Replay {
        /// Path to a JSONL recording
        file: PathBuf,

        /// Number of ticks to run (defaults to the recording length)
        #[arg(long)]
        ticks: Option<u64>,

        /// Print one JSON report per tick
        #[arg(long)]
        json: bool,
    },

    /// Hold a constant gesture and print camera convergence
    Preview {
        /// Mirrored pointing x in [0, 1]
        #[arg(long, default_value = "0.5")]
        x: f64,

        /// Pointing y in [0, 1]
        #[arg(long, default_value = "0.5")]
        y: f64,

        /// Thumb-index distance, omitted for no zoom change
        #[arg(long)]
        pinch: Option<f64>,

        /// Number of ticks to simulate
        #[arg(long, default_value = "120")]
        ticks: u64,
    },

    /// Run the real-time poll loop against a recording
    Live {
        /// Path to a JSONL recording
        file: PathBuf,

        /// Stop after this many seconds (defaults to the recording length)
        #[arg(long)]
        seconds: Option<f64>,
    },

    /// Print the effective configuration
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        save: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {e}"))?,
        None => AppConfig::load(),
    };

    // Initialize logging
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    handorbit_common::logging::init_logging(&config.logging);

    match cli.command {
        Commands::Replay { file, ticks, json } => commands::replay::run(&config, file, ticks, json),
        Commands::Preview { x, y, pinch, ticks } => {
            commands::preview::run(&config, x, y, pinch, ticks)
        }
        Commands::Live { file, seconds } => commands::live::run(&config, file, seconds).await,
        Commands::Config { save } => commands::config::run(&config, cli.config, save),
    }
}
