//! Solvency CLI - Command Line Operations for the Solvency Engine
//!
//! This is the operational entry point for the bank solvency workspace.
//!
//! # Commands
//!
//! - `solvency run` - ETL, proxies, RWA, CVA and ratios; writes the results
//! - `solvency check` - Validate the configuration and the raw extracts
//! - `solvency preview` - Print the first banks of the results file
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate wires the adapter, infra and
//! engine crates together. It is the only place that loads configuration,
//! initialises logging or touches the console.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use config::Overrides;

/// Bank solvency ratio engine CLI
#[derive(Parser)]
#[command(name = "solvency")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "solvency.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline and write the results
    Run {
        #[command(flatten)]
        overrides: Overrides,

        /// Reuse an existing master dataset instead of re-running the ETL
        #[arg(long)]
        reuse_master: bool,

        /// Skip the CVA add-on
        #[arg(long)]
        no_cva: bool,

        /// Banks shown in the console preview (0 disables it)
        #[arg(long, default_value = "5")]
        preview: usize,
    },

    /// Check configuration and presence of the raw extracts
    Check {
        #[command(flatten)]
        overrides: Overrides,
    },

    /// Print the first banks of the results file
    Preview {
        #[command(flatten)]
        overrides: Overrides,

        /// Number of banks to show
        #[arg(short = 'n', long, default_value = "5")]
        rows: usize,
    },
}

impl Commands {
    fn overrides(&self) -> &Overrides {
        match self {
            Commands::Run { overrides, .. }
            | Commands::Check { overrides }
            | Commands::Preview { overrides, .. } => overrides,
        }
    }
}

fn init_tracing(default_level: &str, verbose: bool) {
    let level = if verbose { "debug" } else { default_level };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = config::load(&cli.config, cli.command.overrides())?;
    init_tracing(&config.log_level, cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }
    info!(config = %cli.config.display(), "Configuration loaded");

    match cli.command {
        Commands::Run {
            reuse_master,
            no_cva,
            preview,
            ..
        } => {
            config.reuse_master |= reuse_master;
            if no_cva {
                config.cva.enabled = false;
            }
            commands::run::run(&config, preview)?
        }
        Commands::Check { .. } => commands::check::run(&config)?,
        Commands::Preview { rows, .. } => commands::preview::run(&config, rows)?,
    }
    Ok(())
}
