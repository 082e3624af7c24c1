//! CLI for the NBU bookmark updater.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use nbu_core::config;
use std::path::PathBuf;

use commands::{run_plan, run_rewrite, run_status};

/// Top-level CLI for the NBU bookmark updater.
#[derive(Debug, Parser)]
#[command(name = "nbu")]
#[command(about = "NBU: rewrite deployment namespaces inside tracked bookmarks", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Rewrite tracked bookmarks from the old namespace to the new one.
    Run {
        /// Skip the pass when the configured pair was already applied.
        #[arg(long)]
        if_changed: bool,
        /// Bookmarks file to operate on (default: config, then the Chrome profile).
        #[arg(long, value_name = "PATH")]
        store: Option<PathBuf>,
    },

    /// Show what a run would change, without writing anything.
    Plan {
        /// Bookmarks file to operate on (default: config, then the Chrome profile).
        #[arg(long, value_name = "PATH")]
        store: Option<PathBuf>,
    },

    /// Show the configured pair, store location, and last applied state.
    Status {
        /// Bookmarks file to inspect (default: config, then the Chrome profile).
        #[arg(long, value_name = "PATH")]
        store: Option<PathBuf>,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Run { if_changed, store } => {
                run_rewrite(&cfg, store.as_deref(), if_changed).await?
            }
            CliCommand::Plan { store } => run_plan(&cfg, store.as_deref()).await?,
            CliCommand::Status { store } => run_status(&cfg, store.as_deref()).await?,
        }

        Ok(())
    }
}
