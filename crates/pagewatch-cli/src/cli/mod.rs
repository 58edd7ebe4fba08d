//! CLI for the pagewatch URL change monitor.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use pagewatch_core::config::{self, WatchConfig};
use pagewatch_core::state::StateStore;
use std::path::PathBuf;

use commands::{run_check, run_completions, run_status, run_urls};

/// Top-level CLI for pagewatch.
#[derive(Debug, Parser)]
#[command(name = "pagewatch")]
#[command(about = "pagewatch: detect content changes at a list of URLs and send an alert", long_about = None)]
pub struct Cli {
    /// State file to use instead of the configured/XDG default.
    #[arg(long, global = true, value_name = "PATH")]
    pub state: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch every configured URL once and alert on new or changed content.
    Check {
        /// Print the alert instead of sending an SMS (no credentials needed).
        #[arg(long)]
        mock: bool,
    },

    /// Show the stored hash of every configured URL.
    Status,

    /// List the configured URLs in check order.
    Urls,

    /// Print a shell completion script to stdout.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// State file location: `--state`, then `state_path` from config, then XDG.
fn state_store(flag: Option<PathBuf>, cfg: &WatchConfig) -> Result<StateStore> {
    let path = match flag.or_else(|| cfg.state_path.clone()) {
        Some(p) => p,
        None => StateStore::default_path()?,
    };
    Ok(StateStore::new(path))
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        if let CliCommand::Completions { shell } = cli.command {
            run_completions(shell);
            return Ok(());
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let store = state_store(cli.state, &cfg)?;

        match cli.command {
            CliCommand::Check { mock } => run_check(&cfg, store, mock).await?,
            CliCommand::Status => run_status(&cfg, &store)?,
            CliCommand::Urls => run_urls(&cfg),
            CliCommand::Completions { .. } => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
