// Copyright 2026 Board Harvest Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use board_harvest::cli::{self, channel_cmd, jobs_cmd, match_cmd};

#[derive(Parser)]
#[command(
    name = "board-harvest",
    about = "Scrape job postings and channel reports through a real browser",
    version
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Harvest co-op postings into a TSV summary and per-posting files
    Jobs(jobs_cmd::JobsArgs),
    /// Save daily-report messages from a chat channel
    Channel(channel_cmd::ChannelArgs),
    /// Upload harvested postings and a resume to the match endpoint
    Match(match_cmd::MatchCmdArgs),
    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish)
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    cli::init_tracing(&cli.log_level);

    let result = match cli.command {
        Commands::Jobs(args) => jobs_cmd::run(args).await,
        Commands::Channel(args) => channel_cmd::run(args).await,
        Commands::Match(args) => match_cmd::run(args).await,
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "board-harvest", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = &result {
        eprintln!("  Error: {e:#}");
        std::process::exit(1);
    }

    result
}
