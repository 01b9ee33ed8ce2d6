// Copyright 2026 Board Harvest Contributors
// SPDX-License-Identifier: Apache-2.0

//! `board-harvest match`: upload detail files and a resume to the matcher.

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

use crate::config::{resolve_endpoint, MatchConfig};
use crate::matcher;

/// Upload settings shared by `match` and `jobs`.
#[derive(Debug, Clone, Args)]
pub struct MatchArgs {
    /// Resume sent with the job descriptions
    #[arg(long, default_value = "resume/resume.pdf")]
    pub resume: PathBuf,
    /// Matcher upload endpoint [env: BOARD_HARVEST_ENDPOINT]
    #[arg(long)]
    pub endpoint: Option<String>,
    /// Where the JSON response is saved
    #[arg(long, default_value = "job_matches.txt")]
    pub matches_out: PathBuf,
}

impl MatchArgs {
    pub fn match_config(&self, jobs_dir: &Path) -> MatchConfig {
        MatchConfig {
            endpoint: resolve_endpoint(self.endpoint.as_deref()),
            resume_path: self.resume.clone(),
            jobs_dir: jobs_dir.to_path_buf(),
            output_path: self.matches_out.clone(),
            ..MatchConfig::default()
        }
    }
}

#[derive(Debug, Args)]
pub struct MatchCmdArgs {
    /// Directory of detail files to upload
    #[arg(long, default_value = "job_desc")]
    pub jobs_dir: PathBuf,
    #[command(flatten)]
    pub upload: MatchArgs,
}

/// Run the match command.
pub async fn run(args: MatchCmdArgs) -> Result<()> {
    upload(&args.upload, &args.jobs_dir).await
}

/// Upload and report.
pub async fn upload(args: &MatchArgs, jobs_dir: &Path) -> Result<()> {
    let config = args.match_config(jobs_dir);
    let report = matcher::upload(&config)
        .await
        .with_context(|| format!("upload to {} failed", config.endpoint))?;

    println!("Response status: {}", report.status);
    println!("Response body: {}", report.body);
    println!(
        "Sent {} job descriptions; matches saved to {}",
        report.jobs_sent,
        report.output_path.display()
    );
    Ok(())
}
