// Copyright 2026 Board Harvest Contributors
// SPDX-License-Identifier: Apache-2.0

//! `board-harvest jobs`: harvest the co-op postings board.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::{
    resolve_browser, resolve_flag, resolve_login_mode, resolve_var, BrowserConfig, HarvestConfig,
    Pacing, DEFAULT_LISTING_URL, ENV_BROWSER_PATH, ENV_PROFILE_DIR, ENV_SAVE_PROFILE,
};
use crate::harvest;
use crate::login::prepare_listing;
use crate::operator::{ConsoleOperator, Operator};
use crate::persist::list_detail_files;
use crate::record::RunResult;
use crate::renderer::chromium::ChromiumSession;
use crate::renderer::BrowserSession;

use super::match_cmd::{self, MatchArgs};

#[derive(Debug, Args)]
pub struct JobsArgs {
    /// Postings page to open
    #[arg(long, default_value = DEFAULT_LISTING_URL)]
    pub url: String,
    /// Directory for per-posting detail files
    #[arg(long, default_value = "job_desc")]
    pub out_dir: PathBuf,
    /// Tab-separated summary of all postings
    #[arg(long, default_value = "uvic_jobs.tsv")]
    pub summary: PathBuf,
    /// Pause for the operator every N rows (0 disables)
    #[arg(long, default_value_t = 10)]
    pub pause_every: usize,
    /// Reply at a pause that finishes the run early
    #[arg(long, default_value = "match")]
    pub stop_word: String,
    /// Login mode: manual or auto (reuse a saved profile)
    #[arg(long)]
    pub mode: Option<String>,
    /// Browser: chrome, chromium, edge or brave
    #[arg(long)]
    pub browser: Option<String>,
    /// Browser executable, skips discovery
    #[arg(long)]
    pub browser_path: Option<PathBuf>,
    /// Persisted browser profile directory
    #[arg(long)]
    pub profile_dir: Option<PathBuf>,
    /// Keep the login in the profile directory for later runs
    #[arg(long)]
    pub save_profile: bool,
    /// Run the browser without a window (needs a logged-in profile)
    #[arg(long)]
    pub headless: bool,
    /// Do not upload the results to the match endpoint afterwards
    #[arg(long)]
    pub no_match: bool,
    #[command(flatten)]
    pub matching: MatchArgs,
}

impl JobsArgs {
    /// Resolve flags and environment into an explicit config.
    pub fn harvest_config(&self) -> Result<HarvestConfig> {
        let login = resolve_login_mode(self.mode.as_deref())?;
        let choice = resolve_browser(self.browser.as_deref())?;
        let executable = self
            .browser_path
            .clone()
            .or_else(|| resolve_var(None, ENV_BROWSER_PATH).map(PathBuf::from));
        let profile_dir = self
            .profile_dir
            .clone()
            .or_else(|| resolve_var(None, ENV_PROFILE_DIR).map(PathBuf::from));

        Ok(HarvestConfig {
            listing_url: self.url.clone(),
            login,
            browser: BrowserConfig {
                choice,
                executable,
                profile_dir,
                save_profile: resolve_flag(self.save_profile, ENV_SAVE_PROFILE),
                headless: self.headless,
            },
            output_dir: self.out_dir.clone(),
            summary_path: self.summary.clone(),
            pacing: Pacing {
                pause_every: self.pause_every,
                stop_word: self.stop_word.clone(),
            },
            ..HarvestConfig::default()
        })
    }
}

/// Run the jobs command.
pub async fn run(args: JobsArgs) -> Result<()> {
    let config = args.harvest_config()?;
    info!(
        mode = ?config.login,
        browser = %config.browser.choice,
        save_profile = config.browser.save_profile,
        "initializing harvest"
    );

    let mut operator = ConsoleOperator::new()?;
    let mut session = ChromiumSession::launch(&config.browser, config.login)
        .await
        .context("failed to start browser")?;
    info!(executable = %session.executable().display(), "browser ready");

    let outcome = harvest_listing(&mut session, &mut operator, &config).await;
    if let Err(e) = Box::new(session).close().await {
        warn!("browser did not shut down cleanly: {e}");
    }
    let result = outcome?;

    println!(
        "Scraping complete. Saved {} jobs and {} descriptions.",
        result.records.len(),
        result.details_written
    );
    if result.rejected() > 0 {
        println!("  {} rows skipped.", result.rejected());
    }
    if config.browser.save_profile {
        println!("  Login kept in the browser profile for future runs.");
    }

    if args.no_match {
        return Ok(());
    }
    let details = list_detail_files(&config.output_dir)?;
    if details.is_empty() {
        println!("No job descriptions found. Skipping matcher.");
        return Ok(());
    }
    println!("Running matcher client...");
    match_cmd::upload(&args.matching, &config.output_dir).await
}

async fn harvest_listing(
    session: &mut dyn BrowserSession,
    operator: &mut dyn Operator,
    config: &HarvestConfig,
) -> Result<RunResult> {
    prepare_listing(session, operator, config)
        .await
        .context("could not reach the postings page")?;
    Ok(harvest::run(session, operator, config).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        jobs: JobsArgs,
    }

    #[test]
    fn test_defaults_resolve() {
        let harness = Harness::parse_from(["jobs", "--mode", "manual", "--browser", "chromium"]);
        let config = harness.jobs.harvest_config().unwrap();
        assert_eq!(config.listing_url, DEFAULT_LISTING_URL);
        assert_eq!(config.pacing.pause_every, 10);
        assert_eq!(config.pacing.stop_word, "match");
        assert_eq!(config.summary_path, PathBuf::from("uvic_jobs.tsv"));
        assert_eq!(config.browser.choice, crate::config::BrowserChoice::Chromium);
    }

    #[test]
    fn test_bad_browser_rejected() {
        let harness = Harness::parse_from(["jobs", "--browser", "firefox"]);
        assert!(harness.jobs.harvest_config().is_err());
    }
}
