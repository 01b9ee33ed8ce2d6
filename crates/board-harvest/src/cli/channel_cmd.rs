// Copyright 2026 Board Harvest Contributors
// SPDX-License-Identifier: Apache-2.0

//! `board-harvest channel <url>`: save daily-report messages from a channel.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;
use url::Url;

use crate::channel;
use crate::config::{
    resolve_browser, resolve_var, BrowserConfig, ChannelConfig, LoginMode, ENV_BROWSER_PATH,
};
use crate::operator::ConsoleOperator;
use crate::renderer::chromium::ChromiumSession;
use crate::renderer::BrowserSession;

#[derive(Debug, Args)]
pub struct ChannelArgs {
    /// URL of the private channel or DM
    pub url: String,
    /// File the matching messages are written to
    #[arg(long, default_value = "slack_reports.txt")]
    pub output: PathBuf,
    /// Times to scroll up for older messages
    #[arg(long, default_value_t = 10)]
    pub scroll_passes: usize,
    /// Milliseconds to wait after each scroll
    #[arg(long, default_value_t = 1500)]
    pub scroll_wait_ms: u64,
    /// Phrase matched against each message label
    #[arg(long, default_value = "daily report")]
    pub filter: String,
    /// Browser: chrome, chromium, edge or brave
    #[arg(long)]
    pub browser: Option<String>,
    /// Browser executable, skips discovery
    #[arg(long)]
    pub browser_path: Option<PathBuf>,
}

impl ChannelArgs {
    pub fn channel_config(&self) -> Result<ChannelConfig> {
        let url = Url::parse(&self.url).with_context(|| format!("invalid channel URL '{}'", self.url))?;
        let mut config = ChannelConfig::new(url.as_str());
        config.output_path = self.output.clone();
        config.scroll_passes = self.scroll_passes;
        config.scroll_settle = Duration::from_millis(self.scroll_wait_ms);
        config.label_filter = self.filter.clone();
        config.browser = BrowserConfig {
            choice: resolve_browser(self.browser.as_deref())?,
            executable: self
                .browser_path
                .clone()
                .or_else(|| resolve_var(None, ENV_BROWSER_PATH).map(PathBuf::from)),
            ..BrowserConfig::default()
        };
        Ok(config)
    }
}

/// Run the channel command.
pub async fn run(args: ChannelArgs) -> Result<()> {
    let config = args.channel_config()?;
    let mut operator = ConsoleOperator::new()?;
    let mut session = ChromiumSession::launch(&config.browser, LoginMode::Manual)
        .await
        .context("failed to start browser")?;

    let outcome = channel::run(&mut session, &mut operator, &config).await;
    if let Err(e) = Box::new(session).close().await {
        warn!("browser did not shut down cleanly: {e}");
    }
    let messages = outcome?;

    println!(
        "Found {} messages, saved to {}",
        messages.len(),
        config.output_path.display()
    );
    Ok(())
}
