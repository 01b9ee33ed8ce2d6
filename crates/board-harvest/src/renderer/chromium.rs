// Copyright 2026 Board Harvest Contributors
// SPDX-License-Identifier: Apache-2.0

//! Chromium-family browser session using chromiumoxide.

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig as CdpConfig};
use chromiumoxide::cdp::browser_protocol::target::TargetId;
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::BrowserSession;
use crate::config::{BrowserChoice, BrowserConfig, LoginMode, ENV_BROWSER_PATH};
use crate::error::{HarvestError, HarvestResult};

const TARGET_POLL: Duration = Duration::from_millis(100);

/// Find browser executables, preferred choice first.
///
/// An explicit executable is used as-is. Otherwise: `~/.board-harvest/chromium`,
/// then for each browser (chosen one first) `PATH` and the macOS application
/// bundle.
pub fn discover_browsers(config: &BrowserConfig) -> Vec<(BrowserChoice, PathBuf)> {
    let mut found: Vec<(BrowserChoice, PathBuf)> = Vec::new();
    let mut push = |choice: BrowserChoice, path: PathBuf| {
        if !found.iter().any(|(_, p)| *p == path) {
            found.push((choice, path));
        }
    };

    if let Some(path) = &config.executable {
        push(config.choice, path.clone());
        return found;
    }

    if let Some(home) = dirs::home_dir() {
        let local = home.join(".board-harvest/chromium");
        let candidates = if cfg!(target_os = "macos") {
            vec![local.join(
                "chrome-mac-arm64/Google Chrome for Testing.app/Contents/MacOS/Google Chrome for Testing",
            )]
        } else {
            vec![local.join("chrome-linux64/chrome"), local.join("chrome")]
        };
        for c in candidates {
            if c.exists() {
                push(BrowserChoice::Chromium, c);
            }
        }
    }

    for choice in config.choice.with_fallbacks() {
        for exe in choice.executables() {
            if let Ok(path) = which::which(exe) {
                push(choice, path);
            }
        }
        if cfg!(target_os = "macos") {
            let bundle = PathBuf::from(choice.macos_bundle());
            if bundle.exists() {
                push(choice, bundle);
            }
        }
    }

    found
}

/// Profile directory to launch with, if any.
///
/// Auto login needs an existing profile. With `save_profile` a missing
/// directory is created so the login survives for the next run.
pub fn launch_profile(config: &BrowserConfig, mode: LoginMode) -> HarvestResult<Option<PathBuf>> {
    let wanted = config.save_profile || mode == LoginMode::Auto;
    if !wanted {
        return Ok(None);
    }
    match (&config.profile_dir, mode) {
        (None, LoginMode::Auto) => Err(HarvestError::ProfileRequired),
        (None, LoginMode::Manual) => Ok(None),
        (Some(dir), _) if dir.exists() => Ok(Some(dir.clone())),
        (Some(dir), LoginMode::Auto) => Err(HarvestError::ProfileMissing(dir.clone())),
        (Some(dir), LoginMode::Manual) => {
            std::fs::create_dir_all(dir).map_err(|e| HarvestError::file(dir, e))?;
            Ok(Some(dir.clone()))
        }
    }
}

/// A browser with one listing tab and at most one detail tab.
pub struct ChromiumSession {
    browser: Browser,
    listing: Page,
    detail: Option<Page>,
    handler: JoinHandle<()>,
    executable: PathBuf,
}

impl ChromiumSession {
    /// Launch a browser, trying each discovered executable until one starts.
    pub async fn launch(config: &BrowserConfig, mode: LoginMode) -> HarvestResult<Self> {
        let profile = launch_profile(config, mode)?;
        let candidates = discover_browsers(config);
        if candidates.is_empty() {
            return Err(HarvestError::BrowserNotFound(format!(
                "no Chromium-family browser found; install one or set {ENV_BROWSER_PATH}"
            )));
        }

        let mut last_error = None;
        for (choice, path) in candidates {
            info!(browser = %choice, path = %path.display(), "launching browser");
            match Self::launch_one(&path, config.headless, profile.as_deref()).await {
                Ok(session) => return Ok(session),
                Err(e) => {
                    warn!(browser = %choice, "browser failed to start: {e}");
                    last_error = Some(e);
                }
            }
        }
        Err(last_error.unwrap_or_else(|| HarvestError::BrowserNotFound("no candidates".into())))
    }

    async fn launch_one(
        executable: &Path,
        headless: bool,
        profile: Option<&Path>,
    ) -> HarvestResult<Self> {
        let mut builder = CdpConfig::builder()
            .chrome_executable(executable)
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-blink-features=AutomationControlled")
            .viewport(None);
        if !headless {
            builder = builder.with_head();
        }
        if let Some(dir) = profile {
            info!(profile = %dir.display(), "using persisted browser profile");
            builder = builder.user_data_dir(dir);
        }
        let cdp_config = builder
            .build()
            .map_err(|e| HarvestError::Browser(format!("failed to build browser config: {e}")))?;

        let (browser, mut handler) = Browser::launch(cdp_config).await?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("cdp handler event error: {e}");
                }
            }
        });

        let listing = browser.new_page("about:blank").await?;

        Ok(Self {
            browser,
            listing,
            detail: None,
            handler,
            executable: executable.to_path_buf(),
        })
    }

    /// Executable this session was launched from.
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    fn focused(&self) -> &Page {
        self.detail.as_ref().unwrap_or(&self.listing)
    }

    async fn target_ids(&self) -> HarvestResult<Vec<TargetId>> {
        Ok(self
            .browser
            .pages()
            .await?
            .iter()
            .map(|p| p.target_id().clone())
            .collect())
    }

    /// Close every tab except the listing and the tracked detail.
    ///
    /// Catches detail tabs that opened after their wait timed out.
    async fn close_strays(&self) -> HarvestResult<usize> {
        let listing = self.listing.target_id().clone();
        let detail = self.detail.as_ref().map(|p| p.target_id().clone());
        let mut closed = 0;
        for page in self.browser.pages().await? {
            let id = page.target_id();
            if *id == listing || detail.as_ref() == Some(id) {
                continue;
            }
            debug!(target = ?id, "closing stray tab");
            if let Err(e) = page.close().await {
                debug!("stray tab close: {e}");
            } else {
                closed += 1;
            }
        }
        Ok(closed)
    }

    async fn wait_for_new_page(&self, known: &[TargetId]) -> HarvestResult<Page> {
        loop {
            let pages = self.browser.pages().await?;
            if let Some(page) = pages.into_iter().find(|p| !known.contains(p.target_id())) {
                return Ok(page);
            }
            tokio::time::sleep(TARGET_POLL).await;
        }
    }
}

#[async_trait]
impl BrowserSession for ChromiumSession {
    async fn navigate(&mut self, url: &str) -> HarvestResult<()> {
        let page = self.focused();
        page.goto(url).await?;
        let _ = page.wait_for_navigation().await;
        Ok(())
    }

    async fn current_url(&self) -> HarvestResult<String> {
        Ok(self.focused().url().await?.unwrap_or_default())
    }

    async fn html(&self) -> HarvestResult<String> {
        Ok(self.focused().content().await?)
    }

    async fn execute_js(&self, script: &str) -> HarvestResult<serde_json::Value> {
        let result = self.focused().evaluate(script).await?;
        Ok(result.value().cloned().unwrap_or(serde_json::Value::Null))
    }

    async fn open_detail(&mut self, selector: &str, timeout: Duration) -> HarvestResult<()> {
        if self.detail.is_some() {
            self.close_detail().await?;
        }

        self.close_strays().await?;
        let known = self.target_ids().await?;
        let link = self
            .listing
            .find_element(selector)
            .await
            .map_err(|_| HarvestError::ElementNotFound(selector.to_string()))?;
        link.click().await?;

        let page = match tokio::time::timeout(timeout, self.wait_for_new_page(&known)).await {
            Ok(page) => page?,
            Err(_) => {
                if let Err(e) = self.close_strays().await {
                    debug!("stray tab sweep failed: {e}");
                }
                return Err(HarvestError::DetailTimeout(timeout));
            }
        };
        // Track the tab before anything else can fail so close_detail reaches it.
        self.detail = Some(page.clone());
        let _ = page.wait_for_navigation().await;
        page.bring_to_front().await?;
        Ok(())
    }

    async fn close_detail(&mut self) -> HarvestResult<()> {
        let page = self.detail.take().ok_or(HarvestError::NoDetailOpen)?;
        page.close().await?;
        self.listing.bring_to_front().await?;
        Ok(())
    }

    async fn close(self: Box<Self>) -> HarvestResult<()> {
        let mut this = *self;
        if let Some(page) = this.detail.take() {
            let _ = page.close().await;
        }
        if let Err(e) = this.browser.close().await {
            debug!("browser close: {e}");
        }
        let _ = this.browser.wait().await;
        this.handler.abort();
        Ok(())
    }
}
