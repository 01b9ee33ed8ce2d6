// Copyright 2026 Board Harvest Contributors
// SPDX-License-Identifier: Apache-2.0

//! Configuration structures and resolution.
//!
//! Environment variables are read only by the `resolve_*` helpers, which the
//! CLI calls once. Everything past that point receives explicit values.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::HarvestError;

/// Default postings page of the job board.
pub const DEFAULT_LISTING_URL: &str = "https://learninginmotion.uvic.ca/myAccount/co-op/postings.htm";

/// Default sign-in page of the messaging service.
pub const DEFAULT_SIGNIN_URL: &str = "https://slack.com/signin";

/// Default upload endpoint of the resume matcher.
pub const DEFAULT_MATCH_ENDPOINT: &str = "http://localhost:3000/api/upload";

pub const ENV_MODE: &str = "BOARD_HARVEST_MODE";
pub const ENV_BROWSER: &str = "BOARD_HARVEST_BROWSER";
pub const ENV_BROWSER_PATH: &str = "BOARD_HARVEST_BROWSER_PATH";
pub const ENV_PROFILE_DIR: &str = "BOARD_HARVEST_PROFILE_DIR";
pub const ENV_SAVE_PROFILE: &str = "BOARD_HARVEST_SAVE_PROFILE";
pub const ENV_ENDPOINT: &str = "BOARD_HARVEST_ENDPOINT";

/// How the session gets authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginMode {
    /// Wait for the operator to log in by hand.
    #[default]
    Manual,
    /// Reuse a persisted browser profile, falling back to manual.
    Auto,
}

impl FromStr for LoginMode {
    type Err = HarvestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manual" => Ok(Self::Manual),
            "auto" => Ok(Self::Auto),
            other => Err(HarvestError::Config(format!("unknown login mode '{other}'"))),
        }
    }
}

/// Chromium-family browser to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrowserChoice {
    #[default]
    Chrome,
    Chromium,
    Edge,
    Brave,
}

impl BrowserChoice {
    pub const ALL: [BrowserChoice; 4] = [Self::Chrome, Self::Chromium, Self::Edge, Self::Brave];

    /// Executable names searched on `PATH`.
    pub fn executables(self) -> &'static [&'static str] {
        match self {
            Self::Chrome => &["google-chrome", "google-chrome-stable", "chrome"],
            Self::Chromium => &["chromium", "chromium-browser"],
            Self::Edge => &["microsoft-edge", "microsoft-edge-stable", "msedge"],
            Self::Brave => &["brave-browser", "brave"],
        }
    }

    /// Application bundle binary on macOS.
    pub fn macos_bundle(self) -> &'static str {
        match self {
            Self::Chrome => "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            Self::Chromium => "/Applications/Chromium.app/Contents/MacOS/Chromium",
            Self::Edge => "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
            Self::Brave => "/Applications/Brave Browser.app/Contents/MacOS/Brave Browser",
        }
    }

    /// This choice first, then the other browsers as fallbacks.
    pub fn with_fallbacks(self) -> Vec<BrowserChoice> {
        let mut order = vec![self];
        order.extend(Self::ALL.into_iter().filter(|b| *b != self));
        order
    }
}

impl std::fmt::Display for BrowserChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Chrome => write!(f, "chrome"),
            Self::Chromium => write!(f, "chromium"),
            Self::Edge => write!(f, "edge"),
            Self::Brave => write!(f, "brave"),
        }
    }
}

impl FromStr for BrowserChoice {
    type Err = HarvestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chrome" | "google-chrome" => Ok(Self::Chrome),
            "chromium" => Ok(Self::Chromium),
            "edge" | "msedge" => Ok(Self::Edge),
            "brave" => Ok(Self::Brave),
            other => Err(HarvestError::Config(format!(
                "unsupported browser '{other}' (expected chrome, chromium, edge or brave)"
            ))),
        }
    }
}

/// Browser launch settings.
#[derive(Debug, Clone, Default)]
pub struct BrowserConfig {
    pub choice: BrowserChoice,
    /// Explicit executable; skips discovery.
    pub executable: Option<PathBuf>,
    /// Persisted profile directory (`--user-data-dir`).
    pub profile_dir: Option<PathBuf>,
    /// Keep login state in `profile_dir` for later runs.
    pub save_profile: bool,
    /// Run without a window. Only useful with a logged-in profile.
    pub headless: bool,
}

/// Operator pacing for long listings.
#[derive(Debug, Clone)]
pub struct Pacing {
    /// Pause before every N-th row; 0 disables pausing.
    pub pause_every: usize,
    /// Reply that ends the run early.
    pub stop_word: String,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            pause_every: 10,
            stop_word: "match".to_string(),
        }
    }
}

impl Pacing {
    /// Whether to ask the operator before processing row `index`.
    pub fn is_checkpoint(&self, index: usize) -> bool {
        self.pause_every > 0 && index > 0 && index % self.pause_every == 0
    }
}

/// Fixed waits and bounds used while driving the listing.
#[derive(Debug, Clone)]
pub struct Timing {
    /// Upper bound for a detail view to appear after clicking.
    pub detail_timeout: Duration,
    /// Wait after switching into a detail view.
    pub detail_settle: Duration,
    /// Wait after login before reading the listing.
    pub listing_settle: Duration,
    /// Wait before checking a profile-restored session.
    pub auto_login_settle: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            detail_timeout: Duration::from_secs(10),
            detail_settle: Duration::from_secs(3),
            listing_settle: Duration::from_secs(2),
            auto_login_settle: Duration::from_secs(5),
        }
    }
}

impl Timing {
    /// All waits zeroed except the timeout.
    pub fn immediate() -> Self {
        Self {
            detail_timeout: Duration::from_millis(200),
            detail_settle: Duration::ZERO,
            listing_settle: Duration::ZERO,
            auto_login_settle: Duration::ZERO,
        }
    }
}

/// Settings for a job-board run.
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    pub listing_url: String,
    /// URL fragment that marks the postings page.
    pub listing_path_marker: String,
    pub login: LoginMode,
    pub browser: BrowserConfig,
    pub output_dir: PathBuf,
    pub summary_path: PathBuf,
    pub pacing: Pacing,
    pub timing: Timing,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            listing_url: DEFAULT_LISTING_URL.to_string(),
            listing_path_marker: "postings.htm".to_string(),
            login: LoginMode::default(),
            browser: BrowserConfig::default(),
            output_dir: PathBuf::from("job_desc"),
            summary_path: PathBuf::from("uvic_jobs.tsv"),
            pacing: Pacing::default(),
            timing: Timing::default(),
        }
    }
}

/// Settings for a channel scrape.
#[derive(Debug, Clone)]
pub struct ChannelConfig {
    pub signin_url: String,
    pub channel_url: String,
    /// Element whose `scrollTop` is reset to pull in older messages.
    pub scroll_container: String,
    pub scroll_passes: usize,
    pub scroll_settle: Duration,
    /// Case-insensitive phrase matched against each item's `aria-label`.
    pub label_filter: String,
    pub output_path: PathBuf,
    pub browser: BrowserConfig,
}

impl ChannelConfig {
    pub fn new(channel_url: impl Into<String>) -> Self {
        Self {
            signin_url: DEFAULT_SIGNIN_URL.to_string(),
            channel_url: channel_url.into(),
            scroll_container: r#"[data-qa="slack_kit_scrollbar"]"#.to_string(),
            scroll_passes: 10,
            scroll_settle: Duration::from_millis(1500),
            label_filter: "daily report".to_string(),
            output_path: PathBuf::from("slack_reports.txt"),
            browser: BrowserConfig::default(),
        }
    }
}

/// Settings for the resume-match upload.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub endpoint: String,
    pub resume_path: PathBuf,
    pub jobs_dir: PathBuf,
    pub output_path: PathBuf,
    pub timeout: Duration,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_MATCH_ENDPOINT.to_string(),
            resume_path: PathBuf::from("resume/resume.pdf"),
            jobs_dir: PathBuf::from("job_desc"),
            output_path: PathBuf::from("job_matches.txt"),
            timeout: Duration::from_secs(120),
        }
    }
}

/// Explicit value, else the environment variable, else `None`.
pub fn resolve_var(explicit: Option<&str>, env_key: &str) -> Option<String> {
    if let Some(value) = explicit {
        return Some(value.to_string());
    }
    std::env::var(env_key).ok().filter(|v| !v.trim().is_empty())
}

/// Resolve the login mode.
pub fn resolve_login_mode(explicit: Option<&str>) -> Result<LoginMode, HarvestError> {
    resolve_var(explicit, ENV_MODE)
        .map(|v| v.parse())
        .unwrap_or(Ok(LoginMode::default()))
}

/// Resolve the browser choice.
pub fn resolve_browser(explicit: Option<&str>) -> Result<BrowserChoice, HarvestError> {
    resolve_var(explicit, ENV_BROWSER)
        .map(|v| v.parse())
        .unwrap_or(Ok(BrowserChoice::default()))
}

/// Resolve a boolean flag: set on the command line, or truthy in the environment.
pub fn resolve_flag(explicit: bool, env_key: &str) -> bool {
    explicit || std::env::var(env_key).is_ok_and(|v| is_truthy(&v))
}

/// Resolve the match endpoint.
pub fn resolve_endpoint(explicit: Option<&str>) -> String {
    resolve_var(explicit, ENV_ENDPOINT).unwrap_or_else(|| DEFAULT_MATCH_ENDPOINT.to_string())
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
