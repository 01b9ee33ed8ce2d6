// Copyright 2026 Board Harvest Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for the harvesting library.

use std::path::PathBuf;
use std::time::Duration;

/// All errors that can occur while driving a harvest.
#[derive(thiserror::Error, Debug)]
pub enum HarvestError {
    #[error("Invalid selector: {0}")]
    Selector(String),

    #[error("Row has {found} cells, at least {required} required")]
    MalformedRow { found: usize, required: usize },

    #[error("Title link not found for posting {0}")]
    TitleLinkMissing(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Detail view did not open within {0:?}")]
    DetailTimeout(Duration),

    #[error("No detail view is open")]
    NoDetailOpen,

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Browser not found: {0}")]
    BrowserNotFound(String),

    #[error("Profile directory required for auto login mode")]
    ProfileRequired,

    #[error("Profile directory does not exist: {}", .0.display())]
    ProfileMissing(PathBuf),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Operator console error: {0}")]
    Console(String),

    #[error("Match endpoint returned a non-JSON body (status {status})")]
    NonJsonResponse { status: u16 },

    #[error("IO error at {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl HarvestError {
    /// Wrap an IO error with the path it happened on.
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HarvestError::File {
            path: path.into(),
            source,
        }
    }

    /// True for row-shape problems that are skipped without a log line above debug.
    pub fn is_malformed_row(&self) -> bool {
        matches!(self, HarvestError::MalformedRow { .. })
    }
}

impl From<chromiumoxide::error::CdpError> for HarvestError {
    fn from(e: chromiumoxide::error::CdpError) -> Self {
        HarvestError::Browser(e.to_string())
    }
}

pub type HarvestResult<T> = Result<T, HarvestError>;
