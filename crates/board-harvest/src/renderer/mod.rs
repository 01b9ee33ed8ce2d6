// Copyright 2026 Board Harvest Contributors
// SPDX-License-Identifier: Apache-2.0

//! Browsing-session abstraction.
//!
//! Defines the `BrowserSession` trait the harvesters drive. A session owns a
//! listing context and at most one detail context opened from it; the
//! Chromium implementation lives in [`chromium`].

pub mod chromium;

use async_trait::async_trait;
use std::time::Duration;

use crate::error::HarvestResult;

/// An authenticated browsing context.
///
/// Methods act on the focused context: the listing context, or the detail
/// context while one is open.
#[async_trait]
pub trait BrowserSession: Send {
    /// Navigate the focused context to a URL.
    async fn navigate(&mut self, url: &str) -> HarvestResult<()>;
    /// Current URL of the focused context.
    async fn current_url(&self) -> HarvestResult<String>;
    /// Serialized DOM of the focused context.
    async fn html(&self) -> HarvestResult<String>;
    /// Evaluate JavaScript in the focused context.
    async fn execute_js(&self, script: &str) -> HarvestResult<serde_json::Value>;
    /// Click the element matching `selector` and focus the context it opens.
    ///
    /// Fails with `DetailTimeout` when no new context appears within `timeout`.
    async fn open_detail(&mut self, selector: &str, timeout: Duration) -> HarvestResult<()>;
    /// Close the open detail context and refocus the listing.
    async fn close_detail(&mut self) -> HarvestResult<()>;
    /// Release the browser.
    async fn close(self: Box<Self>) -> HarvestResult<()>;
}
