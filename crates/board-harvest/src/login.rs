// Copyright 2026 Board Harvest Contributors
// SPDX-License-Identifier: Apache-2.0

//! Getting an authenticated session onto the postings page.

use tracing::{info, warn};

use crate::config::{HarvestConfig, LoginMode};
use crate::error::HarvestResult;
use crate::listing::has_listing_table;
use crate::operator::Operator;
use crate::renderer::BrowserSession;

/// How the session ended up logged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The operator logged in by hand.
    Manual,
    /// The persisted profile was already logged in.
    RestoredProfile,
    /// The profile was stale; the operator logged in by hand.
    FellBackToManual,
}

/// Open the listing and make sure someone is logged in.
pub async fn prepare_listing(
    session: &mut dyn BrowserSession,
    operator: &mut dyn Operator,
    config: &HarvestConfig,
) -> HarvestResult<LoginOutcome> {
    session.navigate(&config.listing_url).await?;

    match config.login {
        LoginMode::Manual => {
            info!("waiting for manual login");
            operator.confirm(
                "Please log in (2FA if needed). Once job listings are visible, press ENTER to continue...",
            )?;
            Ok(LoginOutcome::Manual)
        }
        LoginMode::Auto => {
            info!("checking the session restored from the saved profile");
            tokio::time::sleep(config.timing.auto_login_settle).await;
            if listing_visible(session, config).await? {
                info!("logged in with saved profile");
                return Ok(LoginOutcome::RestoredProfile);
            }
            warn!("saved profile did not restore the login, falling back to manual login");
            operator.confirm("Please log in manually, then press ENTER to continue...")?;
            Ok(LoginOutcome::FellBackToManual)
        }
    }
}

async fn listing_visible(
    session: &mut dyn BrowserSession,
    config: &HarvestConfig,
) -> HarvestResult<bool> {
    let url = session.current_url().await?;
    if !url.contains(&config.listing_path_marker) {
        warn!(url = %url, "not on the postings page");
        return Ok(false);
    }
    let html = session.html().await?;
    Ok(has_listing_table(&html))
}
