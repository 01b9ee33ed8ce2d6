// Copyright 2026 Board Harvest Contributors
// SPDX-License-Identifier: Apache-2.0

//! Team-chat channel scraper.
//!
//! Message lists are virtualised: only messages near the viewport exist in
//! the DOM. Resetting the scroll container to the top repeatedly makes the
//! client render older messages before the list is captured.

use scraper::Html;
use tracing::{debug, info};

use crate::config::ChannelConfig;
use crate::error::HarvestResult;
use crate::operator::Operator;
use crate::persist::write_messages;
use crate::renderer::BrowserSession;
use crate::text::{inner_text, selector};

/// Message containers in the channel view.
pub const MESSAGE_SELECTOR: &str = "div[role='listitem']";

/// Script that scrolls `container` to the top; evaluates to whether it exists.
pub fn scroll_script(container: &str) -> HarvestResult<String> {
    let literal = serde_json::to_string(container)?;
    Ok(format!(
        "(() => {{ const el = document.querySelector({literal}); \
         if (el) {{ el.scrollTop = 0; return true; }} return false; }})()"
    ))
}

/// Texts of messages whose `aria-label` contains `phrase`, ignoring case.
pub fn filter_messages(html: &str, phrase: &str) -> HarvestResult<Vec<String>> {
    let doc = Html::parse_document(html);
    let items = selector(MESSAGE_SELECTOR)?;
    let needle = phrase.to_lowercase();
    Ok(doc
        .select(&items)
        .filter(|item| {
            item.value()
                .attr("aria-label")
                .is_some_and(|label| label.to_lowercase().contains(&needle))
        })
        .map(inner_text)
        .collect())
}

/// Log in, open the channel, load history, and save matching messages.
pub async fn run(
    session: &mut dyn BrowserSession,
    operator: &mut dyn Operator,
    config: &ChannelConfig,
) -> HarvestResult<Vec<String>> {
    info!(url = %config.signin_url, "opening sign-in page");
    session.navigate(&config.signin_url).await?;
    operator.confirm("Please log in. After login, press ENTER to continue to the channel...")?;

    info!(url = %config.channel_url, "opening channel");
    session.navigate(&config.channel_url).await?;
    operator.confirm("Press ENTER once the channel has fully loaded...")?;

    info!(passes = config.scroll_passes, "scrolling to load older messages");
    let script = scroll_script(&config.scroll_container)?;
    for pass in 0..config.scroll_passes {
        let found = session.execute_js(&script).await?;
        if pass == 0 && found != serde_json::Value::Bool(true) {
            debug!(container = %config.scroll_container, "scroll container not found");
        }
        tokio::time::sleep(config.scroll_settle).await;
    }

    let html = session.html().await?;
    let messages = filter_messages(&html, &config.label_filter)?;
    for (i, message) in messages.iter().enumerate() {
        debug!("{}: {}", i + 1, message);
    }
    write_messages(&config.output_path, &messages)?;
    info!(
        count = messages.len(),
        output = %config.output_path.display(),
        "saved channel messages"
    );
    Ok(messages)
}
