// Copyright 2026 Board Harvest Contributors
// SPDX-License-Identifier: Apache-2.0

//! The extract-and-persist loop over a postings listing.
//!
//! Each listing row is handled in isolation: a row that cannot be parsed, or
//! whose detail view fails, becomes a [`RecordOutcome`] and the loop moves on.
//! The summary table is written whenever the loop ends, including when the
//! operator stops it at a pacing checkpoint.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::config::HarvestConfig;
use crate::detail::parse_detail;
use crate::error::HarvestResult;
use crate::listing::{parse_listing, ListingRow};
use crate::operator::{checkpoint, Checkpoint, Operator};
use crate::persist::{write_summary, DetailWriter};
use crate::record::{RecordOutcome, RunResult};
use crate::renderer::BrowserSession;

/// Harvest every posting on the current listing page.
///
/// The session must already be logged in and showing the listing.
pub async fn run(
    session: &mut dyn BrowserSession,
    operator: &mut dyn Operator,
    config: &HarvestConfig,
) -> HarvestResult<RunResult> {
    tokio::time::sleep(config.timing.listing_settle).await;
    let html = session.html().await?;
    let rows = parse_listing(&html)?;
    info!(rows = rows.len(), "extracting postings");

    let mut result = RunResult::default();
    let mut writer = DetailWriter::new(&config.output_dir);
    for (index, row) in rows.into_iter().enumerate() {
        if config.pacing.is_checkpoint(index) && should_stop(operator, config) {
            info!(processed = index, "stopped by operator");
            result.stopped_early = true;
            break;
        }

        let outcome = process_row(session, config, &mut writer, index, row).await;
        if let RecordOutcome::Extracted { record, detail, .. } = &outcome {
            result.records.push(record.clone());
            if detail.is_ok() {
                result.details_written += 1;
            }
        }
        result.outcomes.push(outcome);
    }

    write_summary(&config.summary_path, &result.records)?;
    info!(
        records = result.records.len(),
        details = result.details_written,
        summary = %config.summary_path.display(),
        "harvest complete"
    );
    Ok(result)
}

fn should_stop(operator: &mut dyn Operator, config: &HarvestConfig) -> bool {
    match checkpoint(operator, &config.pacing) {
        Ok(decision) => decision == Checkpoint::Stop,
        Err(e) => {
            warn!("operator console failed, finishing early: {e}");
            true
        }
    }
}

async fn process_row(
    session: &mut dyn BrowserSession,
    config: &HarvestConfig,
    writer: &mut DetailWriter,
    index: usize,
    row: HarvestResult<ListingRow>,
) -> RecordOutcome {
    let row = match row {
        Ok(row) => row,
        Err(e) if e.is_malformed_row() => {
            debug!(row = index + 1, "skipping row: {e}");
            return RecordOutcome::Skipped {
                index,
                reason: e.to_string(),
            };
        }
        Err(e) => {
            warn!(row = index + 1, "error on row: {e}");
            return RecordOutcome::Failed {
                index,
                error: e.to_string(),
            };
        }
    };

    info!("{}: {}", index + 1, row.record.title);
    let detail = fetch_detail(session, config, writer, &row).await.map_err(|e| {
        warn!(row = index + 1, title = %row.record.title, "detail not saved: {e}");
        e.to_string()
    });

    RecordOutcome::Extracted {
        index,
        record: row.record,
        detail,
    }
}

async fn fetch_detail(
    session: &mut dyn BrowserSession,
    config: &HarvestConfig,
    writer: &mut DetailWriter,
    row: &ListingRow,
) -> HarvestResult<PathBuf> {
    session
        .open_detail(&row.link_selector, config.timing.detail_timeout)
        .await?;

    let written = save_detail(session, config, writer, row).await;
    if let Err(e) = session.close_detail().await {
        warn!(title = %row.record.title, "failed to close detail view: {e}");
    }
    written
}

async fn save_detail(
    session: &mut dyn BrowserSession,
    config: &HarvestConfig,
    writer: &mut DetailWriter,
    row: &ListingRow,
) -> HarvestResult<PathBuf> {
    tokio::time::sleep(config.timing.detail_settle).await;
    let html = session.html().await?;
    let detail = parse_detail(&html)?;
    writer.write(&row.record, &detail)
}
