// Copyright 2026 Board Harvest Contributors
// SPDX-License-Identifier: Apache-2.0

//! Postings-table parser.
//!
//! All entry points are synchronous and return owned data: `scraper::Html`
//! is `!Send`, so a parsed document must never be held across an `.await`.

use scraper::{ElementRef, Html};

use crate::error::{HarvestError, HarvestResult};
use crate::record::Record;
use crate::text::{cell_text, selector};

/// Table holding the postings once the operator is logged in.
pub const LISTING_TABLE_SELECTOR: &str = "table#postingsTable";

/// One container per posting.
pub const LISTING_ROW_SELECTOR: &str = "table#postingsTable tbody tr";

/// Rows with fewer cells are not postings.
pub const MIN_CELLS: usize = 10;

/// Class prefix of the per-posting title link; the posting ID is appended.
pub const TITLE_LINK_CLASS_PREFIX: &str = "np-view-btn-";

/// A parsed listing row plus the selector that opens its detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    pub record: Record,
    pub link_selector: String,
}

/// Selector of the title link for a posting ID.
pub fn title_link_selector(id: &str) -> String {
    format!("a.{TITLE_LINK_CLASS_PREFIX}{id}")
}

/// Parse every listing row, in document order.
///
/// Each element is the parse result of one row; a bad row never hides the
/// rows after it.
pub fn parse_listing(html: &str) -> HarvestResult<Vec<HarvestResult<ListingRow>>> {
    let doc = Html::parse_document(html);
    let rows = selector(LISTING_ROW_SELECTOR)?;
    let cells = selector("td")?;
    Ok(doc
        .select(&rows)
        .map(|row| parse_row(row, &cells))
        .collect())
}

/// Whether the listing table is present in a page.
pub fn has_listing_table(html: &str) -> bool {
    let doc = Html::parse_document(html);
    selector(LISTING_TABLE_SELECTOR)
        .map(|sel| doc.select(&sel).next().is_some())
        .unwrap_or(false)
}

fn parse_row(row: ElementRef<'_>, cells: &scraper::Selector) -> HarvestResult<ListingRow> {
    let cols: Vec<String> = row.select(cells).map(cell_text).collect();
    if cols.len() < MIN_CELLS {
        return Err(HarvestError::MalformedRow {
            found: cols.len(),
            required: MIN_CELLS,
        });
    }

    let id = cols[2].clone();
    let link_selector = title_link_selector(&id);
    let link = selector(&link_selector)?;
    let title = row
        .select(&link)
        .next()
        .map(cell_text)
        .ok_or_else(|| HarvestError::TitleLinkMissing(id.clone()))?;

    Ok(ListingRow {
        record: Record {
            id,
            title,
            company: cols[4].clone(),
            division: cols[5].clone(),
            position_type: cols[6].clone(),
            location: cols[7].clone(),
            applied: cols[8].clone(),
            deadline: cols[9].clone(),
        },
        link_selector,
    })
}
