// Copyright 2026 Board Harvest Contributors
// SPDX-License-Identifier: Apache-2.0

//! Posting detail-page parser.
//!
//! The detail page is a bordered table of label/value rows. A label cell is
//! matched by text; its value is the question span in the next sibling cell.

use scraper::{ElementRef, Html};

use crate::error::HarvestResult;
use crate::record::Detail;
use crate::text::{cell_text, inner_text, selector};

/// Label cells on the detail page.
pub const LABEL_SELECTOR: &str = "table.table-bordered td[style='width: 25%;']";

/// Value span inside the cell that follows a label.
pub const VALUE_SELECTOR: &str = "span[class^='np-view-question']";

pub const DESCRIPTION_LABEL: &str = "Job Description:";
pub const QUALIFICATIONS_LABEL: &str = "Qualifications:";

/// Extract the description and qualifications from a detail page.
///
/// Never fails on content: missing sections become placeholders.
pub fn parse_detail(html: &str) -> HarvestResult<Detail> {
    let doc = Html::parse_document(html);
    let labels = selector(LABEL_SELECTOR)?;
    let value = selector(VALUE_SELECTOR)?;

    let mut description = None;
    let mut qualifications = None;
    for label in doc.select(&labels) {
        let text = cell_text(label);
        let slot = if text.contains(DESCRIPTION_LABEL) {
            &mut description
        } else if text.contains(QUALIFICATIONS_LABEL) {
            &mut qualifications
        } else {
            continue;
        };
        if let Some(found) = sibling_value(label, &value) {
            *slot = Some(found);
        }
    }

    Ok(Detail::new(description, qualifications))
}

fn sibling_value(label: ElementRef<'_>, value: &scraper::Selector) -> Option<String> {
    let cell = label
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "td")?;
    let span = cell.select(value).next()?;
    Some(inner_text(span)).filter(|t| !t.is_empty())
}
