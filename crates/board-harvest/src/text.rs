// Copyright 2026 Board Harvest Contributors
// SPDX-License-Identifier: Apache-2.0

//! Text helpers shared by the parsers.
//!
//! The browser's `innerText` is not available once a page has been captured
//! as HTML, so [`inner_text`] approximates it: `<br>` and block-level closes
//! become line breaks, runs of horizontal whitespace collapse to one space,
//! and blank-line runs collapse to a single blank line.

use regex::Regex;
use scraper::node::Node;
use scraper::{ElementRef, Selector};
use std::sync::OnceLock;

use crate::error::{HarvestError, HarvestResult};

const BLOCK_TAGS: &[&str] = &[
    "p", "div", "li", "ul", "ol", "tr", "table", "section", "article", "h1", "h2", "h3", "h4",
    "h5", "h6", "pre", "blockquote",
];

fn horizontal_ws() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[ \t\u{a0}\r\f\v]+").expect("whitespace regex is valid"))
}

fn blank_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n{3,}").expect("blank-line regex is valid"))
}

/// Parse a CSS selector, mapping failures into [`HarvestError::Selector`].
pub fn selector(css: &str) -> HarvestResult<Selector> {
    Selector::parse(css).map_err(|_| HarvestError::Selector(css.to_string()))
}

/// Rendered-text approximation of an element.
pub fn inner_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    collect(element, &mut raw);
    normalize(&raw)
}

/// Single-line text of an element (cells, labels, link titles).
pub fn cell_text(element: ElementRef<'_>) -> String {
    let joined: String = element.text().collect();
    horizontal_ws()
        .replace_all(&joined.replace('\n', " "), " ")
        .trim()
        .to_string()
}

fn collect(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            // Source newlines inside text nodes are markup layout, not content.
            Node::Text(text) => out.push_str(&text.replace('\n', " ")),
            Node::Element(el) => {
                let name = el.name();
                if name == "br" {
                    out.push('\n');
                    continue;
                }
                if matches!(name, "script" | "style") {
                    continue;
                }
                let block = BLOCK_TAGS.contains(&name);
                if block && !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect(child_el, out);
                }
                if block {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}

fn normalize(raw: &str) -> String {
    let lines: Vec<String> = raw
        .lines()
        .map(|line| horizontal_ws().replace_all(line, " ").trim().to_string())
        .collect();
    let joined = lines.join("\n");
    blank_runs()
        .replace_all(&joined, "\n\n")
        .trim()
        .to_string()
}
