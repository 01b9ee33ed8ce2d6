// Copyright 2026 Board Harvest Contributors
// SPDX-License-Identifier: Apache-2.0

//! In-memory browser session and scripted operator for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::Path;
use std::time::Duration;

use board_harvest::config::{HarvestConfig, Pacing, Timing};
use board_harvest::listing::title_link_selector;
use board_harvest::operator::Operator;
use board_harvest::renderer::BrowserSession;
use board_harvest::{HarvestError, HarvestResult};

// ── Page builders ──

pub fn posting_row(id: &str, title: &str) -> String {
    format!(
        "<tr><td><input type=\"checkbox\"></td><td>New</td><td>{id}</td>\
         <td><a class=\"np-view-btn-{id}\" href=\"#\">{title}</a></td>\
         <td>Company {id}</td><td>Engineering</td><td>Co-op</td><td>Victoria</td>\
         <td>No</td><td>2026-09-30</td></tr>"
    )
}

pub fn malformed_row() -> String {
    "<tr><td colspan=\"3\">Posting withdrawn</td></tr>".to_string()
}

pub fn listing_page(rows: &[String]) -> String {
    format!(
        "<html><body><table id=\"postingsTable\"><thead><tr><th>ID</th></tr></thead>\
         <tbody>{}</tbody></table></body></html>",
        rows.concat()
    )
}

pub fn detail_page(description: Option<&str>, qualifications: Option<&str>) -> String {
    let section = |label: &str, body: Option<&str>| {
        body.map(|b| {
            format!(
                "<tr><td style=\"width: 25%;\">{label}</td>\
                 <td><span class=\"np-view-question--1\">{b}</span></td></tr>"
            )
        })
        .unwrap_or_default()
    };
    format!(
        "<html><body><table class=\"table table-bordered\"><tbody>\
         <tr><td style=\"width: 25%;\">Job Title:</td><td>x</td></tr>{}{}</tbody></table></body></html>",
        section("Job Description:", description),
        section("Qualifications:", qualifications)
    )
}

// ── Fake browser ──

/// A listing page plus detail pages keyed by title-link selector.
#[derive(Default)]
pub struct FakeBoard {
    pub url: String,
    pub pages: HashMap<String, String>,
    pub listing: String,
    pub details: HashMap<String, String>,
    pub timeouts: HashSet<String>,
    pub open: Option<String>,
    pub navigations: Vec<String>,
    pub detail_attempts: Vec<String>,
    pub scripts: Vec<String>,
}

impl FakeBoard {
    /// A board with `count` postings; 1-based positions in `malformed` are broken rows.
    pub fn with_postings(count: usize, malformed: &[usize]) -> Self {
        let mut board = FakeBoard::default();
        let mut rows = Vec::new();
        for n in 1..=count {
            if malformed.contains(&n) {
                rows.push(malformed_row());
                continue;
            }
            let id = format!("{}", 1000 + n);
            rows.push(posting_row(&id, &format!("Posting {n}")));
            board.details.insert(
                title_link_selector(&id),
                detail_page(Some(&format!("Description {n}")), Some("Rust")),
            );
        }
        board.listing = listing_page(&rows);
        board
    }
}

#[async_trait]
impl BrowserSession for FakeBoard {
    async fn navigate(&mut self, url: &str) -> HarvestResult<()> {
        self.url = url.to_string();
        self.navigations.push(url.to_string());
        Ok(())
    }

    async fn current_url(&self) -> HarvestResult<String> {
        Ok(self.url.clone())
    }

    async fn html(&self) -> HarvestResult<String> {
        if let Some(selector) = &self.open {
            return Ok(self.details.get(selector).cloned().unwrap_or_default());
        }
        if let Some(page) = self.pages.get(&self.url) {
            return Ok(page.clone());
        }
        Ok(self.listing.clone())
    }

    async fn execute_js(&self, _script: &str) -> HarvestResult<serde_json::Value> {
        Ok(serde_json::Value::Bool(true))
    }

    async fn open_detail(&mut self, selector: &str, timeout: Duration) -> HarvestResult<()> {
        self.detail_attempts.push(selector.to_string());
        if self.timeouts.contains(selector) {
            return Err(HarvestError::DetailTimeout(timeout));
        }
        self.open = Some(selector.to_string());
        Ok(())
    }

    async fn close_detail(&mut self) -> HarvestResult<()> {
        self.open.take().map(|_| ()).ok_or(HarvestError::NoDetailOpen)
    }

    async fn close(self: Box<Self>) -> HarvestResult<()> {
        Ok(())
    }
}

/// `FakeBoard` whose `execute_js` calls are recorded.
pub struct RecordingChannel(pub FakeBoard, pub std::sync::Mutex<Vec<String>>);

#[async_trait]
impl BrowserSession for RecordingChannel {
    async fn navigate(&mut self, url: &str) -> HarvestResult<()> {
        self.0.navigate(url).await
    }

    async fn current_url(&self) -> HarvestResult<String> {
        self.0.current_url().await
    }

    async fn html(&self) -> HarvestResult<String> {
        self.0.html().await
    }

    async fn execute_js(&self, script: &str) -> HarvestResult<serde_json::Value> {
        self.1
            .lock()
            .expect("script log poisoned")
            .push(script.to_string());
        Ok(serde_json::Value::Bool(true))
    }

    async fn open_detail(&mut self, selector: &str, timeout: Duration) -> HarvestResult<()> {
        self.0.open_detail(selector, timeout).await
    }

    async fn close_detail(&mut self) -> HarvestResult<()> {
        self.0.close_detail().await
    }

    async fn close(self: Box<Self>) -> HarvestResult<()> {
        Ok(())
    }
}

// ── Scripted operator ──

#[derive(Default)]
pub struct ScriptedOperator {
    pub replies: VecDeque<Option<String>>,
    pub prompts: Vec<String>,
}

impl ScriptedOperator {
    pub fn replying(replies: &[&str]) -> Self {
        Self {
            replies: replies.iter().map(|r| Some(r.to_string())).collect(),
            prompts: Vec::new(),
        }
    }
}

impl Operator for ScriptedOperator {
    fn prompt(&mut self, message: &str) -> HarvestResult<Option<String>> {
        self.prompts.push(message.to_string());
        Ok(self.replies.pop_front().unwrap_or(Some(String::new())))
    }
}

// ── Config ──

pub fn test_config(dir: &Path, pause_every: usize) -> HarvestConfig {
    HarvestConfig {
        output_dir: dir.join("job_desc"),
        summary_path: dir.join("jobs.tsv"),
        pacing: Pacing {
            pause_every,
            ..Pacing::default()
        },
        timing: Timing::immediate(),
        ..HarvestConfig::default()
    }
}

pub fn summary_lines(dir: &Path) -> Vec<String> {
    std::fs::read_to_string(dir.join("jobs.tsv"))
        .expect("summary written")
        .lines()
        .map(String::from)
        .collect()
}

pub fn detail_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir.join("job_desc"))
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}
