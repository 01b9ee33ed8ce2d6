// Copyright 2026 Board Harvest Contributors
// SPDX-License-Identifier: Apache-2.0

//! Records, details, and the outcome of a harvest run.

use std::path::PathBuf;

/// Column names of the summary table, in output order.
pub const SUMMARY_HEADER: [&str; 8] = [
    "ID",
    "Title",
    "Company",
    "Division",
    "Position Type",
    "Location",
    "Applied",
    "Deadline",
];

/// Placeholder written when a posting has no description section.
pub const DESCRIPTION_PLACEHOLDER: &str = "Description not found.";

/// Placeholder written when a posting has no qualifications section.
pub const QUALIFICATIONS_PLACEHOLDER: &str = "Qualifications not found.";

/// One posting parsed from a listing row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: String,
    pub title: String,
    pub company: String,
    pub division: String,
    pub position_type: String,
    pub location: String,
    pub applied: String,
    pub deadline: String,
}

impl Record {
    /// Fields in [`SUMMARY_HEADER`] order.
    pub fn fields(&self) -> [&str; 8] {
        [
            &self.id,
            &self.title,
            &self.company,
            &self.division,
            &self.position_type,
            &self.location,
            &self.applied,
            &self.deadline,
        ]
    }
}

/// Free-text detail attached to a record.
///
/// Both sections are always non-empty; missing sections carry the
/// placeholder strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detail {
    pub description: String,
    pub qualifications: String,
}

impl Detail {
    /// Build a detail, substituting placeholders for empty sections.
    pub fn new(description: Option<String>, qualifications: Option<String>) -> Self {
        let pick = |value: Option<String>, fallback: &str| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| fallback.to_string())
        };
        Self {
            description: pick(description, DESCRIPTION_PLACEHOLDER),
            qualifications: pick(qualifications, QUALIFICATIONS_PLACEHOLDER),
        }
    }

    /// The on-disk text form.
    pub fn render(&self) -> String {
        format!(
            "--- Job Description ---\n{}\n\n--- Qualifications ---\n{}",
            self.description, self.qualifications
        )
    }
}

/// What happened to one listing row.
#[derive(Debug)]
pub enum RecordOutcome {
    /// Row did not have the expected shape and contributed nothing.
    Skipped { index: usize, reason: String },
    /// Row looked like a posting but could not be parsed.
    Failed { index: usize, error: String },
    /// Row was parsed. `detail` holds the written file or why there is none.
    Extracted {
        index: usize,
        record: Record,
        detail: Result<PathBuf, String>,
    },
}

/// Result of one harvest run.
#[derive(Debug, Default)]
pub struct RunResult {
    /// Parsed records in listing order.
    pub records: Vec<Record>,
    /// Number of detail files written.
    pub details_written: usize,
    /// One entry per listing row that was visited.
    pub outcomes: Vec<RecordOutcome>,
    /// The operator ended the run before the listing was exhausted.
    pub stopped_early: bool,
}

impl RunResult {
    /// Rows that were skipped or failed.
    pub fn rejected(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| !matches!(o, RecordOutcome::Extracted { .. }))
            .count()
    }
}
