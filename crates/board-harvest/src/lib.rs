// Copyright 2026 Board Harvest Contributors
// SPDX-License-Identifier: Apache-2.0

//! board-harvest: operator-driven browser scraping for a co-op job board and
//! team-chat channels.
//!
//! A run opens a real browser, waits for a human to log in, walks the
//! rendered listing, and writes plain files: a TSV summary, one text file per
//! posting, and optionally the JSON answer of a resume-matching endpoint.

pub mod channel;
pub mod cli;
pub mod config;
pub mod detail;
pub mod error;
pub mod harvest;
pub mod listing;
pub mod login;
pub mod matcher;
pub mod operator;
pub mod persist;
pub mod record;
pub mod renderer;
pub mod text;

pub use error::{HarvestError, HarvestResult};
pub use record::{Detail, Record, RecordOutcome, RunResult};
