// Copyright 2026 Board Harvest Contributors
// SPDX-License-Identifier: Apache-2.0

//! The human in the loop: login confirmation, page-ready confirmation, and
//! pacing decisions.

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::config::Pacing;
use crate::error::{HarvestError, HarvestResult};

/// Source of operator replies.
///
/// Calls block until the operator answers.
pub trait Operator {
    /// Show `message` and return the trimmed reply, or `None` once the
    /// console is closed.
    fn prompt(&mut self, message: &str) -> HarvestResult<Option<String>>;

    /// Wait for the operator to acknowledge `message`.
    fn confirm(&mut self, message: &str) -> HarvestResult<()> {
        self.prompt(message).map(|_| ())
    }
}

/// What to do at a pacing checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checkpoint {
    Continue,
    Stop,
}

/// Ask the operator whether to keep going.
///
/// The stop word, or a closed console, stops the run.
pub fn checkpoint(operator: &mut dyn Operator, pacing: &Pacing) -> HarvestResult<Checkpoint> {
    let reply = operator.prompt(&format!(
        "Paused. Press ENTER to resume or type '{}' to finish now...",
        pacing.stop_word
    ))?;
    match reply {
        Some(reply) if reply != pacing.stop_word => Ok(Checkpoint::Continue),
        _ => Ok(Checkpoint::Stop),
    }
}

/// Operator backed by the terminal.
pub struct ConsoleOperator {
    editor: DefaultEditor,
}

impl ConsoleOperator {
    pub fn new() -> HarvestResult<Self> {
        let editor = DefaultEditor::new().map_err(|e| HarvestError::Console(e.to_string()))?;
        Ok(Self { editor })
    }
}

impl Operator for ConsoleOperator {
    fn prompt(&mut self, message: &str) -> HarvestResult<Option<String>> {
        match self.editor.readline(&format!("  [*] {message} ")) {
            Ok(line) => Ok(Some(line.trim().to_string())),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(HarvestError::Console(e.to_string())),
        }
    }
}
