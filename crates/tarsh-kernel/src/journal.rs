//! Action journal — the durable log sink for command events.
//!
//! Every accepted command line is recorded as one entry, in issue order,
//! in a JSON document at the configured path:
//!
//! ```json
//! {
//!   "actions": [
//!     { "timestamp": "2026-08-23T10:15:00+00:00", "command": "ls", "arguments": ["/documents"] }
//!   ]
//! }
//! ```
//!
//! Recording is best-effort from the interpreter's point of view: a write
//! failure is surfaced to the user but never aborts the command.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};

/// One recorded command event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionEntry {
    /// ISO 8601 timestamp of when the command was accepted.
    pub timestamp: String,
    /// The command verb.
    pub command: String,
    /// The verb's arguments, in order.
    pub arguments: Vec<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ActionDocument {
    actions: Vec<ActionEntry>,
}

/// Append-only journal backed by a JSON file.
///
/// The file is created on first write. A missing or corrupt document is
/// replaced by an empty one rather than failing, so a damaged log never
/// blocks the shell; previously recorded events are preserved on append.
#[derive(Debug)]
pub struct ActionJournal {
    path: PathBuf,
}

impl ActionJournal {
    /// Create a journal that records to the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append one command event, stamped with the current local time.
    pub fn record(&self, command: &str, arguments: &[&str]) -> Result<()> {
        let mut document = self.read_document();
        document.actions.push(ActionEntry {
            timestamp: Local::now().to_rfc3339(),
            command: command.to_string(),
            arguments: arguments.iter().map(|a| a.to_string()).collect(),
        });
        let json = serde_json::to_string_pretty(&document)
            .context("serializing action log")?;
        fs::write(&self.path, json)
            .with_context(|| format!("writing action log '{}'", self.path.display()))
    }

    /// All recorded events, oldest first. Empty if the file is missing.
    pub fn entries(&self) -> Vec<ActionEntry> {
        self.read_document().actions
    }

    fn read_document(&self) -> ActionDocument {
        match fs::read_to_string(&self.path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_default(),
            Err(_) => ActionDocument::default(),
        }
    }
}
