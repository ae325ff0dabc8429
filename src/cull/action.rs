use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::ReasonCode;

/// What should happen to one file. Emitted in traversal order, exactly one
/// per processed file, plus one `PlaceInLibrary` per logical track at the
/// end of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    KeepAsBest,
    SupersedeAndRetire,
    DiscardAsInferior,
    SendToReview,
    PlaceInLibrary,
}

/// One line of the audit trail. Append-only; the sequence is the externally
/// observable contract of a run.
#[derive(Debug, Clone, Serialize)]
pub struct ActionLogEntry {
    pub path: PathBuf,
    pub action: ActionKind,
    pub reason: ReasonCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_path: Option<PathBuf>,
    /// Set when the executor failed to carry the action out. Recorded
    /// per-file; never aborts the run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_failure: Option<String>,
}

impl ActionLogEntry {
    pub fn new(path: PathBuf, action: ActionKind, reason: ReasonCode) -> Self {
        Self {
            path,
            action,
            reason,
            related_path: None,
            execution_failure: None,
        }
    }

    pub fn related(mut self, related: PathBuf) -> Self {
        self.related_path = Some(related);
        self
    }
}

/// Ordered action log, streamed line-by-line to a JSONL file so a long run
/// that dies still leaves an inspectable trail.
#[derive(Debug)]
pub struct ActionLog {
    entries: Vec<ActionLogEntry>,
    sink: BufWriter<fs::File>,
}

impl ActionLog {
    pub fn with_sink(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let file = fs::File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        Ok(Self {
            entries: Vec::new(),
            sink: BufWriter::new(file),
        })
    }

    pub fn append(&mut self, entry: ActionLogEntry) -> Result<()> {
        let line = serde_json::to_string(&entry).context("failed to serialize log entry")?;
        writeln!(self.sink, "{line}").context("failed to write log entry")?;
        self.sink.flush().context("failed to flush action log")?;
        self.entries.push(entry);
        Ok(())
    }

    pub fn entries(&self) -> &[ActionLogEntry] {
        &self.entries
    }
}
