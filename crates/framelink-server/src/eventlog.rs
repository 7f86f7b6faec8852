//! Append-only event log.
//!
//! Every protocol event (server start, client connect, header received,
//! payload received, response sent, disconnect/shutdown) produces exactly
//! one text line in a named file. Each append is a self-contained
//! open-append-close operation, so the same file can be shared across
//! concurrent sessions without any cross-call lock state.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;

/// Logging capability handed to the session loop.
///
/// The caller owns the sink's lifecycle; sessions only append lines.
pub trait EventSink: Send + Sync {
    /// Appends one event record.
    fn append(&self, line: &str) -> io::Result<()>;
}

/// File-backed event sink.
#[derive(Debug, Clone)]
pub struct EventLog {
    path: PathBuf,
}

impl EventLog {
    /// Creates a sink appending to the file at `path`.
    ///
    /// The file is created on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the log file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventSink for EventLog {
    fn append(&self, line: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{} {}", Utc::now().format("%Y-%m-%dT%H:%M:%SZ"), line)
    }
}
