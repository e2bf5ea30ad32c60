//! Append-only event log.
//!
//! Events are stored one JSON object per line in `form_events.jsonl`. The
//! log is never rewritten: appends go to the end of the file and reads replay
//! the whole sequence in insertion order.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::types::TrackingEvent;

/// Configuration for the event log location
#[derive(Debug, Clone)]
pub struct EventLogConfig {
    /// Path to the data directory
    pub data_dir: PathBuf,
}

impl Default for EventLogConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
        }
    }
}

impl EventLogConfig {
    /// Create config with custom data directory
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    /// Get the data directory path
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Get path to form_events.jsonl
    pub fn events_path(&self) -> PathBuf {
        self.data_dir.join("form_events.jsonl")
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in store operations
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "IO error: {}", e),
            StoreError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Json(e)
    }
}

/// The append-only store for tracking events.
///
/// Appends are serialized through a mutex so concurrent requests can never
/// interleave bytes within the line-delimited file. Reads open the file
/// independently and never block writers.
pub struct EventLog {
    config: EventLogConfig,
    write_lock: Mutex<()>,
}

impl EventLog {
    /// Create a new EventLog with default config
    pub fn new() -> Self {
        Self::with_config(EventLogConfig::default())
    }

    /// Create a new EventLog with custom config
    pub fn with_config(config: EventLogConfig) -> Self {
        Self {
            config,
            write_lock: Mutex::new(()),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &EventLogConfig {
        &self.config
    }

    /// Append one event to the log.
    ///
    /// The record is written as a single line and fsynced before returning,
    /// so a successful append is visible to every subsequent read, including
    /// across process restarts. An I/O failure propagates to the caller; the
    /// event is not retried.
    pub fn append(&self, event: &TrackingEvent) -> StoreResult<()> {
        let line = event.to_json_line()?;
        let events_path = self.config.events_path();

        // Ensure parent directory exists
        if let Some(parent) = events_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let _guard = self.write_lock.lock();

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&events_path)?;

        writeln!(file, "{}", line)?;

        // Sync to disk for durability
        file.sync_all()?;

        Ok(())
    }

    /// Load every event in insertion order.
    ///
    /// A log that does not exist yet is the normal empty state, not an error.
    /// Lines that fail to parse are skipped with a warning so one corrupt
    /// record cannot take the dashboard down.
    pub fn load_events(&self) -> StoreResult<Vec<TrackingEvent>> {
        let events_path = self.config.events_path();

        if !events_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&events_path)?;
        let reader = BufReader::new(file);
        let mut events = Vec::new();

        for (line_num, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            if line.trim().is_empty() {
                continue;
            }

            match TrackingEvent::from_json_line(&line) {
                Ok(event) => events.push(event),
                Err(e) => {
                    tracing::warn!(
                        line = line_num + 1,
                        error = %e,
                        "skipping unparseable event log line"
                    );
                    // Continue loading other events
                }
            }
        }

        Ok(events)
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}
