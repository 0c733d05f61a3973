//! Trace logger for analysis runs
//!
//! Records what the detector did as JSON lines, one event per line: when a
//! run starts, every process that finishes (with the `work` vector it left
//! behind), every process left deadlocked, the strategy suggested for it, and
//! the verdict. The file can be replayed or diffed between scenarios.
//!
//! Logging is a side channel: the detector itself stays pure and the
//! [`Analyzer`](crate::Analyzer) writes the trace from the finished result.
//! Every analyzer owns its logger, so one analyzer's trace never picks up runs
//! made by another.

use crate::core::types::{DetectionResult, ProcessId, ResourceVector, StrategyKind};
use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Kind of trace event
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum AnalysisEvent {
    /// A detection run began
    AnalysisStarted,
    /// A process could proceed and released its allocation
    ProcessFinished,
    /// A process can never finish
    ProcessDeadlocked,
    /// A resolution strategy was chosen for a deadlocked process
    StrategySelected,
    /// The run finished
    AnalysisFinished,
}

/// Structure for a single trace line
#[derive(Debug, Serialize)]
pub struct LogEntry {
    pub event: AnalysisEvent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process: Option<ProcessId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work: Option<ResourceVector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<StrategyKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadlock: Option<bool>,
    /// Seconds since Unix Epoch with microsecond precision
    pub timestamp: f64,
}

impl LogEntry {
    fn new(event: AnalysisEvent) -> Self {
        let now = Utc::now();
        LogEntry {
            event,
            process: None,
            work: None,
            strategy: None,
            deadlock: None,
            timestamp: now.timestamp() as f64 + now.timestamp_subsec_micros() as f64 / 1_000_000.0,
        }
    }
}

/// Determines how the logger should operate
#[derive(Debug)]
pub enum LoggerMode {
    /// Logging is disabled entirely
    Disabled,
    /// Log to the specified file
    ToFile(BufWriter<File>),
}

/// Logger for recording analysis traces
pub struct EventLogger {
    mode: LoggerMode,
    path: Option<PathBuf>,
}

impl Default for EventLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLogger {
    /// Create a new logger with logging disabled
    pub fn new() -> Self {
        EventLogger {
            mode: LoggerMode::Disabled,
            path: None,
        }
    }

    /// Create a new logger that writes to the specified file
    ///
    /// If the path contains `{timestamp}` it is replaced with the current UTC
    /// time. Missing parent directories are created. The file is truncated.
    pub fn with_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file_path = resolve_log_path(path.as_ref());

        if let Some(parent) = file_path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).context("Failed to create log directory")?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&file_path)
            .context("Failed to open log file")?;

        Ok(EventLogger {
            mode: LoggerMode::ToFile(BufWriter::new(file)),
            path: Some(file_path),
        })
    }

    /// Write the full trace of a finished detection run
    pub fn log_result(&mut self, result: &DetectionResult) {
        if !self.is_enabled() {
            return;
        }

        self.write(LogEntry::new(AnalysisEvent::AnalysisStarted));

        for step in &result.steps {
            let mut entry = LogEntry::new(AnalysisEvent::ProcessFinished);
            entry.process = Some(step.process);
            entry.work = Some(step.after_available.clone());
            self.write(entry);
        }

        for &process in &result.deadlocked_processes {
            let mut entry = LogEntry::new(AnalysisEvent::ProcessDeadlocked);
            entry.process = Some(process);
            self.write(entry);
        }

        for strategy in &result.resolution_strategies {
            let mut entry = LogEntry::new(AnalysisEvent::StrategySelected);
            entry.process = Some(strategy.process_id);
            entry.strategy = Some(strategy.kind);
            self.write(entry);
        }

        let mut entry = LogEntry::new(AnalysisEvent::AnalysisFinished);
        entry.deadlock = Some(result.is_deadlock);
        self.write(entry);

        if let LoggerMode::ToFile(ref mut writer) = self.mode {
            let _ = writer.flush();
        }
    }

    fn write(&mut self, entry: LogEntry) {
        if let LoggerMode::ToFile(ref mut writer) = self.mode
            && let Ok(json) = serde_json::to_string(&entry)
        {
            let _ = writeln!(writer, "{json}");
        }
    }

    /// Check if logging is enabled
    pub fn is_enabled(&self) -> bool {
        !matches!(self.mode, LoggerMode::Disabled)
    }

    /// Resolved path of the file being written, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

#[allow(clippy::literal_string_with_formatting_args)]
fn resolve_log_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    if raw.contains("{timestamp}") {
        let timestamp = Utc::now().format("%Y%m%d_%H%M%S").to_string();
        PathBuf::from(raw.replace("{timestamp}", &timestamp))
    } else {
        path.to_path_buf()
    }
}
