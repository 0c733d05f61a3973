// Core types
pub mod types;
pub use types::*;

pub mod error;
pub use error::{ImportError, SnapshotError};

pub mod snapshot;
pub use snapshot::{SystemSnapshot, load_snapshot};

// Trace logging
#[cfg(feature = "logging")]
pub mod logger;
#[cfg(feature = "logging")]
pub use logger::EventLogger;

// Deadlock detector and strategy advisor
pub mod advisor;
pub mod detector;
pub use advisor::advise;
pub use detector::detect;

#[cfg(feature = "logging")]
use anyhow::Context;
use anyhow::Result;
#[cfg(feature = "logging")]
use parking_lot::Mutex;
#[cfg(feature = "logging")]
use std::path::PathBuf;

/// Safestate configuration struct
pub struct Analyzer {
    #[cfg(feature = "logging")]
    log_path: Option<PathBuf>,
    /// Opened on the first analysis that has a log path
    #[cfg(feature = "logging")]
    logger: Mutex<Option<EventLogger>>,
    callback: Option<Box<dyn Fn(&DetectionResult) + Send + 'static>>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    /// Create a new Analyzer with default settings
    ///
    /// By default:
    /// - Logging is disabled
    /// - No callback runs when a deadlock is found
    pub fn new() -> Self {
        Analyzer {
            #[cfg(feature = "logging")]
            log_path: None,
            #[cfg(feature = "logging")]
            logger: Mutex::new(None),
            callback: None,
        }
    }

    /// Activate the trace logger and set the path for the log file
    ///
    /// The file is created (and truncated) by the first call to
    /// [`analyze`](Self::analyze); later runs of the same analyzer append
    /// their traces to it.
    ///
    /// # Arguments
    /// * `path` - Path to the log file. If the path contains "{timestamp}",
    ///   it will be replaced with the current timestamp.
    ///
    /// # Returns
    /// The builder for method chaining
    #[cfg(feature = "logging")]
    pub fn with_log<P: AsRef<std::path::Path>>(mut self, path: P) -> Self {
        self.log_path = Some(path.as_ref().to_path_buf());
        *self.logger.get_mut() = None;
        self
    }

    /// Resolved path of the trace file, once an analysis has opened it
    #[cfg(feature = "logging")]
    pub fn log_file(&self) -> Option<PathBuf> {
        self.logger
            .lock()
            .as_ref()
            .and_then(|logger| logger.path().map(PathBuf::from))
    }

    /// Set a callback to be invoked when an analysis finds a deadlock
    ///
    /// # Arguments
    /// * `callback` - Function to call with the full detection result
    ///
    /// # Returns
    /// The builder for method chaining
    pub fn on_deadlock<F>(mut self, callback: F) -> Self
    where
        F: Fn(&DetectionResult) + Send + 'static,
    {
        self.callback = Some(Box::new(callback));
        self
    }

    /// Run deadlock detection on `snapshot` with the configured settings
    ///
    /// The trace is written after detection finishes, so the result is the
    /// same with or without logging.
    ///
    /// # Errors
    /// Returns an error if the log file cannot be created
    pub fn analyze(&self, snapshot: &SystemSnapshot) -> Result<DetectionResult> {
        let result = detect(snapshot);

        #[cfg(feature = "logging")]
        if let Some(log_path) = &self.log_path {
            let mut guard = self.logger.lock();
            if guard.is_none() {
                *guard = Some(
                    EventLogger::with_file(log_path).context("Failed to initialize logger")?,
                );
            }
            if let Some(logger) = guard.as_mut() {
                logger.log_result(&result);
            }
        }

        if result.is_deadlock
            && let Some(callback) = &self.callback
        {
            callback(&result);
        }

        Ok(result)
    }
}
