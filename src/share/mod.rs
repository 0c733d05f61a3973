//! Scenario sharing
//!
//! Scenarios travel in two forms: the readable JSON document produced by
//! [`SystemSnapshot::to_json`](crate::SystemSnapshot::to_json), and a short
//! share code that fits in a chat message or a URL parameter.

pub mod encoder;
pub use encoder::{decode_share_code, encode_share_code};

use crate::core::snapshot::SystemSnapshot;
use anyhow::{Context, Result};
use std::path::Path;

/// Export a snapshot to a scenario file
///
/// # Errors
/// Returns an error if the snapshot cannot be serialized or the file cannot
/// be written.
///
/// # Example
///
/// ```no_run
/// use safestate::{SystemSnapshot, share::export_scenario};
///
/// let snapshot = SystemSnapshot::zeroed(3, 3);
/// export_scenario(&snapshot, "scenario.json").expect("Failed to export scenario");
/// ```
pub fn export_scenario<P: AsRef<Path>>(snapshot: &SystemSnapshot, path: P) -> Result<()> {
    let path = path.as_ref();
    let json = snapshot.to_json()?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write scenario file {}", path.display()))?;
    Ok(())
}
