//! System snapshot: the three matrices every analysis runs on
//!
//! A [`SystemSnapshot`] is always well-shaped once constructed. Two ways in:
//!
//! - [`SystemSnapshot::new`] is strict and rejects ragged input with a
//!   [`SnapshotError`].
//! - [`SystemSnapshot::lenient`] and [`SystemSnapshot::from_json`] follow the
//!   forgiving behaviour of a hand-filled form: missing cells count as zero
//!   and anything that is not a non-negative number becomes zero.
//!
//! The form is sized from `allocated`: one row per process, one column per
//! entry of the first row. `from_json` rejects a document that does not fit
//! that form; `lenient` drops whatever does not fit.

use crate::core::error::{ImportError, SnapshotError};
use crate::core::types::{ProcessId, ResourceVector, Units};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Allocation, request and availability of every resource type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSnapshot")]
pub struct SystemSnapshot {
    allocated: Vec<ResourceVector>,
    requested: Vec<ResourceVector>,
    available: ResourceVector,
}

/// Unchecked wire shape, validated on the way into [`SystemSnapshot`]
#[derive(Deserialize)]
struct RawSnapshot {
    allocated: Vec<ResourceVector>,
    requested: Vec<ResourceVector>,
    available: ResourceVector,
}

impl TryFrom<RawSnapshot> for SystemSnapshot {
    type Error = SnapshotError;

    fn try_from(raw: RawSnapshot) -> Result<Self, Self::Error> {
        SystemSnapshot::new(raw.allocated, raw.requested, raw.available)
    }
}

impl SystemSnapshot {
    /// Build a snapshot, rejecting any shape mismatch
    ///
    /// # Errors
    /// Returns a [`SnapshotError`] if `allocated` and `requested` have a
    /// different number of rows, or any row is not exactly
    /// `available.len()` long.
    pub fn new(
        allocated: Vec<ResourceVector>,
        requested: Vec<ResourceVector>,
        available: ResourceVector,
    ) -> Result<Self, SnapshotError> {
        if allocated.len() != requested.len() {
            return Err(SnapshotError::ProcessCountMismatch {
                allocated: allocated.len(),
                requested: requested.len(),
            });
        }

        let expected = available.len();
        for (matrix, rows) in [("allocated", &allocated), ("requested", &requested)] {
            if let Some((row, found)) = rows
                .iter()
                .map(Vec::len)
                .enumerate()
                .find(|&(_, len)| len != expected)
            {
                return Err(SnapshotError::RaggedRow {
                    matrix,
                    row,
                    found,
                    expected,
                });
            }
        }

        Ok(SystemSnapshot {
            allocated,
            requested,
            available,
        })
    }

    /// Build a snapshot, squaring off ragged input with zeros
    ///
    /// The resource count is the length of the first `allocated` row, or of
    /// `available` when there are no processes. Short rows, missing
    /// `requested` rows and a short `available` are padded with zeros; cells
    /// and rows beyond the form are dropped.
    pub fn lenient(
        allocated: Vec<ResourceVector>,
        requested: Vec<ResourceVector>,
        mut available: ResourceVector,
    ) -> Self {
        let processes = allocated.len();
        let resources = allocated.first().map_or(available.len(), Vec::len);
        available.resize(resources, 0);

        let square = |mut row: ResourceVector| {
            row.resize(resources, 0);
            row
        };

        let allocated: Vec<_> = allocated.into_iter().map(square).collect();
        let mut requested: Vec<_> = requested
            .into_iter()
            .take(processes)
            .map(square)
            .collect();
        requested.resize(processes, vec![0; resources]);

        SystemSnapshot {
            allocated,
            requested,
            available,
        }
    }

    /// All-zero snapshot with `processes` rows and `resources` columns
    pub fn zeroed(processes: usize, resources: usize) -> Self {
        SystemSnapshot {
            allocated: vec![vec![0; resources]; processes],
            requested: vec![vec![0; resources]; processes],
            available: vec![0; resources],
        }
    }

    /// Number of processes (P)
    pub fn processes(&self) -> usize {
        self.allocated.len()
    }

    /// Number of resource types (R)
    pub fn resources(&self) -> usize {
        self.available.len()
    }

    pub fn allocated(&self) -> &[ResourceVector] {
        &self.allocated
    }

    pub fn requested(&self) -> &[ResourceVector] {
        &self.requested
    }

    pub fn available(&self) -> &[Units] {
        &self.available
    }

    /// Resources held by `process`
    ///
    /// # Panics
    /// Panics if `process` is out of range.
    pub fn allocated_of(&self, process: ProcessId) -> &[Units] {
        &self.allocated[process]
    }

    /// Outstanding request of `process`
    ///
    /// # Panics
    /// Panics if `process` is out of range.
    pub fn requested_of(&self, process: ProcessId) -> &[Units] {
        &self.requested[process]
    }

    /// Serialize to the scenario document format
    ///
    /// Keys are `allocated`, `requested` and `available`, indented by two
    /// spaces.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize scenario")
    }

    /// Parse a scenario document leniently
    ///
    /// The form is sized from `allocated`: P is its row count and R the
    /// length of its first row. Short rows, missing `requested` rows and a
    /// short `available` are filled with zeros, and individual bad cells
    /// count as zero.
    ///
    /// # Errors
    /// Returns [`ImportError::InvalidFormat`] if the text is not a JSON
    /// object, any of `allocated`, `requested` or `available` is missing or
    /// not an array (of arrays, for the matrices), `allocated` is empty, or
    /// any row or cell lies outside the P×R form.
    pub fn from_json(text: &str) -> Result<Self, ImportError> {
        let document: Value = serde_json::from_str(text).map_err(|_| ImportError::InvalidFormat)?;
        let object = document.as_object().ok_or(ImportError::InvalidFormat)?;
        let field = |key: &str| object.get(key).ok_or(ImportError::InvalidFormat);

        let allocated = field("allocated").and_then(coerce_matrix)?;
        let requested = field("requested").and_then(coerce_matrix)?;
        let available = field("available").and_then(coerce_row)?;

        let resources = allocated.first().ok_or(ImportError::InvalidFormat)?.len();
        let fits = |rows: &[ResourceVector]| {
            rows.len() <= allocated.len() && rows.iter().all(|row| row.len() <= resources)
        };
        if !fits(allocated.as_slice())
            || !fits(requested.as_slice())
            || available.len() > resources
        {
            return Err(ImportError::InvalidFormat);
        }

        Ok(SystemSnapshot::lenient(allocated, requested, available))
    }
}

/// Read and leniently parse a scenario file
///
/// # Errors
/// Returns an error if the file cannot be read or is not a scenario document.
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<SystemSnapshot> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
    let snapshot = SystemSnapshot::from_json(&text)
        .with_context(|| format!("Failed to import scenario {}", path.display()))?;
    Ok(snapshot)
}

fn coerce_matrix(value: &Value) -> Result<Vec<ResourceVector>, ImportError> {
    value
        .as_array()
        .ok_or(ImportError::InvalidFormat)?
        .iter()
        .map(coerce_row)
        .collect()
}

fn coerce_row(value: &Value) -> Result<ResourceVector, ImportError> {
    Ok(value
        .as_array()
        .ok_or(ImportError::InvalidFormat)?
        .iter()
        .map(coerce_cell)
        .collect())
}

/// Interpret one matrix cell the way a numeric form field would
///
/// Numbers are truncated toward zero. A string counts only if the whole of it
/// is a plain decimal number (`12`, `2.5`, `1e3`); anything a number field
/// would blank out, negatives included, counts as zero.
fn coerce_cell(value: &Value) -> Units {
    match value {
        Value::Number(number) => number.as_u64().unwrap_or_else(|| {
            number.as_f64().map_or(0, truncate)
        }),
        Value::String(text) if is_decimal(text) => text.parse().map_or(0, truncate),
        _ => 0,
    }
}

fn truncate(value: f64) -> Units {
    if value.is_finite() && value >= 0.0 {
        value.trunc() as Units
    } else {
        0
    }
}

/// `-?digits(.digits)?([eE][+-]?digits)?`
fn is_decimal(text: &str) -> bool {
    fn digits(bytes: &[u8]) -> usize {
        bytes.iter().take_while(|b| b.is_ascii_digit()).count()
    }

    let bytes = text.as_bytes();
    let mut at = usize::from(bytes.first() == Some(&b'-'));

    let whole = digits(&bytes[at..]);
    if whole == 0 {
        return false;
    }
    at += whole;

    if bytes.get(at) == Some(&b'.') {
        let fraction = digits(&bytes[at + 1..]);
        if fraction == 0 {
            return false;
        }
        at += 1 + fraction;
    }

    if matches!(bytes.get(at), Some(b'e' | b'E')) {
        at += 1;
        if matches!(bytes.get(at), Some(b'+' | b'-')) {
            at += 1;
        }
        let exponent = digits(&bytes[at..]);
        if exponent == 0 {
            return false;
        }
        at += exponent;
    }

    at == bytes.len()
}
