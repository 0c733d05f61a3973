//! # Safestate
//!
//! An educational deadlock detector for processes competing over several
//! resource types.
//!
//! Safestate takes a snapshot of what every process holds, what it is waiting
//! for and what is still free, simulates which processes could run to
//! completion, and reports the ones that never can. For every stuck process it
//! suggests one of three canned ways out.
//!
//! ## Features
//!
//! - Step-by-step safety check with the `work` vector before and after each step
//! - Resolution strategy per deadlocked process
//! - Lenient JSON scenario import/export
//! - Compact share codes for scenarios
//! - Optional JSON-lines trace log (`logging` feature)

mod core;
pub use crate::core::{
    Analyzer, DetectionResult, ImportError, ProcessId, ResolutionStrategy, ResourceVector,
    SnapshotError, Step, StrategyKind, SystemSnapshot, Units, advise, advisor::select_strategy,
    detect, load_snapshot,
};

#[cfg(feature = "logging")]
pub use crate::core::EventLogger;

pub mod report;
pub use report::render_report;

pub mod share;
pub use share::{decode_share_code, encode_share_code};

pub const BANNER: &str = r#"
      ▄▖▄▖▄▖▄▖▄▖▄▖▄▖▄▖▄▖
      ▚ ▌▌▙▖▙▖▚ ▐ ▌▌▐ ▙▖
      ▄▌▛▌▌ ▙▖▄▌▐ ▛▌▐ ▙▖
"#;
