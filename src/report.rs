//! Plain-text rendering of a detection result
//!
//! Produces the verdict banner, the step timeline and one card per suggested
//! resolution strategy, ready to print to a terminal.

use crate::core::types::{DetectionResult, ProcessId, Units};
use std::fmt::Write;

/// Render `result` as a multi-line report
pub fn render_report(result: &DetectionResult) -> String {
    let mut out = String::new();

    if result.is_deadlock {
        let _ = writeln!(out, "🚨 Deadlock Detected!");
        let _ = writeln!(
            out,
            "Processes {} are in a deadlock.",
            process_list(&result.deadlocked_processes)
        );
    } else {
        let _ = writeln!(out, "✅ No Deadlock");
        let _ = writeln!(
            out,
            "The system is in a safe state. No deadlock detected."
        );
    }

    for (index, step) in result.steps.iter().enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Step {} · Process P{}", index + 1, step.process);
        let _ = writeln!(out, "  Request:          {}", resource_row(&step.request));
        let _ = writeln!(out, "  Allocated:        {}", resource_row(&step.allocated));
        let _ = writeln!(
            out,
            "  Before Available: {}",
            resource_row(&step.before_available)
        );
        let _ = writeln!(
            out,
            "  After Available:  {}",
            resource_row(&step.after_available)
        );
        let _ = writeln!(out, "  ℹ️ {}", step.description);
    }

    if result.is_deadlock && !result.resolution_strategies.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "🔧 Deadlock Resolution Strategies");
        for strategy in &result.resolution_strategies {
            let _ = writeln!(out);
            let _ = writeln!(out, "[{}] Process P{}", strategy.kind, strategy.process_id);
            let _ = writeln!(out, "  {}", strategy.description);
            let _ = writeln!(out, "  Resolution Steps:");
            for action in &strategy.steps {
                let _ = writeln!(out, "    - {action}");
            }
        }
    }

    out
}

/// `P0, P2, P5`
pub fn process_list(processes: &[ProcessId]) -> String {
    processes
        .iter()
        .map(|p| format!("P{p}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `R0: 1 | R1: 0`
pub fn resource_row(values: &[Units]) -> String {
    values
        .iter()
        .enumerate()
        .map(|(j, v)| format!("R{j}: {v}"))
        .collect::<Vec<_>>()
        .join(" | ")
}
