use serde::{Deserialize, Serialize};
use std::fmt;

/// Process identifier type
///
/// Processes are identified by their row index in the snapshot matrices.
pub type ProcessId = usize;

/// Quantity of a single resource type
pub type Units = u64;

/// Ordered resource quantities, one entry per resource type
///
/// Index `j` holds the quantity of resource type `j`.
pub type ResourceVector = Vec<Units>;

/// Sum every component of a resource vector
pub fn total(vector: &[Units]) -> u128 {
    vector.iter().map(|&v| v as u128).sum()
}

/// One process becoming satisfiable during detection
///
/// Steps are recorded in the order processes finish, which is not necessarily
/// process-index order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// The process that could proceed
    pub process: ProcessId,
    /// Its outstanding request at the time it was satisfied
    pub request: ResourceVector,
    /// Resources it held and released when it finished
    pub allocated: ResourceVector,
    /// `work` before the release
    pub before_available: ResourceVector,
    /// `work` after the release
    pub after_available: ResourceVector,
    /// Human-readable description of the step
    pub description: String,
}

/// The three canned ways out of a deadlock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyKind {
    /// Suspend the process and reallocate what it holds
    #[serde(rename = "Preemption")]
    Preemption,
    /// Kill the process outright
    #[serde(rename = "Process Termination")]
    Termination,
    /// Rework the process's request pattern
    #[serde(rename = "Resource Request Optimization")]
    RequestOptimization,
}

impl StrategyKind {
    /// Display name of the strategy
    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::Preemption => "Preemption",
            StrategyKind::Termination => "Process Termination",
            StrategyKind::RequestOptimization => "Resource Request Optimization",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Suggested remedy for a single deadlocked process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionStrategy {
    /// The deadlocked process this strategy targets
    pub process_id: ProcessId,
    /// Which of the canned strategies was selected
    #[serde(rename = "type")]
    pub kind: StrategyKind,
    /// One-line summary of the strategy
    pub description: String,
    /// Ordered remediation actions
    pub steps: Vec<String>,
}

/// Outcome of a deadlock detection run
///
/// Everything a presentation layer needs: the verdict, who is stuck, the
/// order in which the others could finish, and one suggested remedy per
/// stuck process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    /// True iff at least one process can never finish
    pub is_deadlock: bool,

    /// Deadlocked processes in ascending index order
    pub deadlocked_processes: Vec<ProcessId>,

    /// Processes that could finish, in the order they finished
    pub steps: Vec<Step>,

    /// One strategy per deadlocked process, in `deadlocked_processes` order
    pub resolution_strategies: Vec<ResolutionStrategy>,

    /// Number of simulation passes that finished at least one process
    ///
    /// Never exceeds the number of processes.
    #[serde(default)]
    pub passes: usize,
}

impl DetectionResult {
    /// Final `work` vector of the simulation, if any process finished
    pub fn final_work(&self) -> Option<&ResourceVector> {
        self.steps.last().map(|step| &step.after_available)
    }

    /// Order in which processes finished
    pub fn finish_order(&self) -> Vec<ProcessId> {
        self.steps.iter().map(|step| step.process).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_kind_serializes_to_display_name() {
        for kind in [
            StrategyKind::Preemption,
            StrategyKind::Termination,
            StrategyKind::RequestOptimization,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.name()));
        }
    }

    #[test]
    fn test_result_uses_camel_case_keys() {
        let result = DetectionResult {
            is_deadlock: true,
            deadlocked_processes: vec![0],
            steps: vec![],
            resolution_strategies: vec![ResolutionStrategy {
                process_id: 0,
                kind: StrategyKind::Termination,
                description: String::new(),
                steps: vec![],
            }],
            passes: 0,
        };

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["isDeadlock"], true);
        assert_eq!(value["deadlockedProcesses"][0], 0);
        assert_eq!(value["resolutionStrategies"][0]["processId"], 0);
        assert_eq!(
            value["resolutionStrategies"][0]["type"],
            "Process Termination"
        );
    }

    #[test]
    fn test_total_does_not_overflow() {
        assert_eq!(total(&[u64::MAX, u64::MAX]), 2 * u64::MAX as u128);
        assert_eq!(total(&[]), 0);
    }
}
