//! Resolution strategy advisor
//!
//! Picks one of three canned remedies for a deadlocked process. The choice
//! looks only at the snapshot's original `available` vector and the process's
//! own request, never at the simulated `work` state:
//!
//! 1. Nothing available at all → [`StrategyKind::Termination`]
//! 2. Request exceeds 1.5× what is available → [`StrategyKind::Preemption`]
//! 3. Otherwise → [`StrategyKind::RequestOptimization`]

use crate::core::snapshot::SystemSnapshot;
use crate::core::types::{ProcessId, ResolutionStrategy, StrategyKind, Units, total};

/// Suggest a resolution strategy for `process`
///
/// Never fails for any process in range.
///
/// # Panics
/// Panics if `process` is not a row of `snapshot`.
pub fn advise(process: ProcessId, snapshot: &SystemSnapshot) -> ResolutionStrategy {
    let kind = select_strategy(snapshot.requested_of(process), snapshot.available());
    strategy(kind, process)
}

/// Threshold heuristic over request and availability totals
pub fn select_strategy(requested: &[Units], available: &[Units]) -> StrategyKind {
    let requested = total(requested);
    let available = total(available);

    // requested > 1.5 * available, kept in integers
    if available == 0 {
        StrategyKind::Termination
    } else if 2 * requested > 3 * available {
        StrategyKind::Preemption
    } else {
        StrategyKind::RequestOptimization
    }
}

/// Canned description and remediation steps for `kind`
pub fn strategy(kind: StrategyKind, process: ProcessId) -> ResolutionStrategy {
    let (description, steps) = match kind {
        StrategyKind::Preemption => (
            format!(
                "Temporarily suspend process P{process} and reallocate its resources to break the deadlock."
            ),
            vec![
                format!("Identify critical resources held by process P{process}"),
                format!("Forcibly release all resources allocated to P{process}"),
                "Redistribute resources to unblock waiting processes".to_string(),
            ],
        ),
        StrategyKind::Termination => (
            format!("Completely terminate process P{process} to release all its resources."),
            vec![
                format!("Rollback process P{process} to a safe checkpoint"),
                format!("Release all resources held by P{process}"),
                "Restart the process or reallocate its work to other processes".to_string(),
            ],
        ),
        StrategyKind::RequestOptimization => (
            "Optimize resource requests to prevent future deadlocks.".to_string(),
            vec![
                format!("Analyze resource request pattern of P{process}"),
                "Implement more granular resource allocation".to_string(),
                "Introduce timeout or priority-based resource allocation".to_string(),
            ],
        ),
    };

    ResolutionStrategy {
        process_id: process,
        kind,
        description,
        steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_available_terminates() {
        assert_eq!(select_strategy(&[5], &[0]), StrategyKind::Termination);
        assert_eq!(select_strategy(&[0, 0], &[0, 0]), StrategyKind::Termination);
        assert_eq!(select_strategy(&[], &[]), StrategyKind::Termination);
    }

    #[test]
    fn test_large_request_preempts() {
        assert_eq!(select_strategy(&[10], &[2]), StrategyKind::Preemption);
        assert_eq!(select_strategy(&[2, 2], &[1, 1]), StrategyKind::Preemption);
    }

    #[test]
    fn test_threshold_is_strict() {
        // 3 == 1.5 * 2, not greater
        assert_eq!(
            select_strategy(&[3], &[2]),
            StrategyKind::RequestOptimization
        );
        assert_eq!(select_strategy(&[4], &[2]), StrategyKind::Preemption);
        // 4 < 1.5 * 3 = 4.5, 5 > 4.5
        assert_eq!(
            select_strategy(&[4], &[3]),
            StrategyKind::RequestOptimization
        );
        assert_eq!(select_strategy(&[5], &[3]), StrategyKind::Preemption);
    }

    #[test]
    fn test_every_strategy_has_three_steps_naming_the_process() {
        for kind in [
            StrategyKind::Preemption,
            StrategyKind::Termination,
            StrategyKind::RequestOptimization,
        ] {
            let strategy = strategy(kind, 7);
            assert_eq!(strategy.process_id, 7);
            assert_eq!(strategy.kind, kind);
            assert_eq!(strategy.steps.len(), 3);
            assert!(strategy.steps[0].contains("P7"));
        }
    }

    #[test]
    fn test_advise_reads_snapshot_rows() {
        let snapshot =
            SystemSnapshot::new(vec![vec![0], vec![0]], vec![vec![1], vec![9]], vec![2]).unwrap();
        assert_eq!(
            advise(0, &snapshot).kind,
            StrategyKind::RequestOptimization
        );
        assert_eq!(advise(1, &snapshot).kind, StrategyKind::Preemption);
    }
}
