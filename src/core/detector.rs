//! Deadlock detector
//!
//! Runs the work-conserving safety check over a [`SystemSnapshot`]:
//!
//! 1. `work` starts as a copy of `available`
//! 2. Each pass visits every unfinished process in ascending index order
//! 3. A process whose whole request fits in `work` finishes and releases its
//!    allocation back into `work`, which later processes in the same pass see
//! 4. Passes repeat until one finishes nobody
//!
//! Whoever is left unfinished is deadlocked. Each progress-making pass
//! finishes at least one process, so there are at most P of them.

use crate::core::advisor::advise;
use crate::core::snapshot::SystemSnapshot;
use crate::core::types::{DetectionResult, ProcessId, ResourceVector, Step, Units};

/// Detect deadlock in `snapshot`
///
/// Pure: the same snapshot always yields the same result. One resolution
/// strategy is attached per deadlocked process.
///
/// # Example
///
/// ```
/// use safestate::{SystemSnapshot, detect};
///
/// let snapshot = SystemSnapshot::new(
///     vec![vec![1], vec![1]],
///     vec![vec![2], vec![2]],
///     vec![0],
/// )
/// .unwrap();
///
/// let result = detect(&snapshot);
/// assert!(result.is_deadlock);
/// assert_eq!(result.deadlocked_processes, vec![0, 1]);
/// ```
pub fn detect(snapshot: &SystemSnapshot) -> DetectionResult {
    if snapshot.processes() == 0 || snapshot.resources() == 0 {
        return DetectionResult {
            is_deadlock: false,
            deadlocked_processes: Vec::new(),
            steps: Vec::new(),
            resolution_strategies: Vec::new(),
            passes: 0,
        };
    }

    let mut work: ResourceVector = snapshot.available().to_vec();
    let mut finish = vec![false; snapshot.processes()];
    let mut steps = Vec::with_capacity(snapshot.processes());
    let mut passes = 0;

    loop {
        let mut progress = false;

        for process in 0..snapshot.processes() {
            if finish[process] || !can_finish(snapshot.requested_of(process), &work) {
                continue;
            }

            finish[process] = true;
            progress = true;
            steps.push(release(snapshot, process, &mut work));
        }

        if !progress {
            break;
        }
        passes += 1;
    }

    let deadlocked_processes: Vec<ProcessId> = finish
        .iter()
        .enumerate()
        .filter(|&(_, &done)| !done)
        .map(|(process, _)| process)
        .collect();

    let resolution_strategies = deadlocked_processes
        .iter()
        .map(|&process| advise(process, snapshot))
        .collect();

    DetectionResult {
        is_deadlock: !deadlocked_processes.is_empty(),
        deadlocked_processes,
        steps,
        resolution_strategies,
        passes,
    }
}

/// A process can finish iff every component of its request fits in `work`
fn can_finish(request: &[Units], work: &[Units]) -> bool {
    request.iter().zip(work).all(|(need, have)| need <= have)
}

/// Release `process`'s allocation into `work` and record the step
fn release(snapshot: &SystemSnapshot, process: ProcessId, work: &mut ResourceVector) -> Step {
    let before_available = work.clone();

    for (have, held) in work.iter_mut().zip(snapshot.allocated_of(process)) {
        *have = have.saturating_add(*held);
    }

    Step {
        process,
        request: snapshot.requested_of(process).to_vec(),
        allocated: snapshot.allocated_of(process).to_vec(),
        before_available,
        after_available: work.clone(),
        description: format!("Process P{process} can proceed and release resources."),
    }
}
