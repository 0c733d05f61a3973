mod common;

use common::{random_snapshot, seeded};
use rand::Rng;
use safestate::{StrategyKind, SystemSnapshot, detect};

const ROUNDS: u64 = 500;

fn fits(request: &[u64], work: &[u64]) -> bool {
    request.iter().zip(work).all(|(need, have)| need <= have)
}

#[test]
fn test_zero_requests_never_deadlock() {
    let mut rng = seeded(1);
    for _ in 0..ROUNDS {
        let processes = rng.random_range(1..=8);
        let resources = rng.random_range(1..=5);
        let allocated = (0..processes)
            .map(|_| (0..resources).map(|_| rng.random_range(0..=5)).collect())
            .collect();
        let available = (0..resources).map(|_| rng.random_range(0..=5)).collect();
        let snapshot = SystemSnapshot::new(
            allocated,
            vec![vec![0; resources]; processes],
            available,
        )
        .unwrap();

        let result = detect(&snapshot);
        assert!(!result.is_deadlock);
        assert_eq!(result.finish_order(), (0..processes).collect::<Vec<_>>());
        assert_eq!(result.passes, 1);
    }
}

#[test]
fn test_detect_is_idempotent() {
    let mut rng = seeded(2);
    for _ in 0..ROUNDS {
        let snapshot = random_snapshot(&mut rng, 8, 4);
        assert_eq!(detect(&snapshot), detect(&snapshot));
    }
}

#[test]
fn test_work_only_grows_by_released_allocations() {
    let mut rng = seeded(3);
    for _ in 0..ROUNDS {
        let snapshot = random_snapshot(&mut rng, 8, 4);
        let result = detect(&snapshot);

        let mut expected_before = snapshot.available().to_vec();
        for step in &result.steps {
            assert_eq!(step.before_available, expected_before);
            assert!(fits(&step.request, &step.before_available));
            for j in 0..snapshot.resources() {
                assert!(step.after_available[j] >= step.before_available[j]);
                assert_eq!(
                    step.after_available[j],
                    step.before_available[j] + step.allocated[j]
                );
            }
            expected_before = step.after_available.clone();
        }
    }
}

#[test]
fn test_every_process_is_accounted_for_once() {
    let mut rng = seeded(4);
    for _ in 0..ROUNDS {
        let snapshot = random_snapshot(&mut rng, 8, 4);
        let result = detect(&snapshot);

        if snapshot.resources() == 0 {
            assert!(result.steps.is_empty() && !result.is_deadlock);
            continue;
        }

        let mut seen: Vec<usize> = result.finish_order();
        seen.extend(&result.deadlocked_processes);
        seen.sort_unstable();
        assert_eq!(seen, (0..snapshot.processes()).collect::<Vec<_>>());

        assert!(result.deadlocked_processes.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(result.is_deadlock, !result.deadlocked_processes.is_empty());
    }
}

#[test]
fn test_deadlocked_processes_cannot_fit_final_work() {
    let mut rng = seeded(5);
    for _ in 0..ROUNDS {
        let snapshot = random_snapshot(&mut rng, 8, 4);
        let result = detect(&snapshot);

        let work = result
            .final_work()
            .cloned()
            .unwrap_or_else(|| snapshot.available().to_vec());
        for &process in &result.deadlocked_processes {
            assert!(!fits(snapshot.requested_of(process), &work));
        }
    }
}

#[test]
fn test_pass_count_is_bounded_by_process_count() {
    let mut rng = seeded(6);
    for _ in 0..ROUNDS {
        let snapshot = random_snapshot(&mut rng, 10, 3);
        let result = detect(&snapshot);
        assert!(result.passes <= snapshot.processes());
    }
}

#[test]
fn test_chain_needs_one_pass_per_process() {
    // Pn-1 is the only one that can start; each release unlocks its predecessor
    let n = 6;
    let allocated = (0..n).map(|_| vec![1]).collect();
    let requested = (0..n).map(|i| vec![(n - 1 - i) as u64]).collect();
    let snapshot = SystemSnapshot::new(allocated, requested, vec![0]).unwrap();

    let result = detect(&snapshot);
    assert!(!result.is_deadlock);
    assert_eq!(result.finish_order(), (0..n).rev().collect::<Vec<_>>());
    assert_eq!(result.passes, n);
}

#[test]
fn test_empty_availability_always_terminates() {
    let mut rng = seeded(7);
    for _ in 0..ROUNDS {
        let snapshot = random_snapshot(&mut rng, 6, 3);
        if snapshot.available().iter().any(|&v| v != 0) {
            continue;
        }
        let result = detect(&snapshot);
        for strategy in &result.resolution_strategies {
            assert_eq!(strategy.kind, StrategyKind::Termination);
        }
        assert_eq!(
            result
                .resolution_strategies
                .iter()
                .map(|s| s.process_id)
                .collect::<Vec<_>>(),
            result.deadlocked_processes
        );
    }
}
