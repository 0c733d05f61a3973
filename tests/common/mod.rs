use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use safestate::{SystemSnapshot, Units};

/// Build a well-shaped snapshot, panicking on shape mistakes in the test itself
#[allow(dead_code)]
pub fn snapshot(
    allocated: Vec<Vec<Units>>,
    requested: Vec<Vec<Units>>,
    available: Vec<Units>,
) -> SystemSnapshot {
    SystemSnapshot::new(allocated, requested, available).expect("test snapshot is ragged")
}

/// Deterministic generator so failures can be replayed
#[allow(dead_code)]
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Random snapshot with up to `max_processes` x `max_resources` cells
#[allow(dead_code)]
pub fn random_snapshot(
    rng: &mut StdRng,
    max_processes: usize,
    max_resources: usize,
) -> SystemSnapshot {
    let processes = rng.random_range(0..=max_processes);
    let resources = rng.random_range(0..=max_resources);

    let matrix = |rng: &mut StdRng, hi: Units| -> Vec<Vec<Units>> {
        (0..processes)
            .map(|_| (0..resources).map(|_| rng.random_range(0..=hi)).collect())
            .collect()
    };

    let allocated = matrix(rng, 3);
    let requested = matrix(rng, 4);
    let available = (0..resources).map(|_| rng.random_range(0..=2)).collect();

    snapshot(allocated, requested, available)
}
