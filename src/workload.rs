//! Process-set generation.
//!
//! Provides the default demonstration set and seeded random sets for
//! experiments and benchmarks. Random sets are reproducible: the same
//! `(count, seed)` always yields the same processes.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{ProcessId, ProcessSpec};

/// Arrival times are drawn from `[0, MAX_ARRIVAL)`.
pub const MAX_ARRIVAL: i64 = 10;
/// Burst times are drawn from `[1, MAX_BURST]`.
pub const MAX_BURST: i64 = 15;
/// Priorities are drawn from `[1, MAX_PRIORITY]`.
pub const MAX_PRIORITY: i32 = 5;

/// The three-process demonstration set.
///
/// | Process | Arrival | Burst | Priority |
/// |---------|---------|-------|----------|
/// | P1 | 0 | 5 | 3 |
/// | P2 | 2 | 3 | 1 |
/// | P3 | 4 | 8 | 2 |
pub fn sample_processes() -> Vec<ProcessSpec> {
    vec![
        ProcessSpec::new(1, 0, 5).with_priority(3),
        ProcessSpec::new(2, 2, 3).with_priority(1),
        ProcessSpec::new(3, 4, 8).with_priority(2),
    ]
}

/// Generates `count` random processes with ids `1..=count` and labels `P{id}`.
pub fn random_processes(count: usize, seed: u64) -> Vec<ProcessSpec> {
    let mut rng = StdRng::seed_from_u64(seed);
    random_processes_with(count, &mut rng)
}

/// Generates `count` random processes from a caller-supplied RNG.
pub fn random_processes_with<R: Rng>(count: usize, rng: &mut R) -> Vec<ProcessSpec> {
    (1..=count)
        .map(|i| {
            let id = ProcessId::try_from(i).unwrap_or(ProcessId::MAX);
            ProcessSpec::new(
                id,
                rng.random_range(0..MAX_ARRIVAL),
                rng.random_range(1..=MAX_BURST),
            )
            .with_priority(rng.random_range(1..=MAX_PRIORITY))
        })
        .collect()
}
