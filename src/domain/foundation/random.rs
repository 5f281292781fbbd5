//! Seedable random source shared by the simulation.
//!
//! Production rooms draw from OS entropy; tests and reproducible demo runs
//! pass a fixed seed so generated cases and symptom picks repeat exactly.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Random source used for every simulated choice.
pub type SimulationRng = StdRng;

/// Builds the simulation random source, seeded when `seed` is given.
pub fn simulation_rng(seed: Option<u64>) -> SimulationRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
