//! Shared helpers for the snakes benchmark suites.

use rand::rngs::StdRng;
use rand::SeedableRng;

use snakes_cube::path::Path;
use snakes_cube::vertex::Vertex;
use snakes_search::stats::{RoundStatistics, WeightTable};
use snakes_search::walker::{roll_out, RandomWalker};

/// The origin of the d-cube.
///
/// # Panics
///
/// Panics for an unsupported dimension. Benchmark setup failures are fatal.
#[must_use]
pub fn origin(dimension: usize) -> Vertex {
    Vertex::origin(dimension).expect("benchmark dimension in supported range")
}

/// A deterministic generator for benchmark runs.
#[must_use]
pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// A weight table populated from a batch of random rollouts, so biased
/// sampling benchmarks exercise realistically shaped statistics.
#[must_use]
pub fn sample_weight_table(dimension: usize, episodes: usize, seed: u64) -> WeightTable {
    let mut stats = RoundStatistics::new();
    let mut rng = rng(seed);
    for _ in 0..episodes {
        let mut path = Path::root(origin(dimension));
        roll_out(&mut path, &mut rng);
        stats.record_episode(path.edges());
    }
    stats.compute_weights(0.0)
}

/// A randomized walker rooted at the d-cube origin.
#[must_use]
pub fn randomized_walker(dimension: usize) -> RandomWalker {
    RandomWalker::new(origin(dimension), true, None)
}
