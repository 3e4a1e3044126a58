//! Single-episode exploration.
//!
//! One episode walks from the origin until a dead end, choosing each step
//! by the first applicable policy:
//!
//! 1. **Biased** — the weight table has statistics for the current vertex:
//!    weighted draw, retried up to `dimension` times when it lands on an
//!    occupied label.
//! 2. **Randomized** — uniform draw over the d neighbor slots, retried up
//!    to `dimension` times when it lands on an occupied label.
//! 3. **Exhaustive** — recurse into every legal candidate and keep the
//!    longest continuation. Exponential; bounded only by the optional
//!    depth cap.
//!
//! The randomized walk is iterative; only the exhaustive mode recurses
//! (depth is bounded by `2^dimension`, so prefer the cap beyond roughly
//! dimension 10).

use rand::Rng;
use snakes_cube::path::Path;
use snakes_cube::vertex::Vertex;

use crate::error::SearchError;
use crate::stats::{VertexWeights, WeightTable};

/// One-episode walker from a fixed origin.
#[derive(Debug, Clone, Copy)]
pub struct RandomWalker {
    origin: Vertex,
    randomized: bool,
    max_depth: Option<u32>,
}

impl RandomWalker {
    /// A walker rooted at `origin`.
    #[must_use]
    pub const fn new(origin: Vertex, randomized: bool, max_depth: Option<u32>) -> Self {
        Self {
            origin,
            randomized,
            max_depth,
        }
    }

    /// Run one exploration episode to a dead end.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InconsistentState`] only if the weight table
    /// hands out an empty map — a contract breach, never produced by
    /// [`crate::stats::RoundStatistics::compute_weights`].
    pub fn run_episode<R: Rng>(
        &self,
        weights: &WeightTable,
        rng: &mut R,
    ) -> Result<Path, SearchError> {
        let mut path = Path::root(self.origin);
        loop {
            let tail = path.tail();
            if let Some(vertex_weights) = weights.get(tail.label()) {
                match biased_step(&path, vertex_weights, rng)? {
                    Some(next) => {
                        path.extend(next);
                        continue;
                    }
                    None => break,
                }
            }
            if self.randomized {
                match uniform_step(&path, rng) {
                    Some(next) => {
                        path.extend(next);
                        continue;
                    }
                    None => break,
                }
            }
            return Ok(self.exhaustive(path));
        }
        Ok(path)
    }

    /// Full recursion: explore every legal candidate, keep the longest.
    fn exhaustive(&self, path: Path) -> Path {
        if let Some(cap) = self.max_depth {
            if path.len() >= cap as usize {
                return path;
            }
        }
        let tail = path.tail();
        let mut best = path.clone();
        for neighbor in tail.neighbors() {
            if path.blocks(neighbor.label()) {
                continue;
            }
            let mut child = path.clone();
            child.extend(neighbor);
            let outcome = self.exhaustive(child);
            if outcome.len() > best.len() {
                best = outcome;
            }
        }
        best
    }
}

/// Extend `path` to a dead end with uniform draws over the legal
/// candidates at each step (the guided rollout policy: no redraw waste).
pub fn roll_out<R: Rng>(path: &mut Path, rng: &mut R) {
    loop {
        let legal: Vec<Vertex> = path
            .tail()
            .neighbors()
            .into_iter()
            .filter(|n| !path.blocks(n.label()))
            .collect();
        if legal.is_empty() {
            return;
        }
        path.extend(legal[rng.gen_range(0..legal.len())]);
    }
}

/// Weighted draw with legality retry; the weight table knows nothing of
/// path state, so an occupied hit redraws, up to `dimension` draws.
fn biased_step<R: Rng>(
    path: &Path,
    weights: &VertexWeights,
    rng: &mut R,
) -> Result<Option<Vertex>, SearchError> {
    let tail = path.tail();
    if no_legal_candidate(path) {
        return Ok(None);
    }
    for _ in 0..tail.dimension() {
        let label = weights.sample_biased(rng)?;
        if !path.blocks(label) {
            let chosen = tail
                .neighbors()
                .into_iter()
                .find(|n| n.label() == label)
                .ok_or_else(|| SearchError::InconsistentState {
                    detail: format!("weight table names a non-neighbor of {tail}"),
                })?;
            return Ok(Some(chosen));
        }
    }
    Ok(None)
}

/// Uniform draw over the d neighbor slots with legality retry.
fn uniform_step<R: Rng>(path: &Path, rng: &mut R) -> Option<Vertex> {
    let tail = path.tail();
    if no_legal_candidate(path) {
        return None;
    }
    for _ in 0..tail.dimension() {
        let candidate = tail.flip(rng.gen_range(0..tail.dimension()));
        if !path.blocks(candidate.label()) {
            return Some(candidate);
        }
    }
    None
}

fn no_legal_candidate(path: &Path) -> bool {
    path.tail()
        .neighbors()
        .iter()
        .all(|n| path.blocks(n.label()))
}
