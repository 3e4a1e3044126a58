//! Episode-loop driver: learning rounds over independent episodes.
//!
//! Runs `learning_rounds × episodes` walks from the fixed origin, feeding
//! each episode's edge list into the active round's statistics. Between
//! rounds the statistics fold into a weight table that biases the next
//! round's walker; an unproductive round (one that fails to beat the best
//! path found so far) can carry a penalty into that fold. In exhaustive
//! mode a single episode is definitionally complete, so exactly one runs
//! and learning is skipped.

use rand::Rng;
use snakes_cube::path::Path;
use snakes_cube::vertex::Vertex;

use crate::contract::{EpisodeUpdate, ProgressSink};
use crate::error::SearchError;
use crate::policy::SearchPolicy;
use crate::report::{SearchReport, TerminationReason};
use crate::stats::{RoundStatistics, WeightTable};
use crate::walker::RandomWalker;

/// Run the episode-loop search from `origin`.
///
/// # Errors
///
/// Returns [`SearchError::InvalidPolicy`] for zero budgets; other variants
/// only surface on internal contract breaches.
pub fn run_search<R: Rng>(
    origin: Vertex,
    policy: &SearchPolicy,
    sink: &mut dyn ProgressSink,
    rng: &mut R,
) -> Result<SearchReport, SearchError> {
    policy.validate()?;
    let walker = RandomWalker::new(origin, policy.randomized, policy.max_depth);

    if !policy.randomized {
        let path = walker.run_episode(&WeightTable::empty(), rng)?;
        sink.on_episode(EpisodeUpdate {
            round: 0,
            episode: 0,
            path_len: path.len() as u64,
            best_len: path.len() as u64,
        });
        let report =
            SearchReport::from_path(&path, 1, 1, TerminationReason::EpisodeBudgetExhausted);
        sink.on_complete(&report);
        return Ok(report);
    }

    let mut stats = RoundStatistics::new();
    let mut weights = WeightTable::empty();
    let mut best: Option<Path> = None;
    let mut episodes_run = 0_u64;

    for round in 0..policy.learning_rounds {
        if policy.forget {
            stats.clear();
        }
        let best_at_round_start = best.as_ref().map_or(0, Path::len);

        for episode in 0..policy.episodes {
            let path = walker.run_episode(&weights, rng)?;
            stats.record_episode(path.edges());
            if best.as_ref().is_none_or(|b| path.len() > b.len()) {
                best = Some(path.clone());
            }
            episodes_run += 1;
            sink.on_episode(EpisodeUpdate {
                round,
                episode,
                path_len: path.len() as u64,
                best_len: best.as_ref().map_or(0, Path::len) as u64,
            });
        }

        if round + 1 < policy.learning_rounds {
            let best_now = best.as_ref().map_or(0, Path::len);
            let penalty = if policy.penalize && best_now <= best_at_round_start {
                policy.penalty
            } else {
                0.0
            };
            weights = stats.compute_weights(penalty);
        }
    }

    let best = best.unwrap_or_else(|| Path::root(origin));
    let report = SearchReport::from_path(
        &best,
        episodes_run,
        policy.learning_rounds,
        TerminationReason::EpisodeBudgetExhausted,
    );
    sink.on_complete(&report);
    Ok(report)
}
