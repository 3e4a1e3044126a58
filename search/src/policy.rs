//! Run policies: budgets and mode flags for the two drivers.

use crate::error::SearchError;

/// Default penalty folded into the next round's weights when a penalized
/// round fails to improve on the best path seen so far.
pub const DEFAULT_ROUND_PENALTY: f64 = -0.25;

/// Budget and mode configuration for the episode driver.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPolicy {
    /// Episodes per learning round.
    pub episodes: u64,
    /// Number of learning rounds (weights recomputed between rounds).
    pub learning_rounds: u64,
    /// Randomized walk instead of the exhaustive recursion.
    pub randomized: bool,
    /// Penalize a round that fails to beat the best path found so far.
    pub penalize: bool,
    /// Reset round statistics between rounds; when false, statistics
    /// accumulate across the whole run.
    pub forget: bool,
    /// Penalty term for unproductive rounds; clamped to <= 0 at use.
    pub penalty: f64,
    /// Depth cap for the exhaustive recursion. `None` leaves it unbounded;
    /// beyond roughly dimension 10 a cap is strongly advised.
    pub max_depth: Option<u32>,
}

impl SearchPolicy {
    /// Validate budgets before a run starts.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] for a zero episode or round
    /// budget.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.episodes == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "episode budget must be at least 1".into(),
            });
        }
        if self.learning_rounds == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "learning round budget must be at least 1".into(),
            });
        }
        Ok(())
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            episodes: 1,
            learning_rounds: 1,
            randomized: false,
            penalize: false,
            forget: true,
            penalty: DEFAULT_ROUND_PENALTY,
            max_depth: None,
        }
    }
}

/// Budget and mode configuration for the guided driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuidedPolicy {
    /// Total rollout episodes before the run terminates.
    pub episodes: u64,
    /// Pick the next node to explore by weighted draw instead of taking the
    /// top-ranked one.
    pub weighted_pick: bool,
}

impl GuidedPolicy {
    /// Validate budgets before a run starts.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] for a zero episode budget.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.episodes == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "episode budget must be at least 1".into(),
            });
        }
        Ok(())
    }
}

impl Default for GuidedPolicy {
    fn default() -> Self {
        Self {
            episodes: 10_000,
            weighted_pick: false,
        }
    }
}
