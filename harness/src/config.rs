//! Run configuration: the payload the engine consumes at run start.

use snakes_cube::error::CubeError;
use snakes_cube::vertex::Vertex;
use snakes_search::error::SearchError;
use snakes_search::policy::{GuidedPolicy, SearchPolicy, DEFAULT_ROUND_PENALTY};

/// Which driver a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Independent episodes with optional learning rounds.
    Plain,
    /// Persistent guided exploration.
    Guided,
}

/// Error during a harness run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunError {
    /// Cube construction failed (dimension or label contract).
    Cube(CubeError),
    /// Engine-level failure.
    Search(SearchError),
    /// The report file could not be written.
    ReportWriteFailed { detail: String },
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cube(e) => write!(f, "{e}"),
            Self::Search(e) => write!(f, "{e}"),
            Self::ReportWriteFailed { detail } => {
                write!(f, "failed to write report: {detail}")
            }
        }
    }
}

impl std::error::Error for RunError {}

impl From<CubeError> for RunError {
    fn from(e: CubeError) -> Self {
        Self::Cube(e)
    }
}

impl From<SearchError> for RunError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

/// Configuration consumed at run start.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Cube dimension (minimum 3).
    pub dimension: usize,
    /// Driver selection.
    pub mode: RunMode,
    /// Episodes per learning round (plain) or total rollouts (guided).
    pub episodes: u64,
    /// Learning rounds (plain mode only).
    pub learning_rounds: u64,
    /// Randomized walk instead of the exhaustive recursion (plain mode).
    pub randomized: bool,
    /// Penalize unproductive learning rounds (plain mode).
    pub penalize: bool,
    /// Reset statistics between rounds; false accumulates across the run.
    pub forget: bool,
    /// Penalty magnitude for unproductive rounds.
    pub penalty: f64,
    /// Depth cap for the exhaustive recursion.
    pub max_depth: Option<u32>,
    /// Weighted next-node draw (guided mode).
    pub weighted_pick: bool,
    /// Seed for the run's random source; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl RunConfig {
    /// A plain-search configuration with the stock defaults.
    #[must_use]
    pub fn plain(dimension: usize) -> Self {
        Self {
            dimension,
            mode: RunMode::Plain,
            episodes: 1,
            learning_rounds: 1,
            randomized: false,
            penalize: false,
            forget: true,
            penalty: DEFAULT_ROUND_PENALTY,
            max_depth: None,
            weighted_pick: false,
            seed: None,
        }
    }

    /// A guided-search configuration with the stock defaults.
    #[must_use]
    pub fn guided(dimension: usize) -> Self {
        Self {
            episodes: GuidedPolicy::default().episodes,
            mode: RunMode::Guided,
            ..Self::plain(dimension)
        }
    }

    /// Validate the configuration and build the run's origin vertex.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Cube`] for a dimension outside the supported
    /// range and [`RunError::Search`] for zero budgets.
    pub fn origin(&self) -> Result<Vertex, RunError> {
        let origin = Vertex::origin(self.dimension)?;
        match self.mode {
            RunMode::Plain => self.search_policy().validate()?,
            RunMode::Guided => self.guided_policy().validate()?,
        }
        Ok(origin)
    }

    /// The plain-mode engine policy this configuration maps to.
    #[must_use]
    pub fn search_policy(&self) -> SearchPolicy {
        SearchPolicy {
            episodes: self.episodes,
            learning_rounds: self.learning_rounds,
            randomized: self.randomized,
            penalize: self.penalize,
            forget: self.forget,
            penalty: self.penalty,
            max_depth: self.max_depth,
        }
    }

    /// The guided-mode engine policy this configuration maps to.
    #[must_use]
    pub fn guided_policy(&self) -> GuidedPolicy {
        GuidedPolicy {
            episodes: self.episodes,
            weighted_pick: self.weighted_pick,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_constraint_is_enforced_up_front() {
        let config = RunConfig::plain(2);
        assert!(matches!(
            config.origin(),
            Err(RunError::Cube(CubeError::InvalidDimension { dimension: 2 }))
        ));
        assert!(RunConfig::plain(3).origin().is_ok());
    }

    #[test]
    fn zero_episode_budget_is_rejected() {
        let config = RunConfig {
            episodes: 0,
            ..RunConfig::guided(3)
        };
        assert!(matches!(
            config.origin(),
            Err(RunError::Search(SearchError::InvalidPolicy { .. }))
        ));
    }

    #[test]
    fn config_maps_onto_the_engine_policies() {
        let config = RunConfig {
            episodes: 500,
            learning_rounds: 8,
            randomized: true,
            penalize: true,
            forget: false,
            ..RunConfig::plain(5)
        };
        let policy = config.search_policy();
        assert_eq!(policy.episodes, 500);
        assert_eq!(policy.learning_rounds, 8);
        assert!(policy.randomized);
        assert!(policy.penalize);
        assert!(!policy.forget);

        let config = RunConfig {
            weighted_pick: true,
            ..RunConfig::guided(4)
        };
        let policy = config.guided_policy();
        assert_eq!(policy.episodes, 10_000);
        assert!(policy.weighted_pick);
    }
}
