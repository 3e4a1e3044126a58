//! Typed search errors.
//!
//! Every variant is a fail-fast programming-contract violation: a correctly
//! driven engine never triggers them in normal operation, and none are
//! retried. A poor episode is not an error — it simply yields a shorter
//! path.

/// Typed failure for the search engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// A run policy carries an unusable value (pre-flight only).
    InvalidPolicy { detail: String },
    /// A next-node request was made against an empty registry.
    EmptyRegistry,
    /// A neighbor link was requested for a vertex that is not registered.
    UnregisteredNode { label: String },
    /// Internal contract breach: a best-tail request with no recorded data
    /// on a non-initial node, a weighted draw over an empty map, or a link
    /// between non-adjacent vertices.
    InconsistentState { detail: String },
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPolicy { detail } => write!(f, "invalid policy: {detail}"),
            Self::EmptyRegistry => write!(f, "no nodes registered in the guided graph"),
            Self::UnregisteredNode { label } => {
                write!(f, "vertex {label} is not registered in the guided graph")
            }
            Self::InconsistentState { detail } => write!(f, "inconsistent state: {detail}"),
        }
    }
}

impl std::error::Error for SearchError {}
