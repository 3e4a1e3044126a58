//! The final best-path artifact.
//!
//! A run produces exactly one report: the longest path observed, the
//! budgets actually spent, and why the driver stopped. The JSON rendering
//! is the observational surface consumed by the harness — nothing here
//! feeds back into the search.

use serde_json::{json, Value};
use snakes_cube::path::Path;

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// The configured episode budget was spent.
    EpisodeBudgetExhausted,
    /// Every registered node was fully explored (guided runs only).
    RegistryFullyExplored,
}

impl TerminationReason {
    /// Stable identifier used in the rendered report.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EpisodeBudgetExhausted => "episode_budget_exhausted",
            Self::RegistryFullyExplored => "registry_fully_explored",
        }
    }
}

/// The final best-path report of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    /// Cube dimension searched.
    pub dimension: usize,
    /// Best path length, in vertices.
    pub best_len: u64,
    /// Best path labels, root first, in textual form.
    pub best_labels: Vec<String>,
    /// Best path as an ordered `(from, to)` edge list, textual form.
    pub best_edges: Vec<(String, String)>,
    /// Episodes actually run.
    pub episodes_run: u64,
    /// Learning rounds actually run (1 for guided and exhaustive runs).
    pub rounds_run: u64,
    /// Why the driver stopped.
    pub termination: TerminationReason,
}

impl SearchReport {
    /// Build a report from the best path of a run.
    #[must_use]
    pub fn from_path(
        best: &Path,
        episodes_run: u64,
        rounds_run: u64,
        termination: TerminationReason,
    ) -> Self {
        let best_labels: Vec<String> = best.vertices().iter().map(ToString::to_string).collect();
        let best_edges: Vec<(String, String)> = best
            .edges()
            .iter()
            .map(|(u, v)| (u.to_string(), v.to_string()))
            .collect();
        Self {
            dimension: best.tail().dimension(),
            best_len: best.len() as u64,
            best_labels,
            best_edges,
            episodes_run,
            rounds_run,
            termination,
        }
    }

    /// Best path length, in edges.
    #[must_use]
    pub fn edge_count(&self) -> u64 {
        self.best_edges.len() as u64
    }
}

/// Render the report as a JSON artifact.
#[must_use]
pub fn render_report(report: &SearchReport) -> Value {
    let edges: Vec<Value> = report
        .best_edges
        .iter()
        .map(|(u, v)| json!([u, v]))
        .collect();
    json!({
        "dimension": report.dimension,
        "best_path": {
            "vertices": report.best_labels,
            "edges": edges,
            "vertex_count": report.best_len,
            "edge_count": report.edge_count(),
        },
        "episodes_run": report.episodes_run,
        "rounds_run": report.rounds_run,
        "termination_reason": report.termination.as_str(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use snakes_cube::vertex::Vertex;

    fn reference_path() -> Path {
        let mut path = Path::root(Vertex::parse(3, "000").unwrap());
        for step in ["100", "110", "111", "011"] {
            path.extend(Vertex::parse(3, step).unwrap());
        }
        path
    }

    #[test]
    fn report_captures_the_path_in_both_forms() {
        let report = SearchReport::from_path(
            &reference_path(),
            12,
            3,
            TerminationReason::EpisodeBudgetExhausted,
        );
        assert_eq!(report.dimension, 3);
        assert_eq!(report.best_len, 5);
        assert_eq!(report.edge_count(), 4);
        assert_eq!(report.best_labels[0], "000");
        assert_eq!(
            report.best_edges[0],
            ("000".to_string(), "100".to_string())
        );
    }

    #[test]
    fn rendered_report_exposes_the_termination_reason() {
        let report = SearchReport::from_path(
            &reference_path(),
            1,
            1,
            TerminationReason::RegistryFullyExplored,
        );
        let value = render_report(&report);
        assert_eq!(
            value["termination_reason"],
            "registry_fully_explored"
        );
        assert_eq!(value["best_path"]["vertex_count"], 5);
        assert_eq!(value["best_path"]["vertices"][4], "011");
    }
}
