//! Edge statistics: learning-round aggregation and biased sampling.
//!
//! A learning round records every episode's edge list; at the end of the
//! round the recorded edges are folded into per-vertex neighbor-preference
//! weights that bias the *next* round's walker. Weight maps are lazily
//! floor-seeded across all true graph neighbors, so no neighbor is ever a
//! zero-probability choice.
//!
//! Uses `BTreeMap` keyed on raw labels so weight enumeration — and
//! therefore the subtraction draw — happens in a fixed order.

use std::collections::BTreeMap;

use rand::Rng;
use snakes_cube::vertex::{Label, Vertex};

use crate::error::SearchError;

/// Floor weight seeded under every true neighbor on a vertex's first write.
pub const FLOOR_WEIGHT: f64 = 0.06;

/// Accumulated neighbor-preference weights for one origin vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexWeights {
    vertex: Vertex,
    weights: BTreeMap<Label, f64>,
}

impl VertexWeights {
    fn new(vertex: Vertex) -> Self {
        Self {
            vertex,
            weights: BTreeMap::new(),
        }
    }

    /// Fold `weight` into the entry for `neighbor`.
    ///
    /// The first write floor-seeds every true graph neighbor; a key outside
    /// the seeded set initializes to zero before accumulating.
    pub fn add_weight(&mut self, neighbor: Label, weight: f64) {
        if self.weights.is_empty() {
            for n in self.vertex.neighbors() {
                self.weights.insert(n.label(), FLOOR_WEIGHT);
            }
        }
        *self.weights.entry(neighbor).or_insert(0.0) += weight;
    }

    /// Sum of all accumulated weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }

    /// Weights normalized to percentages, each clamped to at least the
    /// floor so every entry keeps a nonzero chance.
    #[must_use]
    pub fn percentages(&self) -> BTreeMap<Label, f64> {
        let total = self.total();
        self.weights
            .iter()
            .map(|(&label, &weight)| {
                let pct = (weight / total) * 100.0;
                (label, pct.max(FLOOR_WEIGHT))
            })
            .collect()
    }

    /// Weighted-random draw over the neighbor percentages.
    ///
    /// Picks a uniform integer in `[1, ⌊sum⌋]`, then subtracts entries in
    /// ascending-label order until the remainder is ≤ 0. A single-entry map
    /// short-circuits; floating-point residue falls through to the last
    /// entry.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InconsistentState`] if the weight map is
    /// empty.
    pub fn sample_biased<R: Rng>(&self, rng: &mut R) -> Result<Label, SearchError> {
        let Some((&first, _)) = self.weights.iter().next() else {
            return Err(SearchError::InconsistentState {
                detail: format!("weighted draw over empty map at vertex {}", self.vertex),
            });
        };
        if self.weights.len() == 1 {
            return Ok(first);
        }

        let percentages = self.percentages();
        let sum: f64 = percentages.values().sum();
        #[allow(clippy::cast_possible_truncation)]
        let bound = (sum.floor() as i64).max(1);
        #[allow(clippy::cast_precision_loss)]
        let mut remainder = rng.gen_range(1..=bound) as f64;

        let mut last = first;
        for (&label, &pct) in &percentages {
            remainder -= pct;
            last = label;
            if remainder <= 0.0 {
                return Ok(label);
            }
        }
        Ok(last)
    }
}

/// Immutable per-vertex weight table consumed by the next round's walker.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightTable {
    vertices: BTreeMap<Label, VertexWeights>,
}

impl WeightTable {
    /// A table with no statistics at all.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// True iff any vertex has recorded statistics.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// True iff `label` has recorded statistics.
    #[must_use]
    pub fn has_statistics_for(&self, label: Label) -> bool {
        self.vertices.contains_key(&label)
    }

    /// The weights recorded for `label`, if any.
    #[must_use]
    pub fn get(&self, label: Label) -> Option<&VertexWeights> {
        self.vertices.get(&label)
    }
}

/// Learning-round accumulator: episode edge lists plus the round maximum.
#[derive(Debug, Clone, Default)]
pub struct RoundStatistics {
    episodes: Vec<Vec<(Vertex, Vertex)>>,
    longest: usize,
}

impl RoundStatistics {
    /// A fresh accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all recorded episodes (the `forget` behavior between rounds).
    pub fn clear(&mut self) {
        self.episodes.clear();
        self.longest = 0;
    }

    /// Store one episode's edge list and update the round maximum.
    pub fn record_episode(&mut self, edges: Vec<(Vertex, Vertex)>) {
        if edges.len() > self.longest {
            self.longest = edges.len();
        }
        self.episodes.push(edges);
    }

    /// Longest recorded episode, in edges.
    #[must_use]
    pub const fn longest(&self) -> usize {
        self.longest
    }

    /// Number of recorded episodes.
    #[must_use]
    pub fn episode_count(&self) -> usize {
        self.episodes.len()
    }

    /// Fold the recorded episodes into a weight table.
    ///
    /// `penalty` is clamped to ≤ 0. Each edge `(u → v)` of an episode
    /// contributes `episode_len / round_max + penalty` into `u`'s neighbor
    /// map. An empty round produces an empty table.
    #[must_use]
    pub fn compute_weights(&self, penalty: f64) -> WeightTable {
        let penalty = penalty.min(0.0);
        if self.longest == 0 {
            return WeightTable::empty();
        }

        let mut vertices: BTreeMap<Label, VertexWeights> = BTreeMap::new();
        #[allow(clippy::cast_precision_loss)]
        let longest = self.longest as f64;
        for edges in &self.episodes {
            #[allow(clippy::cast_precision_loss)]
            let value = (edges.len() as f64 / longest) + penalty;
            for &(u, v) in edges {
                vertices
                    .entry(u.label())
                    .or_insert_with(|| VertexWeights::new(u))
                    .add_weight(v.label(), value);
            }
        }
        WeightTable { vertices }
    }
}
