//! Guided exploration: a persistent node registry with memoized
//! exploration completeness.
//!
//! Instead of independent episodes, the guided driver accumulates a graph
//! of every vertex it has visited. Each node remembers the best path tail
//! seen per arrival direction, and a monotonic "fully explored from"
//! cache prunes subtrees whose whole reachable region is saturated.
//!
//! Nodes live in a flat arena (`Vec` + label index); neighbor relations
//! are label sets resolved through the index, never owning references —
//! the underlying adjacency graph has cycles, so completeness is computed
//! as an explicit iterative fixed point over `(node, from)` pairs rather
//! than by naive recursion.

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;
use snakes_cube::path::Path;
use snakes_cube::vertex::{Label, Vertex};

use crate::contract::{EpisodeUpdate, ProgressSink};
use crate::error::SearchError;
use crate::policy::GuidedPolicy;
use crate::report::{SearchReport, TerminationReason};
use crate::walker;

/// Floor chance in the weighted next-node draw.
const PICK_FLOOR: f64 = 0.2;

/// Span scaled by a node's best length in the weighted next-node draw.
const PICK_SPAN: f64 = 0.8;

/// Long-lived per-vertex record.
#[derive(Debug, Clone)]
pub struct GuidedNode {
    vertex: Vertex,
    /// Materialized two-way links; only vertices both registered.
    links: BTreeSet<Label>,
    /// Best (longest) recorded tail, keyed by incoming-neighbor label.
    best_tails: BTreeMap<Label, Path>,
    /// Longest arrival recorded at this node, in vertices.
    best_len: usize,
    /// Monotonic cache: incoming labels proven fully explored. Entries are
    /// only ever added.
    explored_from: BTreeSet<Label>,
    /// Marks the graph's very first recorded arrival; eligible to originate
    /// fresh walks before any statistics exist.
    initial: bool,
}

impl GuidedNode {
    fn new(vertex: Vertex) -> Self {
        Self {
            vertex,
            links: BTreeSet::new(),
            best_tails: BTreeMap::new(),
            best_len: 0,
            explored_from: BTreeSet::new(),
            initial: false,
        }
    }

    /// The vertex this record describes.
    #[must_use]
    pub const fn vertex(&self) -> Vertex {
        self.vertex
    }

    /// Longest arrival recorded here, in vertices.
    #[must_use]
    pub const fn best_len(&self) -> usize {
        self.best_len
    }

    /// True for the graph's very first recorded arrival.
    #[must_use]
    pub const fn is_initial(&self) -> bool {
        self.initial
    }
}

/// Registry of [`GuidedNode`]s, growing lazily on first visit.
#[derive(Debug, Clone)]
pub struct GuidedGraph {
    dimension: usize,
    nodes: Vec<GuidedNode>,
    index: BTreeMap<Label, usize>,
    best_path: Option<Path>,
    best_len: usize,
}

impl GuidedGraph {
    /// An empty registry over the d-cube.
    #[must_use]
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            nodes: Vec::new(),
            index: BTreeMap::new(),
            best_path: None,
            best_len: 0,
        }
    }

    /// Number of registered nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True iff no node has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Longest path recorded anywhere in the registry, in vertices.
    #[must_use]
    pub const fn best_len(&self) -> usize {
        self.best_len
    }

    /// The longest recorded path, if any arrival has been recorded.
    #[must_use]
    pub const fn best_path(&self) -> Option<&Path> {
        self.best_path.as_ref()
    }

    /// The node registered for `label`, if any.
    #[must_use]
    pub fn node(&self, label: Label) -> Option<&GuidedNode> {
        self.index.get(&label).map(|&idx| &self.nodes[idx])
    }

    /// Register (or look up) the node for `vertex` and materialize two-way
    /// links with every already-registered graph neighbor.
    fn find_or_create(&mut self, vertex: Vertex) -> usize {
        if let Some(&idx) = self.index.get(&vertex.label()) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(GuidedNode::new(vertex));
        self.index.insert(vertex.label(), idx);
        for neighbor in vertex.neighbors() {
            if let Some(&other) = self.index.get(&neighbor.label()) {
                self.nodes[idx].links.insert(neighbor.label());
                self.nodes[other].links.insert(vertex.label());
            }
        }
        idx
    }

    /// Establish a two-way link between two registered vertices.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnregisteredNode`] if either vertex is not
    /// registered, or [`SearchError::InconsistentState`] if the two are not
    /// graph-adjacent.
    pub fn link(&mut self, a: Label, b: Label) -> Result<(), SearchError> {
        let ia = self.require(a)?;
        let ib = self.require(b)?;
        let va = self.nodes[ia].vertex;
        let vb = self.nodes[ib].vertex;
        if !va.is_adjacent(&vb) {
            return Err(SearchError::InconsistentState {
                detail: format!("cannot link non-adjacent vertices {va} and {vb}"),
            });
        }
        self.nodes[ia].links.insert(b);
        self.nodes[ib].links.insert(a);
        Ok(())
    }

    /// Record an arrival at the tail of `tail`.
    ///
    /// Materializes the node, links it with registered neighbors, and —
    /// keyed by the incoming-neighbor label — keeps the longer of the
    /// existing and new tail (replacement is strictly greater, so ties
    /// favor the earlier record). Updates the node's and the graph's best.
    pub fn record_arrival(&mut self, tail: &Path, is_initial: bool) {
        let idx = self.find_or_create(tail.tail());
        if is_initial {
            self.nodes[idx].initial = true;
        }

        let len = tail.len();
        if len >= 2 {
            let incoming = tail.vertices()[len - 2].label();
            let known = self.nodes[idx]
                .best_tails
                .get(&incoming)
                .map_or(0, Path::len);
            if len > known {
                self.nodes[idx].best_tails.insert(incoming, tail.clone());
            }
        }
        if len > self.nodes[idx].best_len {
            self.nodes[idx].best_len = len;
        }
        if len > self.best_len {
            self.best_len = len;
            self.best_path = Some(tail.clone());
        }
    }

    /// Dead-end bookkeeping: record an arrival for every prefix of the
    /// walked path, then refresh the memoized completeness tail-to-root.
    pub fn record_walk(&mut self, path: &Path) {
        let verts = path.vertices().to_vec();
        let mut prefix = Path::root(verts[0]);
        self.record_arrival(&prefix, false);
        for &next in &verts[1..] {
            prefix.extend(next);
            self.record_arrival(&prefix, false);
        }
        for pair in verts.windows(2).rev() {
            let _ = self.fully_explored_idx(self.index[&pair[1].label()], pair[0].label());
        }
    }

    /// True iff the node is fully explored when arriving from `from`.
    ///
    /// The result is cached permanently once true; the cache is monotonic
    /// and never recomputed.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnregisteredNode`] if `label` is not
    /// registered.
    pub fn is_fully_explored(&mut self, label: Label, from: Label) -> Result<bool, SearchError> {
        let idx = self.require(label)?;
        Ok(self.fully_explored_idx(idx, from))
    }

    /// True iff the node is fully explored from every one of its d
    /// graph-adjacent labels — not merely its materialized links.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnregisteredNode`] if `label` is not
    /// registered.
    pub fn is_fully_explored_on_all(&mut self, label: Label) -> Result<bool, SearchError> {
        let idx = self.require(label)?;
        Ok(self.fully_explored_on_all_idx(idx))
    }

    /// Pick the next node to resume exploration from.
    ///
    /// Candidates are the registered, not-fully-explored nodes, ranked by
    /// descending best length (ties: lowest label). In weighted mode the
    /// pick is a weighted draw with weight `0.2 + 0.8 × len / global_best`,
    /// falling back to a uniform draw while the global best is still 0.
    /// Returns `None` once every node is fully explored — the run's
    /// termination signal.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::EmptyRegistry`] if no node is registered.
    pub fn pick_next_explorable<R: Rng>(
        &mut self,
        weighted: bool,
        rng: &mut R,
    ) -> Result<Option<Label>, SearchError> {
        if self.nodes.is_empty() {
            return Err(SearchError::EmptyRegistry);
        }

        let labels: Vec<Label> = self.index.keys().copied().collect();
        let mut candidates: Vec<(Label, usize)> = Vec::new();
        for label in labels {
            let idx = self.index[&label];
            if !self.fully_explored_on_all_idx(idx) {
                candidates.push((label, self.nodes[idx].best_len));
            }
        }
        if candidates.is_empty() {
            return Ok(None);
        }

        if weighted {
            return Ok(Some(self.pick_weighted(&candidates, rng)));
        }

        // Ascending-label scan with strictly-greater replacement: the
        // top-ranked node, lowest label on ties.
        let mut best = candidates[0];
        for &(label, len) in &candidates[1..] {
            if len > best.1 {
                best = (label, len);
            }
        }
        Ok(Some(best.0))
    }

    fn pick_weighted<R: Rng>(&self, candidates: &[(Label, usize)], rng: &mut R) -> Label {
        if self.best_len == 0 {
            return candidates[rng.gen_range(0..candidates.len())].0;
        }
        #[allow(clippy::cast_precision_loss)]
        let global_best = self.best_len as f64;
        #[allow(clippy::cast_precision_loss)]
        let weights: Vec<f64> = candidates
            .iter()
            .map(|&(_, len)| PICK_FLOOR + PICK_SPAN * (len as f64 / global_best))
            .collect();
        let total: f64 = weights.iter().sum();
        let mut remainder = rng.gen_range(0.0..total);
        for (&(label, _), &weight) in candidates.iter().zip(&weights) {
            remainder -= weight;
            if remainder <= 0.0 {
                return label;
            }
        }
        candidates[candidates.len() - 1].0
    }

    /// The node's best recorded tail across all arrival directions.
    ///
    /// With nothing recorded, an `initial` node synthesizes a fresh
    /// length-1 root path as the bootstrap seed for the next rollout.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnregisteredNode`] for an unregistered label
    /// and [`SearchError::InconsistentState`] when no tail is recorded and
    /// the node is not `initial`.
    pub fn best_tail(&self, label: Label) -> Result<Path, SearchError> {
        let idx = self.require(label)?;
        let node = &self.nodes[idx];
        let mut best: Option<&Path> = None;
        for tail in node.best_tails.values() {
            if best.is_none_or(|b| tail.len() > b.len()) {
                best = Some(tail);
            }
        }
        if let Some(path) = best {
            return Ok(path.clone());
        }
        self.bootstrap_tail(idx)
    }

    /// The node's best recorded tail among arrival directions from which
    /// it is not yet fully explored.
    ///
    /// # Errors
    ///
    /// Same contract as [`GuidedGraph::best_tail`].
    pub fn best_unexplored_tail(&mut self, label: Label) -> Result<Path, SearchError> {
        let idx = self.require(label)?;
        let incomings: Vec<Label> = self.nodes[idx].best_tails.keys().copied().collect();
        let mut best: Option<Path> = None;
        for incoming in incomings {
            if self.fully_explored_idx(idx, incoming) {
                continue;
            }
            let tail = &self.nodes[idx].best_tails[&incoming];
            if best.as_ref().is_none_or(|b| tail.len() > b.len()) {
                best = Some(tail.clone());
            }
        }
        if let Some(path) = best {
            return Ok(path);
        }
        self.bootstrap_tail(idx)
    }

    fn bootstrap_tail(&self, idx: usize) -> Result<Path, SearchError> {
        let node = &self.nodes[idx];
        if node.initial {
            return Ok(Path::root(node.vertex));
        }
        Err(SearchError::InconsistentState {
            detail: format!(
                "no best tail recorded for non-initial vertex {}",
                node.vertex
            ),
        })
    }

    fn require(&self, label: Label) -> Result<usize, SearchError> {
        self.index
            .get(&label)
            .copied()
            .ok_or_else(|| SearchError::UnregisteredNode {
                label: label_text(self.dimension, label),
            })
    }

    fn fully_explored_on_all_idx(&mut self, idx: usize) -> bool {
        let vertex = self.nodes[idx].vertex;
        vertex
            .neighbors()
            .iter()
            .all(|n| self.fully_explored_idx(idx, n.label()))
    }

    /// Iterative fixed point over `(node, from)` pairs.
    ///
    /// A pair is fully explored iff every other graph neighbor is
    /// materialized as a link and itself fully explored from this node's
    /// perspective. The adjacency graph has cycles, so the traversal
    /// collects the pairs it visits and claims completeness only when the
    /// whole reachable region is saturated — at which point every visited
    /// pair is proven and cached. Any unmaterialized neighbor along the
    /// way refutes the claim for the entire region.
    fn fully_explored_idx(&mut self, start: usize, from: Label) -> bool {
        if self.nodes[start].explored_from.contains(&from) {
            return true;
        }

        let mut visited: BTreeSet<(Label, Label)> = BTreeSet::new();
        let mut stack = vec![(self.nodes[start].vertex.label(), from)];
        while let Some((label, incoming)) = stack.pop() {
            if !visited.insert((label, incoming)) {
                continue;
            }
            let Some(&idx) = self.index.get(&label) else {
                return false;
            };
            if self.nodes[idx].explored_from.contains(&incoming) {
                continue;
            }
            let vertex = self.nodes[idx].vertex;
            for neighbor in vertex.neighbors() {
                let next = neighbor.label();
                if next == incoming {
                    continue;
                }
                if !self.nodes[idx].links.contains(&next) {
                    return false;
                }
                stack.push((next, label));
            }
        }

        for (label, incoming) in visited {
            let idx = self.index[&label];
            self.nodes[idx].explored_from.insert(incoming);
        }
        true
    }
}

fn label_text(dimension: usize, label: Label) -> String {
    Vertex::new(dimension, label).map_or_else(|_| format!("{label:#b}"), |v| v.to_string())
}

/// Run the guided search from `origin`.
///
/// REGISTER the origin and SEED the initial arrival, then loop: PICK the
/// next explorable node, roll its best unexplored tail out to a dead end,
/// RECORD the walk and refresh completeness. Terminates when the episode
/// budget is spent or every registered node is fully explored.
///
/// # Errors
///
/// Returns [`SearchError::InvalidPolicy`] for a zero episode budget; other
/// variants only surface on internal contract breaches.
pub fn run_guided_search<R: Rng>(
    origin: Vertex,
    policy: &GuidedPolicy,
    sink: &mut dyn ProgressSink,
    rng: &mut R,
) -> Result<SearchReport, SearchError> {
    policy.validate()?;

    let mut graph = GuidedGraph::new(origin.dimension());
    graph.record_arrival(&Path::root(origin), true);

    let mut termination = TerminationReason::EpisodeBudgetExhausted;
    let mut episodes_run = 0_u64;
    for episode in 0..policy.episodes {
        let Some(label) = graph.pick_next_explorable(policy.weighted_pick, rng)? else {
            termination = TerminationReason::RegistryFullyExplored;
            break;
        };
        let mut path = graph.best_unexplored_tail(label)?;
        walker::roll_out(&mut path, rng);
        graph.record_walk(&path);
        episodes_run += 1;
        sink.on_episode(EpisodeUpdate {
            round: 0,
            episode,
            path_len: path.len() as u64,
            best_len: graph.best_len() as u64,
        });
    }

    let best = graph
        .best_path()
        .cloned()
        .unwrap_or_else(|| Path::root(origin));
    let report = SearchReport::from_path(&best, episodes_run, 1, termination);
    sink.on_complete(&report);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::contract::NullSink;

    fn v(text: &str) -> Vertex {
        Vertex::parse(text.len(), text).unwrap()
    }

    fn path_of(labels: &[&str]) -> Path {
        let mut path = Path::root(v(labels[0]));
        for label in &labels[1..] {
            path.extend(v(label));
        }
        path
    }

    #[test]
    fn pick_against_an_empty_registry_fails() {
        let mut graph = GuidedGraph::new(3);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            graph.pick_next_explorable(false, &mut rng),
            Err(SearchError::EmptyRegistry)
        ));
    }

    #[test]
    fn linking_requires_both_ends_registered() {
        let mut graph = GuidedGraph::new(3);
        graph.record_arrival(&Path::root(v("000")), true);
        let err = graph.link(v("000").label(), v("100").label()).unwrap_err();
        assert!(matches!(err, SearchError::UnregisteredNode { .. }));
    }

    #[test]
    fn linking_rejects_non_adjacent_vertices() {
        let mut graph = GuidedGraph::new(3);
        graph.record_arrival(&Path::root(v("000")), true);
        graph.record_arrival(&path_of(&["000", "100", "110"]), false);
        let err = graph.link(v("000").label(), v("110").label()).unwrap_err();
        assert!(matches!(err, SearchError::InconsistentState { .. }));
    }

    #[test]
    fn registration_materializes_two_way_links() {
        let mut graph = GuidedGraph::new(3);
        graph.record_arrival(&path_of(&["000", "100"]), false);
        let origin = graph.node(v("000").label()).unwrap();
        assert!(origin.links.contains(&v("100").label()));
        let other = graph.node(v("100").label()).unwrap();
        assert!(other.links.contains(&v("000").label()));
    }

    #[test]
    fn arrivals_keep_the_longer_tail_per_incoming_direction() {
        let mut graph = GuidedGraph::new(3);
        let short = path_of(&["010", "110"]);
        let long = path_of(&["000", "100", "110"]);
        graph.record_arrival(&long, false);
        graph.record_arrival(&short, false);

        // Both arrive at 110: the long one from 100, the short from 010.
        let node = graph.node(v("110").label()).unwrap();
        assert_eq!(node.best_tails.len(), 2);
        assert_eq!(node.best_len(), 3);

        // A same-length rival from 100 does not displace the earlier record.
        let rival = path_of(&["101", "100", "110"]);
        graph.record_arrival(&rival, false);
        let node = graph.node(v("110").label()).unwrap();
        let kept = &node.best_tails[&v("100").label()];
        assert_eq!(kept.vertices()[0], v("000"), "tie favors the earlier record");

        // A strictly longer arrival from the same direction does displace it.
        let longer = path_of(&["001", "101", "100", "110"]);
        graph.record_arrival(&longer, false);
        let node = graph.node(v("110").label()).unwrap();
        assert_eq!(node.best_tails[&v("100").label()].len(), 4);
    }

    #[test]
    fn best_tail_bootstraps_only_on_the_initial_node() {
        let mut graph = GuidedGraph::new(3);
        graph.record_arrival(&Path::root(v("000")), true);
        graph.record_arrival(&path_of(&["000", "100"]), false);

        // 000 carries no recorded tail but is initial: length-1 seed.
        assert!(graph.node(v("000").label()).unwrap().is_initial());
        let seed = graph.best_tail(v("000").label()).unwrap();
        assert_eq!(seed.len(), 1);
        assert_eq!(seed.tail(), v("000"));

        // A walk into 100 recorded a tail; a non-initial node without one
        // is a contract breach.
        assert_eq!(graph.best_tail(v("100").label()).unwrap().len(), 2);
        let mut bare = GuidedGraph::new(3);
        bare.record_arrival(&Path::root(v("010")), false);
        assert!(matches!(
            bare.best_tail(v("010").label()),
            Err(SearchError::InconsistentState { .. })
        ));
    }

    #[test]
    fn unexplored_tail_skips_saturated_arrival_directions() {
        let mut graph = GuidedGraph::new(3);
        graph.record_arrival(&Path::root(v("000")), true);
        let walk = path_of(&["000", "100", "110"]);
        graph.record_walk(&walk);
        // Nothing is saturated yet in a sparse registry, so the best
        // unexplored tail matches the best tail.
        let tail = graph.best_unexplored_tail(v("110").label()).unwrap();
        assert_eq!(tail.len(), 3);
    }

    #[test]
    fn sparse_registry_is_never_fully_explored() {
        let mut graph = GuidedGraph::new(3);
        graph.record_walk(&path_of(&["000", "100", "110"]));
        assert!(!graph
            .is_fully_explored(v("110").label(), v("100").label())
            .unwrap());
        assert!(!graph.is_fully_explored_on_all(v("000").label()).unwrap());
    }

    #[test]
    fn saturated_cube_becomes_fully_explored_and_the_cache_is_monotonic() {
        // Register all 8 vertices of the 3-cube; every link materializes.
        let mut graph = GuidedGraph::new(3);
        for label in 0..8_u32 {
            let vertex = Vertex::new(3, label).unwrap();
            graph.record_arrival(&Path::root(vertex), label == 0);
        }
        assert_eq!(graph.len(), 8);

        let origin = v("000").label();
        let from = v("100").label();
        assert!(graph.is_fully_explored(origin, from).unwrap());
        assert!(graph.is_fully_explored_on_all(origin).unwrap());

        // Unrelated growth cannot revoke a cached completeness claim.
        graph.record_arrival(&path_of(&["001", "011", "111"]), false);
        assert!(graph.is_fully_explored(origin, from).unwrap());
    }

    #[test]
    fn pick_never_returns_a_fully_explored_node() {
        let mut graph = GuidedGraph::new(3);
        for label in 0..8_u32 {
            let vertex = Vertex::new(3, label).unwrap();
            graph.record_arrival(&Path::root(vertex), label == 0);
        }
        let mut rng = StdRng::seed_from_u64(3);
        // The whole cube is registered, so everything saturates.
        assert_eq!(graph.pick_next_explorable(false, &mut rng).unwrap(), None);
        assert_eq!(graph.pick_next_explorable(true, &mut rng).unwrap(), None);
    }

    #[test]
    fn pick_prefers_the_longest_partial_path() {
        let mut graph = GuidedGraph::new(4);
        graph.record_arrival(&Path::root(v("0000")), true);
        graph.record_walk(&path_of(&["0000", "1000", "1100"]));
        let mut rng = StdRng::seed_from_u64(0);
        let picked = graph.pick_next_explorable(false, &mut rng).unwrap();
        assert_eq!(picked, Some(v("1100").label()));
    }

    #[test]
    fn weighted_pick_with_zero_best_falls_back_to_uniform() {
        let mut graph = GuidedGraph::new(3);
        // Force a registry with nodes but best_len 0 via direct registration.
        graph.find_or_create(v("000"));
        graph.find_or_create(v("100"));
        let mut rng = StdRng::seed_from_u64(11);
        let picked = graph.pick_next_explorable(true, &mut rng).unwrap();
        assert!(picked.is_some());
    }

    #[test]
    fn guided_run_on_the_3_cube_finds_the_maximum_snake() {
        let origin = Vertex::origin(3).unwrap();
        let policy = GuidedPolicy {
            episodes: 2_000,
            weighted_pick: false,
        };
        let mut rng = StdRng::seed_from_u64(9);
        let report = run_guided_search(origin, &policy, &mut NullSink, &mut rng).unwrap();
        assert_eq!(report.best_len, 5, "3-cube maximum snake has 5 vertices");
    }

    #[test]
    fn guided_run_rejects_a_zero_budget() {
        let origin = Vertex::origin(3).unwrap();
        let policy = GuidedPolicy {
            episodes: 0,
            weighted_pick: false,
        };
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            run_guided_search(origin, &policy, &mut NullSink, &mut rng),
            Err(SearchError::InvalidPolicy { .. })
        ));
    }
}
