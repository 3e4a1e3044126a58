//! Induced-path ("snake") bookkeeping.
//!
//! A [`Path`] stores the full vertex sequence root..tail together with an
//! incrementally maintained **interior occupied set**: every on-path label,
//! plus — for every interior (non-tail) vertex — all of its neighbors except
//! the continuation direction. A candidate extension is legal iff its label
//! is absent from this set; that single membership test encodes the snake
//! rule (no vertex may be adjacent to a non-consecutive path vertex).
//!
//! Uses `BTreeSet` (not `HashSet`) so membership snapshots iterate in a
//! deterministic order at observation boundaries.

use std::collections::BTreeSet;

use crate::vertex::{Label, Vertex};

/// An induced path on the hypercube.
///
/// Grown by [`Path::extend`]; callers pre-filter candidates against
/// [`Path::blocks`] — `extend` never re-validates. Episodes either discard a
/// path or retain it as the current best, after which it is not mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    verts: Vec<Vertex>,
    occupied: BTreeSet<Label>,
}

impl Path {
    /// A length-1 path rooted at `vertex`.
    #[must_use]
    pub fn root(vertex: Vertex) -> Self {
        let mut occupied = BTreeSet::new();
        occupied.insert(vertex.label());
        Self {
            verts: vec![vertex],
            occupied,
        }
    }

    /// Append `vertex` as the new tail.
    ///
    /// The old tail becomes interior: its remaining neighbors (all but the
    /// continuation into `vertex`) are folded into the occupied set.
    pub fn extend(&mut self, vertex: Vertex) {
        let tail = self.tail();
        for neighbor in tail.neighbors() {
            if neighbor.label() != vertex.label() {
                self.occupied.insert(neighbor.label());
            }
        }
        self.occupied.insert(vertex.label());
        self.verts.push(vertex);
    }

    /// Vertex count, root..tail inclusive.
    #[must_use]
    pub fn len(&self) -> usize {
        self.verts.len()
    }

    /// Always false: a path has at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.verts.is_empty()
    }

    /// The current tail vertex.
    ///
    /// # Panics
    ///
    /// Never panics: a path always holds at least its root.
    #[must_use]
    pub fn tail(&self) -> Vertex {
        *self.verts.last().expect("path holds at least its root")
    }

    /// The full vertex sequence, root first.
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.verts
    }

    /// True iff extending into `label` would violate the snake rule.
    #[must_use]
    pub fn blocks(&self, label: Label) -> bool {
        self.occupied.contains(&label)
    }

    /// The interior occupied set (the tail contributes only its own label).
    #[must_use]
    pub const fn occupied(&self) -> &BTreeSet<Label> {
        &self.occupied
    }

    /// The full occupied-set closure at the tail.
    ///
    /// The interior set plus the tail's own neighbors: all of them when
    /// `exclude` is `None`, or all but the excluded continuation direction.
    /// A fresh root therefore reports `1 + d` members with no exclusion and
    /// `d` with one.
    #[must_use]
    pub fn occupied_set(&self, exclude: Option<Label>) -> BTreeSet<Label> {
        let mut set = self.occupied.clone();
        for neighbor in self.tail().neighbors() {
            if Some(neighbor.label()) != exclude {
                set.insert(neighbor.label());
            }
        }
        set
    }

    /// The ordered edge list, one `(from, to)` pair per step.
    #[must_use]
    pub fn edges(&self) -> Vec<(Vertex, Vertex)> {
        self.verts
            .windows(2)
            .map(|pair| (pair[0], pair[1]))
            .collect()
    }

    /// Validation predicate: consecutive vertices adjacent, non-consecutive
    /// vertices never adjacent.
    #[must_use]
    pub fn is_snake(&self) -> bool {
        for (i, a) in self.verts.iter().enumerate() {
            for (j, b) in self.verts.iter().enumerate().skip(i + 1) {
                let adjacent = a.is_adjacent(b);
                if j == i + 1 {
                    if !adjacent {
                        return false;
                    }
                } else if adjacent {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(text: &str) -> Vertex {
        Vertex::parse(text.len(), text).unwrap()
    }

    #[test]
    fn fresh_root_occupied_closure_sizes() {
        for dimension in 3..=6 {
            let path = Path::root(Vertex::origin(dimension).unwrap());
            assert_eq!(path.occupied_set(None).len(), 1 + dimension);
            let first = 1; // exclude the bit-0 neighbor
            assert_eq!(path.occupied_set(Some(first)).len(), dimension);
        }
    }

    #[test]
    fn length_is_extension_count_plus_one() {
        let mut path = Path::root(v("000"));
        let steps = [v("100"), v("110"), v("111")];
        for (k, next) in steps.iter().enumerate() {
            path.extend(*next);
            assert_eq!(path.len(), k + 2);
        }
    }

    #[test]
    fn extend_blocks_the_old_tail_neighborhood() {
        let mut path = Path::root(v("000"));
        // 010 is legal from the root...
        assert!(!path.blocks(v("010").label()));
        path.extend(v("100"));
        // ...but once 000 is interior, all its remaining neighbors block.
        assert!(path.blocks(v("010").label()));
        assert!(path.blocks(v("001").label()));
        assert!(path.blocks(v("000").label()));
        // The new tail's fresh neighbors stay legal.
        assert!(!path.blocks(v("110").label()));
        // Interior set: 000 plus its three neighbors (the tail among them).
        assert_eq!(path.occupied().len(), 4);
    }

    #[test]
    fn edges_cover_consecutive_pairs_in_order() {
        let mut path = Path::root(v("000"));
        path.extend(v("100"));
        path.extend(v("110"));
        assert_eq!(
            path.edges(),
            vec![(v("000"), v("100")), (v("100"), v("110"))]
        );
    }

    #[test]
    fn is_snake_accepts_the_reference_3_cube_snake() {
        let mut path = Path::root(v("000"));
        for step in ["100", "110", "111", "011"] {
            path.extend(v(step));
        }
        assert!(path.is_snake());
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn is_snake_rejects_a_chord() {
        // 000-100-110-010 closes a chord: 010 is adjacent to 000.
        let mut path = Path::root(v("000"));
        path.extend(v("100"));
        path.extend(v("110"));
        path.extend(v("010"));
        assert!(!path.is_snake());
    }

    #[test]
    fn blocked_candidates_are_exactly_the_occupied_closure_minus_tail_frontier() {
        let mut path = Path::root(v("0000"));
        path.extend(v("1000"));
        path.extend(v("1100"));
        // Legal continuations from 1100 in the 4-cube: 1110 and 1101.
        let legal: Vec<Vertex> = path
            .tail()
            .neighbors()
            .into_iter()
            .filter(|n| !path.blocks(n.label()))
            .collect();
        let labels: Vec<String> = legal.iter().map(Vertex::to_string).collect();
        assert_eq!(labels, vec!["1110".to_string(), "1101".to_string()]);
    }
}
