//! Snakes Cube: hypercube vertex and induced-path primitives.
//!
//! This crate provides the graph substrate for the snake-in-the-box search.
//! It depends on nothing — the engine lives in `snakes_search` and the
//! user-facing surface in `snakes_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! snakes_cube  ←  snakes_search  ←  snakes_harness
//! (vertices,      (walker, stats,    (config, runner,
//!  paths)          guided graph)      progress, CLI)
//! ```
//!
//! # Key types
//!
//! - [`vertex::Vertex`] — a d-bit hypercube vertex with bit-flip adjacency
//! - [`path::Path`] — an induced path with its incrementally maintained
//!   occupied set
//! - [`error::CubeError`] — typed construction failures

#![forbid(unsafe_code)]

pub mod error;
pub mod path;
pub mod vertex;
