//! Snakes Search: the snake-in-the-box search engine.
//!
//! This crate provides the exploration layer. It depends only on
//! `snakes_cube` — it does NOT depend on `snakes_harness`.
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
//! - [`walker::RandomWalker`] — one exploration episode (biased, randomized
//!   or exhaustive)
//! - [`stats::RoundStatistics`] / [`stats::WeightTable`] — learning-round
//!   edge statistics and the per-vertex preference weights they produce
//! - [`guided::GuidedGraph`] — persistent node registry with memoized
//!   exploration completeness
//! - [`search::run_search`] / [`guided::run_guided_search`] — run drivers
//! - [`contract::ProgressSink`] — observational progress notifications
//! - [`report::SearchReport`] — the final best-path artifact

#![forbid(unsafe_code)]

pub mod contract;
pub mod error;
pub mod guided;
pub mod policy;
pub mod report;
pub mod search;
pub mod stats;
pub mod walker;
