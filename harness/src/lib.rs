//! Snakes Harness: orchestration for the search engine.
//!
//! The harness validates a run configuration, seeds the random source,
//! dispatches to the plain or guided driver, and handles the observational
//! surface (console progress, report files, the `snakes` CLI binary).
//!
//! The harness does NOT implement search logic — it delegates to
//! `snakes_search`. Engine crates never depend back on it.

#![forbid(unsafe_code)]

pub mod config;
pub mod progress;
pub mod runner;
