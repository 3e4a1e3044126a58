//! Harness runner: seeds the random source and drives the engine.
//!
//! The runner uses ONLY engine APIs: policy construction, the two run
//! drivers, and report rendering. It does not implement any search logic
//! itself.
//!
//! # Pipeline
//!
//! ```text
//! RunConfig::origin() → seed StdRng
//!   → run_search() | run_guided_search()
//!   → SearchReport → render_report() → optional report file
//! ```

use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;

use snakes_search::contract::ProgressSink;
use snakes_search::guided::run_guided_search;
use snakes_search::report::{render_report, SearchReport};
use snakes_search::search::run_search;

use crate::config::{RunConfig, RunError, RunMode};

/// Execute a configured run and return its report.
///
/// # Errors
///
/// Returns [`RunError::Cube`] or [`RunError::Search`] for configuration
/// contract violations; engine-internal variants only surface on contract
/// breaches.
pub fn run(config: &RunConfig, sink: &mut dyn ProgressSink) -> Result<SearchReport, RunError> {
    let origin = config.origin()?;
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let report = match config.mode {
        RunMode::Plain => run_search(origin, &config.search_policy(), sink, &mut rng)?,
        RunMode::Guided => run_guided_search(origin, &config.guided_policy(), sink, &mut rng)?,
    };
    Ok(report)
}

/// Write the rendered report as pretty JSON.
///
/// # Errors
///
/// Returns [`RunError::ReportWriteFailed`] if serialization or the write
/// fails.
pub fn write_report(report: &SearchReport, path: &Path) -> Result<(), RunError> {
    let value = render_report(report);
    let bytes =
        serde_json::to_vec_pretty(&value).map_err(|e| RunError::ReportWriteFailed {
            detail: format!("serialization error: {e}"),
        })?;
    std::fs::write(path, bytes).map_err(|e| RunError::ReportWriteFailed {
        detail: format!("{}: {e}", path.display()),
    })
}
