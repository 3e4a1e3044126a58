//! Console progress sink.
//!
//! Prints best-so-far lines to stderr with a configurable stride so long
//! runs stay readable. Purely observational.

use snakes_search::contract::{EpisodeUpdate, ProgressSink};
use snakes_search::report::SearchReport;

/// Sink that writes progress lines to stderr.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleProgress {
    /// Print every `stride`-th episode (and always the first).
    stride: u64,
}

impl ConsoleProgress {
    /// A console sink printing every `stride`-th episode.
    ///
    /// A stride of 0 is treated as 1.
    #[must_use]
    pub fn new(stride: u64) -> Self {
        Self {
            stride: stride.max(1),
        }
    }
}

impl ProgressSink for ConsoleProgress {
    fn on_episode(&mut self, update: EpisodeUpdate) {
        if update.episode % self.stride == 0 {
            eprintln!(
                "round {} episode {}: path {} vertices, best so far {}",
                update.round, update.episode, update.path_len, update.best_len
            );
        }
    }

    fn on_complete(&mut self, report: &SearchReport) {
        eprintln!(
            "done after {} episodes: best path {} vertices ({} edges)",
            report.episodes_run,
            report.best_len,
            report.edge_count()
        );
    }
}
