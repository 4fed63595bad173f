//! Terminal progress for index builds.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;

/// Progress bar fed by the index builder's `(processed, total)` callback.
///
/// Cloning yields a handle to the same bar.
#[derive(Clone)]
pub struct BuildProgress {
    bar: ProgressBar,
    start: Instant,
}

impl BuildProgress {
    /// Create a bar for `total` documents; hidden when `quiet`.
    pub fn new(total: usize, quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(total as u64)
        };

        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} documents ({percent}%) {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        Self {
            bar,
            start: Instant::now(),
        }
    }

    /// Record that `processed` of `total` documents are indexed.
    pub fn update(&self, processed: usize, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(processed as u64);

        let elapsed = self.start.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.bar
                .set_message(format!("{:.1} docs/s", processed as f64 / elapsed));
        }
    }

    /// Current position.
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Finish, leaving the bar on screen.
    pub fn finish(&self) {
        self.bar.finish_with_message("done");
    }

    /// Stop after a failure, leaving the bar where it stopped.
    pub fn abandon(&self) {
        self.bar.abandon_with_message("failed");
    }
}
