//! Progress bar for uploads
//!
//! Draws on stdout, next to the log records. indicatif hides the bar when
//! stdout is not a terminal.

use std::sync::Arc;

use indicatif::{ProgressDrawTarget, ProgressStyle};
use s3t_core::ProgressSink;

const TEMPLATE: &str =
    "{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})";

/// Byte counter drawn as a bar
#[derive(Debug, Clone)]
pub struct ProgressBar {
    bar: indicatif::ProgressBar,
}

impl ProgressBar {
    /// Create a new progress bar with the given total size
    pub fn new(total: u64) -> Self {
        Self::with_target(total, ProgressDrawTarget::stdout())
    }

    /// A bar that counts but never draws
    #[cfg(test)]
    pub fn hidden(total: u64) -> Self {
        Self::with_target(total, ProgressDrawTarget::hidden())
    }

    fn with_target(total: u64, target: ProgressDrawTarget) -> Self {
        let bar = indicatif::ProgressBar::with_draw_target(Some(total), target);
        let style = ProgressStyle::default_bar()
            .template(TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        bar.set_style(style);
        Self { bar }
    }

    #[cfg(test)]
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Progress callback for a request body
    pub fn sink(&self) -> ProgressSink {
        let bar = self.bar.clone();
        Arc::new(move |delta| bar.inc(delta))
    }

    /// Leave the bar in its final state
    pub fn finish(&self) {
        self.bar.finish();
    }
}
