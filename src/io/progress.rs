//! Progress display for batches of generated levels

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

use crate::algorithm::placement::GenerationReport;

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Levels: [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Tracks how many levels of a batch have been generated
pub struct ProgressManager {
    bar: ProgressBar,
    enemies: usize,
}

impl ProgressManager {
    /// Visible progress bar for `level_count` levels
    pub fn new(level_count: usize) -> Self {
        let bar = ProgressBar::new(level_count as u64);
        bar.set_style(BATCH_STYLE.clone());
        Self { bar, enemies: 0 }
    }

    /// Progress manager that draws nothing
    pub fn hidden(level_count: usize) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(level_count as u64);
        Self { bar, enemies: 0 }
    }

    /// Record a finished level
    pub fn complete_level(&mut self, report: &GenerationReport) {
        self.enemies += report.enemies;
        self.bar.set_message(format!("{} enemies", self.enemies));
        self.bar.inc(1);
    }

    /// Levels completed so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Enemies spawned across completed levels
    pub const fn enemies(&self) -> usize {
        self.enemies
    }

    /// Clear the progress display
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
