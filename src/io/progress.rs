//! Progress display for optimizer passes over one or more target files

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

use crate::algorithm::executor::PassObserver;
use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;

/// Coordinates progress display for batch optimization
///
/// Shows a bar for the file being optimized that tracks blocks evaluated in
/// the current pass. For large batches an extra bar counts finished files.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    file_bar: Option<ProgressBar>,
    file_count: usize,
    file_name: String,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static PASS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix} [{bar:30.cyan/blue}] {pos}/{len} blocks {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Files: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            file_bar: None,
            file_count: 0,
            file_name: String::new(),
        }
    }

    /// Set up the batch bar if the file count warrants one
    pub fn initialize(&mut self, file_count: usize) {
        self.file_count = file_count;

        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }
    }

    /// Number of files in the batch
    pub const fn file_count(&self) -> usize {
        self.file_count
    }

    /// Start tracking a new file
    pub fn start_file(&mut self, path: &Path) {
        if let Some(bar) = self.file_bar.take() {
            bar.finish_and_clear();
        }

        self.file_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        let bar = ProgressBar::new(0);
        bar.set_style(PASS_STYLE.clone());
        bar.set_prefix(self.file_name.clone());
        self.file_bar = Some(self.multi_progress.add(bar));
    }

    /// Mark the current file as done
    pub fn complete_file(&mut self, elapsed: Duration, moves: usize, cost: u64) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(bar) = self.file_bar.take() {
            bar.set_prefix(format!("✓ {}", self.file_name));
            bar.finish_with_message(format!(
                "{moves} moves, cost {cost} in {:.1}s",
                elapsed.as_secs_f64()
            ));
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All files processed");
        }
        let _ = self.multi_progress.clear();
    }
}

impl PassObserver for ProgressManager {
    fn pass_started(&self, pass: usize, blocks: usize) {
        if let Some(ref bar) = self.file_bar {
            bar.set_length(blocks as u64);
            bar.set_position(0);
            bar.set_message(format!("(pass {pass})"));
        }
    }

    fn block_done(&self) {
        if let Some(ref bar) = self.file_bar {
            bar.inc(1);
        }
    }

    fn pass_finished(&self, pass: usize, moves: usize, cost: u64) {
        if let Some(ref bar) = self.file_bar {
            bar.set_message(format!("(pass {pass}: {moves} moves, cost {cost})"));
        }
    }
}
