//! Progress reporting for batch generation
//!
//! Shows one bar per file counting collapsed cells, advanced from the
//! engine's observer hook, plus a batch bar when many files are queued.

use std::path::Path;
use std::sync::LazyLock;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;

static CELL_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {pos}/{len} cells")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Files: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Coordinates progress display for batch generation
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    current: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            current: None,
        }
    }

    /// Prepare for a batch of files, adding a batch bar for large sets
    pub fn initialize(&mut self, file_count: usize) {
        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }
    }

    /// Begin a per-file bar sized to the output cell count
    ///
    /// The returned handle is cheap to clone into an observer closure;
    /// every clone drives the same bar.
    pub fn start_file(&mut self, path: &Path, cells: u64) -> ProgressBar {
        if let Some(previous) = self.current.take() {
            previous.finish_and_clear();
        }
        let display_name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |name| {
                name.to_string_lossy().into_owned()
            });
        let bar = ProgressBar::new(cells);
        bar.set_style(CELL_STYLE.clone());
        bar.set_message(display_name);
        let bar = self.multi_progress.add(bar);
        self.current = Some(bar.clone());
        bar
    }

    /// Reset the current bar for a fresh generation attempt
    pub fn restart_attempt(&self) {
        if let Some(bar) = &self.current {
            bar.set_position(0);
        }
    }

    /// Finish the current file and advance the batch bar
    pub fn complete_file(&mut self) {
        if let Some(bar) = self.current.take() {
            bar.finish();
        }
        if let Some(batch) = &self.batch_bar {
            batch.inc(1);
        }
    }

    /// Finish all remaining bars
    pub fn finish(&mut self) {
        if let Some(bar) = self.current.take() {
            bar.finish_and_clear();
        }
        if let Some(batch) = self.batch_bar.take() {
            batch.finish();
        }
    }
}
