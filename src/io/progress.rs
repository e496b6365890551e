//! Progress display for a generation run

use crate::algorithm::executor::{CycleReport, RunOutcome};
use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} cells {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Collapsed-cell bar that also reports restarts
pub struct GenerationProgress {
    bar: ProgressBar,
    restarts: usize,
}

impl GenerationProgress {
    /// Visible bar over `total_cells` collapses
    pub fn new(total_cells: usize, label: &str) -> Self {
        let bar = ProgressBar::new(total_cells as u64);
        bar.set_style(PROGRESS_STYLE.clone());
        bar.set_prefix(label.to_string());
        Self { bar, restarts: 0 }
    }

    /// Bar that tracks state without drawing
    pub fn hidden(total_cells: usize) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(total_cells as u64);
        Self { bar, restarts: 0 }
    }

    /// Reflect one finished cycle
    pub fn update(&mut self, report: &CycleReport) {
        self.bar.set_position(report.collapsed_count as u64);
        if report.contradiction.is_some() {
            self.restarts += 1;
            self.bar
                .set_message(format!("(attempt {}, {} restarts)", report.attempt, self.restarts));
        }
    }

    /// Number of contradictions seen so far
    pub const fn restarts(&self) -> usize {
        self.restarts
    }

    /// Collapsed cells currently shown
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Close the bar with a summary of the outcome
    pub fn finish(&self, outcome: &RunOutcome) {
        match outcome {
            RunOutcome::Completed { attempts, .. } => {
                self.bar
                    .finish_with_message(format!("done after {attempts} attempt(s)"));
            }
            RunOutcome::Cancelled { .. } => self.bar.abandon_with_message("cancelled"),
        }
    }

    /// Remove the bar from the terminal, e.g. after an error
    pub fn clear(&self) {
        self.bar.finish_and_clear();
    }
}
