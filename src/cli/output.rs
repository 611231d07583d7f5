//! Output formatting and progress display

use crate::cli::args::VerbosityLevel;
use crate::core::{ClearReport, DownloadProgress};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Mutex;

/// Output formatter for the command line
pub struct OutputFormatter {
    verbosity: VerbosityLevel,
    progress_bar: Mutex<Option<ProgressBar>>,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(verbosity: VerbosityLevel) -> Self {
        Self {
            verbosity,
            progress_bar: Mutex::new(None),
        }
    }

    /// Update the progress bar, creating it on the first event
    pub fn update_progress(&self, progress: &DownloadProgress) {
        if self.verbosity == VerbosityLevel::Quiet {
            return;
        }

        let Ok(mut guard) = self.progress_bar.lock() else {
            return;
        };
        let bar = guard.get_or_insert_with(|| new_progress_bar(progress.total));

        if progress.total > 0 {
            bar.set_length(progress.total);
        }
        bar.set_position(progress.downloaded);
    }

    /// Finish progress bar
    pub fn finish_progress(&self) {
        if let Ok(mut guard) = self.progress_bar.lock() {
            if let Some(bar) = guard.take() {
                bar.finish_and_clear();
            }
        }
    }

    /// Print tool result text
    pub fn result(&self, text: &str, is_error: bool) {
        if is_error {
            eprintln!("{}", text.red());
        } else {
            println!("{}", text);
        }
    }

    /// Print success message
    pub fn success(&self, message: &str) {
        if self.verbosity != VerbosityLevel::Quiet {
            println!("{}", message.green());
        }
    }

    /// Print error message
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "❌".red(), message.red());
    }

    /// Print the outcome of clearing the working directory
    pub fn print_clear_report(&self, report: &ClearReport) {
        if report.removed.is_empty() {
            self.success("Working directory is already empty");
            return;
        }

        self.success(&format!("🧹 {}", report.message));
        if self.verbosity == VerbosityLevel::Verbose {
            for name in &report.removed {
                println!("  - {}", name);
            }
        }
    }
}

fn new_progress_bar(total: u64) -> ProgressBar {
    let bar = if total > 0 {
        let bar = ProgressBar::new(total);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
        {
            bar.set_style(style.progress_chars("#>-"));
        }
        bar
    } else {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {bytes} downloaded")
        {
            bar.set_style(style);
        }
        bar
    };
    bar.set_draw_target(ProgressDrawTarget::stderr());
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_formatter_creates_no_bar() {
        let formatter = OutputFormatter::new(VerbosityLevel::Quiet);
        formatter.update_progress(&DownloadProgress::new(10));
        assert!(formatter.progress_bar.lock().unwrap().is_none());
    }

    #[test]
    fn test_progress_bar_lifecycle() {
        let formatter = OutputFormatter::new(VerbosityLevel::Normal);
        let mut progress = DownloadProgress::new(100);
        progress.update(50);
        formatter.update_progress(&progress);
        assert_eq!(
            formatter.progress_bar.lock().unwrap().as_ref().unwrap().position(),
            50
        );

        formatter.finish_progress();
        assert!(formatter.progress_bar.lock().unwrap().is_none());
    }
}
