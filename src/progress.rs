//! Spinner display for long-running steps

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner shown while a pipeline runs
///
/// Hidden in verbose mode, where log lines and child output would tear it.
pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    pub fn new(message: impl Into<String>, verbose: bool) -> Self {
        let pb = if verbose {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
                pb.set_style(style);
            }
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        };
        pb.set_message(message.into());
        Self { pb }
    }

    /// Stop and clear the spinner
    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if !self.pb.is_finished() {
            self.pb.finish_and_clear();
        }
    }
}
