//! Progress display
//!
//! One multi-bar reporter per run, constructed by the orchestrator and
//! passed to each export. Bars are created lazily once a target's
//! `totalCount` is known.

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Multiplexes per-target progress bars onto stderr
pub struct ProgressReporter {
    multi: MultiProgress,
}

impl ProgressReporter {
    /// Create a reporter drawing to stderr
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::with_draw_target(ProgressDrawTarget::stderr()),
        }
    }

    /// Create a reporter that draws nothing (tests, non-tty runs)
    pub fn hidden() -> Self {
        Self {
            multi: MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
        }
    }

    /// Add a bar for one target, sized to its total record count
    pub fn add_target(&self, key: &str, total: u64) -> ProgressBar {
        let bar = self.multi.add(ProgressBar::new(total));
        bar.set_style(
            ProgressStyle::default_bar()
                .template("[{bar:20.cyan/blue}] {pos} / {len} {percent}% {eta} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        bar.set_message(key.to_string());
        bar
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_reporter_bars_count() {
        let reporter = ProgressReporter::hidden();
        let bar = reporter.add_target("USERS", 137);
        assert_eq!(bar.length(), Some(137));
        bar.inc(10);
        assert_eq!(bar.position(), 10);
    }
}
