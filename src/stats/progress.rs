use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;

/// Spinner advanced once per processed commit, shared by every walker.
///
/// Hidden when quiet or when stderr is not a terminal.
#[derive(Clone)]
pub struct ScanProgress {
    pb: ProgressBar,
}

impl ScanProgress {
    pub fn new(quiet: bool) -> Self {
        if quiet || !std::io::stderr().is_terminal() {
            return Self::hidden();
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg} {pos} commits")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Analyzing commits");
        Self { pb }
    }

    pub fn hidden() -> Self {
        Self {
            pb: ProgressBar::hidden(),
        }
    }

    pub fn inc(&self) {
        self.pb.inc(1);
    }

    pub fn position(&self) -> u64 {
        self.pb.position()
    }

    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }
}

impl Default for ScanProgress {
    fn default() -> Self {
        Self::hidden()
    }
}
