use crate::error::{ContribError, Result};
use crate::ledger::ContributionLedger;
use crate::model::{StatsOptions, UnitReport};
use crate::util::folders_label;
use crate::window::ScanWindow;
use chrono::{DateTime, Datelike, FixedOffset, Timelike};

/// Accumulated statistics of one scan unit.
///
/// Every day bucket of the window is present from the start, so days without
/// commits still show up as zero.
#[derive(Debug)]
pub struct StatsResult {
    pub options: StatsOptions,
    pub window: Option<ScanWindow>,
    /// Commits per bucket index, see [`ScanWindow::day_offset`].
    pub day_commits: Vec<u32>,
    pub hour_commits: [u32; 24],
    /// Indexed from Sunday.
    pub weekday_commits: [u32; 7],
    pub ledger: ContributionLedger,
    pub error: Option<ContribError>,
}

impl StatsResult {
    pub fn new(options: StatsOptions, window: Result<ScanWindow>) -> Self {
        let (window, error) = match window {
            Ok(w) => (Some(w), None),
            Err(e) => (None, Some(e)),
        };
        let buckets = window.map_or(0, |w| w.total_days as usize + 1);

        Self {
            options,
            window,
            day_commits: vec![0; buckets],
            hour_commits: [0; 24],
            weekday_commits: [0; 7],
            ledger: ContributionLedger::new(),
            error,
        }
    }

    pub fn folder(&self) -> String {
        folders_label(&self.options.folders)
    }

    /// Counts a commit in the day, hour and weekday histograms. Indices past
    /// the window are ignored.
    pub fn record_commit(&mut self, index: i64, timestamp: DateTime<FixedOffset>) -> bool {
        let Some(slot) = usize::try_from(index)
            .ok()
            .and_then(|i| self.day_commits.get_mut(i))
        else {
            return false;
        };
        *slot += 1;
        self.hour_commits[timestamp.hour() as usize] += 1;
        self.weekday_commits[timestamp.weekday().num_days_from_sunday() as usize] += 1;
        true
    }

    pub fn commit_count(&self) -> u64 {
        self.day_commits.iter().map(|&c| u64::from(c)).sum()
    }

    pub fn to_report(&self) -> UnitReport {
        let totals = self.ledger.totals();
        UnitReport {
            folders: self
                .options
                .folders
                .iter()
                .map(|f| f.display().to_string())
                .collect(),
            begin: self.window.map(|w| w.begin),
            end: self.window.map(|w| w.end),
            total_days: self.window.map_or(0, |w| w.total_days),
            commit_count: self.commit_count(),
            day_commits: self.day_commits.clone(),
            hour_commits: self.hour_commits,
            weekday_commits: self.weekday_commits,
            additions: totals.additions,
            deletions: totals.deletions,
            authors: self.ledger.ranked(),
            error: self.error.as_ref().map(|e| e.to_string()),
        }
    }
}
