use super::progress::ScanProgress;
use super::result::StatsResult;
use super::walk::{AuthorFilter, LedgerMode, RepositoryWalker};
use crate::error::Result;
use crate::filter::PathFilter;
use crate::git::LogSource;
use crate::model::StatsOptions;
use crate::window::ScanWindow;
use chrono::{DateTime, FixedOffset, Local};
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    pub user: Option<String>,
    pub duration_weeks: u32,
    pub folders: Vec<PathBuf>,
    pub merge: bool,
    pub delta: String,
    pub exclude: Vec<String>,
    pub include: Vec<String>,
    pub ledger_mode: LedgerMode,
}

impl LaunchOptions {
    /// One unit holding every folder when merged, one unit per folder otherwise.
    fn units(&self) -> Vec<StatsOptions> {
        let unit = |folders: Vec<PathBuf>| StatsOptions {
            author_filter: self.user.clone(),
            duration_weeks: self.duration_weeks,
            folders,
            delta: self.delta.clone(),
            exclude_patterns: self.exclude.clone(),
            include_patterns: self.include.clone(),
        };

        if self.merge {
            vec![unit(self.folders.clone())]
        } else {
            self.folders.iter().map(|f| unit(vec![f.clone()])).collect()
        }
    }
}

pub fn launch<S: LogSource>(
    source: &S,
    opts: &LaunchOptions,
    progress: &ScanProgress,
) -> Result<Vec<StatsResult>> {
    launch_at(source, opts, Local::now().fixed_offset(), progress)
}

/// Scans every unit concurrently as of `now` and returns one result per unit,
/// in folder order. Only an invalid path pattern fails the whole run; anything
/// going wrong inside a unit is recorded on its result.
pub fn launch_at<S: LogSource>(
    source: &S,
    opts: &LaunchOptions,
    now: DateTime<FixedOffset>,
    progress: &ScanProgress,
) -> Result<Vec<StatsResult>> {
    let paths = PathFilter::new(&opts.exclude, &opts.include)?;
    let authors = opts.user.as_deref().and_then(AuthorFilter::parse);
    let walker = RepositoryWalker::new(source, &paths, authors.as_ref(), opts.ledger_mode, progress);

    let results: Vec<StatsResult> = opts
        .units()
        .into_par_iter()
        .map(|options| scan_unit(&walker, options, now))
        .collect();

    info!(
        action = "complete",
        component = "launch",
        units = results.len(),
        failed = results.iter().filter(|r| r.error.is_some()).count(),
        "Scan finished"
    );
    Ok(results)
}

fn scan_unit<S: LogSource>(
    walker: &RepositoryWalker<'_, S>,
    options: StatsOptions,
    now: DateTime<FixedOffset>,
) -> StatsResult {
    let window = ScanWindow::compute(&options.delta, options.duration_weeks, now);
    let mut result = StatsResult::new(options, window);
    if let Some(err) = &result.error {
        warn!(action = "window", component = "launch", folder = %result.folder(), error = %err, "Cannot compute scan window");
        return result;
    }

    let folders = result.options.folders.clone();
    for folder in &folders {
        // remaining folders of a merged unit are still scanned
        if let Err(err) = walker.walk(folder, &mut result) {
            warn!(action = "walk", component = "launch", folder = ?folder, error = %err, "Error scanning folder repository");
            result.error = Some(err);
        }
    }
    result
}
