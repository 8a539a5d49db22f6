use super::{launch, output_dashboard, output_json, LaunchOptions, ScanProgress};
use crate::cli::{CommonArgs, StatsArgs};
use crate::git::{is_repository, GitLogSource};
use crate::watch::WatchList;
use anyhow::Context;
use console::style;
use std::path::PathBuf;
use std::time::{Duration, Instant};

pub fn exec(common: &CommonArgs, args: StatsArgs) -> anyhow::Result<()> {
    let watch_list = common.watch_list()?;
    let folders = resolve_folders(args.folders, &watch_list)?;

    let opts = LaunchOptions {
        user: args.user,
        duration_weeks: args.weeks,
        folders,
        merge: args.merge,
        delta: args.delta,
        exclude: args.exclude,
        include: args.include,
        ledger_mode: args.ledger_mode,
    };

    let progress = ScanProgress::new(common.quiet || args.json);
    let started = Instant::now();
    let results = launch(&GitLogSource, &opts, &progress).context("Failed to compute statistics")?;
    progress.finish();

    if args.json {
        output_json(&results)?;
    } else {
        for result in &results {
            output_dashboard(result)?;
        }
        let elapsed = Duration::from_millis(started.elapsed().as_millis() as u64);
        println!(
            "\nScanned {} unit(s) in {}",
            results.len(),
            style(humantime::format_duration(elapsed)).dim()
        );
    }
    Ok(())
}

/// Folders given on the command line, else the watch list. Falls back to the
/// current directory when the list is empty or the current directory is a
/// repository itself.
pub fn resolve_folders(explicit: Vec<PathBuf>, watch_list: &WatchList) -> anyhow::Result<Vec<PathBuf>> {
    if !explicit.is_empty() {
        return Ok(explicit);
    }
    let watched = watch_list
        .load()
        .with_context(|| format!("Failed to read watch list {}", watch_list.path().display()))?;
    if watched.is_empty() || is_repository(".") {
        return Ok(vec![PathBuf::from(".")]);
    }
    Ok(watched)
}
