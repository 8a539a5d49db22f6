use chrono::{DateTime, FixedOffset, TimeZone};
use gitcontrib::git::MemorySource;
use gitcontrib::model::{CommitRecord, Contribution, FileStat};
use gitcontrib::stats::ScanProgress;
use gitcontrib::{launch_at, ContribError, LaunchOptions, LedgerMode};
use pretty_assertions::assert_eq;
use std::path::PathBuf;

fn at(m: u32, d: u32, h: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2026, m, d, h, 0, 0)
        .unwrap()
}

fn now() -> DateTime<FixedOffset> {
    at(10, 16, 12)
}

fn commit(name: &str, ts: DateTime<FixedOffset>, files: &[(&str, u64, u64)]) -> CommitRecord {
    CommitRecord {
        author_name: name.to_string(),
        author_email: format!("{}@example.com", name.to_lowercase()),
        timestamp: ts,
        file_stats: files.iter().map(|(p, a, d)| FileStat::new(*p, *a, *d)).collect(),
    }
}

fn opts(folders: &[&str]) -> LaunchOptions {
    LaunchOptions {
        duration_weeks: 1,
        folders: folders.iter().map(PathBuf::from).collect(),
        ..LaunchOptions::default()
    }
}

fn two_repos() -> MemorySource {
    MemorySource::new()
        .with_commits(
            "alpha",
            vec![
                commit("Ann", at(10, 15, 9), &[("src/a.rs", 4, 1)]),
                commit("Ann", at(10, 14, 9), &[("src/b.rs", 2, 0)]),
            ],
        )
        .with_commits(
            "beta",
            vec![
                commit("Ann", at(10, 15, 14), &[("lib.go", 7, 3)]),
                commit("Bob", at(10, 13, 22), &[("lib.go", 1, 1)]),
            ],
        )
}

#[test]
fn only_in_window_commits_reach_the_result() {
    let source = MemorySource::new().with_commits(
        "repo",
        vec![
            commit("Dev", at(10, 15, 10), &[("a.rs", 10, 2)]),
            commit("Dev", at(10, 14, 10), &[("a.rs", 10, 2)]),
            commit("Dev", at(10, 13, 10), &[("a.rs", 10, 2)]),
            commit("Dev", at(9, 16, 10), &[("a.rs", 10, 2)]),
        ],
    );

    let results = launch_at(&source, &opts(&["repo"]), now(), &ScanProgress::hidden()).unwrap();

    assert_eq!(results.len(), 1);
    let result = &results[0];
    assert!(result.error.is_none());
    assert_eq!(result.day_commits.iter().sum::<u32>(), 3);
    assert_eq!(result.ledger.len(), 1);
    assert_eq!(
        result.ledger.get("Dev"),
        Some(Contribution { additions: 30, deletions: 6 })
    );
    assert_eq!(result.hour_commits[10], 3);
    assert_eq!(result.weekday_commits.iter().sum::<u32>(), 3);
}

#[test]
fn separate_mode_keeps_folder_order() {
    let source = two_repos();
    let results = launch_at(&source, &opts(&["beta", "alpha"]), now(), &ScanProgress::hidden()).unwrap();

    let folders: Vec<String> = results.iter().map(|r| r.folder()).collect();
    assert_eq!(folders, vec!["beta".to_string(), "alpha".to_string()]);
    assert_eq!(results[0].ledger.len(), 2);
    assert_eq!(results[1].ledger.len(), 1);
    assert_eq!(results[1].commit_count(), 2);
}

#[test]
fn merge_mode_shares_one_result() {
    let source = two_repos();
    let mut options = opts(&["alpha", "beta"]);
    options.merge = true;

    let results = launch_at(&source, &options, now(), &ScanProgress::hidden()).unwrap();

    assert_eq!(results.len(), 1);
    let merged = &results[0];
    assert_eq!(merged.folder(), "alpha,beta");
    assert_eq!(merged.commit_count(), 4);
    assert_eq!(
        merged.ledger.get("Ann"),
        Some(Contribution { additions: 13, deletions: 4 })
    );
    assert_eq!(
        merged.ledger.get("Bob"),
        Some(Contribution { additions: 1, deletions: 1 })
    );
}

#[test]
fn failing_folder_does_not_stop_the_others() {
    let source = two_repos();
    let results = launch_at(
        &source,
        &opts(&["alpha", "missing", "beta"]),
        now(),
        &ScanProgress::hidden(),
    )
    .unwrap();

    assert_eq!(results.len(), 3);
    assert!(results[0].error.is_none());
    assert!(matches!(
        results[1].error,
        Some(ContribError::NotARepository { .. })
    ));
    assert!(results[2].error.is_none());
    assert_eq!(results[2].commit_count(), 2);
}

#[test]
fn merged_unit_keeps_scanning_after_a_bad_folder() {
    let source = two_repos();
    let mut options = opts(&["missing", "beta"]);
    options.merge = true;

    let results = launch_at(&source, &options, now(), &ScanProgress::hidden()).unwrap();

    assert_eq!(results.len(), 1);
    assert!(results[0].error.is_some());
    assert_eq!(results[0].commit_count(), 2);
}

#[test]
fn invalid_delta_is_reported_per_result() {
    let source = two_repos();
    let mut options = opts(&["alpha", "beta"]);
    options.delta = "2x".to_string();

    let results = launch_at(&source, &options, now(), &ScanProgress::hidden()).unwrap();

    assert_eq!(results.len(), 2);
    for result in &results {
        assert!(matches!(result.error, Some(ContribError::InvalidDelta(_))));
        assert!(result.ledger.is_empty());
    }
}

#[test]
fn invalid_pattern_fails_the_run() {
    let source = two_repos();
    let mut options = opts(&["alpha"]);
    options.include = vec!["(unclosed".to_string()];

    let err = launch_at(&source, &options, now(), &ScanProgress::hidden()).unwrap_err();
    assert!(matches!(err, ContribError::InvalidPattern { .. }));
}

#[test]
fn delta_moves_the_window_back() {
    let source = two_repos();
    let mut options = opts(&["alpha"]);
    options.delta = "2w".to_string();

    let results = launch_at(&source, &options, now(), &ScanProgress::hidden()).unwrap();

    let window = results[0].window.unwrap();
    assert_eq!(window.end.date_naive(), at(10, 4, 0).date_naive());
    assert_eq!(results[0].commit_count(), 0);
}

#[test]
fn author_filter_and_patterns_apply_to_every_unit() {
    let source = two_repos();
    let mut options = opts(&["alpha", "beta"]);
    options.user = Some("bob@example.com,Ann".to_string());
    options.exclude = vec![r"^src/b\.rs$".to_string()];

    let results = launch_at(&source, &options, now(), &ScanProgress::hidden()).unwrap();

    assert_eq!(
        results[0].ledger.get("Ann"),
        Some(Contribution { additions: 4, deletions: 1 })
    );
    assert_eq!(results[0].commit_count(), 2);
    assert_eq!(results[1].ledger.len(), 2);
}

#[test]
fn ledger_modes_give_identical_results() {
    let source = two_repos();
    let mut sequential = opts(&["alpha", "beta"]);
    sequential.merge = true;
    sequential.ledger_mode = LedgerMode::Sequential;
    let mut per_file = sequential.clone();
    per_file.ledger_mode = LedgerMode::PerFile;

    let a = launch_at(&source, &sequential, now(), &ScanProgress::hidden()).unwrap();
    let b = launch_at(&source, &per_file, now(), &ScanProgress::hidden()).unwrap();

    assert_eq!(a[0].ledger.ranked(), b[0].ledger.ranked());
    assert_eq!(a[0].day_commits, b[0].day_commits);
    assert_eq!(a[0].hour_commits, b[0].hour_commits);
}

#[test]
fn report_serializes_the_result() {
    let source = two_repos();
    let results = launch_at(&source, &opts(&["alpha"]), now(), &ScanProgress::hidden()).unwrap();

    let report = results[0].to_report();
    assert_eq!(report.folders, vec!["alpha".to_string()]);
    assert_eq!(report.total_days, 14);
    assert_eq!(report.commit_count, 2);
    assert_eq!((report.additions, report.deletions), (6, 1));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["authors"][0]["name"], "Ann");
    assert_eq!(json["day_commits"].as_array().unwrap().len(), 15);
}
