use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const SCHEMA_VERSION: u32 = 1;

/// Line changes of one file within one commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStat {
    pub path: String,
    pub additions: u64,
    pub deletions: u64,
}

impl FileStat {
    pub fn new(path: impl Into<String>, additions: u64, deletions: u64) -> Self {
        Self {
            path: path.into(),
            additions,
            deletions,
        }
    }
}

/// A commit as produced by a log source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub author_name: String,
    pub author_email: String,
    pub timestamp: DateTime<FixedOffset>,
    pub file_stats: Vec<FileStat>,
}

/// Inputs of a single scan unit: one folder, or every folder when merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsOptions {
    pub author_filter: Option<String>,
    pub duration_weeks: u32,
    pub folders: Vec<PathBuf>,
    pub delta: String,
    pub exclude_patterns: Vec<String>,
    pub include_patterns: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    pub additions: u64,
    pub deletions: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorContribution {
    pub name: String,
    pub additions: u64,
    pub deletions: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitReport {
    pub folders: Vec<String>,
    pub begin: Option<DateTime<FixedOffset>>,
    pub end: Option<DateTime<FixedOffset>>,
    pub total_days: i64,
    pub commit_count: u64,
    pub day_commits: Vec<u32>,
    pub hour_commits: [u32; 24],
    pub weekday_commits: [u32; 7],
    pub additions: u64,
    pub deletions: u64,
    pub authors: Vec<AuthorContribution>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub results: Vec<UnitReport>,
}
