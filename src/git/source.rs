use super::repo::{CommitLog, GitRepo};
use crate::error::{ContribError, GitError, Result};
use crate::model::CommitRecord;
use chrono::{DateTime, FixedOffset};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Produces the commits of a repository within a time bound.
///
/// Opening failures surface as [`ContribError::NotARepository`], failures
/// while walking as [`ContribError::LogIteration`] items of the sequence.
pub trait LogSource: Sync {
    type Log: Iterator<Item = Result<CommitRecord>>;

    fn log(
        &self,
        path: &Path,
        since: DateTime<FixedOffset>,
        until: DateTime<FixedOffset>,
    ) -> Result<Self::Log>;
}

/// Reads history straight out of the object database with gix.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitLogSource;

impl LogSource for GitLogSource {
    type Log = CommitLog;

    fn log(
        &self,
        path: &Path,
        since: DateTime<FixedOffset>,
        until: DateTime<FixedOffset>,
    ) -> Result<CommitLog> {
        let repo = GitRepo::open(path)?;
        debug!(action = "open", component = "git_log", path = ?repo.path(), %since, %until, "Repository opened");
        repo.log(since, until)
    }
}

enum Entry {
    Commit(CommitRecord),
    Failure(String),
}

/// Commit history held in memory, keyed by repository path.
#[derive(Default)]
pub struct MemorySource {
    repos: HashMap<PathBuf, Vec<Entry>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_commits<P: Into<PathBuf>>(mut self, path: P, commits: Vec<CommitRecord>) -> Self {
        self.repos
            .entry(path.into())
            .or_default()
            .extend(commits.into_iter().map(Entry::Commit));
        self
    }

    /// Makes the log of `path` fail once every earlier entry was read.
    pub fn with_failure<P: Into<PathBuf>>(mut self, path: P, message: &str) -> Self {
        self.repos
            .entry(path.into())
            .or_default()
            .push(Entry::Failure(message.to_string()));
        self
    }
}

impl LogSource for MemorySource {
    type Log = std::vec::IntoIter<Result<CommitRecord>>;

    fn log(
        &self,
        path: &Path,
        since: DateTime<FixedOffset>,
        until: DateTime<FixedOffset>,
    ) -> Result<Self::Log> {
        let entries = self
            .repos
            .get(path)
            .ok_or_else(|| ContribError::NotARepository {
                path: path.to_path_buf(),
                source: "no such repository".into(),
            })?;

        let mut items = Vec::new();
        for entry in entries {
            match entry {
                Entry::Commit(c) if c.timestamp >= since && c.timestamp <= until => {
                    items.push(Ok(c.clone()))
                }
                Entry::Commit(_) => {}
                Entry::Failure(message) => {
                    items.push(Err(ContribError::LogIteration {
                        path: path.to_path_buf(),
                        source: GitError::Other(message.clone()),
                    }));
                    break;
                }
            }
        }
        Ok(items.into_iter())
    }
}
