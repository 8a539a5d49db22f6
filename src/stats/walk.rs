use super::progress::ScanProgress;
use super::result::StatsResult;
use crate::error::Result;
use crate::filter::PathFilter;
use crate::git::LogSource;
use crate::ledger::ContributionLedger;
use crate::model::CommitRecord;
use clap::ValueEnum;
use rayon::prelude::*;
use std::path::Path;
use tracing::debug;

/// How the file stats of one commit reach the ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LedgerMode {
    /// One parallel task per file stat, joined before the next commit.
    #[default]
    PerFile,
    /// All file stats of a commit under a single lock.
    Sequential,
}

/// Comma-separated list of emails (entries containing `@`) and author names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorFilter {
    emails: Vec<String>,
    names: Vec<String>,
}

impl AuthorFilter {
    /// `None` when the list holds no entry.
    pub fn parse(list: &str) -> Option<Self> {
        let (emails, names): (Vec<String>, Vec<String>) = list
            .split(',')
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(str::to_string)
            .partition(|u| u.contains('@'));

        if emails.is_empty() && names.is_empty() {
            None
        } else {
            Some(Self { emails, names })
        }
    }

    pub fn matches(&self, name: &str, email: &str) -> bool {
        self.emails.iter().any(|e| e == email) || self.names.iter().any(|n| n == name)
    }
}

/// Walks the history of one repository into a [`StatsResult`].
pub struct RepositoryWalker<'a, S> {
    source: &'a S,
    paths: &'a PathFilter,
    authors: Option<&'a AuthorFilter>,
    mode: LedgerMode,
    progress: &'a ScanProgress,
}

impl<'a, S: LogSource> RepositoryWalker<'a, S> {
    pub fn new(
        source: &'a S,
        paths: &'a PathFilter,
        authors: Option<&'a AuthorFilter>,
        mode: LedgerMode,
        progress: &'a ScanProgress,
    ) -> Self {
        Self {
            source,
            paths,
            authors,
            mode,
            progress,
        }
    }

    pub fn walk(&self, repo_path: &Path, result: &mut StatsResult) -> Result<()> {
        let Some(window) = result.window else {
            return Ok(());
        };

        let mut seen = 0u64;
        let mut counted = 0u64;
        for commit in self.source.log(repo_path, window.begin, window.end)? {
            let commit = commit?;
            seen += 1;
            self.progress.inc();

            let Some(index) = window.day_offset(commit.timestamp) else {
                continue;
            };
            if let Some(authors) = self.authors {
                if !authors.matches(&commit.author_name, &commit.author_email) {
                    continue;
                }
            }

            self.record_lines(&result.ledger, &commit);
            if result.record_commit(index, commit.timestamp) {
                counted += 1;
            }
        }

        debug!(action = "walk", component = "walker", path = ?repo_path, seen, counted, "Repository walked");
        Ok(())
    }

    fn record_lines(&self, ledger: &ContributionLedger, commit: &CommitRecord) {
        let paths = self.paths;
        let author = commit.author_name.as_str();
        match self.mode {
            LedgerMode::PerFile => {
                commit
                    .file_stats
                    .par_iter()
                    .filter(|stat| paths.keep(&stat.path))
                    .for_each(|stat| {
                        ledger.add_contribution(author, stat.additions, stat.deletions);
                    });
            }
            LedgerMode::Sequential => ledger.add_contributions(
                author,
                commit
                    .file_stats
                    .iter()
                    .filter(|stat| paths.keep(&stat.path))
                    .map(|stat| (stat.additions, stat.deletions)),
            ),
        }
    }
}
