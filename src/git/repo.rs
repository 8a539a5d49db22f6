use crate::error::{ContribError, GitError, Result};
use crate::model::{CommitRecord, FileStat};
use chrono::{DateTime, FixedOffset};
use gix::object::tree::diff::ChangeDetached;
use gix::{ObjectId, Repository};
use similar::{ChangeTag, TextDiff};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open the repository whose work tree (or git dir) is exactly `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let requested = path.as_ref();
        let repo = gix::open(requested).map_err(|e| ContribError::NotARepository {
            path: requested.to_path_buf(),
            source: Box::new(e),
        })?;
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();

        Ok(Self { repo, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lazily walk every commit reachable from `HEAD` whose author time lies in
    /// `[since, until]`.
    pub fn log(self, since: DateTime<FixedOffset>, until: DateTime<FixedOffset>) -> Result<CommitLog> {
        let head_id = self.head_id().map_err(|source| ContribError::LogIteration {
            path: self.path.clone(),
            source,
        })?;

        Ok(CommitLog {
            repo: self,
            since,
            until,
            seen: HashSet::new(),
            stack: vec![head_id],
            failed: false,
        })
    }

    fn head_id(&self) -> std::result::Result<ObjectId, GitError> {
        let mut head = self.repo.head()?;
        let head_commit = head.peel_to_commit_in_place()?;
        Ok(head_commit.id)
    }

    fn file_stats(
        &self,
        commit_tree: &gix::Tree<'_>,
        parent_id: Option<ObjectId>,
    ) -> std::result::Result<Vec<FileStat>, GitError> {
        let parent_tree = match parent_id {
            Some(id) => Some(self.repo.find_commit(id)?.tree()?),
            None => None,
        };

        let changes: Vec<ChangeDetached> =
            self.repo
                .diff_tree_to_tree(parent_tree.as_ref(), Some(commit_tree), None)?;

        let mut files = Vec::new();
        for change in changes {
            self.handle_change(change, &mut files)?;
        }
        Ok(files)
    }

    fn handle_change(
        &self,
        change: ChangeDetached,
        files: &mut Vec<FileStat>,
    ) -> std::result::Result<(), GitError> {
        let entry_mode = match &change {
            ChangeDetached::Addition { entry_mode, .. }
            | ChangeDetached::Deletion { entry_mode, .. }
            | ChangeDetached::Modification { entry_mode, .. }
            | ChangeDetached::Rewrite { entry_mode, .. } => *entry_mode,
        };
        // directories and submodule commits carry no lines
        if entry_mode.is_tree() || entry_mode.is_commit() {
            return Ok(());
        }

        match change {
            ChangeDetached::Addition { id, location, .. } => {
                let (added, _) = line_changes(&[], &self.blob(id)?);
                files.push(FileStat::new(location.to_string(), added, 0));
            }
            ChangeDetached::Deletion { id, location, .. } => {
                let (_, deleted) = line_changes(&self.blob(id)?, &[]);
                files.push(FileStat::new(location.to_string(), 0, deleted));
            }
            ChangeDetached::Modification {
                previous_id,
                id,
                location,
                ..
            } => {
                let (added, deleted) = line_changes(&self.blob(previous_id)?, &self.blob(id)?);
                files.push(FileStat::new(location.to_string(), added, deleted));
            }
            // counted without rename tracking: the whole old file leaves the
            // source path (unless copied) and the whole new file lands on the
            // destination
            ChangeDetached::Rewrite {
                source_id,
                id,
                source_location,
                location,
                copy,
                ..
            } => {
                if !copy {
                    let (_, deleted) = line_changes(&self.blob(source_id)?, &[]);
                    files.push(FileStat::new(source_location.to_string(), 0, deleted));
                }
                let (added, _) = line_changes(&[], &self.blob(id)?);
                files.push(FileStat::new(location.to_string(), added, 0));
            }
        }
        Ok(())
    }

    fn blob(&self, id: ObjectId) -> std::result::Result<Vec<u8>, GitError> {
        Ok(self.repo.find_object(id)?.detach().data)
    }
}

/// Lazy history walk produced by [`GitRepo::log`]. Stops after the first error.
pub struct CommitLog {
    repo: GitRepo,
    since: DateTime<FixedOffset>,
    until: DateTime<FixedOffset>,
    seen: HashSet<ObjectId>,
    stack: Vec<ObjectId>,
    failed: bool,
}

impl CommitLog {
    fn visit(&mut self, commit_id: ObjectId) -> std::result::Result<Option<CommitRecord>, GitError> {
        let commit = self.repo.repo.find_commit(commit_id)?;
        let author = commit.author()?;
        let time = author
            .time()
            .map_err(|e| GitError::InvalidDate(format!("Invalid author time: {e}")))?;
        let timestamp = to_datetime(time.seconds, time.offset)?;

        let parents: Vec<ObjectId> = commit.parent_ids().map(|id| id.into()).collect();
        self.stack.extend(parents.iter().rev());

        if timestamp < self.since || timestamp > self.until {
            return Ok(None);
        }

        let author_name = author.name.to_string();
        let author_email = author.email.to_string();
        let tree = commit.tree()?;
        let file_stats = self.repo.file_stats(&tree, parents.first().copied())?;

        Ok(Some(CommitRecord {
            author_name,
            author_email,
            timestamp,
            file_stats,
        }))
    }
}

impl Iterator for CommitLog {
    type Item = Result<CommitRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        while let Some(commit_id) = self.stack.pop() {
            if !self.seen.insert(commit_id) {
                continue;
            }
            match self.visit(commit_id) {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => continue,
                Err(source) => {
                    self.failed = true;
                    return Some(Err(ContribError::LogIteration {
                        path: self.repo.path.clone(),
                        source,
                    }));
                }
            }
        }
        None
    }
}

pub fn is_repository<P: AsRef<Path>>(path: P) -> bool {
    gix::open(path.as_ref()).is_ok()
}

fn to_datetime(seconds: i64, offset: i32) -> std::result::Result<DateTime<FixedOffset>, GitError> {
    let offset = FixedOffset::east_opt(offset)
        .ok_or_else(|| GitError::InvalidDate(format!("Invalid offset: {offset}")))?;
    DateTime::from_timestamp(seconds, 0)
        .map(|utc| utc.with_timezone(&offset))
        .ok_or_else(|| GitError::InvalidDate(format!("Invalid timestamp: {seconds}")))
}

fn is_binary(data: &[u8]) -> bool {
    data.iter().take(8192).any(|&b| b == 0)
}

/// Lines added and deleted going from `old` to `new`. Binary content counts
/// as no lines.
fn line_changes(old: &[u8], new: &[u8]) -> (u64, u64) {
    if is_binary(old) || is_binary(new) {
        return (0, 0);
    }
    let old_text = String::from_utf8_lossy(old);
    let new_text = String::from_utf8_lossy(new);
    let diff = TextDiff::from_lines(old_text.as_ref(), new_text.as_ref());

    let mut added = 0;
    let mut deleted = 0;
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Insert => added += 1,
            ChangeTag::Delete => deleted += 1,
            ChangeTag::Equal => {}
        }
    }
    (added, deleted)
}
