use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ContribError>;

#[derive(Error, Debug)]
pub enum ContribError {
    #[error("Invalid delta '{0}': use the format <int>[y/m/w/d]")]
    InvalidDelta(String),
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("Invalid duration of {0} weeks: at most {max} weeks can be scanned", max = crate::window::MAX_DURATION_WEEKS)]
    InvalidDuration(u32),
    #[error("Cannot get stats from folder (not a repository): {}: {source}", path.display())]
    NotARepository {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("Error on git log iteration in {}: {source}", path.display())]
    LogIteration {
        path: PathBuf,
        #[source]
        source: GitError,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Discovery error: {0}")]
    Discovery(#[from] ignore::Error),
}

/// Failures raised while reading history out of an opened repository.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Other: {0}")]
    Other(String),
    #[error("Object find error: {0}")]
    ObjectFind(#[from] Box<gix::object::find::existing::Error>),
    #[error("Commit error: {0}")]
    Commit(#[from] Box<gix::object::commit::Error>),
    #[error("Head peel error: {0}")]
    HeadPeel(#[from] Box<gix::head::peel::to_commit::Error>),
    #[error("Reference find error: {0}")]
    RefFind(#[from] Box<gix::reference::find::existing::Error>),
    #[error("Object find with conversion error: {0}")]
    ObjectFindConv(#[from] Box<gix::object::find::existing::with_conversion::Error>),
    #[error("Object decode error: {0}")]
    ObjectDecode(#[from] Box<gix::objs::decode::Error>),
    #[error("Diff tree to tree error: {0}")]
    DiffTreeToTree(#[from] Box<gix::repository::diff_tree_to_tree::Error>),
}

// Manual From implementations for unboxed to boxed conversions
impl From<gix::object::find::existing::Error> for GitError {
    fn from(err: gix::object::find::existing::Error) -> Self {
        GitError::ObjectFind(Box::new(err))
    }
}

impl From<gix::object::commit::Error> for GitError {
    fn from(err: gix::object::commit::Error) -> Self {
        GitError::Commit(Box::new(err))
    }
}

impl From<gix::head::peel::to_commit::Error> for GitError {
    fn from(err: gix::head::peel::to_commit::Error) -> Self {
        GitError::HeadPeel(Box::new(err))
    }
}

impl From<gix::reference::find::existing::Error> for GitError {
    fn from(err: gix::reference::find::existing::Error) -> Self {
        GitError::RefFind(Box::new(err))
    }
}

impl From<gix::object::find::existing::with_conversion::Error> for GitError {
    fn from(err: gix::object::find::existing::with_conversion::Error) -> Self {
        GitError::ObjectFindConv(Box::new(err))
    }
}

impl From<gix::objs::decode::Error> for GitError {
    fn from(err: gix::objs::decode::Error) -> Self {
        GitError::ObjectDecode(Box::new(err))
    }
}

impl From<gix::repository::diff_tree_to_tree::Error> for GitError {
    fn from(err: gix::repository::diff_tree_to_tree::Error) -> Self {
        GitError::DiffTreeToTree(Box::new(err))
    }
}
