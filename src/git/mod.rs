pub mod repo;
pub mod source;

pub use repo::{is_repository, CommitLog, GitRepo};
pub use source::{GitLogSource, LogSource, MemorySource};
