use crate::error::Result;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::info;

/// File name of the watch list in the home directory.
pub const DEFAULT_FILE_NAME: &str = ".gitcontrib";

/// Repository paths to scan, one per line.
#[derive(Debug, Clone)]
pub struct WatchList {
    path: PathBuf,
}

impl WatchList {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is an empty list.
    pub fn load(&self) -> Result<Vec<PathBuf>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(PathBuf::from)
            .collect())
    }

    /// Adds the paths not listed yet, keeping first-insertion order.
    pub fn append(&self, paths: &[PathBuf]) -> Result<()> {
        let mut repos = self.load()?;
        let before = repos.len();
        for path in paths {
            if !repos.contains(path) {
                repos.push(path.clone());
            }
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let content = repos
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join("\n");
        fs::write(&self.path, content)?;

        info!(action = "append", component = "watch_list", path = ?self.path, added = repos.len() - before, "Watch list updated");
        Ok(())
    }
}
