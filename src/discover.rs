use crate::error::Result;
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Directories never searched for repositories.
pub fn should_be_ignored(name: &str) -> bool {
    matches!(name, "vendor" | "node_modules" | "venv")
}

/// Absolute paths of every repository under `root`, `root` included.
pub fn discover<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>> {
    let walker = WalkBuilder::new(root.as_ref())
        .standard_filters(false)
        .follow_links(false)
        .filter_entry(|entry| {
            if entry.depth() == 0 {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            name != ".git" && !should_be_ignored(&name)
        })
        .build();

    let mut repos = Vec::new();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_some_and(|t| t.is_dir()) {
            continue;
        }
        if entry.path().join(".git").exists() {
            let path = fs::canonicalize(entry.path())?;
            info!(action = "discover", component = "discovery", path = ?path, "Repository found");
            repos.push(path);
        }
    }
    Ok(repos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn fake_repo(path: &Path) {
        fs::create_dir_all(path.join(".git")).unwrap();
    }

    #[test]
    fn ignores_dependency_folders() {
        assert!(should_be_ignored("node_modules"));
        assert!(should_be_ignored("venv"));
        assert!(should_be_ignored("vendor"));
        assert!(!should_be_ignored("tests"));
        assert!(!should_be_ignored("src"));
    }

    #[test]
    fn finds_nested_repositories() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fake_repo(&root.join("one"));
        fake_repo(&root.join("group").join("two"));
        fake_repo(&root.join("one").join("sub"));
        fake_repo(&root.join("node_modules").join("dep"));
        fs::create_dir_all(root.join("plain")).unwrap();

        let mut found = discover(root).unwrap();
        found.sort();

        let base = fs::canonicalize(root).unwrap();
        let mut expected = vec![
            base.join("one"),
            base.join("group").join("two"),
            base.join("one").join("sub"),
        ];
        expected.sort();
        assert_eq!(found, expected);
    }

    #[test]
    fn root_can_be_a_repository() {
        let dir = tempdir().unwrap();
        fake_repo(dir.path());

        let found = discover(dir.path()).unwrap();
        assert_eq!(found, vec![fs::canonicalize(dir.path()).unwrap()]);
    }
}
