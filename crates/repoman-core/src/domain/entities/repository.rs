//! Repository handle and branch listing.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Name of the reserved subdirectory that marks a git working tree.
pub const REPOSITORY_MARKER: &str = ".git";

/// Identifies a working directory believed to contain a repository.
///
/// Invariant: the path is absolute. Relative input is anchored to the
/// current directory at construction; the directory itself does not need to
/// exist until something other than initialization touches it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryHandle {
    root: PathBuf,
}

impl RepositoryHandle {
    /// Create a handle for `path`.
    ///
    /// Relative paths are joined onto `std::env::current_dir()`. If the
    /// current directory cannot be determined the path is kept as given.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let root = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(path))
                .unwrap_or_else(|_| path.to_path_buf())
        };
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of the repository marker directory.
    pub fn marker_path(&self) -> PathBuf {
        self.root.join(REPOSITORY_MARKER)
    }

    /// Resolve a caller-supplied path against the repository root.
    ///
    /// Absolute paths are returned unchanged.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    /// Express `path` relative to the root when it lies underneath it.
    pub fn relativize<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }
}

impl fmt::Display for RepositoryHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root.display())
    }
}

/// Branches of a repository, current branch first.
///
/// The remaining branches keep the order the tool printed them in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BranchList {
    branches: Vec<String>,
    #[serde(skip)]
    has_current: bool,
}

impl BranchList {
    /// Parse line-oriented `git branch` output.
    ///
    /// Lines are trimmed and blanks dropped. The line carrying the `*`
    /// indicator is the checked-out branch; its marker is stripped and it is
    /// moved to the front.
    pub fn parse(raw: &str) -> Self {
        let mut current = None;
        let mut others = Vec::new();

        for line in raw.lines().map(str::trim).filter(|l| !l.is_empty()) {
            match line.strip_prefix('*') {
                Some(name) if current.is_none() => current = Some(name.trim_start().to_string()),
                _ => others.push(line.to_string()),
            }
        }

        let has_current = current.is_some();
        let branches = current.into_iter().chain(others).collect();
        Self {
            branches,
            has_current,
        }
    }

    /// The checked-out branch, if the tool reported one.
    pub fn current(&self) -> Option<&str> {
        if self.has_current {
            self.branches.first().map(String::as_str)
        } else {
            None
        }
    }

    pub fn names(&self) -> &[String] {
        &self.branches
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.branches.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.branches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_branch_moves_to_front() {
        let list = BranchList::parse("  develop\n* main\n  feature\n");
        assert_eq!(list.names(), ["main", "develop", "feature"]);
        assert_eq!(list.current(), Some("main"));
    }

    #[test]
    fn marker_is_stripped_when_already_first() {
        let list = BranchList::parse("* main\n  feature\n");
        assert_eq!(list.into_vec(), vec!["main", "feature"]);
    }

    #[test]
    fn native_order_is_kept_for_the_rest() {
        let list = BranchList::parse("  zeta\n  alpha\n* mid\n  beta\n");
        assert_eq!(list.names(), ["mid", "zeta", "alpha", "beta"]);
    }

    #[test]
    fn no_current_branch() {
        let list = BranchList::parse("  a\n  b\n");
        assert_eq!(list.current(), None);
        assert_eq!(list.names(), ["a", "b"]);
    }

    #[test]
    fn blank_output_is_empty() {
        let list = BranchList::parse("\n   \n");
        assert!(list.is_empty());
        assert_eq!(list.current(), None);
    }

    #[test]
    fn detached_head_is_reported_as_current() {
        let list = BranchList::parse("* (HEAD detached at 1a2b3c)\n  main\n");
        assert_eq!(list.current(), Some("(HEAD detached at 1a2b3c)"));
    }

    #[test]
    fn handle_is_absolute() {
        let handle = RepositoryHandle::new("some/relative/dir");
        assert!(handle.root().is_absolute());
        assert!(handle.root().ends_with("some/relative/dir"));
    }

    #[test]
    fn marker_lives_under_root() {
        let handle = RepositoryHandle::new("/tmp/project");
        assert_eq!(handle.marker_path(), PathBuf::from("/tmp/project/.git"));
    }

    #[test]
    fn relativize_strips_root() {
        let handle = RepositoryHandle::new("/tmp/project");
        let resolved = handle.resolve("src/main.rs");
        assert_eq!(handle.relativize(&resolved), Path::new("src/main.rs"));
        assert_eq!(
            handle.relativize(Path::new("/elsewhere/file")),
            Path::new("/elsewhere/file")
        );
    }
}
