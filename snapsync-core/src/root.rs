//! The single directory every backup and sync is derived from.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::CoreError;

/// Canonical, absolute path to an existing project directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectRoot(PathBuf);

impl ProjectRoot {
    /// Canonicalise `path` and check that it names a directory.
    ///
    /// Returns [`CoreError::MissingProjectRoot`] when the path does not exist
    /// or is a regular file.
    pub fn resolve(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let missing = || CoreError::MissingProjectRoot {
            path: path.to_path_buf(),
        };
        let canonical = path.canonicalize().map_err(|_| missing())?;
        if !canonical.is_dir() {
            return Err(missing());
        }
        Ok(Self(canonical))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    pub fn join(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.0.join(rel)
    }

    /// True if the directory is still present. Roots can vanish between
    /// resolution and use.
    pub fn exists(&self) -> bool {
        self.0.is_dir()
    }
}

impl AsRef<Path> for ProjectRoot {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for ProjectRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.display().fmt(f)
    }
}

/// Reject entries that would escape the root: absolute paths and `..`.
pub fn is_contained_relative(entry: &str) -> bool {
    let p = Path::new(entry);
    !entry.is_empty()
        && p.is_relative()
        && p
            .components()
            .all(|c| !matches!(c, std::path::Component::ParentDir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn resolves_existing_directory_to_absolute() {
        let tmp = TempDir::new().unwrap();
        let root = ProjectRoot::resolve(tmp.path()).unwrap();
        assert!(root.path().is_absolute());
        assert!(root.exists());
    }

    #[test]
    fn missing_directory_is_missing_project_root() {
        let tmp = TempDir::new().unwrap();
        let err = ProjectRoot::resolve(tmp.path().join("nope")).unwrap_err();
        assert!(matches!(err, CoreError::MissingProjectRoot { .. }), "got: {err}");
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn regular_file_is_not_a_root() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();
        let err = ProjectRoot::resolve(&file).unwrap_err();
        assert!(matches!(err, CoreError::MissingProjectRoot { .. }));
    }

    #[test]
    fn contained_relative_entries() {
        assert!(is_contained_relative("data"));
        assert!(is_contained_relative(".env"));
        assert!(is_contained_relative("db/chroma"));
        assert!(!is_contained_relative(""));
        assert!(!is_contained_relative("../outside"));
        assert!(!is_contained_relative("data/../../etc"));
        assert!(!is_contained_relative("/etc/passwd"));
    }
}
