//! Allow-list resolution for staging.
//!
//! Semantics, independent of any shell or locale:
//!
//! - patterns are matched relative to the project root, case-sensitively;
//! - `*`, `?` and `[...]` never match `/`;
//! - a leading `.` in a file name must be matched literally (`*.md` skips
//!   `.notes.md`);
//! - a trailing `/` restricts the pattern to directories;
//! - a pattern matching nothing contributes nothing and is not an error.
//!
//! The result is sorted and de-duplicated.

use std::collections::BTreeSet;
use std::path::Path;

use glob::{MatchOptions, Pattern};
use snapsync_core::root::is_contained_relative;

use crate::error::SyncError;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Expand `patterns` under `root` into root-relative paths.
pub fn resolve(root: &Path, patterns: &[String]) -> Result<Vec<String>, SyncError> {
    let root_str = root.to_str().ok_or_else(|| SyncError::StagingFailure {
        detail: format!("project root is not valid UTF-8: {}", root.display()),
    })?;
    let escaped_root = Pattern::escape(root_str);

    let mut resolved = BTreeSet::new();
    for raw in patterns {
        let (pattern, dirs_only) = match raw.strip_suffix('/') {
            Some(stripped) => (stripped, true),
            None => (raw.as_str(), false),
        };
        if !is_contained_relative(pattern) {
            return Err(SyncError::StagingFailure {
                detail: format!("pattern '{raw}' must be relative to the project root"),
            });
        }

        let full = format!("{escaped_root}/{pattern}");
        let paths = glob::glob_with(&full, MATCH_OPTIONS).map_err(|e| {
            SyncError::StagingFailure {
                detail: format!("invalid pattern '{raw}': {e}"),
            }
        })?;

        let mut matched = 0usize;
        for entry in paths {
            let path = entry.map_err(|e| SyncError::StagingFailure {
                detail: format!("cannot read {}: {}", e.path().display(), e.error()),
            })?;
            if dirs_only && !path.is_dir() {
                continue;
            }
            let Ok(rel) = path.strip_prefix(root) else {
                continue;
            };
            resolved.insert(rel.to_string_lossy().into_owned());
            matched += 1;
        }
        tracing::debug!("pattern '{raw}' matched {matched} path(s)");
    }
    Ok(resolved.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn pats(p: &[&str]) -> Vec<String> {
        p.iter().map(|s| s.to_string()).collect()
    }

    fn project() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        for f in [
            "main.py",
            "config.py",
            "README.md",
            ".notes.md",
            "requirements.txt",
            "Dockerfile",
            "Dockerfile.admin",
            ".gitignore",
        ] {
            fs::write(root.join(f), f).unwrap();
        }
        fs::create_dir_all(root.join("modules")).unwrap();
        fs::write(root.join("modules/bot.py"), "x").unwrap();
        fs::write(root.join("scripts"), "a file, not a dir").unwrap();
        tmp
    }

    #[test]
    fn star_matches_top_level_only() {
        let tmp = project();
        let got = resolve(tmp.path(), &pats(&["*.py"])).unwrap();
        assert_eq!(got, vec!["config.py", "main.py"]);
    }

    #[test]
    fn leading_dot_requires_literal_match() {
        let tmp = project();
        let got = resolve(tmp.path(), &pats(&["*.md", ".gitignore"])).unwrap();
        assert_eq!(got, vec![".gitignore", "README.md"]);
    }

    #[test]
    fn zero_matches_is_not_an_error() {
        let tmp = project();
        let got = resolve(tmp.path(), &pats(&["docker-compose*", "static/"])).unwrap();
        assert!(got.is_empty());
    }

    #[test]
    fn trailing_slash_selects_directories_only() {
        let tmp = project();
        let got = resolve(tmp.path(), &pats(&["modules/", "scripts/"])).unwrap();
        assert_eq!(got, vec!["modules"]);
    }

    #[test]
    fn overlapping_patterns_are_deduplicated() {
        let tmp = project();
        let got = resolve(tmp.path(), &pats(&["Dockerfile*", "Dockerfile"])).unwrap();
        assert_eq!(got, vec!["Dockerfile", "Dockerfile.admin"]);
    }

    #[test]
    fn invalid_glob_is_staging_failure() {
        let tmp = project();
        let err = resolve(tmp.path(), &pats(&["[unclosed"])).unwrap_err();
        assert_eq!(err.kind(), "staging_failure");
    }

    #[test]
    fn escaping_pattern_is_staging_failure() {
        let tmp = project();
        let err = resolve(tmp.path(), &pats(&["../*.py"])).unwrap_err();
        assert_eq!(err.kind(), "staging_failure");
    }

    #[test]
    fn root_with_glob_metacharacters_is_escaped() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("proj[1]");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("app.py"), "x").unwrap();
        assert_eq!(resolve(&root, &pats(&["*.py"])).unwrap(), vec!["app.py"]);
    }
}
