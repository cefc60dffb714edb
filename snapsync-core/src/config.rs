//! `snapsync.yaml` — explicit configuration for both components.
//!
//! # Resolution order
//!
//! ```text
//! CLI flag  >  snapsync.yaml  >  built-in default
//! ```
//!
//! Every field is optional in YAML. A root without `snapsync.yaml` behaves as
//! if the file contained `{}`.
//!
//! # API pattern
//!
//! - `load_at(root)` — looks for `<root>/snapsync.yaml`, defaults when absent
//! - `load_file(path)` — explicit file; absence is an error

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{io_err, CoreError};
use crate::root::is_contained_relative;

pub const CONFIG_FILE_NAME: &str = "snapsync.yaml";

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct SnapConfig {
    pub data: DataConfig,
    pub code: CodeConfig,
    pub launch: LaunchConfig,
}

/// Archiver settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    /// Directory under the root that receives archives.
    pub backup_dir: String,
    /// Archive file-name prefix: `<prefix>-<YYYYMMDD-HHMM>.tar.gz`.
    pub prefix: String,
    /// Root-relative paths to snapshot. Missing entries are skipped.
    pub include: Vec<String>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            backup_dir: "backups".to_string(),
            prefix: "backup".to_string(),
            include: ["data", "db", "models", "logs", ".env"]
                .map(String::from)
                .to_vec(),
        }
    }
}

/// Sync-Pusher settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodeConfig {
    pub remote: String,
    pub branch: String,
    /// Root-relative glob patterns; a trailing `/` names a directory.
    pub include: Vec<String>,
}

impl Default for CodeConfig {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            branch: "main".to_string(),
            include: [
                "*.py",
                "*.md",
                "requirements.txt",
                "docker-compose*",
                "Dockerfile*",
                "scripts/",
                "modules/",
                "templates/",
                "static/",
                "examples/",
                ".gitignore",
                "env.example",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

/// Settings for `launch-service`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LaunchConfig {
    /// Interpreter used to start the service entry points.
    pub python: String,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            python: "python".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

/// `<root>/snapsync.yaml` — pure, no I/O.
pub fn config_path_at(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE_NAME)
}

/// Load `<root>/snapsync.yaml`, or defaults when the file is absent.
pub fn load_at(root: &Path) -> Result<SnapConfig, CoreError> {
    let path = config_path_at(root);
    if !path.exists() {
        return Ok(SnapConfig::default());
    }
    load_file(&path)
}

/// Load an explicit config file. Returns [`CoreError::ConfigNotFound`] if absent,
/// [`CoreError::ConfigParse`] (with path + line context) if malformed.
///
/// Values are not validated here; each command validates its own section
/// after command-line overrides are applied.
pub fn load_file(path: &Path) -> Result<SnapConfig, CoreError> {
    if !path.exists() {
        return Err(CoreError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    // An empty file deserialises to unit, not a mapping.
    if contents.trim().is_empty() {
        return Ok(SnapConfig::default());
    }
    serde_yaml::from_str(&contents).map_err(|e| CoreError::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

impl DataConfig {
    pub fn validate(&self) -> Result<(), CoreError> {
        if !is_contained_relative(&self.backup_dir) {
            return Err(CoreError::InvalidConfig(format!(
                "data.backup_dir must be a relative path inside the root, got '{}'",
                self.backup_dir
            )));
        }
        if self.prefix.is_empty() || self.prefix.contains(['/', '\\']) {
            return Err(CoreError::InvalidConfig(format!(
                "data.prefix must be a non-empty file-name fragment, got '{}'",
                self.prefix
            )));
        }
        if self.include.is_empty() {
            return Err(CoreError::InvalidConfig(
                "data.include must name at least one path".to_string(),
            ));
        }
        Ok(())
    }
}

impl CodeConfig {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.remote.trim().is_empty() || self.branch.trim().is_empty() {
            return Err(CoreError::InvalidConfig(
                "code.remote and code.branch must be non-empty".to_string(),
            ));
        }
        if self.include.is_empty() {
            return Err(CoreError::InvalidConfig(
                "code.include must name at least one pattern".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_allow_lists() {
        let cfg = SnapConfig::default();
        assert_eq!(cfg.data.backup_dir, "backups");
        assert_eq!(cfg.data.prefix, "backup");
        assert_eq!(cfg.data.include, vec!["data", "db", "models", "logs", ".env"]);
        assert_eq!(cfg.code.remote, "origin");
        assert_eq!(cfg.code.branch, "main");
        assert!(cfg.code.include.contains(&"docker-compose*".to_string()));
        assert!(cfg.code.include.contains(&"scripts/".to_string()));
        assert_eq!(cfg.launch.python, "python");
        cfg.data.validate().expect("data defaults are valid");
        cfg.code.validate().expect("code defaults are valid");
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let cfg: SnapConfig = serde_yaml::from_str("code:\n  branch: release\n").unwrap();
        assert_eq!(cfg.code.branch, "release");
        assert_eq!(cfg.code.remote, "origin");
        assert_eq!(cfg.data, DataConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = serde_yaml::from_str::<SnapConfig>("data:\n  retention: 7\n").unwrap_err();
        assert!(err.to_string().contains("retention"), "got: {err}");
    }

    #[test]
    fn escaping_backup_dir_is_invalid() {
        let data = DataConfig {
            backup_dir: "../elsewhere".to_string(),
            ..DataConfig::default()
        };
        assert!(matches!(data.validate(), Err(CoreError::InvalidConfig(_))));
    }

    #[test]
    fn prefix_with_separator_is_invalid() {
        let data = DataConfig {
            prefix: "a/b".to_string(),
            ..DataConfig::default()
        };
        assert!(data.validate().is_err());
    }

    #[test]
    fn empty_code_include_is_invalid() {
        let code = CodeConfig {
            include: vec![],
            ..CodeConfig::default()
        };
        assert!(matches!(code.validate(), Err(CoreError::InvalidConfig(_))));
    }
}
