//! Process-launch dispatch table for the services that live in a project root.
//!
//! The project ships two long-running entry points; which one a container
//! starts is decided by a single `SERVICE` value.

use std::fmt;
use std::path::Path;
use std::process::Command;
use std::str::FromStr;

use crate::error::CoreError;

/// Environment variable consulted when no service is given explicitly.
pub const SERVICE_ENV: &str = "SERVICE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Service {
    /// Chat bot process.
    #[default]
    Bot,
    /// Web admin panel.
    Admin,
}

impl Service {
    /// Script plus arguments handed to the interpreter.
    pub fn entrypoint(&self) -> &'static [&'static str] {
        match self {
            Service::Bot => &["main.py"],
            Service::Admin => &["admin_panel.py", "--host", "0.0.0.0", "--port", "5000"],
        }
    }

    /// Build the launch command, run from `root`.
    pub fn command(&self, python: &str, root: &Path) -> Command {
        let mut cmd = Command::new(python);
        cmd.args(self.entrypoint()).current_dir(root);
        cmd
    }

    /// Resolve from an explicit value, else `$SERVICE`, else [`Service::Bot`].
    pub fn from_env_or(explicit: Option<&str>) -> Result<Self, CoreError> {
        match explicit {
            Some(s) => s.parse(),
            None => match std::env::var(SERVICE_ENV) {
                Ok(s) if !s.trim().is_empty() => s.parse(),
                _ => Ok(Service::default()),
            },
        }
    }
}

impl FromStr for Service {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bot" => Ok(Service::Bot),
            "admin" => Ok(Service::Admin),
            other => Err(CoreError::UnknownService(other.to_string())),
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::Bot => write!(f, "bot"),
            Service::Admin => write!(f, "admin"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("bot".parse::<Service>().unwrap(), Service::Bot);
        assert_eq!("ADMIN".parse::<Service>().unwrap(), Service::Admin);
        assert_eq!(" Admin ".parse::<Service>().unwrap(), Service::Admin);
    }

    #[test]
    fn unknown_service_names_the_value() {
        let err = "worker".parse::<Service>().unwrap_err();
        assert!(err.to_string().contains("worker"));
    }

    #[test]
    fn explicit_value_wins() {
        assert_eq!(Service::from_env_or(Some("admin")).unwrap(), Service::Admin);
    }

    #[test]
    fn entrypoints_differ_per_service() {
        assert_eq!(Service::Bot.entrypoint(), &["main.py"]);
        assert_eq!(Service::Admin.entrypoint()[0], "admin_panel.py");
    }

    #[test]
    fn command_runs_in_root() {
        let cmd = Service::Admin.command("python3", Path::new("/srv/app"));
        assert_eq!(cmd.get_program(), "python3");
        assert_eq!(cmd.get_current_dir(), Some(Path::new("/srv/app")));
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args[0], "admin_panel.py");
    }
}
