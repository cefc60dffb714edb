//! The version-control seam and its `git` implementation.
//!
//! [`GitCli`] shells out to the system `git` binary from the project root.
//! Every invocation disables credential prompts and captures stdout/stderr so
//! failures carry git's own message.

use std::ffi::OsStr;
use std::fmt;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use thiserror::Error;
use tracing::{debug, instrument};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Full hex object id of a commit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommitId(pub String);

impl CommitId {
    /// First seven characters, for status lines.
    pub fn short(&self) -> &str {
        self.0.get(..7).unwrap_or(&self.0)
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for CommitId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Failure of a single client operation, before it is attributed to a sync step.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` failed ({status}): {stderr}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },
}

/// Operations a sync run needs from version control.
pub trait VcsClient {
    /// True if the project root lies inside a work tree.
    fn is_work_tree(&self) -> Result<bool, ClientError>;

    /// Stage root-relative `paths`, including deletions beneath directories.
    fn stage(&self, paths: &[String]) -> Result<(), ClientError>;

    /// Allow-listed paths whose index entry differs from `HEAD` (or from the
    /// empty tree on an unborn branch). Other staged entries are not reported.
    fn staged_paths(&self, paths: &[String]) -> Result<Vec<String>, ClientError>;

    /// Commit exactly `paths` and return the new `HEAD`. Anything else in the
    /// index stays staged and uncommitted.
    fn commit(&self, message: &str, paths: &[String]) -> Result<CommitId, ClientError>;

    /// Push `HEAD` to `branch` on `remote`.
    fn push(&self, remote: &str, branch: &str) -> Result<(), ClientError>;
}

// ---------------------------------------------------------------------------
// GitCli
// ---------------------------------------------------------------------------

/// [`VcsClient`] backed by the `git` binary.
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
    program: String,
    envs: Vec<(String, String)>,
}

impl GitCli {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
            program: "git".to_string(),
            envs: Vec::new(),
        }
    }

    /// Use a different `git` executable.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Extra environment for every `git` invocation.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    fn command<I, S>(&self, args: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = Command::new(&self.program);
        cmd.current_dir(&self.workdir)
            .args(args)
            .env("GIT_TERMINAL_PROMPT", "0")
            .envs(self.envs.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }

    fn output(&self, mut cmd: Command) -> Result<Output, ClientError> {
        debug!("spawning {:?}", cmd);
        cmd.output().map_err(|source| ClientError::Spawn {
            program: self.program.clone(),
            source,
        })
    }

    /// Run and require exit status 0.
    fn run<I, S>(&self, args: I) -> Result<Output, ClientError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let cmd = self.command(args);
        let label = describe(&cmd);
        let output = self.output(cmd)?;
        if !output.status.success() {
            return Err(failed(label, &output));
        }
        Ok(output)
    }

    /// Drop paths git would refuse to add because `.gitignore` excludes them.
    fn without_ignored(&self, paths: &[String]) -> Result<Vec<String>, ClientError> {
        let mut cmd = self.command(["check-ignore", "--"]);
        cmd.args(paths);
        let label = describe(&cmd);
        let output = self.output(cmd)?;
        // 0: some paths ignored, 1: none ignored.
        match output.status.code() {
            Some(0) => {
                let stdout = String::from_utf8_lossy(&output.stdout);
                let ignored: Vec<&str> = stdout.lines().map(str::trim).collect();
                for path in &ignored {
                    debug!("not staging ignored path: {path}");
                }
                Ok(paths
                    .iter()
                    .filter(|p| !ignored.contains(&p.as_str()))
                    .cloned()
                    .collect())
            }
            Some(1) => Ok(paths.to_vec()),
            _ => Err(failed(label, &output)),
        }
    }
}

impl VcsClient for GitCli {
    #[instrument(skip(self), fields(workdir = %self.workdir.display()))]
    fn is_work_tree(&self) -> Result<bool, ClientError> {
        let output = self.output(self.command(["rev-parse", "--is-inside-work-tree"]))?;
        Ok(output.status.success() && String::from_utf8_lossy(&output.stdout).trim() == "true")
    }

    #[instrument(skip(self, paths), fields(count = paths.len()))]
    fn stage(&self, paths: &[String]) -> Result<(), ClientError> {
        if paths.is_empty() {
            return Ok(());
        }
        let paths = self.without_ignored(paths)?;
        if paths.is_empty() {
            return Ok(());
        }
        let mut args: Vec<&str> = vec!["--literal-pathspecs", "add", "--all", "--"];
        args.extend(paths.iter().map(String::as_str));
        self.run(args)?;
        Ok(())
    }

    fn staged_paths(&self, paths: &[String]) -> Result<Vec<String>, ClientError> {
        if paths.is_empty() {
            return Ok(Vec::new());
        }
        let mut args: Vec<&str> = vec![
            "--literal-pathspecs",
            "diff",
            "--cached",
            "--name-only",
            "--relative",
            "-z",
            "--",
        ];
        args.extend(paths.iter().map(String::as_str));
        let output = self.run(args)?;
        Ok(output
            .stdout
            .split(|b| *b == 0)
            .filter(|name| !name.is_empty())
            .map(|name| String::from_utf8_lossy(name).into_owned())
            .collect())
    }

    #[instrument(skip(self, paths), fields(count = paths.len()))]
    fn commit(&self, message: &str, paths: &[String]) -> Result<CommitId, ClientError> {
        let mut args: Vec<&str> = vec![
            "--literal-pathspecs",
            "commit",
            "--quiet",
            "-m",
            message,
            "--",
        ];
        args.extend(paths.iter().map(String::as_str));
        self.run(args)?;
        let output = self.run(["rev-parse", "HEAD"])?;
        let id = String::from_utf8_lossy(&output.stdout).trim().to_string();
        debug!("created commit {id}");
        Ok(CommitId(id))
    }

    #[instrument(skip(self))]
    fn push(&self, remote: &str, branch: &str) -> Result<(), ClientError> {
        let refspec = format!("HEAD:refs/heads/{branch}");
        self.run(["push", "--quiet", remote, refspec.as_str()])?;
        Ok(())
    }
}

fn describe(cmd: &Command) -> String {
    let args: Vec<String> = cmd
        .get_args()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    format!("{} {}", cmd.get_program().to_string_lossy(), args.join(" "))
}

fn failed(command: String, output: &Output) -> ClientError {
    ClientError::Failed {
        command,
        status: output.status.to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_id_is_seven_chars() {
        let id = CommitId::from("0123456789abcdef0123456789abcdef01234567");
        assert_eq!(id.short(), "0123456");
        assert_eq!(CommitId::from("abc").short(), "abc");
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let git = GitCli::new(tmp.path()).with_program("snapsync-no-such-git-binary");
        let err = git.is_work_tree().unwrap_err();
        assert!(matches!(err, ClientError::Spawn { .. }), "got: {err}");
    }

    #[test]
    fn failed_error_includes_command_and_stderr() {
        let err = ClientError::Failed {
            command: "git push origin HEAD:refs/heads/main".to_string(),
            status: "exit status: 1".to_string(),
            stderr: "rejected".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("git push"));
        assert!(msg.contains("rejected"));
    }
}
