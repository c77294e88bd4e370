//! Commits and pushes the relocated files with git.
//!
//! The sequence is fixed: stage everything, check the porcelain status, commit,
//! push. A clean status after staging ends the sequence without error. Nothing
//! is rolled back: if the push fails the local commit stays.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Commit message used for every publish.
pub const COMMIT_MESSAGE: &str = "Auto update of solved problems";

/// One version-control step, used to tell failures apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Stage,
    Status,
    Commit,
    Push,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Stage => "add",
            Step::Status => "status",
            Step::Commit => "commit",
            Step::Push => "push",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
pub enum PublishError {
    /// The git binary could not be started.
    Spawn { step: Step, source: std::io::Error },
    /// git ran and exited unsuccessfully.
    CommandFailed {
        step: Step,
        code: Option<i32>,
        stderr: String,
    },
}

impl fmt::Display for PublishError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn { step, source } => write!(f, "Could not run git {}: {}", step, source),
            Self::CommandFailed { step, code, stderr } => {
                let code = code.map_or_else(|| "signal".to_string(), |c| c.to_string());
                write!(f, "git {} failed (exit {})", step, code)?;
                if !stderr.trim().is_empty() {
                    write!(f, ": {}", stderr.trim())?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for PublishError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Spawn { source, .. } => Some(source),
            Self::CommandFailed { .. } => None,
        }
    }
}

pub type PublishResult<T> = Result<T, PublishError>;

/// The version-control operations the publisher needs.
pub trait VersionControl {
    /// Stage every working-tree change.
    fn stage_all(&self) -> PublishResult<()>;
    /// Machine-readable status, one line per changed path; empty when clean.
    fn status_porcelain(&self) -> PublishResult<String>;
    fn commit(&self, message: &str) -> PublishResult<()>;
    fn push(&self, remote: &str, branch: &str) -> PublishResult<()>;
}

/// [`VersionControl`] backed by the `git` command line.
pub struct GitCli {
    repo_root: PathBuf,
    program: PathBuf,
}

impl GitCli {
    pub fn new(repo_root: &Path) -> Self {
        Self::with_program(repo_root, Path::new("git"))
    }

    /// Uses `program` instead of the `git` found on `PATH`.
    pub fn with_program(repo_root: &Path, program: &Path) -> Self {
        Self {
            repo_root: repo_root.to_path_buf(),
            program: program.to_path_buf(),
        }
    }

    /// Runs git and returns its output whatever the exit status.
    fn spawn(&self, step: Step, args: &[&str]) -> PublishResult<Output> {
        tracing::debug!(?args, cwd = %self.repo_root.display(), "running git");
        Command::new(&self.program)
            .args(args)
            .current_dir(&self.repo_root)
            .output()
            .map_err(|e| PublishError::Spawn { step, source: e })
    }

    /// Runs git and fails on a non-zero exit.
    fn run(&self, step: Step, args: &[&str]) -> PublishResult<Output> {
        let output = self.spawn(step, args)?;

        if !output.status.success() {
            return Err(PublishError::CommandFailed {
                step,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(output)
    }
}

impl VersionControl for GitCli {
    fn stage_all(&self) -> PublishResult<()> {
        self.run(Step::Stage, &["add", "."]).map(|_| ())
    }

    /// Only stdout is read; a failing status with no output reads as clean.
    fn status_porcelain(&self) -> PublishResult<String> {
        let output = self.spawn(Step::Status, &["status", "--porcelain"])?;
        if !output.status.success() {
            tracing::warn!(
                code = ?output.status.code(),
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "git status exited unsuccessfully"
            );
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn commit(&self, message: &str) -> PublishResult<()> {
        self.run(Step::Commit, &["commit", "-m", message]).map(|_| ())
    }

    fn push(&self, remote: &str, branch: &str) -> PublishResult<()> {
        self.run(Step::Push, &["push", remote, branch]).map(|_| ())
    }
}

/// How a publish attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// Status was clean after staging; nothing was committed.
    NothingToCommit,
    /// Committed, push disabled.
    Committed,
    /// Committed and pushed.
    Pushed,
}

pub struct Publisher<'a> {
    vcs: &'a dyn VersionControl,
    remote: String,
    branch: String,
    push: bool,
}

impl<'a> Publisher<'a> {
    pub fn new(vcs: &'a dyn VersionControl, remote: &str, branch: &str) -> Self {
        Self {
            vcs,
            remote: remote.to_string(),
            branch: branch.to_string(),
            push: true,
        }
    }

    /// Commit without pushing when `push` is false.
    pub fn with_push(mut self, push: bool) -> Self {
        self.push = push;
        self
    }

    /// Runs stage, status, commit and push in order.
    ///
    /// `before_push` is called right before the push starts, so callers can
    /// show progress for the one step that talks to the network.
    pub fn publish_with(&self, before_push: impl FnOnce()) -> PublishResult<PublishOutcome> {
        self.vcs.stage_all()?;

        let status = self.vcs.status_porcelain()?;
        if status.trim().is_empty() {
            tracing::info!("working tree clean after staging, nothing to commit");
            return Ok(PublishOutcome::NothingToCommit);
        }
        tracing::debug!(changed = status.lines().count(), "changes staged");

        self.vcs.commit(COMMIT_MESSAGE)?;

        if !self.push {
            return Ok(PublishOutcome::Committed);
        }

        before_push();
        self.vcs.push(&self.remote, &self.branch)?;
        Ok(PublishOutcome::Pushed)
    }

    pub fn publish(&self) -> PublishResult<PublishOutcome> {
        self.publish_with(|| {})
    }
}
