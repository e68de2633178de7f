//! System git backend
//!
//! Uses git plumbing commands for all operations:
//! - Safe subprocess execution (isolated environment)
//! - Structured argument lists, never shell strings
//! - Porcelain status parsing for the pending-changes check

use super::Vcs;
use crate::core::error::{EnvironmentError, PublishError, ResultExt, ShipError, ShipResult};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Git backend using the system git binary
pub struct SystemGit {
  /// Directory git commands run from
  repo_path: PathBuf,

  /// Working tree root reported by git
  work_tree: PathBuf,
}

impl SystemGit {
  /// Open a git repository
  ///
  /// One subprocess call; fails with `NotAGitWorkTree` when `path` is not
  /// inside a work tree.
  pub fn open(path: &Path) -> ShipResult<Self> {
    let output = Command::new("git")
      .arg("-C")
      .arg(path)
      .args(["rev-parse", "--show-toplevel"])
      .output()
      .context("Failed to execute git rev-parse")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("not a git repository") {
        return Err(ShipError::Environment(EnvironmentError::NotAGitWorkTree {
          path: path.to_path_buf(),
        }));
      }
      return Err(ShipError::message(format!("Failed to open git repository: {}", stderr)));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let work_tree = stdout.trim();

    Ok(Self {
      repo_path: path.to_path_buf(),
      work_tree: PathBuf::from(work_tree),
    })
  }

  /// Working tree root
  pub fn work_tree(&self) -> &Path {
    &self.work_tree
  }

  /// Create a safe git command with isolated environment
  ///
  /// - Sets working directory to repo path
  /// - Clears environment variables
  /// - Whitelists only PATH and HOME
  /// - Adds safe configuration overrides
  fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    cmd.arg("-C").arg(&self.repo_path);

    // Isolated environment (don't trust global hooks and helpers beyond
    // what push auth needs)
    cmd.env_clear();
    for var in ["PATH", "HOME", "SSH_AUTH_SOCK", "GIT_SSH_COMMAND"] {
      if let Ok(value) = std::env::var(var) {
        cmd.env(var, value);
      }
    }

    cmd.arg("-c").arg("protocol.version=2");
    cmd.arg("-c").arg("advice.detachedHead=false");
    cmd.arg("-c").arg("core.quotePath=false");

    cmd
  }

  fn run(&self, args: &[&str], what: &str) -> ShipResult<std::process::Output> {
    self.git_cmd().args(args).output().context(format!("Failed to run {}", what))
  }
}

impl Vcs for SystemGit {
  fn tag_exists(&self, tag: &str) -> ShipResult<bool> {
    // rev-parse --verify on the fully qualified ref avoids matching branches
    // or abbreviations that happen to share the name
    let output = self.run(
      &["rev-parse", "--verify", "--quiet", &format!("refs/tags/{}", tag)],
      "git rev-parse",
    )?;
    Ok(output.status.success())
  }

  fn has_pending_changes(&self) -> ShipResult<bool> {
    let output = self.run(&["status", "--porcelain"], "git status")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(ShipError::message(format!("git status failed: {}", stderr)));
    }

    Ok(!output.stdout.is_empty())
  }

  fn stage_all(&self) -> ShipResult<()> {
    let output = self.run(&["add", "-A"], "git add")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(ShipError::message(format!("git add failed: {}", stderr)));
    }

    Ok(())
  }

  fn commit(&self, message: &str) -> ShipResult<()> {
    let output = self.run(&["commit", "-m", message], "git commit")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      let stdout = String::from_utf8_lossy(&output.stdout);
      return Err(ShipError::Publish(PublishError::CommitFailed {
        stderr: if stderr.trim().is_empty() {
          stdout.trim().to_string()
        } else {
          stderr.trim().to_string()
        },
      }));
    }

    Ok(())
  }

  fn push(&self, remote: &str, branch: &str) -> ShipResult<()> {
    let output = self.run(&["push", remote, branch], "git push")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(ShipError::Publish(PublishError::PushFailed {
        remote: remote.to_string(),
        branch: branch.to_string(),
        reason: stderr.trim().to_string(),
      }));
    }

    Ok(())
  }

  fn current_branch(&self) -> ShipResult<String> {
    let output = self.run(&["rev-parse", "--abbrev-ref", "HEAD"], "git rev-parse")?;

    if !output.status.success() {
      return Ok("HEAD".to_string()); // Detached HEAD
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }
}
