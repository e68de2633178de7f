//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A releasable test project: a Cargo package with git history
pub struct TestProject {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestProject {
  /// Create a project with git initialized and one commit
  pub fn new(name: &str, version: &str) -> Result<Self> {
    let project = Self::without_git(name, version)?;

    git(&project.path, &["init", "--initial-branch=main"])?;
    git(&project.path, &["config", "user.name", "Test User"])?;
    git(&project.path, &["config", "user.email", "test@example.com"])?;
    git(&project.path, &["add", "."])?;
    git(&project.path, &["commit", "-m", "Initial commit"])?;

    Ok(project)
  }

  /// Create a project directory that is NOT a git repository
  pub fn without_git(name: &str, version: &str) -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();

    std::fs::write(
      path.join("Cargo.toml"),
      format!(
        r#"[package]
name = "{}"
version = "{}"
edition = "2021"
"#,
        name, version
      ),
    )?;
    std::fs::create_dir_all(path.join("src"))?;
    std::fs::write(path.join("src/lib.rs"), "pub fn hello() {}\n")?;

    Ok(Self { _root: root, path })
  }

  /// Write ship.toml
  pub fn write_config(&self, content: &str) -> Result<()> {
    std::fs::write(self.path.join("ship.toml"), content)?;
    Ok(())
  }

  /// Create a tag in the project repository
  pub fn tag(&self, name: &str) -> Result<()> {
    git(&self.path, &["tag", name])?;
    Ok(())
  }

  /// Number of commits on the current branch
  pub fn commit_count(&self) -> Result<usize> {
    let output = git(&self.path, &["rev-list", "--count", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().parse()?)
  }

  /// List all tags
  pub fn tags(&self) -> Result<Vec<String>> {
    let output = git(&self.path, &["tag", "--list"])?;
    Ok(
      String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(String::from)
        .collect(),
    )
  }
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run the shipit binary; failures are returned, not raised, so tests can
/// assert on exit codes
pub fn run_shipit(cwd: &Path, args: &[&str]) -> Result<Output> {
  let shipit_bin = env!("CARGO_BIN_EXE_shipit");

  Command::new(shipit_bin)
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run shipit")
}
