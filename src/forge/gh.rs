//! GitHub release operations via the gh CLI
//!
//! Every invocation uses a structured argument list; release titles and notes
//! are passed as discrete arguments, never interpolated into a shell string.

use super::{Forge, ReleaseHandle};
use crate::core::error::{
  EnvironmentError, ReleaseError, ResultExt, ShipError, ShipResult, UploadError,
};
use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// GitHub CLI backend
pub struct GhCli {
  /// Directory gh commands run from (repository root, so gh resolves the
  /// right remote)
  repo_path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct ReleaseView {
  url: Option<String>,
}

impl GhCli {
  pub fn new(repo_path: &Path) -> Self {
    Self {
      repo_path: repo_path.to_path_buf(),
    }
  }

  /// Verify the gh binary is reachable on PATH
  pub fn installed(&self) -> ShipResult<()> {
    match Command::new("gh").arg("--version").output() {
      Ok(_) => Ok(()),
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        Err(ShipError::Environment(EnvironmentError::ToolMissing { tool: "gh".to_string() }))
      }
      Err(e) => Err(ShipError::Io(e)),
    }
  }

  fn gh_cmd(&self) -> Command {
    let mut cmd = Command::new("gh");
    cmd.current_dir(&self.repo_path);
    cmd
  }
}

/// Interpret a `gh release view` result for the collision check
///
/// Only gh's own "not found" answer counts as absent. Any other failure
/// (network down, no GitHub remote) means the remote state is unknown, and an
/// unknown state must not pass the guard.
fn classify_release_view(success: bool, stderr: &str, tag: &str) -> ShipResult<bool> {
  if success {
    return Ok(true);
  }
  let stderr = stderr.trim();
  if stderr.contains("release not found") || stderr.contains("HTTP 404") {
    return Ok(false);
  }
  Err(ShipError::with_help(
    format!("Could not determine whether a release for {} exists: {}", tag, stderr),
    "Check network connectivity and that the repository has a GitHub remote, then re-run.",
  ))
}

impl Forge for GhCli {
  fn authenticated(&self) -> ShipResult<bool> {
    let output = self
      .gh_cmd()
      .args(["auth", "status"])
      .output()
      .context("Failed to run gh auth status")?;
    Ok(output.status.success())
  }

  fn release_exists(&self, tag: &str) -> ShipResult<bool> {
    let output = self
      .gh_cmd()
      .args(["release", "view", tag, "--json", "url"])
      .output()
      .context("Failed to run gh release view")?;
    classify_release_view(output.status.success(), &String::from_utf8_lossy(&output.stderr), tag)
  }

  fn create_release(&self, tag: &str, title: &str, notes: &str, draft: bool) -> ShipResult<ReleaseHandle> {
    let mut cmd = self.gh_cmd();
    cmd.args(["release", "create", tag, "--title", title, "--notes", notes]);
    if draft {
      cmd.arg("--draft");
    }

    let output = cmd.output().context("Failed to run gh release create")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(ShipError::Release(ReleaseError::ReleaseCreateFailed {
        tag: tag.to_string(),
        stderr: stderr.trim().to_string(),
      }));
    }

    // gh prints the release URL on stdout
    let stdout = String::from_utf8_lossy(&output.stdout);
    let url = stdout.lines().find(|l| l.starts_with("http")).map(|l| l.trim().to_string());

    Ok(ReleaseHandle {
      tag: tag.to_string(),
      url,
    })
  }

  fn upload_asset(&self, tag: &str, file: &Path) -> ShipResult<()> {
    let output = self
      .gh_cmd()
      .args(["release", "upload", tag])
      .arg(file)
      .output()
      .context("Failed to run gh release upload")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(ShipError::Upload(UploadError::UploadFailed {
        tag: tag.to_string(),
        stderr: stderr.trim().to_string(),
      }));
    }

    Ok(())
  }

  fn view_url(&self, tag: &str) -> ShipResult<Option<String>> {
    let output = self
      .gh_cmd()
      .args(["release", "view", tag, "--json", "url"])
      .output()
      .context("Failed to run gh release view")?;

    if !output.status.success() {
      return Ok(None);
    }

    let view: ReleaseView = serde_json::from_slice(&output.stdout)?;
    Ok(view.url)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_release_view_success_means_exists() {
    assert!(classify_release_view(true, "", "v1.0.0").unwrap());
  }

  #[test]
  fn test_release_view_not_found_means_absent() {
    assert!(!classify_release_view(false, "release not found", "v1.0.0").unwrap());
    assert!(!classify_release_view(false, "HTTP 404: Not Found (https://api.github.com/...)", "v1.0.0").unwrap());
  }

  #[test]
  fn test_release_view_network_failure_is_an_error() {
    let err = classify_release_view(
      false,
      "error connecting to api.github.com\ncheck your internet connection",
      "v1.0.0",
    )
    .unwrap_err();
    assert!(err.to_string().contains("v1.0.0"));
    assert!(err.help_message().unwrap().contains("network"));
  }
}
