//! Environment validation
//!
//! Read-only checks run before anything else: a git work tree must be
//! present, the gh binary must be on PATH, and gh must hold a valid session.
//! On success the opened handles are returned so later stages reuse them.

use crate::core::error::{EnvironmentError, ShipError, ShipResult};
use crate::core::vcs::SystemGit;
use crate::forge::{Forge, GhCli};
use std::path::Path;

/// Validate the execution environment
///
/// Fails with `NotAGitWorkTree`, `ToolMissing`, or `NotAuthenticated`. No
/// side effects.
pub fn validate(path: &Path) -> ShipResult<(SystemGit, GhCli)> {
  let git = SystemGit::open(path)?;
  let gh = GhCli::new(git.work_tree());

  gh.installed()?;
  if !gh.authenticated()? {
    return Err(ShipError::Environment(EnvironmentError::NotAuthenticated));
  }

  Ok((git, gh))
}
