//! Git operations abstraction
//!
//! The pipeline talks to version control through the [`Vcs`] trait so tests
//! can substitute a recording fake. The production implementation is
//! [`SystemGit`], which shells out to the system git binary.

mod system_git;

pub use system_git::SystemGit;

use crate::core::error::ShipResult;

/// Version-control primitives the release pipeline consumes
pub trait Vcs {
  /// Whether the local tag namespace contains `tag`
  fn tag_exists(&self, tag: &str) -> ShipResult<bool>;

  /// Whether the working tree has uncommitted changes (staged or not)
  fn has_pending_changes(&self) -> ShipResult<bool>;

  /// Stage every working-tree change
  fn stage_all(&self) -> ShipResult<()>;

  /// Commit staged changes with the given message
  fn commit(&self, message: &str) -> ShipResult<()>;

  /// Push the current branch to `remote`
  fn push(&self, remote: &str, branch: &str) -> ShipResult<()>;

  /// Name of the currently checked-out branch
  fn current_branch(&self) -> ShipResult<String>;
}
