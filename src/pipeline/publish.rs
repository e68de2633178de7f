//! State publication stage
//!
//! Commits any pending working-tree changes with a deterministic message and
//! pushes to the configured remote. A clean tree is a logged no-op, never an
//! empty commit. Runs only after the build succeeded.

use crate::core::descriptor::ReleaseDescriptor;
use crate::core::error::ShipResult;
use crate::core::vcs::Vcs;

/// Commit message for a release
pub fn commit_message(descriptor: &ReleaseDescriptor) -> String {
  format!("Release {}", descriptor.tag)
}

/// Commit pending changes (if any) and push the current branch
pub fn publish_state(descriptor: &ReleaseDescriptor, vcs: &dyn Vcs) -> ShipResult<()> {
  if vcs.has_pending_changes()? {
    vcs.stage_all()?;
    vcs.commit(&commit_message(descriptor))?;
    println!("   ✅ Committed: {}", commit_message(descriptor));
  } else {
    println!("   ℹ️  Nothing to commit, working tree clean");
  }

  let branch = vcs.current_branch()?;
  vcs.push(&descriptor.remote, &branch)?;
  println!("   ✅ Pushed {} to {}", branch, descriptor.remote);

  Ok(())
}
