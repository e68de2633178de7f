//! The release pipeline
//!
//! A single forward path with no cycles and no retries:
//!
//! `ArgumentsParsed → EnvironmentValidated → CollisionChecked →
//! Built&Packaged → StatePublished → ReleaseCreated → ArtifactUploaded`
//!
//! Any stage failure aborts the run; later stages never execute. Expensive
//! and irreversible steps (commit, push, release creation) are ordered after
//! the build so a failing build never dirties history or consumes a tag.
//!
//! Every mutating stage is enumerated in [`Stage::MUTATING`] and has a
//! dry-run description; the test suite enforces this structurally.

pub mod build;
pub mod notes;
pub mod preflight;
pub mod publish;

use crate::core::config::ShipConfig;
use crate::core::descriptor::ReleaseDescriptor;
use crate::core::error::{CollisionError, ShipError, ShipResult};
use crate::core::vcs::Vcs;
use crate::forge::Forge;
use build::Builder;
use std::path::Path;

/// Mutating pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
  Build,
  Package,
  Commit,
  Push,
  CreateRelease,
  UploadArtifact,
}

impl Stage {
  /// Every stage that mutates local or remote state. A new mutating stage
  /// must be added here so the dry-run path describes it.
  pub const MUTATING: [Stage; 6] = [
    Stage::Build,
    Stage::Package,
    Stage::Commit,
    Stage::Push,
    Stage::CreateRelease,
    Stage::UploadArtifact,
  ];

  /// One-line description of the action a real run would take
  pub fn describe(&self, descriptor: &ReleaseDescriptor, config: &ShipConfig) -> String {
    match self {
      Stage::Build => format!("run build command: {}", config.build.command.join(" ")),
      Stage::Package => format!(
        "run package command: {} (expecting {})",
        config.package.command.join(" "),
        descriptor.artifact.display()
      ),
      Stage::Commit => format!(
        "commit pending changes with message \"{}\" (skipped when the tree is clean)",
        publish::commit_message(descriptor)
      ),
      Stage::Push => format!("push the current branch to {}", descriptor.remote),
      Stage::CreateRelease => format!(
        "create {}release {} titled \"{}\"",
        if descriptor.draft { "draft " } else { "" },
        descriptor.tag,
        descriptor.title
      ),
      Stage::UploadArtifact => {
        format!("upload {} to release {}", descriptor.artifact_name(), descriptor.tag)
      }
    }
  }
}

/// Verify the target tag is unclaimed, locally and remotely
///
/// Must run before any mutating stage. The window between this check and
/// release creation is unguarded; a concurrent claim surfaces there as
/// `ReleaseCreateFailed`.
pub fn check_collision(descriptor: &ReleaseDescriptor, vcs: &dyn Vcs, forge: &dyn Forge) -> ShipResult<()> {
  if vcs.tag_exists(&descriptor.tag)? {
    return Err(ShipError::Collision(CollisionError::TagAlreadyExists {
      tag: descriptor.tag.clone(),
    }));
  }
  if forge.release_exists(&descriptor.tag)? {
    return Err(ShipError::Collision(CollisionError::ReleaseAlreadyExists {
      tag: descriptor.tag.clone(),
    }));
  }
  Ok(())
}

/// Execute the full pipeline
///
/// Returns the release URL when the forge reported one.
pub fn run(
  descriptor: &ReleaseDescriptor,
  vcs: &dyn Vcs,
  forge: &dyn Forge,
  builder: &dyn Builder,
  root: &Path,
) -> ShipResult<Option<String>> {
  check_collision(descriptor, vcs, forge)?;
  println!("   ✅ {} is unclaimed locally and remotely", descriptor.tag);

  println!("🔨 Building...");
  builder.build()?;

  println!("📦 Packaging...");
  builder.package()?;
  let artifact = build::verify_artifact(root, descriptor)?;
  let digest = build::artifact_digest(&artifact)?;
  println!("   ✅ Artifact: {} (sha256 {}…)", descriptor.artifact_name(), &digest[..12]);

  println!("📤 Publishing repository state...");
  publish::publish_state(descriptor, vcs)?;

  println!("🚀 Creating release {}...", descriptor.tag);
  let release_notes = notes::render(descriptor, &digest);
  let handle = forge.create_release(&descriptor.tag, &descriptor.title, &release_notes, descriptor.draft)?;

  println!("⬆️  Uploading {}...", descriptor.artifact_name());
  forge.upload_asset(&handle.tag, &artifact)?;

  let url = match handle.url {
    Some(url) => Some(url),
    None => forge.view_url(&descriptor.tag)?,
  };
  Ok(url)
}

/// Dry-run: describe every mutating stage without executing anything
///
/// Read-only collision findings are reported as warnings; a dry run never
/// fails on them.
pub fn run_dry(
  descriptor: &ReleaseDescriptor,
  config: &ShipConfig,
  checks: Option<(&dyn Vcs, &dyn Forge)>,
) -> ShipResult<()> {
  println!("🔍 Dry-run for {} {}", descriptor.name, descriptor.tag);

  match checks {
    Some((vcs, forge)) => match check_collision(descriptor, vcs, forge) {
      Ok(()) => println!("   ✅ {} is unclaimed locally and remotely", descriptor.tag),
      Err(err) => println!("   ⚠️  {} (a real run would abort here)", err),
    },
    None => println!("   ⚠️  Environment checks failed; collision state unknown"),
  }

  for stage in Stage::MUTATING {
    println!("   💡 Would {}", stage.describe(descriptor, config));
  }

  println!();
  println!("Dry-run complete. Nothing was executed.");
  Ok(())
}
