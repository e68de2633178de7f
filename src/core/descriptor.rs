//! Release descriptor: the one value every stage receives
//!
//! Built once at startup from Cargo metadata, ship.toml, and the CLI flags.
//! Nothing downstream reads ambient global state; if a stage needs a fact
//! about this release, it lives here.

use crate::core::config::{ShipConfig, render_template};
use crate::core::error::{ShipError, ShipResult};
use cargo_metadata::MetadataCommand;
use semver::Version;
use std::path::{Path, PathBuf};

/// Execution mode derived from CLI flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
  pub draft: bool,
  pub dry_run: bool,
}

/// Immutable description of the release being produced
#[derive(Debug, Clone)]
pub struct ReleaseDescriptor {
  /// Package name from Cargo metadata
  pub name: String,
  /// Version from the root package manifest
  pub version: Version,
  /// Tag claimed by this release ("v" + version)
  pub tag: String,
  /// Create the remote release as a draft
  pub draft: bool,
  /// Simulate mutating stages instead of running them
  pub dry_run: bool,
  /// Artifact path the packager is expected to produce, relative to the
  /// repository root
  pub artifact: PathBuf,
  /// Remote used for push and release creation
  pub remote: String,
  /// Release title
  pub title: String,
}

impl ReleaseDescriptor {
  /// Build the descriptor from project metadata and configuration
  pub fn new(root: &Path, config: &ShipConfig, run: RunConfig) -> ShipResult<Self> {
    let metadata = MetadataCommand::new().current_dir(root).no_deps().exec()?;
    let package = metadata
      .root_package()
      .ok_or_else(|| {
        ShipError::with_help(
          "No root package found in Cargo metadata",
          "shipit releases a single package; run it from the package directory, not a virtual workspace root.",
        )
      })?
      .clone();

    let version: Version = package.version.to_string().parse()?;
    Ok(Self::from_parts(package.name.to_string(), version, config, run))
  }

  /// Assemble a descriptor from already-resolved name and version
  pub fn from_parts(name: String, version: Version, config: &ShipConfig, run: RunConfig) -> Self {
    let version_str = version.to_string();
    let tag = format!("v{}", version_str);
    let artifact = PathBuf::from(render_template(&config.package.artifact, &name, &version_str));
    let title = render_template(&config.release.title, &name, &version_str);

    Self {
      name,
      version,
      tag,
      draft: run.draft,
      dry_run: run.dry_run,
      artifact,
      remote: config.release.remote.clone(),
      title,
    }
  }

  /// Artifact file name without its directory
  pub fn artifact_name(&self) -> String {
    self
      .artifact
      .file_name()
      .map(|n| n.to_string_lossy().into_owned())
      .unwrap_or_else(|| self.artifact.display().to_string())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn descriptor(version: &str, run: RunConfig) -> ReleaseDescriptor {
    ReleaseDescriptor::from_parts(
      "demo".to_string(),
      version.parse().unwrap(),
      &ShipConfig::default(),
      run,
    )
  }

  #[test]
  fn test_tag_is_v_prefixed_version() {
    let d = descriptor("1.4.0", RunConfig { draft: false, dry_run: false });
    assert_eq!(d.tag, "v1.4.0");
  }

  #[test]
  fn test_artifact_rendered_from_template() {
    let mut config = ShipConfig::default();
    config.package.artifact = "dist/{name}-{version}.pkg".to_string();
    let d = ReleaseDescriptor::from_parts(
      "demo".to_string(),
      "1.4.0".parse().unwrap(),
      &config,
      RunConfig { draft: false, dry_run: false },
    );
    assert_eq!(d.artifact, PathBuf::from("dist/demo-1.4.0.pkg"));
    assert_eq!(d.artifact_name(), "demo-1.4.0.pkg");
  }

  #[test]
  fn test_flags_carried_through() {
    let d = descriptor("0.3.1", RunConfig { draft: true, dry_run: true });
    assert!(d.draft);
    assert!(d.dry_run);
  }

  #[test]
  fn test_title_default_template() {
    let d = descriptor("2.0.0-rc.1", RunConfig { draft: false, dry_run: false });
    assert_eq!(d.title, "demo v2.0.0-rc.1");
  }
}
