//! shipit configuration (ship.toml) parsing and validation
//!
//! The config file is optional: a bare Cargo project releases with the
//! defaults below. Templates accept `{name}` and `{version}` placeholders.

use crate::core::error::{ShipError, ShipResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for shipit, loaded from `ship.toml` at the repository root
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ShipConfig {
  #[serde(default)]
  pub build: BuildConfig,
  #[serde(default)]
  pub package: PackageConfig,
  #[serde(default)]
  pub release: ReleaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
  /// Build command as an argument vector (never a shell string)
  #[serde(default = "default_build_command")]
  pub command: Vec<String>,
}

fn default_build_command() -> Vec<String> {
  vec!["cargo".into(), "build".into(), "--release".into()]
}

impl Default for BuildConfig {
  fn default() -> Self {
    Self {
      command: default_build_command(),
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageConfig {
  /// Package command as an argument vector
  #[serde(default = "default_package_command")]
  pub command: Vec<String>,

  /// Answer "y" to any confirmation prompt the packager raises
  #[serde(default = "default_true")]
  pub auto_confirm: bool,

  /// Template for the artifact path the packager is expected to produce
  #[serde(default = "default_artifact_template")]
  pub artifact: String,
}

fn default_package_command() -> Vec<String> {
  vec!["cargo".into(), "package".into(), "--allow-dirty".into()]
}

fn default_artifact_template() -> String {
  "target/package/{name}-{version}.crate".to_string()
}

fn default_true() -> bool {
  true
}

impl Default for PackageConfig {
  fn default() -> Self {
    Self {
      command: default_package_command(),
      auto_confirm: true,
      artifact: default_artifact_template(),
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseConfig {
  /// Remote to push to (default: "origin")
  #[serde(default = "default_remote")]
  pub remote: String,

  /// Release title template
  #[serde(default = "default_title_template")]
  pub title: String,
}

fn default_remote() -> String {
  "origin".to_string()
}

fn default_title_template() -> String {
  "{name} v{version}".to_string()
}

impl Default for ReleaseConfig {
  fn default() -> Self {
    Self {
      remote: default_remote(),
      title: default_title_template(),
    }
  }
}

impl ShipConfig {
  /// Path of the config file under a repository root
  pub fn path(root: &Path) -> PathBuf {
    root.join("ship.toml")
  }

  /// Load ship.toml from the repository root, falling back to defaults when
  /// the file does not exist
  pub fn load(root: &Path) -> ShipResult<Self> {
    let path = Self::path(root);
    if !path.exists() {
      return Ok(Self::default());
    }

    let content = fs::read_to_string(&path)?;
    let config: ShipConfig = toml_edit::de::from_str(&content)?;
    config.validate()?;
    Ok(config)
  }

  /// Validate the configuration
  pub fn validate(&self) -> ShipResult<()> {
    if self.build.command.is_empty() {
      return Err(ShipError::with_help(
        "Empty `build.command` in ship.toml",
        "Provide the build invocation as an argument vector, e.g. [\"cargo\", \"build\", \"--release\"].",
      ));
    }
    if self.package.command.is_empty() {
      return Err(ShipError::with_help(
        "Empty `package.command` in ship.toml",
        "Provide the package invocation as an argument vector.",
      ));
    }
    if self.package.artifact.trim().is_empty() {
      return Err(ShipError::with_help(
        "Empty `package.artifact` template in ship.toml",
        "Provide the expected artifact path, e.g. \"dist/{name}-{version}.pkg\".",
      ));
    }
    if self.release.remote.trim().is_empty() {
      return Err(ShipError::message("Empty `release.remote` in ship.toml"));
    }
    Ok(())
  }
}

/// Render a `{name}`/`{version}` template
pub fn render_template(template: &str, name: &str, version: &str) -> String {
  template.replace("{name}", name).replace("{version}", version)
}
