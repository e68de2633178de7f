//! Release-hosting forge abstraction
//!
//! The pipeline publishes through the [`Forge`] trait; [`GhCli`] is the
//! production implementation on top of the GitHub CLI.

mod gh;

pub use gh::GhCli;

use crate::core::error::ShipResult;
use std::path::Path;

/// Handle to a created remote release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseHandle {
  /// Tag the release was created under
  pub tag: String,
  /// URL reported by the forge, when it printed one
  pub url: Option<String>,
}

/// Release-hosting primitives the pipeline consumes
pub trait Forge {
  /// Whether the CLI has a valid session
  fn authenticated(&self) -> ShipResult<bool>;

  /// Whether a release already exists under `tag`
  fn release_exists(&self, tag: &str) -> ShipResult<bool>;

  /// Create a release under `tag` with the given title and notes
  fn create_release(&self, tag: &str, title: &str, notes: &str, draft: bool) -> ShipResult<ReleaseHandle>;

  /// Attach a file to the release under `tag`
  fn upload_asset(&self, tag: &str, file: &Path) -> ShipResult<()>;

  /// URL of the release under `tag`
  fn view_url(&self, tag: &str) -> ShipResult<Option<String>>;
}
