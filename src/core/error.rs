//! Error types for shipit with contextual messages
//!
//! Every pipeline stage owns a closed set of error variants. A failing stage
//! surfaces exactly one of them, annotated with the underlying tool's
//! diagnostics and, where we can guess the fix, a help suggestion.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Main error type for shipit
#[derive(Debug)]
pub enum ShipError {
  /// Environment preflight failures (git work tree, gh binary, gh session)
  Environment(EnvironmentError),

  /// Tag or remote release already claims the target version
  Collision(CollisionError),

  /// Build, packaging, or artifact-verification failures
  Build(BuildError),

  /// Commit/push failures
  Publish(PublishError),

  /// Remote release creation failures
  Release(ReleaseError),

  /// Artifact upload failures
  Upload(UploadError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl ShipError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ShipError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    ShipError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ShipError::Message { message, context, help } => ShipError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      _ => self,
    }
  }

  /// Name of the pipeline stage this error aborted
  pub fn stage(&self) -> &'static str {
    match self {
      ShipError::Environment(_) => "environment validation",
      ShipError::Collision(_) => "collision guard",
      ShipError::Build(_) => "build & package",
      ShipError::Publish(_) => "state publication",
      ShipError::Release(_) => "release creation",
      ShipError::Upload(_) => "artifact upload",
      ShipError::Io(_) | ShipError::Message { .. } => "startup",
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ShipError::Environment(e) => e.help_message(),
      ShipError::Collision(e) => e.help_message(),
      ShipError::Build(e) => e.help_message(),
      ShipError::Publish(e) => e.help_message(),
      ShipError::Release(e) => e.help_message(),
      ShipError::Upload(e) => e.help_message(),
      ShipError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for ShipError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ShipError::Environment(e) => write!(f, "{}", e),
      ShipError::Collision(e) => write!(f, "{}", e),
      ShipError::Build(e) => write!(f, "{}", e),
      ShipError::Publish(e) => write!(f, "{}", e),
      ShipError::Release(e) => write!(f, "{}", e),
      ShipError::Upload(e) => write!(f, "{}", e),
      ShipError::Io(e) => write!(f, "I/O error: {}", e),
      ShipError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ShipError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ShipError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for ShipError {
  fn from(err: io::Error) -> Self {
    ShipError::Io(err)
  }
}

impl From<String> for ShipError {
  fn from(msg: String) -> Self {
    ShipError::message(msg)
  }
}

impl From<&str> for ShipError {
  fn from(msg: &str) -> Self {
    ShipError::message(msg)
  }
}

impl From<toml_edit::TomlError> for ShipError {
  fn from(err: toml_edit::TomlError) -> Self {
    ShipError::message(format!("TOML parse error: {}", err))
  }
}

impl From<toml_edit::de::Error> for ShipError {
  fn from(err: toml_edit::de::Error) -> Self {
    ShipError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<cargo_metadata::Error> for ShipError {
  fn from(err: cargo_metadata::Error) -> Self {
    ShipError::message(format!("Cargo metadata error: {}", err))
  }
}

impl From<semver::Error> for ShipError {
  fn from(err: semver::Error) -> Self {
    ShipError::message(format!("Version parse error: {}", err))
  }
}

impl From<serde_json::Error> for ShipError {
  fn from(err: serde_json::Error) -> Self {
    ShipError::message(format!("JSON error: {}", err))
  }
}

impl From<std::string::FromUtf8Error> for ShipError {
  fn from(err: std::string::FromUtf8Error) -> Self {
    ShipError::message(format!("UTF-8 conversion error: {}", err))
  }
}

impl From<EnvironmentError> for ShipError {
  fn from(err: EnvironmentError) -> Self {
    ShipError::Environment(err)
  }
}

impl From<CollisionError> for ShipError {
  fn from(err: CollisionError) -> Self {
    ShipError::Collision(err)
  }
}

impl From<BuildError> for ShipError {
  fn from(err: BuildError) -> Self {
    ShipError::Build(err)
  }
}

impl From<PublishError> for ShipError {
  fn from(err: PublishError) -> Self {
    ShipError::Publish(err)
  }
}

impl From<ReleaseError> for ShipError {
  fn from(err: ReleaseError) -> Self {
    ShipError::Release(err)
  }
}

impl From<UploadError> for ShipError {
  fn from(err: UploadError) -> Self {
    ShipError::Upload(err)
  }
}

/// Environment preflight errors
#[derive(Debug)]
pub enum EnvironmentError {
  /// Working directory is not inside a git work tree
  NotAGitWorkTree { path: PathBuf },

  /// Required tool binary absent from PATH
  ToolMissing { tool: String },

  /// gh has no valid session
  NotAuthenticated,
}

impl EnvironmentError {
  fn help_message(&self) -> Option<String> {
    match self {
      EnvironmentError::NotAGitWorkTree { .. } => {
        Some("Run shipit from inside the repository you want to release.".to_string())
      }
      EnvironmentError::ToolMissing { tool } => Some(format!(
        "Install {} and make sure it is on your PATH. See https://cli.github.com for gh.",
        tool
      )),
      EnvironmentError::NotAuthenticated => Some("Run `gh auth login` to authenticate with GitHub.".to_string()),
    }
  }
}

impl fmt::Display for EnvironmentError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      EnvironmentError::NotAGitWorkTree { path } => {
        write!(f, "Not a git work tree: {}", path.display())
      }
      EnvironmentError::ToolMissing { tool } => {
        write!(f, "Required tool not found on PATH: {}", tool)
      }
      EnvironmentError::NotAuthenticated => {
        write!(f, "gh is not authenticated")
      }
    }
  }
}

/// Collision guard errors
#[derive(Debug)]
pub enum CollisionError {
  /// Local tag namespace already contains the target tag
  TagAlreadyExists { tag: String },

  /// Remote already has a release under the target tag
  ReleaseAlreadyExists { tag: String },
}

impl CollisionError {
  fn help_message(&self) -> Option<String> {
    match self {
      CollisionError::TagAlreadyExists { tag } => Some(format!(
        "Bump the version in Cargo.toml, or delete the stale tag with `git tag -d {}`.",
        tag
      )),
      CollisionError::ReleaseAlreadyExists { tag } => Some(format!(
        "Bump the version in Cargo.toml, or remove the release with `gh release delete {}`.",
        tag
      )),
    }
  }
}

impl fmt::Display for CollisionError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CollisionError::TagAlreadyExists { tag } => {
        write!(f, "Tag {} already exists locally", tag)
      }
      CollisionError::ReleaseAlreadyExists { tag } => {
        write!(f, "A release for {} already exists on the remote", tag)
      }
    }
  }
}

/// Build and packaging errors
#[derive(Debug)]
pub enum BuildError {
  /// Build command returned non-zero
  BuildFailed { command: String, stderr: String },

  /// Package command returned non-zero
  PackagingFailed { command: String, stderr: String },

  /// Packager exited 0 but the expected artifact never materialized
  ArtifactNotFound { path: PathBuf },
}

impl BuildError {
  fn help_message(&self) -> Option<String> {
    match self {
      BuildError::ArtifactNotFound { .. } => Some(
        "The packager reported success but produced nothing. Check the `package.artifact` template in ship.toml."
          .to_string(),
      ),
      _ => None,
    }
  }
}

impl fmt::Display for BuildError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      BuildError::BuildFailed { command, stderr } => {
        write!(f, "Build failed: {}\n{}", command, stderr)
      }
      BuildError::PackagingFailed { command, stderr } => {
        write!(f, "Packaging failed: {}\n{}", command, stderr)
      }
      BuildError::ArtifactNotFound { path } => {
        write!(f, "Expected artifact not found: {}", path.display())
      }
    }
  }
}

/// Commit/push errors
#[derive(Debug)]
pub enum PublishError {
  /// git commit returned non-zero (an empty tree is not an error; it is
  /// detected beforehand and skipped)
  CommitFailed { stderr: String },

  /// Push rejected (non-fast-forward, network, auth)
  PushFailed {
    remote: String,
    branch: String,
    reason: String,
  },
}

impl PublishError {
  fn help_message(&self) -> Option<String> {
    match self {
      PublishError::PushFailed { reason, .. } => {
        if reason.contains("non-fast-forward") || reason.contains("fetch first") {
          Some("The remote has commits you don't have. Pull first, then re-run shipit.".to_string())
        } else if reason.contains("permission denied") || reason.contains("403") {
          Some("Check your SSH key permissions and GitHub access.".to_string())
        } else {
          None
        }
      }
      PublishError::CommitFailed { .. } => None,
    }
  }
}

impl fmt::Display for PublishError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PublishError::CommitFailed { stderr } => {
        write!(f, "Commit failed: {}", stderr)
      }
      PublishError::PushFailed { remote, branch, reason } => {
        write!(f, "Push to {}/{} failed: {}", remote, branch, reason)
      }
    }
  }
}

/// Remote release creation errors
#[derive(Debug)]
pub enum ReleaseError {
  /// gh release create rejected (including tag races with concurrent actors)
  ReleaseCreateFailed { tag: String, stderr: String },
}

impl ReleaseError {
  fn help_message(&self) -> Option<String> {
    let ReleaseError::ReleaseCreateFailed { stderr, .. } = self;
    if stderr.contains("already exists") {
      Some("Another actor published this tag between the collision check and now. Bump the version and re-run.".to_string())
    } else {
      None
    }
  }
}

impl fmt::Display for ReleaseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let ReleaseError::ReleaseCreateFailed { tag, stderr } = self;
    write!(f, "Failed to create release {}: {}", tag, stderr)
  }
}

/// Artifact upload errors
#[derive(Debug)]
pub enum UploadError {
  /// Asset transfer did not complete
  UploadFailed { tag: String, stderr: String },
}

impl UploadError {
  fn help_message(&self) -> Option<String> {
    let UploadError::UploadFailed { tag, .. } = self;
    Some(format!(
      "The release {tag} exists remotely without its artifact. Re-run the upload with \
       `gh release upload {tag} <artifact> --clobber`, or delete the release with `gh release delete {tag}`."
    ))
  }
}

impl fmt::Display for UploadError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let UploadError::UploadFailed { tag, stderr } = self;
    write!(f, "Failed to upload artifact to release {}: {}", tag, stderr)
  }
}

/// Result type alias for shipit
pub type ShipResult<T> = Result<T, ShipError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> ShipResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ShipResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ShipError>,
{
  fn context(self, ctx: impl Into<String>) -> ShipResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> ShipResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with the failing stage and help text
pub fn print_error(error: &ShipError) {
  eprintln!("\n❌ [{}] {}\n", error.stage(), error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
