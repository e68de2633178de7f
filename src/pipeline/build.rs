//! Build and package stage
//!
//! Runs the configured build and package commands as blocking subprocesses,
//! auto-answering packager confirmation prompts, then verifies the expected
//! artifact actually materialized. Build failure is fatal before any git
//! mutation happens.

use crate::core::config::ShipConfig;
use crate::core::descriptor::ReleaseDescriptor;
use crate::core::error::{BuildError, ResultExt, ShipError, ShipResult};
use sha2::{Digest, Sha256};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Build-tool primitives the pipeline consumes
pub trait Builder {
  /// Run the build command
  fn build(&self) -> ShipResult<()>;

  /// Run the package command, auto-confirming any prompt
  fn package(&self) -> ShipResult<()>;
}

/// Production builder running the commands configured in ship.toml
pub struct CommandBuilder<'a> {
  root: &'a Path,
  config: &'a ShipConfig,
}

impl<'a> CommandBuilder<'a> {
  pub fn new(root: &'a Path, config: &'a ShipConfig) -> Self {
    Self { root, config }
  }

  fn run_tool(&self, argv: &[String], auto_confirm: bool) -> ShipResult<std::process::Output> {
    let (program, args) = argv.split_first().ok_or_else(|| ShipError::message("Empty command"))?;

    let mut cmd = Command::new(program);
    cmd.args(args).current_dir(self.root).stdout(Stdio::piped()).stderr(Stdio::piped());

    if auto_confirm {
      cmd.stdin(Stdio::piped());
      let mut child = cmd.spawn().with_context(|| format!("Failed to spawn {}", program))?;
      if let Some(mut stdin) = child.stdin.take() {
        // A handful of affirmative answers covers multi-prompt packagers;
        // closing stdin ends any further prompting
        let _ = stdin.write_all(b"y\ny\ny\ny\n");
      }
      child.wait_with_output().with_context(|| format!("Failed to wait for {}", program))
    } else {
      cmd.stdin(Stdio::null());
      cmd.output().with_context(|| format!("Failed to run {}", program))
    }
  }
}

impl Builder for CommandBuilder<'_> {
  fn build(&self) -> ShipResult<()> {
    let argv = &self.config.build.command;
    let output = self.run_tool(argv, false)?;

    if !output.status.success() {
      return Err(ShipError::Build(BuildError::BuildFailed {
        command: argv.join(" "),
        stderr: diagnostics(&output),
      }));
    }

    Ok(())
  }

  fn package(&self) -> ShipResult<()> {
    let argv = &self.config.package.command;
    let output = self.run_tool(argv, self.config.package.auto_confirm)?;

    if !output.status.success() {
      return Err(ShipError::Build(BuildError::PackagingFailed {
        command: argv.join(" "),
        stderr: diagnostics(&output),
      }));
    }

    Ok(())
  }
}

/// Combine a failed tool's stdout and stderr for the operator
fn diagnostics(output: &std::process::Output) -> String {
  let stderr = String::from_utf8_lossy(&output.stderr);
  let stdout = String::from_utf8_lossy(&output.stdout);
  if stderr.trim().is_empty() {
    stdout.trim().to_string()
  } else {
    stderr.trim().to_string()
  }
}

/// Verify the packager produced the artifact the descriptor expects
///
/// Defends against packagers that exit 0 but silently no-op.
pub fn verify_artifact(root: &Path, descriptor: &ReleaseDescriptor) -> ShipResult<PathBuf> {
  let path = root.join(&descriptor.artifact);
  if !path.is_file() {
    return Err(ShipError::Build(BuildError::ArtifactNotFound { path }));
  }
  Ok(path)
}

/// SHA-256 digest of the artifact, hex-encoded
pub fn artifact_digest(path: &Path) -> ShipResult<String> {
  let bytes = std::fs::read(path).with_context(|| format!("Failed to read artifact {}", path.display()))?;
  let digest = Sha256::digest(&bytes);
  let mut hex = String::with_capacity(64);
  for byte in digest {
    hex.push_str(&format!("{:02x}", byte));
  }
  Ok(hex)
}
