mod core;
mod forge;
mod pipeline;

use crate::core::config::ShipConfig;
use crate::core::descriptor::{ReleaseDescriptor, RunConfig};
use crate::core::error::{ShipResult, print_error};
use crate::core::vcs::{SystemGit, Vcs};
use crate::forge::Forge;
use clap::Parser;
use clap::error::ErrorKind;
use std::path::Path;

/// Release the current project: build, package, commit, push, and publish a
/// tagged GitHub release with the artifact attached
#[derive(Parser)]
#[command(name = "shipit")]
#[command(about, long_about = None)]
#[command(disable_version_flag = true)]
#[command(styles = get_styles())]
struct ShipCli {
  /// Create the release as a draft instead of publishing it
  #[arg(long, overrides_with = "draft")]
  draft: bool,

  /// Describe every mutating step without executing it
  #[arg(long, overrides_with = "dry_run")]
  dry_run: bool,
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  // Help exits 0; any unrecognized token is a usage error and exits 1
  // (clap's default exit code 2 is remapped to the documented contract)
  let cli = match ShipCli::try_parse() {
    Ok(cli) => cli,
    Err(err) => {
      let code = match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
      };
      let _ = err.print();
      std::process::exit(code);
    }
  };

  let run = RunConfig {
    draft: cli.draft,
    dry_run: cli.dry_run,
  };

  let workspace_root = match std::env::current_dir() {
    Ok(dir) => dir,
    Err(e) => {
      eprintln!("Error: Failed to get current directory: {}", e);
      std::process::exit(1);
    }
  };

  if let Err(err) = release(&workspace_root, run) {
    print_error(&err);
    std::process::exit(1);
  }
}

/// Load ship.toml and the package metadata from the work-tree root
///
/// Both live at the repository root, so the invocation directory only matters
/// for locating the work tree; running from a subdirectory picks up the same
/// configuration as running from the root.
fn resolve(work_tree: &Path, run: RunConfig) -> ShipResult<(ShipConfig, ReleaseDescriptor)> {
  let config = ShipConfig::load(work_tree)?;
  let descriptor = ReleaseDescriptor::new(work_tree, &config, run)?;
  println!("🚢 shipit: {} {}", descriptor.name, descriptor.tag);
  Ok((config, descriptor))
}

/// Build the descriptor once, then hand it to the pipeline
fn release(root: &Path, run: RunConfig) -> ShipResult<()> {
  if run.dry_run {
    // Environment and collision checks are read-only; in a dry run their
    // findings are warnings and the exit code stays 0
    return match pipeline::preflight::validate(root) {
      Ok((git, gh)) => {
        let (config, descriptor) = resolve(git.work_tree(), run)?;
        pipeline::run_dry(&descriptor, &config, Some((&git as &dyn Vcs, &gh as &dyn Forge)))
      }
      Err(err) => {
        // gh may be the missing piece; git can still anchor ship.toml.
        // Without a work tree at all, fall back to the invocation directory.
        let work_tree = SystemGit::open(root)
          .map(|git| git.work_tree().to_path_buf())
          .unwrap_or_else(|_| root.to_path_buf());
        let (config, descriptor) = resolve(&work_tree, run)?;
        println!("   ⚠️  {} (a real run would abort here)", err);
        pipeline::run_dry(&descriptor, &config, None)
      }
    };
  }

  let (git, gh) = pipeline::preflight::validate(root)?;
  let work_tree = git.work_tree().to_path_buf();
  let (config, descriptor) = resolve(&work_tree, run)?;
  println!("   ✅ Environment ready (git work tree, gh authenticated)");

  let builder = pipeline::build::CommandBuilder::new(&work_tree, &config);
  let url = pipeline::run(&descriptor, &git, &gh, &builder, &work_tree)?;

  println!();
  match url {
    Some(url) => println!("🎉 Released {} → {}", descriptor.tag, url),
    None => println!("🎉 Released {}", descriptor.tag),
  }
  Ok(())
}
