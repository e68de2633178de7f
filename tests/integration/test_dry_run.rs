//! Dry-run behavior: pure reporting, exit 0, zero side effects

use crate::helpers::{TestProject, run_shipit};
use anyhow::Result;

#[test]
fn test_dry_run_describes_stages_and_exits_zero() -> Result<()> {
  let project = TestProject::new("demo", "1.4.0")?;

  let output = run_shipit(&project.path, &["--dry-run"])?;
  assert_eq!(output.status.code(), Some(0));

  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("demo v1.4.0"));
  assert!(stdout.contains("Would run build command"));
  assert!(stdout.contains("Would run package command"));
  assert!(stdout.contains("Would commit pending changes"));
  assert!(stdout.contains("Would push"));
  assert!(stdout.contains("Would create release v1.4.0"));
  assert!(stdout.contains("Would upload"));
  assert!(stdout.contains("Dry-run complete"));

  Ok(())
}

#[test]
fn test_dry_run_leaves_repository_untouched() -> Result<()> {
  let project = TestProject::new("demo", "1.4.0")?;
  std::fs::write(project.path.join("pending.txt"), "uncommitted")?;

  let output = run_shipit(&project.path, &["--dry-run"])?;
  assert_eq!(output.status.code(), Some(0));

  // The pending change was neither staged nor committed, and no tag appeared
  assert_eq!(project.commit_count()?, 1);
  assert!(project.tags()?.is_empty());

  Ok(())
}

#[test]
fn test_dry_run_with_draft_describes_draft_release() -> Result<()> {
  let project = TestProject::new("demo", "2.1.0")?;

  let output = run_shipit(&project.path, &["--dry-run", "--draft"])?;
  assert_eq!(output.status.code(), Some(0));

  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("Would create draft release v2.1.0"));

  Ok(())
}

#[test]
fn test_dry_run_exits_zero_even_with_existing_tag() -> Result<()> {
  let project = TestProject::new("demo", "2.0.0")?;
  project.tag("v2.0.0")?;

  let output = run_shipit(&project.path, &["--dry-run"])?;
  assert_eq!(output.status.code(), Some(0));

  Ok(())
}

#[test]
fn test_dry_run_outside_git_repo_exits_zero_with_warning() -> Result<()> {
  let project = TestProject::without_git("demo", "1.0.0")?;

  let output = run_shipit(&project.path, &["--dry-run"])?;
  assert_eq!(output.status.code(), Some(0));

  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("a real run would abort here"));
  assert!(stdout.contains("Dry-run complete"));

  Ok(())
}

#[test]
fn test_dry_run_uses_configured_commands() -> Result<()> {
  let project = TestProject::new("demo", "1.4.0")?;
  project.write_config(
    r#"
[build]
command = ["make", "build"]

[package]
command = ["make", "dist"]
artifact = "dist/{name}-{version}.pkg"
"#,
  )?;

  let output = run_shipit(&project.path, &["--dry-run"])?;
  assert_eq!(output.status.code(), Some(0));

  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("Would run build command: make build"));
  assert!(stdout.contains("dist/demo-1.4.0.pkg"));

  Ok(())
}

#[test]
fn test_config_read_from_repository_root_when_run_in_subdirectory() -> Result<()> {
  let project = TestProject::new("demo", "0.3.0")?;
  project.write_config("[build]\ncommand = [\"make\", \"build\"]\n")?;

  // ship.toml sits at the root; invoke from src/
  let output = run_shipit(&project.path.join("src"), &["--dry-run"])?;
  assert_eq!(output.status.code(), Some(0));

  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(
    stdout.contains("Would run build command: make build"),
    "root ship.toml was ignored:\n{}",
    stdout
  );

  Ok(())
}

#[test]
fn test_invalid_config_exits_one() -> Result<()> {
  let project = TestProject::new("demo", "1.4.0")?;
  project.write_config("[build]\ncommand = []\n")?;

  let output = run_shipit(&project.path, &["--dry-run"])?;
  assert_eq!(output.status.code(), Some(1));

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("build.command"));

  Ok(())
}
