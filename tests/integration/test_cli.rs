//! CLI surface tests: exit codes, help, flag handling

use crate::helpers::{TestProject, run_shipit};
use anyhow::Result;

#[test]
fn test_help_exits_zero_with_usage() -> Result<()> {
  let project = TestProject::new("demo", "1.4.0")?;

  let output = run_shipit(&project.path, &["--help"])?;
  assert_eq!(output.status.code(), Some(0));

  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("--draft"));
  assert!(stdout.contains("--dry-run"));

  Ok(())
}

#[test]
fn test_short_help_exits_zero() -> Result<()> {
  let project = TestProject::new("demo", "1.4.0")?;

  let output = run_shipit(&project.path, &["-h"])?;
  assert_eq!(output.status.code(), Some(0));

  Ok(())
}

#[test]
fn test_help_wins_over_other_flags() -> Result<()> {
  let project = TestProject::new("demo", "1.4.0")?;

  let output = run_shipit(&project.path, &["--draft", "--dry-run", "--help"])?;
  assert_eq!(output.status.code(), Some(0));

  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("Usage"));

  // No side effects, not even new commits
  assert_eq!(project.commit_count()?, 1);
  assert!(project.tags()?.is_empty());

  Ok(())
}

#[test]
fn test_unknown_flag_exits_one() -> Result<()> {
  let project = TestProject::new("demo", "1.4.0")?;

  let output = run_shipit(&project.path, &["--bogus"])?;
  assert_eq!(output.status.code(), Some(1));

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("--bogus"));

  Ok(())
}

#[test]
fn test_positional_argument_exits_one() -> Result<()> {
  let project = TestProject::new("demo", "1.4.0")?;

  let output = run_shipit(&project.path, &["release"])?;
  assert_eq!(output.status.code(), Some(1));

  Ok(())
}

#[test]
fn test_repeated_flags_are_idempotent() -> Result<()> {
  let project = TestProject::new("demo", "1.4.0")?;

  let output = run_shipit(&project.path, &["--dry-run", "--dry-run", "--draft", "--draft"])?;
  assert_eq!(output.status.code(), Some(0));

  Ok(())
}
