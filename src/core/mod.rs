//! Core building blocks for shipit
//!
//! - **config**: ship.toml parsing and validation
//! - **descriptor**: the immutable release descriptor every stage receives
//! - **error**: per-stage error types with contextual help messages
//! - **vcs**: git operations abstraction (SystemGit)

pub mod config;
pub mod descriptor;
pub mod error;
pub mod vcs;
