//! # keel
//!
//! Build-orchestration helpers for continuous-integration scripts: find the
//! packages in a source tree, build and test them, archive the results and
//! derive a version number from git history.
//!
//! ## Overview
//!
//! A CI script typically discovers packages first and hands the list to an
//! orchestrator:
//!
//! ```no_run
//! use std::path::Path;
//!
//! use keel::discovery::{find_buildable_packages, find_testable_packages};
//! use keel::orchestrator::Orchestrator;
//!
//! let orchestrator = Orchestrator::default();
//! let layout = orchestrator.toolchain().layout();
//!
//! let testable = find_testable_packages(Path::new("src"), layout)?;
//! orchestrator.run_test_folders_early_exit(&testable, Path::new("logs"), "test.log")?;
//!
//! let buildable = find_buildable_packages(Path::new("src"), layout)?;
//! orchestrator.build_folders(&buildable, Path::new("bin"), "-s -w")?;
//! # Ok::<(), keel::error::KeelError>(())
//! ```
//!
//! Archiving and versioning are independent of the orchestrator:
//!
//! ```no_run
//! use std::path::Path;
//!
//! use keel::archive::zip_folders;
//! use keel::version::{git_hash, git_height};
//!
//! let height = git_height(Path::new("VERSION"), Path::new("."))?;
//! let hash = git_hash(Path::new("."))?;
//! println!("1.0.{height} ({hash})");
//!
//! zip_folders(&["bin", "docs"], Path::new("dist/release.zip"))?;
//! # Ok::<(), keel::error::KeelError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`discovery`]: marker-file based package discovery
//! - [`orchestrator`]: build, test and cover runs with their failure policies
//! - [`archive`]: deterministic zip archives
//! - [`version`]: git describe and git height
//! - [`toolchain`]: the external compiler/test runner and its commands
//! - [`platform`]: per-OS capabilities
//! - [`fsutil`]: small filesystem helpers
//! - [`cli`] and [`commands`]: the `keel` binary
//! - [`error`]: error types with thiserror + miette
//!
//! Everything runs sequentially and blocks on each subprocess; there is no
//! timeout or cancellation.

pub mod archive;
pub mod cli;
pub mod commands;
pub mod discovery;
pub mod error;
pub mod fsutil;
pub mod orchestrator;
pub mod platform;
pub mod toolchain;
pub mod version;

// Internal modules
mod logging;
mod process;
