//! Discovery, build, test and cover commands.

use std::path::Path;

use crate::discovery::{find_buildable_packages, find_testable_packages};
use crate::error::{KeelError, Result};
use crate::orchestrator::Orchestrator;

/// Prints each buildable package directory on its own line.
pub fn find_build(orchestrator: &Orchestrator, root: &Path) -> Result<()> {
    for package in find_buildable_packages(root, orchestrator.toolchain().layout())? {
        println!("{}", package.display());
    }
    Ok(())
}

/// Prints each testable package directory on its own line.
pub fn find_test(orchestrator: &Orchestrator, root: &Path) -> Result<()> {
    for package in find_testable_packages(root, orchestrator.toolchain().layout())? {
        println!("{}", package.display());
    }
    Ok(())
}

/// Builds every package under `root` into `bin_dir`.
pub fn build(orchestrator: &Orchestrator, root: &Path, bin_dir: &Path, ldflags: &str) -> Result<()> {
    let packages = find_buildable_packages(root, orchestrator.toolchain().layout())?;
    orchestrator.build_folders(&packages, bin_dir, ldflags)?;
    Ok(())
}

/// Tests every package under `root`.
///
/// Without `early_exit` every failure is gathered into one
/// [`KeelError::TestFailures`].
pub fn test(
    orchestrator: &Orchestrator,
    root: &Path,
    log_dir: &Path,
    log_file: &str,
    early_exit: bool,
) -> Result<()> {
    let packages = find_testable_packages(root, orchestrator.toolchain().layout())?;

    if early_exit {
        return orchestrator.run_test_folders_early_exit(&packages, log_dir, log_file);
    }

    let failures = orchestrator.run_test_folders(&packages, log_dir, log_file);
    if failures.is_empty() {
        Ok(())
    } else {
        Err(KeelError::TestFailures { failures })
    }
}

/// Measures coverage for every package under `root`.
pub fn cover(orchestrator: &Orchestrator, root: &Path, log_dir: &Path, log_file: &str) -> Result<()> {
    let packages = find_testable_packages(root, orchestrator.toolchain().layout())?;
    orchestrator.cover_test_folders(&packages, log_dir, log_file)
}
