//! Build, test and coverage runs over a list of packages.
//!
//! An [`Orchestrator`] walks a package list sequentially and starts one
//! toolchain subprocess per package. The runs differ in how they treat a
//! failing package:
//!
//! - [`Orchestrator::build_folders`]: fail fast; output goes to the caller's
//!   stdout/stderr.
//! - [`Orchestrator::run_test_folders`]: collect all; every package is
//!   tested and every failure returned.
//! - [`Orchestrator::run_test_folders_early_exit`]: fail fast.
//! - [`Orchestrator::cover_test_folders`]: fail fast, with coverage.
//!
//! Test and cover output from all packages goes to one [`LogSink`].
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use keel::discovery::find_testable_packages;
//! use keel::orchestrator::Orchestrator;
//! use keel::toolchain::Toolchain;
//!
//! let orchestrator = Orchestrator::builder()
//!     .toolchain(Toolchain::go())
//!     .verbose(1)
//!     .build();
//!
//! let packages = find_testable_packages(Path::new("."), orchestrator.toolchain().layout())?;
//! let failures = orchestrator.run_test_folders(&packages, Path::new("logs"), "test.log");
//! println!("{} package(s) failed", failures.len());
//! # Ok::<(), keel::error::KeelError>(())
//! ```

mod convert;
mod log_sink;

use std::ffi::{OsStr, OsString};
use std::path::{Component, Path, PathBuf};

pub use log_sink::LogSink;

use crate::error::{KeelError, Result};
use crate::fsutil::ensure_directory_exists;
use crate::logging::Logger;
use crate::platform::Platform;
use crate::process::{Invocation, OutputSink};
use crate::toolchain::Toolchain;

/// What to do when one package fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FailurePolicy {
    /// Stop at the first failure.
    FailFast,
    /// Run every package and report every failure.
    CollectAll,
}

/// Drives the toolchain over package lists.
#[derive(Clone, Debug)]
pub struct Orchestrator {
    toolchain: Toolchain,
    platform: Platform,
    log: Logger,
}

/// Builder for [`Orchestrator`].
///
/// Defaults to the Go toolchain on the current platform.
#[derive(Debug, Default)]
pub struct OrchestratorBuilder {
    toolchain: Option<Toolchain>,
    platform: Option<Platform>,
    verbose: u8,
    quiet: bool,
}

impl OrchestratorBuilder {
    pub fn toolchain(mut self, toolchain: Toolchain) -> Self {
        self.toolchain = Some(toolchain);
        self
    }

    /// Use the capabilities of `platform` instead of the current one.
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn verbose(mut self, level: u8) -> Self {
        self.verbose = level;
        self
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn build(self) -> Orchestrator {
        Orchestrator {
            toolchain: self.toolchain.unwrap_or_default(),
            platform: self.platform.unwrap_or_else(Platform::current),
            log: Logger::new(self.verbose, self.quiet),
        }
    }
}

impl Orchestrator {
    pub fn builder() -> OrchestratorBuilder {
        OrchestratorBuilder::default()
    }

    pub fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    /// Build every package into `bin_dir`, stopping at the first failure.
    ///
    /// Each package produces `bin_dir/<package dir name>` (plus the
    /// platform's executable suffix). `link_flags` is passed through the
    /// toolchain's link flag, or omitted when empty. Build output goes to
    /// the calling process's stdout and stderr.
    ///
    /// Returns the paths of the built executables.
    ///
    /// # Errors
    ///
    /// Returns an error if `bin_dir` cannot be created, or a
    /// [`KeelError::PackageFailed`] for the first package that does not
    /// build. Later packages are not attempted.
    pub fn build_folders<P: AsRef<Path>>(
        &self,
        packages: &[P],
        bin_dir: &Path,
        link_flags: &str,
    ) -> Result<Vec<PathBuf>> {
        ensure_directory_exists(bin_dir)?;
        let bin_dir = std::path::absolute(bin_dir).map_err(|source| KeelError::IoError {
            path: bin_dir.to_path_buf(),
            source,
        })?;

        let mut outputs = Vec::with_capacity(packages.len());
        for package in packages {
            let package = package.as_ref();
            let output = self
                .build_one(package, &bin_dir, link_flags)
                .map_err(|source| {
                    self.log.error(format!(
                        "Error during build of package '{}': {source}",
                        package.display()
                    ));
                    KeelError::PackageFailed {
                        package: package.to_path_buf(),
                        source: Box::new(source),
                    }
                })?;
            outputs.push(output);
        }

        Ok(outputs)
    }

    fn build_one(&self, package: &Path, bin_dir: &Path, link_flags: &str) -> Result<PathBuf> {
        let output = bin_dir.join(self.executable_name(package)?);
        self.log.info(format!(
            "Compile package '{}' to '{}'",
            package.display(),
            output.display()
        ));

        let args = self.toolchain.build_command(&output, link_flags);
        let invocation = Invocation::new(self.toolchain.program(), &args, package);
        self.log.verbose(
            1,
            format!("Run in {}: {}", package.display(), invocation.command_line()),
        );
        invocation.run(OutputSink::Inherit)?;

        Ok(output)
    }

    /// `<dir name><exe suffix>` for a package directory.
    ///
    /// The name is taken from the path as given, without following
    /// symlinks; `.` and `..` are resolved lexically.
    fn executable_name(&self, package: &Path) -> Result<OsString> {
        let absolute = std::path::absolute(package).map_err(|source| KeelError::IoError {
            path: package.to_path_buf(),
            source,
        })?;
        let mut name = base_name(&absolute)
            .ok_or_else(|| KeelError::InvalidPath {
                path: package.to_path_buf(),
                message: "package directory has no name".to_string(),
            })?
            .to_os_string();
        name.push(self.platform.exe_suffix());
        Ok(name)
    }

    /// Test every package, logging to `log_dir/log_file_name`.
    ///
    /// Every package is attempted regardless of earlier failures. The
    /// returned list holds one error per failing package and is empty when
    /// all pass. If the log cannot be prepared no package runs and the list
    /// holds only that setup error.
    pub fn run_test_folders<P: AsRef<Path>>(
        &self,
        packages: &[P],
        log_dir: &Path,
        log_file_name: impl AsRef<Path>,
    ) -> Vec<KeelError> {
        let sink = match LogSink::create(log_dir, log_file_name) {
            Ok(sink) => sink,
            Err(err) => return vec![err],
        };

        let args = self.toolchain.test_command(&self.platform);
        self.run_each(packages, &sink, &args, "test", FailurePolicy::CollectAll)
    }

    /// Test every package, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the log setup error, or a [`KeelError::PackageFailed`] for the
    /// first failing package.
    pub fn run_test_folders_early_exit<P: AsRef<Path>>(
        &self,
        packages: &[P],
        log_dir: &Path,
        log_file_name: impl AsRef<Path>,
    ) -> Result<()> {
        let sink = LogSink::create(log_dir, log_file_name)?;
        let args = self.toolchain.test_command(&self.platform);
        first_failure(self.run_each(packages, &sink, &args, "test", FailurePolicy::FailFast))
    }

    /// Measure test coverage of every package, stopping at the first
    /// failure.
    ///
    /// # Errors
    ///
    /// Same as [`Orchestrator::run_test_folders_early_exit`].
    pub fn cover_test_folders<P: AsRef<Path>>(
        &self,
        packages: &[P],
        log_dir: &Path,
        log_file_name: impl AsRef<Path>,
    ) -> Result<()> {
        let sink = LogSink::create(log_dir, log_file_name)?;
        let args = self.toolchain.cover_command();
        first_failure(self.run_each(
            packages,
            &sink,
            &args,
            "coverage measurement",
            FailurePolicy::FailFast,
        ))
    }

    fn run_each<P: AsRef<Path>>(
        &self,
        packages: &[P],
        sink: &LogSink,
        args: &[OsString],
        activity: &str,
        policy: FailurePolicy,
    ) -> Vec<KeelError> {
        let mut failures = Vec::new();

        for package in packages {
            let package = package.as_ref();
            self.log.info(format!(
                "Run {activity} for package '{}', logging to '{}'",
                package.display(),
                sink.path().display()
            ));

            let invocation = Invocation::new(self.toolchain.program(), args, package);
            self.log.verbose(
                1,
                format!(
                    "Run in {}: {} >> {}",
                    package.display(),
                    invocation.command_line(),
                    sink.path().display()
                ),
            );

            if let Err(source) = invocation.run(OutputSink::Log(sink)) {
                self.log.error(format!(
                    "Error during {activity} of package '{}': {source}",
                    package.display()
                ));
                failures.push(KeelError::PackageFailed {
                    package: package.to_path_buf(),
                    source: Box::new(source),
                });

                if policy == FailurePolicy::FailFast {
                    break;
                }
            }
        }

        failures
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Last normal component of `path` after lexically resolving `.` and `..`.
fn base_name(path: &Path) -> Option<&OsStr> {
    let mut names = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(name) => names.push(name),
            Component::ParentDir => {
                names.pop();
            }
            _ => {}
        }
    }
    names.pop()
}

fn first_failure(failures: Vec<KeelError>) -> Result<()> {
    match failures.into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
