//! Command-line interface definitions for keel.
//!
//! This module defines the CLI structure using clap, including all subcommands
//! and their arguments. The main entry point is the [`Cli`] struct.
//!
//! # Example
//!
//! ```no_run
//! use keel::cli::{Cli, Commands};
//!
//! // Parse command-line arguments
//! let cli = Cli::parse_args();
//!
//! // Access the parsed command
//! match &cli.command() {
//!     Commands::Test { early_exit, .. } => {
//!         println!("Running tests, early exit: {early_exit}");
//!     }
//!     _ => {}
//! }
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::error::{KeelError, Result};

#[cfg(test)]
mod tests;

/// Main command-line interface for keel.
///
/// Global options that apply to all commands plus the subcommand to run.
#[derive(Debug, Parser)]
#[command(
    name = "keel",
    bin_name = "keel",
    author,
    version,
    about = "Build-orchestration helpers for CI pipelines",
    long_about = None,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    global_opts: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

/// Global options that apply to all keel commands.
#[derive(Debug, Parser)]
pub struct GlobalOpts {
    /// Directory to run in; relative paths are resolved against it
    #[arg(long, global = true, default_value = ".", env = "KEEL_WORK_DIR")]
    work_dir: PathBuf,

    /// Toolchain program used to build, test and convert results
    #[arg(long, global = true, default_value = "go", env = "KEEL_TOOLCHAIN")]
    toolchain: OsString,

    /// Enable verbose output (use multiple times for more verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count, env = "KEEL_VERBOSE")]
    verbose: u8,

    /// Silence all output except for errors
    #[arg(
        short,
        long,
        global = true,
        conflicts_with = "verbose",
        env = "KEEL_QUIET"
    )]
    quiet: bool,
}

impl GlobalOpts {
    /// Create a new builder for constructing `GlobalOpts` programmatically.
    pub fn builder() -> GlobalOptsBuilder {
        GlobalOptsBuilder::default()
    }

    /// Get the working directory
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Get the toolchain program
    pub fn toolchain(&self) -> &OsString {
        &self.toolchain
    }

    /// Get the verbose level
    pub fn verbose(&self) -> u8 {
        self.verbose
    }

    /// Check if quiet mode is enabled
    pub fn quiet(&self) -> bool {
        self.quiet
    }
}

/// Builder for constructing `GlobalOpts` programmatically.
#[derive(Default)]
pub struct GlobalOptsBuilder {
    work_dir: Option<PathBuf>,
    toolchain: Option<OsString>,
    verbose: u8,
    quiet: bool,
}

impl GlobalOptsBuilder {
    /// Set the working directory.
    pub fn work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = Some(dir.into());
        self
    }

    /// Set the toolchain program.
    pub fn toolchain(mut self, program: impl Into<OsString>) -> Self {
        self.toolchain = Some(program.into());
        self
    }

    /// Set the verbosity level (0 = normal, 1+ = verbose).
    pub fn verbose(mut self, level: u8) -> Self {
        self.verbose = level;
        self
    }

    /// Enable or disable quiet mode.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Build the `GlobalOpts` instance with the configured values.
    pub fn build(self) -> GlobalOpts {
        GlobalOpts {
            work_dir: self.work_dir.unwrap_or_else(|| PathBuf::from(".")),
            toolchain: self.toolchain.unwrap_or_else(|| OsString::from("go")),
            verbose: self.verbose,
            quiet: self.quiet,
        }
    }
}

impl Cli {
    /// Get the global options
    pub fn global_opts(&self) -> &GlobalOpts {
        &self.global_opts
    }

    /// Get the command
    pub fn command(&self) -> &Commands {
        &self.command
    }

    /// Create a builder for programmatic construction
    pub fn builder() -> CliBuilder {
        CliBuilder::default()
    }

    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Builder for [`Cli`]
#[derive(Debug, Default)]
pub struct CliBuilder {
    work_dir: Option<PathBuf>,
    toolchain: Option<OsString>,
    verbose: u8,
    quiet: bool,
    command: Option<Commands>,
}

impl CliBuilder {
    /// Set the working directory
    pub fn work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = Some(dir.into());
        self
    }

    /// Set the toolchain program
    pub fn toolchain(mut self, program: impl Into<OsString>) -> Self {
        self.toolchain = Some(program.into());
        self
    }

    /// Set the verbose level
    pub fn verbose(mut self, level: u8) -> Self {
        self.verbose = level;
        self
    }

    /// Enable quiet mode
    pub fn quiet(mut self, enabled: bool) -> Self {
        self.quiet = enabled;
        self
    }

    /// Set the command
    pub fn command(mut self, command: Commands) -> Self {
        self.command = Some(command);
        self
    }

    /// Build the Cli instance
    pub fn build(self) -> Result<Cli> {
        let command = self.command.ok_or(KeelError::ConfigError {
            message: "Command is required".to_string(),
        })?;

        let mut global_opts = GlobalOpts::builder()
            .verbose(self.verbose)
            .quiet(self.quiet);
        if let Some(dir) = self.work_dir {
            global_opts = global_opts.work_dir(dir);
        }
        if let Some(program) = self.toolchain {
            global_opts = global_opts.toolchain(program);
        }

        Ok(Cli {
            global_opts: global_opts.build(),
            command,
        })
    }
}

/// Available keel subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List directories that contain a module marker file (go.mod)
    FindBuild {
        /// Directory to search recursively
        #[arg(default_value = ".")]
        root: PathBuf,
    },

    /// List directories that contain test sources (*_test.go)
    FindTest {
        /// Directory to search recursively
        #[arg(default_value = ".")]
        root: PathBuf,
    },

    /// Build every package found under ROOT, stopping at the first failure
    ///
    /// Each package is compiled to BIN_DIR/<package directory name>.
    Build {
        /// Directory to search recursively for packages
        #[arg(default_value = ".")]
        root: PathBuf,

        /// Output directory for executables
        #[arg(long, default_value = "bin", env = "KEEL_BIN_DIR")]
        bin_dir: PathBuf,

        /// Flags passed to the linker; omitted when empty
        #[arg(
            long,
            default_value = "",
            allow_hyphen_values = true,
            env = "KEEL_LDFLAGS"
        )]
        ldflags: String,
    },

    /// Test every package found under ROOT, logging to one file
    ///
    /// By default all packages are tested and every failure reported.
    /// With --early-exit the run stops at the first failing package.
    Test {
        /// Directory to search recursively for packages with tests
        #[arg(default_value = ".")]
        root: PathBuf,

        /// Directory for the test log
        #[arg(long, default_value = "logs", env = "KEEL_LOG_DIR")]
        log_dir: PathBuf,

        /// File name of the test log
        #[arg(long, default_value = "test.log")]
        log_file: String,

        /// Stop at the first failing package
        #[arg(long)]
        early_exit: bool,
    },

    /// Measure test coverage of every package found under ROOT
    Cover {
        /// Directory to search recursively for packages with tests
        #[arg(default_value = ".")]
        root: PathBuf,

        /// Directory for the coverage log
        #[arg(long, default_value = "logs", env = "KEEL_LOG_DIR")]
        log_dir: PathBuf,

        /// File name of the coverage log
        #[arg(long, default_value = "cover.log")]
        log_file: String,
    },

    /// Zip directories into one archive; missing directories are skipped
    Zip {
        /// The archive to create
        target: PathBuf,

        /// Directories to add, each under its own name
        #[arg(required = true)]
        sources: Vec<PathBuf>,
    },

    /// Print `git describe --always --long --dirty`
    GitHash,

    /// Print the number of commits since VERSION_FILE last changed
    GitHeight {
        /// File whose last change anchors the height
        version_file: PathBuf,
    },

    /// Convert a test log into a JUnit XML report
    ConvertResults {
        /// The test log to convert
        log: PathBuf,

        /// The XML report to write
        xml: PathBuf,
    },

    /// Install the test result converter
    InstallConverter,

    /// Remove files or directories recursively
    Remove {
        /// Paths to remove
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Print the Linux distribution ID from /etc/os-release
    OsDistribution,
}
