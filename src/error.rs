//! Error types for keel.
//!
//! This module defines all error types used throughout keel, using a
//! combination of `thiserror` for ergonomic error definitions and `miette`
//! for rich diagnostic output.
//!
//! # Error Handling Strategy
//!
//! - All errors derive from [`KeelError`]
//! - Each variant includes helpful error messages and diagnostic codes
//! - Context is preserved through the error chain
//! - Errors are automatically converted to `miette::Result` for CLI output
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use keel::error::{KeelError, Result};
//!
//! fn check_output_dir(path: &Path) -> Result<()> {
//!     if !path.is_dir() {
//!         return Err(KeelError::InvalidPath {
//!             path: path.to_path_buf(),
//!             message: "not a directory".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;
use std::process::ExitStatus;

use miette::Diagnostic;
use thiserror::Error;

/// Error types that can occur in keel operations
#[derive(Error, Debug, Diagnostic)]
pub enum KeelError {
    /// File system I/O error during keel operations.
    ///
    /// Raised when a log directory or log file cannot be prepared, when the
    /// archive destination cannot be created, when a source file cannot be
    /// read while archiving, or when a path cannot be removed.
    #[error("I/O error accessing '{path}'")]
    #[diagnostic(code(keel::io_error))]
    IoError {
        /// The path that caused the I/O error
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A directory walk failed part way through.
    ///
    /// Package discovery skips these per entry; the archive builder aborts.
    #[error("Failed to walk '{path}'")]
    #[diagnostic(code(keel::walk_error))]
    WalkError {
        /// The root of the walk that failed
        path: PathBuf,
        /// The underlying walkdir error
        #[source]
        source: walkdir::Error,
    },

    /// The archive writer rejected an entry or could not be finalized.
    #[error("Failed to write archive '{path}'")]
    #[diagnostic(
        code(keel::archive::write_error),
        help("A partially written archive may remain on disk; remove it before retrying.")
    )]
    ArchiveError {
        /// The destination archive
        path: PathBuf,
        /// The underlying zip error
        #[source]
        source: zip::result::ZipError,
    },

    /// An external program could not be started.
    #[error("Failed to run '{program}' in '{dir}'")]
    #[diagnostic(
        code(keel::process::spawn_error),
        help("Ensure the program is installed and available on PATH.")
    )]
    SpawnError {
        /// The program that failed to start
        program: String,
        /// The working directory of the invocation
        dir: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// An external program ran but exited unsuccessfully.
    #[error("Command '{command}' failed in '{dir}' ({status})")]
    #[diagnostic(code(keel::process::command_failed))]
    CommandFailed {
        /// The rendered command line
        command: String,
        /// The working directory of the invocation
        dir: PathBuf,
        /// The exit status reported by the program
        status: ExitStatus,
    },

    /// A single package failed to build, test or cover.
    #[error("Package '{package}' failed")]
    #[diagnostic(code(keel::package::failed))]
    PackageFailed {
        /// The package directory
        package: PathBuf,
        /// What went wrong while processing it
        #[source]
        source: Box<KeelError>,
    },

    /// The commit count returned by git was not a number.
    #[error("Git returned a height that is not a number: '{value}'")]
    #[diagnostic(
        code(keel::version::invalid_height),
        help("Check that the version file is tracked and the repository history is intact.")
    )]
    InvalidHeight {
        /// The trimmed output of the count query
        value: String,
    },

    /// A path could not be used for the requested operation.
    #[error("Invalid path '{path}': {message}")]
    #[diagnostic(code(keel::path::invalid))]
    InvalidPath {
        /// The offending path
        path: PathBuf,
        /// Description of why the path is invalid
        message: String,
    },

    /// An operation was invoked on a platform it has no implementation for.
    #[error("Error: The OS \"{os}\" is not supported by the \"{method}\" method")]
    #[diagnostic(code(keel::platform::unsupported))]
    OsNotSupported {
        /// The platform identifier
        os: String,
        /// The operation that does not support it
        method: String,
    },

    /// One or more packages failed during a collect-all test run.
    #[error("{} package(s) failed their tests", .failures.len())]
    #[diagnostic(
        code(keel::test::failures),
        help("See the test log for the output of each package.")
    )]
    TestFailures {
        /// Every per-package failure, in the order the packages ran
        #[related]
        failures: Vec<KeelError>,
    },

    /// Invalid configuration passed to a builder or the CLI.
    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(keel::config::error),
        help("Check the required configuration parameters.")
    )]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },
}

impl KeelError {
    /// Build an [`KeelError::OsNotSupported`] for `method` on `os`.
    pub fn os_not_supported(os: impl Into<String>, method: impl Into<String>) -> Self {
        Self::OsNotSupported {
            os: os.into(),
            method: method.into(),
        }
    }
}

/// Type alias for Results in this crate
pub type Result<T> = std::result::Result<T, KeelError>;
