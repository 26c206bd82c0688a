//! Implementation of keel subcommands.
//!
//! `mod.rs` is a thin dispatcher; the command logic lives in `packages`
//! (discovery, build, test, cover, result conversion) and `release`
//! (archives, git versions, cleanup, platform queries).
//!
//! # Example
//!
//! ```no_run
//! use keel::cli::Cli;
//! use keel::commands;
//!
//! let cli = Cli::parse_args();
//! if let Err(e) = commands::execute(&cli) {
//!     eprintln!("Error: {e:?}");
//! }
//! ```

use std::path::{Path, PathBuf};

use crate::cli::{Cli, Commands};
use crate::error::Result;
use crate::logging::Logger;
use crate::orchestrator::Orchestrator;
use crate::toolchain::Toolchain;

pub(crate) mod packages;
pub(crate) mod release;


/// Execute commands based on the parsed CLI arguments.
pub fn execute(cli: &Cli) -> Result<()> {
    execute_with_dir(cli, None)
}

/// Execute commands with an explicit working directory, overriding
/// `--work-dir`.
pub fn execute_with_dir(cli: &Cli, working_dir: Option<&Path>) -> Result<()> {
    let global = cli.global_opts();
    let quiet = global.quiet();
    let verbose = if quiet { 0 } else { global.verbose() };
    let log = Logger::new(verbose, quiet);

    let work_dir = working_dir.unwrap_or(global.work_dir());
    let resolve = |path: &Path| -> PathBuf { work_dir.join(path) };

    let orchestrator = Orchestrator::builder()
        .toolchain(
            Toolchain::builder()
                .program(global.toolchain().clone())
                .build(),
        )
        .verbose(verbose)
        .quiet(quiet)
        .build();

    match cli.command() {
        Commands::FindBuild { root } => packages::find_build(&orchestrator, &resolve(root)),
        Commands::FindTest { root } => packages::find_test(&orchestrator, &resolve(root)),
        Commands::Build {
            root,
            bin_dir,
            ldflags,
        } => packages::build(&orchestrator, &resolve(root), &resolve(bin_dir), ldflags),
        Commands::Test {
            root,
            log_dir,
            log_file,
            early_exit,
        } => packages::test(
            &orchestrator,
            &resolve(root),
            &resolve(log_dir),
            log_file,
            *early_exit,
        ),
        Commands::Cover {
            root,
            log_dir,
            log_file,
        } => packages::cover(&orchestrator, &resolve(root), &resolve(log_dir), log_file),
        Commands::ConvertResults { log: log_path, xml } => {
            orchestrator.convert_test_results(&resolve(log_path), &resolve(xml), work_dir)
        }
        Commands::InstallConverter => orchestrator.install_test_converter(work_dir),
        Commands::Zip { target, sources } => {
            let sources: Vec<PathBuf> = sources.iter().map(|s| resolve(s)).collect();
            release::zip(&log, &sources, &resolve(target))
        }
        Commands::GitHash => release::git_hash(work_dir),
        Commands::GitHeight { version_file } => release::git_height(version_file, work_dir),
        Commands::Remove { paths } => {
            let paths: Vec<PathBuf> = paths.iter().map(|p| resolve(p)).collect();
            release::remove(&log, &paths)
        }
        Commands::OsDistribution => release::os_distribution(orchestrator.platform()),
    }
}
