use std::path::{Path, PathBuf};

use clap::Parser;

use crate::cli::{Cli, Commands};

#[test]
fn test_cli_parsing_defaults() {
    let cli = Cli::parse_from(["keel", "find-build"]);
    match cli.command() {
        Commands::FindBuild { root } => assert_eq!(root, Path::new(".")),
        other => panic!("unexpected command: {other:?}"),
    }
    assert_eq!(cli.global_opts().work_dir(), Path::new("."));
    assert_eq!(cli.global_opts().toolchain(), "go");
    assert_eq!(cli.global_opts().verbose(), 0);
    assert!(!cli.global_opts().quiet());
}

#[test]
fn test_verbose_flag() {
    let cli = Cli::parse_from(["keel", "-vv", "git-hash"]);
    assert_eq!(cli.global_opts().verbose(), 2);
    assert!(matches!(cli.command(), Commands::GitHash));
}

#[test]
fn test_quiet_conflicts_with_verbose() {
    assert!(Cli::try_parse_from(["keel", "-q", "-v", "git-hash"]).is_err());
}

#[test]
fn test_global_flag_positioning() {
    let cli = Cli::parse_from(["keel", "os-distribution", "--work-dir", "/src"]);
    assert_eq!(cli.global_opts().work_dir(), Path::new("/src"));
    assert!(matches!(cli.command(), Commands::OsDistribution));
}

#[test]
fn test_build_arguments() {
    let cli = Cli::parse_from([
        "keel",
        "build",
        "cmd",
        "--bin-dir",
        "out",
        "--ldflags",
        "-s -w",
    ]);
    match cli.command() {
        Commands::Build {
            root,
            bin_dir,
            ldflags,
        } => {
            assert_eq!(root, Path::new("cmd"));
            assert_eq!(bin_dir, Path::new("out"));
            assert_eq!(ldflags, "-s -w");
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_test_arguments() {
    let cli = Cli::parse_from(["keel", "test", "--early-exit", "--log-file", "unit.log"]);
    match cli.command() {
        Commands::Test {
            root,
            log_dir,
            log_file,
            early_exit,
        } => {
            assert_eq!(root, Path::new("."));
            assert_eq!(log_dir, Path::new("logs"));
            assert_eq!(log_file, "unit.log");
            assert!(*early_exit);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_zip_requires_sources() {
    assert!(Cli::try_parse_from(["keel", "zip", "out.zip"]).is_err());

    let cli = Cli::parse_from(["keel", "zip", "out.zip", "bin", "docs"]);
    match cli.command() {
        Commands::Zip { target, sources } => {
            assert_eq!(target, Path::new("out.zip"));
            assert_eq!(sources, &[PathBuf::from("bin"), PathBuf::from("docs")]);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_cli_builder() {
    let cli = Cli::builder()
        .work_dir("/repo")
        .toolchain("go1.22")
        .verbose(2)
        .command(Commands::GitHash)
        .build()
        .expect("Failed to build CLI");

    assert_eq!(cli.global_opts().work_dir(), Path::new("/repo"));
    assert_eq!(cli.global_opts().toolchain(), "go1.22");
    assert_eq!(cli.global_opts().verbose(), 2);
    assert!(matches!(cli.command(), Commands::GitHash));

    // Unset options keep their defaults
    let cli = Cli::builder()
        .command(Commands::InstallConverter)
        .build()
        .expect("Failed to build CLI");
    assert_eq!(cli.global_opts().work_dir(), Path::new("."));
    assert_eq!(cli.global_opts().toolchain(), "go");
}

#[test]
fn test_cli_builder_requires_command() {
    assert!(Cli::builder().build().is_err());
}
