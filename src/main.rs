//! # keel CLI
//!
//! Command-line front end for the keel build helpers, intended to be called
//! from CI pipelines.
//!
//! ## Quick Start
//!
//! ```bash
//! keel test ./src --log-dir logs
//! keel convert-results logs/test.log reports/junit.xml
//! keel build ./src --bin-dir bin --ldflags "-X main.version=1.0.$(keel git-height VERSION)"
//! keel zip dist/release.zip bin docs
//! ```
//!
//! ## Environment Variables
//!
//! - `KEEL_WORK_DIR`: Directory to run in (default: .)
//! - `KEEL_TOOLCHAIN`: Toolchain program (default: go)
//! - `KEEL_VERBOSE`: Enable verbose output
//! - `KEEL_QUIET`: Silence all output except errors
//!
//! See individual commands for more environment variables.

use std::io::IsTerminal;

use keel::cli::Cli;

fn main() -> miette::Result<()> {
    miette::set_panic_hook();

    // Plain output when stderr is not a terminal (CI logs)
    if std::io::stderr().is_terminal() {
        miette::set_hook(Box::new(|_| {
            Box::new(
                miette::GraphicalReportHandler::new()
                    .with_theme(miette::GraphicalTheme::unicode_nocolor())
                    .with_context_lines(3),
            )
        }))?;
    } else {
        miette::set_hook(Box::new(|_| {
            Box::new(
                miette::GraphicalReportHandler::new()
                    .with_theme(miette::GraphicalTheme::none())
                    .with_context_lines(0),
            )
        }))?;
    }

    let cli = Cli::parse_args();

    keel::commands::execute(&cli).map_err(Into::into)
}
