use std::fmt::Display;

/// Progress reporting on stderr, honouring `--verbose` and `--quiet`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Logger {
    verbose: u8,
    quiet: bool,
}

impl Logger {
    pub fn new(verbose: u8, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    pub fn info(&self, message: impl Display) {
        if self.prints(Some(0)) {
            eprintln!("{message}");
        }
    }

    pub fn verbose(&self, level: u8, message: impl Display) {
        if self.prints(Some(level)) {
            eprintln!("{message}");
        }
    }

    /// Report a failure. Printed even with `--quiet`.
    pub fn error(&self, message: impl Display) {
        if self.prints(None) {
            eprintln!("Error: {message}");
        }
    }

    /// Whether a message at `level` is shown; `None` is an error.
    fn prints(&self, level: Option<u8>) -> bool {
        match level {
            None => true,
            Some(level) => !self.quiet && self.verbose >= level,
        }
    }

    pub fn quiet(&self) -> bool {
        self.quiet
    }

    pub fn level(&self) -> u8 {
        self.verbose
    }
}
