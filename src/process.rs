//! Running external programs.
//!
//! Every subprocess keel starts goes through [`Invocation`]: a program, its
//! arguments and the directory it runs in. Output either goes to the
//! caller's own stdout/stderr, into a shared [`LogSink`], or (for queries)
//! is captured and returned.

use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{KeelError, Result};
use crate::orchestrator::LogSink;

/// Where a subprocess writes its stdout and stderr.
#[derive(Clone, Copy, Debug)]
pub(crate) enum OutputSink<'a> {
    /// The calling process's own standard streams.
    Inherit,
    /// Both streams appended to the log file.
    Log(&'a LogSink),
}

/// One external command, ready to run.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Invocation<'a> {
    program: &'a OsStr,
    args: &'a [OsString],
    dir: &'a Path,
}

impl<'a> Invocation<'a> {
    pub(crate) fn new(program: &'a OsStr, args: &'a [OsString], dir: &'a Path) -> Self {
        Self { program, args, dir }
    }

    /// The command line as a single string, for logs and error messages.
    pub(crate) fn command_line(&self) -> String {
        let mut line = self.program.to_string_lossy().into_owned();
        for arg in self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(self.program);
        cmd.args(self.args).current_dir(self.dir);
        cmd
    }

    fn spawn_error(&self, source: std::io::Error) -> KeelError {
        KeelError::SpawnError {
            program: self.program.to_string_lossy().into_owned(),
            dir: self.dir.to_path_buf(),
            source,
        }
    }

    /// Run to completion, blocking the calling thread.
    ///
    /// # Errors
    ///
    /// [`KeelError::SpawnError`] if the program cannot be started and
    /// [`KeelError::CommandFailed`] if it exits unsuccessfully.
    pub(crate) fn run(&self, sink: OutputSink<'_>) -> Result<()> {
        let mut cmd = self.command();
        match sink {
            OutputSink::Inherit => {
                cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
            }
            OutputSink::Log(log) => {
                cmd.stdout(log.stdio()?).stderr(log.stdio()?);
            }
        }

        let status = cmd.status().map_err(|e| self.spawn_error(e))?;
        if !status.success() {
            return Err(KeelError::CommandFailed {
                command: self.command_line(),
                dir: self.dir.to_path_buf(),
                status,
            });
        }

        Ok(())
    }

    /// Run to completion and return stdout. Stderr is passed through to the
    /// calling process.
    pub(crate) fn capture(&self) -> Result<String> {
        let output = self
            .command()
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            return Err(KeelError::CommandFailed {
                command: self.command_line(),
                dir: self.dir.to_path_buf(),
                status: output.status,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
