use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use crate::error::{KeelError, Result};
use crate::fsutil::ensure_directory_exists;

/// The log file shared by every package of one test or cover run.
///
/// Created (and truncated) before the first package runs. Each subprocess
/// gets a clone of the same handle for stdout and stderr, so output lands in
/// the order it is written. The file is closed when the sink is dropped,
/// including when a fail-fast run returns early.
#[derive(Debug)]
pub struct LogSink {
    path: PathBuf,
    file: File,
}

impl LogSink {
    /// Ensure `dir` exists and create `dir/file_name`, truncating any
    /// previous contents.
    pub fn create(dir: &Path, file_name: impl AsRef<Path>) -> Result<Self> {
        ensure_directory_exists(dir)?;

        let path = dir.join(file_name);
        let file = File::create(&path).map_err(|source| KeelError::IoError {
            path: path.clone(),
            source,
        })?;

        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A fresh handle to the log, suitable for a child's stdout or stderr.
    pub(crate) fn stdio(&self) -> Result<Stdio> {
        let handle = self.file.try_clone().map_err(|source| KeelError::IoError {
            path: self.path.clone(),
            source,
        })?;
        Ok(Stdio::from(handle))
    }
}
