//! Small filesystem helpers shared by every other module.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{KeelError, Result};

/// Create `path` (and any missing parents) unless it already exists.
pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }

    fs::create_dir_all(path).map_err(|source| KeelError::IoError {
        path: path.to_path_buf(),
        source,
    })
}

/// Recursively delete every path in `paths`, in order.
///
/// Paths that are already gone are skipped. The first real failure stops
/// the loop and is returned.
pub fn remove_paths<P: AsRef<Path>>(paths: &[P]) -> Result<()> {
    for path in paths {
        let path = path.as_ref();
        let metadata = match fs::symlink_metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => continue,
            Err(source) => {
                return Err(KeelError::IoError {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let removed = if metadata.is_dir() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        };

        match removed {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(source) => {
                return Err(KeelError::IoError {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }
    }

    Ok(())
}

/// Whether `path` exists. Paths that cannot be inspected for reasons other
/// than not existing count as present.
pub fn path_exists(path: &Path) -> bool {
    match fs::metadata(path) {
        Ok(_) => true,
        Err(e) => e.kind() != ErrorKind::NotFound,
    }
}
