//! Deterministic zip archives of build artifacts.
//!
//! Entry names are relative to the *parent* of each source root, so the
//! root's own directory name becomes the top-level entry. Several roots with
//! different names can share one archive without colliding.

use std::borrow::Cow;
use std::fs::{self, File};
use std::io;
use std::path::{Component, Path};

use walkdir::WalkDir;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::error::{KeelError, Result};
use crate::fsutil::path_exists;

/// Zip each directory in `sources` recursively into `target`.
///
/// `target` is created or truncated. Sources that do not exist are skipped.
/// Directories become entries with a trailing `/`; files are deflated.
/// Entries are written in file name order with a fixed timestamp, so
/// identical trees give identical archives.
///
/// # Errors
///
/// Fails immediately if `target` cannot be created (for example when its
/// directory does not exist). Any later walk, read or write failure aborts
/// the archive; the partially written file is left on disk.
pub fn zip_folders<P: AsRef<Path>>(sources: &[P], target: &Path) -> Result<()> {
    let file = File::create(target).map_err(|source| KeelError::IoError {
        path: target.to_path_buf(),
        source,
    })?;

    let mut writer = ZipWriter::new(file);

    for source in sources {
        let source = source.as_ref();
        if !path_exists(source) {
            continue;
        }
        add_tree(&mut writer, source, target)?;
    }

    writer.finish().map_err(|source| KeelError::ArchiveError {
        path: target.to_path_buf(),
        source,
    })?;

    Ok(())
}

fn add_tree(writer: &mut ZipWriter<File>, root: &Path, target: &Path) -> Result<()> {
    // `.` and `..` have no name of their own to use as the top-level entry
    let root: Cow<'_, Path> = if root.file_name().is_some() {
        Cow::Borrowed(root)
    } else {
        Cow::Owned(fs::canonicalize(root).map_err(|source| KeelError::IoError {
            path: root.to_path_buf(),
            source,
        })?)
    };
    let root = root.as_ref();
    let base = root.parent().unwrap_or(Path::new(""));
    let archive_error = |source: ZipError| KeelError::ArchiveError {
        path: target.to_path_buf(),
        source,
    };

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| KeelError::WalkError {
            path: root.to_path_buf(),
            source,
        })?;
        let path = entry.path();

        let relative = path.strip_prefix(base).map_err(|_| KeelError::InvalidPath {
            path: path.to_path_buf(),
            message: format!("not inside '{}'", base.display()),
        })?;
        let name = entry_name(relative).ok_or_else(|| KeelError::InvalidPath {
            path: path.to_path_buf(),
            message: "cannot be stored in an archive".to_string(),
        })?;

        let metadata = fs::metadata(path).map_err(|source| KeelError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        let options = entry_options(&metadata);

        if metadata.is_dir() {
            writer
                .add_directory(format!("{name}/"), options)
                .map_err(archive_error)?;
            continue;
        }

        writer.start_file(name, options).map_err(archive_error)?;
        let mut input = File::open(path).map_err(|source| KeelError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        io::copy(&mut input, writer).map_err(|source| KeelError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
    }

    Ok(())
}

/// `/`-separated entry name for a relative path, or `None` if the path has
/// components that do not belong in an archive.
fn entry_name(relative: &Path) -> Option<String> {
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?),
            Component::CurDir => {}
            _ => return None,
        }
    }

    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

fn entry_options(metadata: &fs::Metadata) -> SimpleFileOptions {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());

    #[cfg(unix)]
    let options = {
        use std::os::unix::fs::PermissionsExt;
        options.unix_permissions(metadata.permissions().mode() & 0o777)
    };
    #[cfg(not(unix))]
    let _ = metadata;

    options
}
