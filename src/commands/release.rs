//! Archive, version and housekeeping commands.

use std::path::{Path, PathBuf};

use crate::archive::zip_folders;
use crate::error::Result;
use crate::fsutil::remove_paths;
use crate::logging::Logger;
use crate::platform::Platform;
use crate::version;

pub fn zip(log: &Logger, sources: &[PathBuf], target: &Path) -> Result<()> {
    log.info(format!("Zip {sources:?} into {}", target.display()));
    zip_folders(sources, target)?;
    log.verbose(1, format!("Archive written to {}", target.display()));
    Ok(())
}

pub fn git_hash(work_dir: &Path) -> Result<()> {
    println!("{}", version::git_hash(work_dir)?);
    Ok(())
}

pub fn git_height(version_file: &Path, work_dir: &Path) -> Result<()> {
    println!("{}", version::git_height(version_file, work_dir)?);
    Ok(())
}

pub fn remove(log: &Logger, paths: &[PathBuf]) -> Result<()> {
    for path in paths {
        log.verbose(1, format!("Removing {}", path.display()));
    }
    remove_paths(paths)
}

pub fn os_distribution(platform: &Platform) -> Result<()> {
    println!("{}", platform.read_os_distribution()?);
    Ok(())
}
