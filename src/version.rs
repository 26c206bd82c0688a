//! Version information derived from git history.
//!
//! Both queries shell out to the `git` binary in the given working
//! directory; its stderr is passed through to the caller.

use std::ffi::{OsStr, OsString};
use std::path::Path;

use crate::error::{KeelError, Result};
use crate::process::Invocation;

const GIT: &str = "git";

/// `git describe --always --long --dirty` for `work_dir`, trimmed.
///
/// The result looks like `v1.2.0-4-g1a2b3c4`, or just the abbreviated
/// hash when there are no tags, with `-dirty` appended when the working
/// tree has uncommitted changes.
///
/// # Errors
///
/// Returns the git failure, for example when `work_dir` is not inside a
/// repository or the repository has no commits yet.
pub fn git_hash(work_dir: &Path) -> Result<String> {
    let output = git(work_dir, &["describe", "--always", "--long", "--dirty"])?;
    Ok(output.trim().to_string())
}

/// The git height of `version_file`: the number of commits after the last
/// commit that changed it (following renames), up to and including `HEAD`.
///
/// A height of 0 means `HEAD` itself last touched the file.
///
/// `version_file` is relative to `work_dir`.
///
/// # Errors
///
/// Any of the three git queries failing is returned as is. A file with no
/// history gives [`KeelError::InvalidPath`], and a count that is not a
/// number gives [`KeelError::InvalidHeight`].
pub fn git_height(version_file: &Path, work_dir: &Path) -> Result<u32> {
    let mut last_change_args = vec![
        OsString::from("log"),
        OsString::from("--pretty=format:%H"),
        OsString::from("-n"),
        OsString::from("1"),
        OsString::from("--follow"),
    ];
    last_change_args.push(version_file.as_os_str().to_os_string());
    let last_change = commit_hash(&capture(work_dir, &last_change_args)?);
    if last_change.is_empty() {
        return Err(KeelError::InvalidPath {
            path: version_file.to_path_buf(),
            message: "no commit has touched this file".to_string(),
        });
    }

    let head = commit_hash(&git(work_dir, &["log", "--pretty=format:%H", "-n", "1"])?);

    let range = format!("{last_change}..{head}");
    let count = git(work_dir, &["rev-list", "--count", &range])?;

    parse_height(&count)
}

/// Strip whitespace and any quoting git's format string left around a hash.
fn commit_hash(output: &str) -> String {
    output.trim().trim_matches('"').trim().to_string()
}

fn parse_height(output: &str) -> Result<u32> {
    let value = output.trim();
    value.parse().map_err(|_| KeelError::InvalidHeight {
        value: value.to_string(),
    })
}

fn git(work_dir: &Path, args: &[&str]) -> Result<String> {
    let args: Vec<OsString> = args.iter().map(OsString::from).collect();
    capture(work_dir, &args)
}

fn capture(work_dir: &Path, args: &[OsString]) -> Result<String> {
    Invocation::new(OsStr::new(GIT), args, work_dir).capture()
}
