//! Package discovery.
//!
//! Walks a source tree and classifies directories by the marker files they
//! directly contain. Results are in walk order (pre-order, directory entries
//! in the order the filesystem returns them), without duplicates.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{KeelError, Result};
use crate::toolchain::PackageLayout;

/// Finds every directory under `root` that directly contains the module
/// marker file (`go.mod` for Go).
///
/// # Errors
///
/// Returns an error only if `root` itself cannot be read. Entries that fail
/// part way through the walk (permission errors, races with deletion) are
/// skipped.
pub fn find_buildable_packages(root: &Path, layout: &PackageLayout) -> Result<Vec<PathBuf>> {
    collect_package_dirs(root, |path| layout.is_marker(path))
}

/// Finds every directory under `root` that directly contains at least one
/// test source file (`*_test.go` for Go).
///
/// # Errors
///
/// Same as [`find_buildable_packages`].
pub fn find_testable_packages(root: &Path, layout: &PackageLayout) -> Result<Vec<PathBuf>> {
    collect_package_dirs(root, |path| layout.is_test_source(path))
}

fn collect_package_dirs(root: &Path, matches: impl Fn(&Path) -> bool) -> Result<Vec<PathBuf>> {
    fs::metadata(root).map_err(|source| KeelError::IoError {
        path: root.to_path_buf(),
        source,
    })?;

    let mut packages: Vec<PathBuf> = Vec::new();

    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() || !matches(entry.path()) {
            continue;
        }

        let package = containing_dir(entry.path());
        if !packages.contains(&package) {
            packages.push(package);
        }
    }

    Ok(packages)
}

/// Parent of `path`, with `.` standing in for a bare file name.
fn containing_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;

    use proptest::prelude::*;
    use tempfile::TempDir;

    use super::*;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_find_buildable_packages() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(&root.join("app/go.mod"));
        touch(&root.join("app/main.go"));
        touch(&root.join("app/tools/gen/go.mod"));
        touch(&root.join("lib/util.go"));
        touch(&root.join("docs/go.mod.txt"));

        let found: BTreeSet<_> = find_buildable_packages(root, &PackageLayout::default())
            .unwrap()
            .into_iter()
            .collect();

        let expected: BTreeSet<_> = [root.join("app"), root.join("app/tools/gen")]
            .into_iter()
            .collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_find_testable_packages_dedups() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(&root.join("main/a_test.go"));
        touch(&root.join("main/b_test.go"));
        touch(&root.join("main/c_test.go"));
        touch(&root.join("main/main.go"));
        touch(&root.join("other/other.go"));
        touch(&root.join("notes/x_test.md"));

        let found = find_testable_packages(root, &PackageLayout::default()).unwrap();
        assert_eq!(found, vec![root.join("main")]);
    }

    #[test]
    fn test_marker_directory_is_also_descended() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(&root.join("go.mod"));
        touch(&root.join("nested/go.mod"));

        let found = find_buildable_packages(root, &PackageLayout::default()).unwrap();
        assert_eq!(found.len(), 2);
        // Pre-order: the root is visited before its children
        assert_eq!(found[0], root.to_path_buf());
    }

    #[test]
    fn test_missing_root_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");

        let result = find_buildable_packages(&missing, &PackageLayout::default());
        assert!(matches!(result, Err(KeelError::IoError { .. })));
        let result = find_testable_packages(&missing, &PackageLayout::default());
        assert!(matches!(result, Err(KeelError::IoError { .. })));
    }

    #[test]
    fn test_custom_layout() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(&root.join("crate/Cargo.toml"));
        touch(&root.join("crate/tests/api_test.rs"));

        let layout = PackageLayout::new("Cargo.toml", "rs", "_test.rs");
        assert_eq!(
            find_buildable_packages(root, &layout).unwrap(),
            vec![root.join("crate")]
        );
        assert_eq!(
            find_testable_packages(root, &layout).unwrap(),
            vec![root.join("crate/tests")]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subdirectory_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(&root.join("open/go.mod"));
        touch(&root.join("locked/inner/go.mod"));

        let locked = root.join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let result = find_buildable_packages(root, &PackageLayout::default());

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        // Running as root can still read the directory; either way the walk
        // must not fail and must find the readable package.
        let found = result.unwrap();
        assert!(found.contains(&root.join("open")));
    }

    #[test]
    fn test_containing_dir_of_bare_name() {
        assert_eq!(containing_dir(Path::new("go.mod")), PathBuf::from("."));
        assert_eq!(containing_dir(Path::new("a/go.mod")), PathBuf::from("a"));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_one_entry_per_marker_dir(
            dirs in prop::collection::btree_set("[a-z]{1,6}(/[a-z]{1,6}){0,2}", 0..8)
        ) {
            let temp_dir = TempDir::new().unwrap();
            let root = temp_dir.path();
            for dir in &dirs {
                touch(&root.join(dir).join("go.mod"));
                touch(&root.join(dir).join("x_test.go"));
                touch(&root.join(dir).join("y_test.go"));
            }

            let buildable = find_buildable_packages(root, &PackageLayout::default()).unwrap();
            let testable = find_testable_packages(root, &PackageLayout::default()).unwrap();

            prop_assert_eq!(buildable.len(), dirs.len());
            prop_assert_eq!(testable.len(), dirs.len());

            let unique: BTreeSet<_> = buildable.iter().collect();
            prop_assert_eq!(unique.len(), buildable.len());
        }
    }
}
