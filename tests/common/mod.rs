#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_fs::TempDir;
use assert_fs::prelude::*;
use git2::{Commit, Repository, Signature};

/// Lay out a small Go project:
///
/// ```text
/// go.mod
/// main/main.go
/// main/bl_test.go
/// tools/go.mod
/// tools/gen.go
/// ```
pub fn go_project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    temp_dir.child("go.mod").write_str("module example.com/app\n").unwrap();
    temp_dir.child("main/main.go").write_str("package main\n\nfunc main() {}\n").unwrap();
    temp_dir
        .child("main/bl_test.go")
        .write_str("package main\n\nimport \"testing\"\n\nfunc TestBl(t *testing.T) {}\n")
        .unwrap();
    temp_dir.child("tools/go.mod").write_str("module example.com/tools\n").unwrap();
    temp_dir.child("tools/gen.go").write_str("package main\n").unwrap();
    temp_dir
}

/// Write a stand-in toolchain script into `dir` and return its absolute
/// path.
///
/// It understands the default Go command lines:
/// - `build -v -o <out> [-ldflags <flags>]` writes the flags to `<out>`
/// - `test -v [-race]` prints a run banner and fails when the package
///   directory holds a `FAIL` file
/// - `test -v -cover` behaves like `test` and prints a coverage line
#[cfg(unix)]
pub fn fake_toolchain(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = r#"#!/bin/sh
pkg=$(basename "$PWD")
case "$1" in
  build)
    shift
    out=""
    flags=""
    while [ $# -gt 0 ]; do
      case "$1" in
        -o) shift; out="$1" ;;
        -ldflags) shift; flags="$1" ;;
      esac
      shift
    done
    printf 'built %s %s\n' "$pkg" "$flags" > "$out"
    ;;
  test)
    echo "=== RUN $pkg $*"
    if [ -f FAIL ]; then
      echo "--- FAIL: $pkg"
      exit 1
    fi
    case " $* " in
      *" -cover "*) echo "coverage: 100.0% of statements in $pkg" ;;
    esac
    echo "--- PASS: $pkg"
    ;;
  *)
    echo "unsupported: $*" >&2
    exit 2
    ;;
esac
"#;

    let path = dir.join("fake-go");
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Whether a working `go` binary is on `PATH`.
pub fn go_available() -> bool {
    std::process::Command::new("go")
        .arg("version")
        .output()
        .is_ok_and(|output| output.status.success())
}

pub fn init_repo(path: &Path) -> Repository {
    Repository::init(path).unwrap()
}

/// Write `content` to `name` and commit it on top of `HEAD`.
pub fn commit_file(repo: &Repository, name: &str, content: &str) {
    let workdir = repo.workdir().unwrap();
    let file = workdir.join(name);
    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&file, content).unwrap();

    let mut index = repo.index().unwrap();
    index.add_path(Path::new(name)).unwrap();
    index.write().unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();

    let signature = Signature::now("Keel Test", "keel@example.com").unwrap();
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&Commit<'_>> = parent.iter().collect();
    repo.commit(
        Some("HEAD"),
        &signature,
        &signature,
        &format!("update {name}"),
        &tree,
        &parents,
    )
    .unwrap();
}
