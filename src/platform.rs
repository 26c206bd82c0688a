//! Platform capability table.
//!
//! Everything that differs between operating systems (executable suffix,
//! race detector availability, where the distribution descriptor lives) is
//! resolved once into a [`Platform`] value at the start of a call rather
//! than checked inline throughout the orchestration code.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{KeelError, Result};

const OS_RELEASE: &str = "/etc/os-release";

/// Capabilities of the platform an operation runs on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Platform {
    os: String,
    exe_suffix: &'static str,
    race_detector: bool,
    os_release: Option<PathBuf>,
}

impl Platform {
    /// The platform this process is running on.
    pub fn current() -> Self {
        Self::for_os(std::env::consts::OS)
    }

    /// Look up the capabilities of `os`, using the identifiers of
    /// [`std::env::consts::OS`].
    pub fn for_os(os: &str) -> Self {
        match os {
            "windows" => Self {
                os: os.to_string(),
                exe_suffix: ".exe",
                race_detector: false,
                os_release: None,
            },
            "macos" | "ios" => Self {
                os: os.to_string(),
                exe_suffix: "",
                race_detector: true,
                os_release: None,
            },
            _ => Self {
                os: os.to_string(),
                exe_suffix: "",
                race_detector: true,
                os_release: Some(PathBuf::from(OS_RELEASE)),
            },
        }
    }

    /// Override where the distribution descriptor is read from.
    pub fn with_os_release(mut self, path: impl Into<PathBuf>) -> Self {
        self.os_release = Some(path.into());
        self
    }

    pub fn os(&self) -> &str {
        &self.os
    }

    /// Suffix appended to built executables (`.exe` on Windows).
    pub fn exe_suffix(&self) -> &'static str {
        self.exe_suffix
    }

    /// Whether tests run with the toolchain's race detector.
    pub fn race_detector(&self) -> bool {
        self.race_detector
    }

    pub fn os_release(&self) -> Option<&Path> {
        self.os_release.as_deref()
    }

    /// Read the distribution identifier (the `ID=` line) of an FHS-style
    /// Linux system.
    ///
    /// # Errors
    ///
    /// Returns [`KeelError::OsNotSupported`] on platforms without an
    /// `os-release` file, or an I/O error if the file cannot be read.
    pub fn read_os_distribution(&self) -> Result<String> {
        let path = self
            .os_release
            .as_deref()
            .ok_or_else(|| KeelError::os_not_supported(&self.os, "read_os_distribution"))?;

        let content = fs::read_to_string(path).map_err(|source| KeelError::IoError {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(parse_distribution_id(&content))
    }
}

/// The value of the last `ID=` line, or an empty string if there is none.
fn parse_distribution_id(content: &str) -> String {
    content
        .lines()
        .filter_map(|line| line.strip_prefix("ID="))
        .next_back()
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_windows_capabilities() {
        let platform = Platform::for_os("windows");
        assert_eq!(platform.exe_suffix(), ".exe");
        assert!(!platform.race_detector());
        assert!(platform.os_release().is_none());
    }

    #[test]
    fn test_linux_capabilities() {
        let platform = Platform::for_os("linux");
        assert_eq!(platform.exe_suffix(), "");
        assert!(platform.race_detector());
        assert_eq!(platform.os_release(), Some(Path::new("/etc/os-release")));
    }

    #[test]
    fn test_read_os_distribution_unsupported() {
        for os in ["windows", "macos"] {
            let err = Platform::for_os(os).read_os_distribution().unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("Error: The OS \"{os}\" is not supported by the \"read_os_distribution\" method")
            );
        }
    }

    #[test]
    fn test_read_os_distribution_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let release = temp_dir.path().join("os-release");
        fs::write(
            &release,
            "NAME=\"Ubuntu\"\nVERSION_ID=\"22.04\"\nID=ubuntu\nID_LIKE=debian\n",
        )
        .unwrap();

        let platform = Platform::for_os("linux").with_os_release(&release);
        assert_eq!(platform.read_os_distribution().unwrap(), "ubuntu");
    }

    #[test]
    fn test_read_os_distribution_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let platform =
            Platform::for_os("linux").with_os_release(temp_dir.path().join("does-not-exist"));
        assert!(matches!(
            platform.read_os_distribution(),
            Err(KeelError::IoError { .. })
        ));
    }

    #[test]
    fn test_parse_distribution_id() {
        assert_eq!(parse_distribution_id("ID=alpine\n"), "alpine");
        assert_eq!(parse_distribution_id("NAME=x\nVERSION=1\n"), "");
        assert_eq!(parse_distribution_id("ID=first\nID=second"), "second");
        // Quoted values are returned verbatim.
        assert_eq!(parse_distribution_id("ID=\"rhel\""), "\"rhel\"");
    }
}
