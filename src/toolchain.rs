//! Description of the external toolchain keel drives.
//!
//! A [`Toolchain`] names the program to invoke, the files that mark a
//! directory as buildable or testable, and the argument lists for each
//! kind of run. [`Toolchain::go`] is the default; every part can be
//! replaced with the builder.

use std::ffi::OsString;
use std::path::Path;

use crate::platform::Platform;

const CONVERTER_PACKAGE: &str = "github.com/tebeka/go2xunit";
const CONVERTER_VERSION: &str = "v1.4.10";

/// Marker files used by package discovery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageLayout {
    marker_file: String,
    source_extension: String,
    test_suffix: String,
}

impl PackageLayout {
    /// * `marker_file` - file name whose presence makes a directory buildable
    /// * `source_extension` - extension of source files, without the dot
    /// * `test_suffix` - file name suffix of test sources
    pub fn new(
        marker_file: impl Into<String>,
        source_extension: impl Into<String>,
        test_suffix: impl Into<String>,
    ) -> Self {
        Self {
            marker_file: marker_file.into(),
            source_extension: source_extension.into(),
            test_suffix: test_suffix.into(),
        }
    }

    pub fn marker_file(&self) -> &str {
        &self.marker_file
    }

    pub fn source_extension(&self) -> &str {
        &self.source_extension
    }

    pub fn test_suffix(&self) -> &str {
        &self.test_suffix
    }

    /// Whether `path` is the module marker.
    pub(crate) fn is_marker(&self, path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| name == self.marker_file.as_str())
    }

    /// Whether `path` is a test source file.
    pub(crate) fn is_test_source(&self, path: &Path) -> bool {
        let has_extension = path
            .extension()
            .is_some_and(|ext| ext == self.source_extension.as_str());
        let has_suffix = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(&self.test_suffix));

        has_extension && has_suffix
    }
}

impl Default for PackageLayout {
    fn default() -> Self {
        Self::new("go.mod", "go", "_test.go")
    }
}

/// The external compiler and test runner.
#[derive(Clone, Debug)]
pub struct Toolchain {
    program: OsString,
    layout: PackageLayout,
    build_args: Vec<OsString>,
    output_flag: OsString,
    link_flag: OsString,
    test_args: Vec<OsString>,
    race_flag: OsString,
    cover_args: Vec<OsString>,
    convert_args: Vec<OsString>,
    install_converter_args: Vec<OsString>,
}

impl Toolchain {
    /// The Go toolchain, as found on `PATH`.
    pub fn go() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> ToolchainBuilder {
        ToolchainBuilder::default()
    }

    pub fn program(&self) -> &OsString {
        &self.program
    }

    pub fn layout(&self) -> &PackageLayout {
        &self.layout
    }

    /// Arguments for building one package into `output`.
    ///
    /// The link flag is left out entirely when `link_flags` is empty.
    pub fn build_command(&self, output: &Path, link_flags: &str) -> Vec<OsString> {
        let mut args = self.build_args.clone();
        args.push(self.output_flag.clone());
        args.push(output.as_os_str().to_os_string());
        if !link_flags.is_empty() {
            args.push(self.link_flag.clone());
            args.push(OsString::from(link_flags));
        }
        args
    }

    /// Arguments for testing one package, with the race detector where the
    /// platform supports it.
    pub fn test_command(&self, platform: &Platform) -> Vec<OsString> {
        let mut args = self.test_args.clone();
        if platform.race_detector() {
            args.push(self.race_flag.clone());
        }
        args
    }

    /// Arguments for testing one package with coverage measurement.
    pub fn cover_command(&self) -> Vec<OsString> {
        self.cover_args.clone()
    }

    /// Arguments for converting a test log into a JUnit XML report.
    pub fn convert_command(&self, log_path: &Path, xml_path: &Path) -> Vec<OsString> {
        let mut args = self.convert_args.clone();
        args.extend([
            OsString::from("-input"),
            log_path.as_os_str().to_os_string(),
            OsString::from("-output"),
            xml_path.as_os_str().to_os_string(),
        ]);
        args
    }

    /// Arguments for installing the test result converter.
    pub fn install_converter_command(&self) -> Vec<OsString> {
        self.install_converter_args.clone()
    }
}

impl Default for Toolchain {
    fn default() -> Self {
        Self::go()
    }
}

fn os_args(args: &[&str]) -> Vec<OsString> {
    args.iter().map(OsString::from).collect()
}

/// Builder for [`Toolchain`]. Unset parts fall back to the Go toolchain.
#[derive(Debug, Default)]
pub struct ToolchainBuilder {
    program: Option<OsString>,
    layout: Option<PackageLayout>,
    build_args: Option<Vec<OsString>>,
    test_args: Option<Vec<OsString>>,
    cover_args: Option<Vec<OsString>>,
    convert_args: Option<Vec<OsString>>,
    install_converter_args: Option<Vec<OsString>>,
}

impl ToolchainBuilder {
    /// Set the program to invoke.
    pub fn program(mut self, program: impl Into<OsString>) -> Self {
        self.program = Some(program.into());
        self
    }

    /// Set the marker files used for discovery.
    pub fn layout(mut self, layout: PackageLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Leading build arguments; the output flag and path follow them.
    pub fn build_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.build_args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    /// Test arguments; the race flag is appended where supported.
    pub fn test_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.test_args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    pub fn cover_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.cover_args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    /// Leading converter arguments; `-input <log> -output <xml>` follow them.
    pub fn convert_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.convert_args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    pub fn install_converter_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.install_converter_args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    pub fn build(self) -> Toolchain {
        Toolchain {
            program: self.program.unwrap_or_else(|| OsString::from("go")),
            layout: self.layout.unwrap_or_default(),
            build_args: self.build_args.unwrap_or_else(|| os_args(&["build", "-v"])),
            output_flag: OsString::from("-o"),
            link_flag: OsString::from("-ldflags"),
            test_args: self.test_args.unwrap_or_else(|| os_args(&["test", "-v"])),
            race_flag: OsString::from("-race"),
            cover_args: self
                .cover_args
                .unwrap_or_else(|| os_args(&["test", "-v", "-cover"])),
            convert_args: self
                .convert_args
                .unwrap_or_else(|| os_args(&["run", CONVERTER_PACKAGE])),
            install_converter_args: self.install_converter_args.unwrap_or_else(|| {
                let pinned = format!("{CONVERTER_PACKAGE}@{CONVERTER_VERSION}");
                os_args(&["install", "-v", pinned.as_str()])
            }),
        }
    }
}
