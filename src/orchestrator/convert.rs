//! Test log to JUnit XML conversion.

use std::path::Path;

use super::Orchestrator;
use crate::error::Result;
use crate::fsutil::ensure_directory_exists;
use crate::process::{Invocation, OutputSink};

impl Orchestrator {
    /// Convert a test log into a JUnit XML report at `xml_path`.
    ///
    /// The directory of `xml_path` is created first. The converter runs in
    /// `work_dir` (usually the repository root) and must already be
    /// installed, see [`Orchestrator::install_test_converter`].
    ///
    /// # Errors
    ///
    /// Returns an error if the report directory cannot be created or the
    /// converter fails.
    pub fn convert_test_results(
        &self,
        log_path: &Path,
        xml_path: &Path,
        work_dir: &Path,
    ) -> Result<()> {
        if let Some(parent) = xml_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            ensure_directory_exists(parent)?;
        }

        self.log.info(format!(
            "Convert the test results {} to {}",
            log_path.display(),
            xml_path.display()
        ));

        let args = self.toolchain.convert_command(log_path, xml_path);
        Invocation::new(self.toolchain.program(), &args, work_dir)
            .run(OutputSink::Inherit)
            .inspect_err(|e| self.log.error(format!("Error during test result conversion: {e}")))
    }

    /// Install the test result converter used by
    /// [`Orchestrator::convert_test_results`].
    ///
    /// # Errors
    ///
    /// Returns the installer's failure unchanged.
    pub fn install_test_converter(&self, work_dir: &Path) -> Result<()> {
        let args = self.toolchain.install_converter_command();
        let invocation = Invocation::new(self.toolchain.program(), &args, work_dir);
        self.log.verbose(
            1,
            format!("Run in {}: {}", work_dir.display(), invocation.command_line()),
        );
        invocation.run(OutputSink::Inherit)
    }
}
