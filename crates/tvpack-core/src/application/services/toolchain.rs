//! Sequential invocation of external SDK commands.

use std::{
    path::{Path, PathBuf},
    sync::{Arc, LazyLock},
};

use regex::Regex;
use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{CommandExecutor, CommandLine, Filesystem},
    },
    error::PackResult,
};

/// Matches the line the SDK prints after a successful `package`.
pub static PACKAGE_LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Package File Location:\s*(.*)").expect("package location pattern is valid")
});

/// One external command in a toolchain sequence.
#[derive(Debug, Clone)]
pub struct ToolchainStep {
    pub name: String,
    pub command: CommandLine,
    /// First capture group names the produced artifact.
    pub artifact_pattern: Option<Regex>,
}

impl ToolchainStep {
    pub fn new(name: impl Into<String>, command: CommandLine) -> Self {
        Self {
            name: name.into(),
            command,
            artifact_pattern: None,
        }
    }

    pub fn capturing(mut self, pattern: Regex) -> Self {
        self.artifact_pattern = Some(pattern);
        self
    }
}

/// Runs toolchain steps and collects the artifact they produce.
pub struct ToolchainRunner {
    executor: Arc<dyn CommandExecutor>,
    filesystem: Arc<dyn Filesystem>,
}

impl ToolchainRunner {
    pub fn new(executor: Arc<dyn CommandExecutor>, filesystem: Arc<dyn Filesystem>) -> Self {
        Self {
            executor,
            filesystem,
        }
    }

    /// Run a probe command and return the first line it printed.
    ///
    /// # Errors
    ///
    /// [`ApplicationError::PreflightFailure`] when the command cannot be
    /// started or exits unsuccessfully.
    #[instrument(skip(self), fields(probe = %probe))]
    pub fn preflight(&self, probe: &CommandLine) -> PackResult<String> {
        let failure = |reason: String| ApplicationError::PreflightFailure {
            tool: probe.program.clone(),
            reason,
        };

        let output = self
            .executor
            .execute(probe)
            .map_err(|e| failure(e.to_string()))?;

        if !output.is_success() {
            let code = output
                .exit_code
                .map_or_else(|| "a signal".to_string(), |c| format!("code {c}"));
            return Err(failure(format!("`{probe}` exited with {code}: {}", output.combined())).into());
        }

        let version = output
            .stdout
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or_default()
            .to_string();
        debug!(%version, "Toolchain available");
        Ok(version)
    }

    /// Execute `steps` in order, stopping at the first failure.
    ///
    /// Returns the artifact captured by the last step that declares a pattern.
    pub fn run(&self, steps: &[ToolchainStep]) -> PackResult<Option<PathBuf>> {
        let mut artifact = None;

        for step in steps {
            info!(step = %step.name, command = %step.command, "Running toolchain step");
            let output = self.executor.execute(&step.command)?;

            if !output.is_success() {
                return Err(ApplicationError::ToolchainFailure {
                    step: step.name.clone(),
                    exit_code: output.exit_code,
                    output: output.combined(),
                }
                .into());
            }

            if let Some(pattern) = &step.artifact_pattern {
                let location = pattern
                    .captures(&output.stdout)
                    .and_then(|c| c.get(1))
                    .map(|m| m.as_str().trim())
                    .filter(|s| !s.is_empty())
                    .ok_or_else(|| ApplicationError::ArtifactNotFound {
                        step: step.name.clone(),
                        output: output.combined(),
                    })?;
                debug!(step = %step.name, artifact = location, "Artifact reported");
                artifact = Some(PathBuf::from(location));
            }
        }

        Ok(artifact)
    }

    /// Move `artifact` into `dest_dir` and drop the toolchain's `work_dir`.
    ///
    /// Returns the final artifact path.
    pub fn finalize_artifact(
        &self,
        artifact: &Path,
        dest_dir: &Path,
        work_dir: &Path,
    ) -> PackResult<PathBuf> {
        let file_name = artifact
            .file_name()
            .ok_or_else(|| ApplicationError::FilesystemError {
                path: artifact.to_path_buf(),
                reason: "artifact path has no file name".into(),
            })?;

        self.filesystem.create_dir_all(dest_dir)?;
        let target = dest_dir.join(file_name);
        self.filesystem.move_file(artifact, &target)?;

        if self.filesystem.exists(work_dir) {
            self.filesystem.remove_dir_all(work_dir)?;
        }

        info!(artifact = %target.display(), "Package ready");
        Ok(target)
    }
}
