//! Application layer errors.
//!
//! These errors represent failures while orchestrating the pipeline (files,
//! state, external tools). Metadata rule violations are `DomainError` from
//! `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Lines of tool output carried into suggestions.
const TOOL_OUTPUT_TAIL: usize = 10;

/// Errors that occur during pipeline orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The declared entry file would collide with an existing `index.html`.
    #[error("Entry file '{declared}' cannot be promoted: {dest} already contains index.html")]
    ConflictingEntryFile { dest: PathBuf, declared: String },

    /// The persisted state file is not a JSON object.
    #[error("State file {path} is corrupt: {reason}")]
    CorruptState { path: PathBuf, reason: String },

    /// An external toolchain command exited unsuccessfully.
    #[error(
        "Toolchain step '{step}' failed with exit code {}",
        .exit_code.map_or_else(|| "none".to_string(), |c| c.to_string())
    )]
    ToolchainFailure {
        step: String,
        exit_code: Option<i32>,
        output: String,
    },

    /// The packaging output did not name the produced artifact.
    #[error("Toolchain step '{step}' did not report an artifact location")]
    ArtifactNotFound { step: String, output: String },

    /// A required external tool is missing or broken.
    #[error("Required tool '{tool}' is not available: {reason}")]
    PreflightFailure { tool: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Template rendering failed.
    #[error("Template rendering failed for {path}: {reason}")]
    RenderingFailed { path: PathBuf, reason: String },

    /// A process could not be started at all.
    #[error("Failed to run '{command}': {reason}")]
    ExecutionFailed { command: String, reason: String },

    /// The input provider could not obtain an answer.
    #[error("Input failed: {reason}")]
    InputFailed { reason: String },

    /// The platform does not implement the requested operation.
    #[error("'{operation}' is not supported for platform '{platform}'")]
    Unsupported {
        platform: String,
        operation: &'static str,
    },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ConflictingEntryFile { declared, .. } => vec![
                format!(
                    "The application declares '{}' as its entry point, but index.html also exists",
                    declared
                ),
                "Rename or remove index.html in the application source".into(),
                "Or set project.content_src = \"index.html\" in tvpack.toml".into(),
            ],
            Self::CorruptState { path, .. } => vec![
                format!("Fix or delete {}", path.display()),
                "It will be recreated after the next successful run".into(),
            ],
            Self::ToolchainFailure { output, .. } => {
                let lines: Vec<&str> = output.lines().collect();
                let tail = &lines[lines.len().saturating_sub(TOOL_OUTPUT_TAIL)..];
                let mut hints = vec!["Check the SDK output below:".to_string()];
                hints.extend(tail.iter().map(|l| format!("  {l}")));
                hints
            }
            Self::ArtifactNotFound { .. } => vec![
                "The SDK did not print 'Package File Location: <path>'".into(),
                "Run the packaging command manually to inspect its output".into(),
            ],
            Self::PreflightFailure { tool, .. } => vec![
                format!("Make sure '{}' is installed and on your PATH", tool),
                "Install the latest TV SDK and add its tools/ide/bin folder to PATH".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that the path exists and that you have write permissions".into(),
            ],
            Self::Unsupported { platform, .. } => vec![
                format!("Platform '{}' only supports 'prepare' and 'build'", platform),
            ],
            Self::InputFailed { .. } => vec![
                "Run in an interactive terminal, or pass --non-interactive".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConflictingEntryFile { .. } => ErrorCategory::Validation,
            Self::CorruptState { .. } => ErrorCategory::Configuration,
            Self::ToolchainFailure { .. }
            | Self::ArtifactNotFound { .. }
            | Self::PreflightFailure { .. }
            | Self::ExecutionFailed { .. } => ErrorCategory::External,
            Self::Unsupported { .. } => ErrorCategory::Compatibility,
            Self::InputFailed { .. } => ErrorCategory::Validation,
            Self::FilesystemError { .. } | Self::RenderingFailed { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}
