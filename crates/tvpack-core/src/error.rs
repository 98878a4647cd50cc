//! Unified error handling for tvpack core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, attaches the pipeline stage a failure happened in, and offers
//! user-actionable suggestions.

use std::fmt;

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// A step of the packaging pipeline.
///
/// Every platform operation walks a prefix of
/// `Configuring → Composing → Rendering → [Preflight → Invoking] → Finalizing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Configuring,
    Composing,
    Rendering,
    Persisting,
    Preflight,
    Invoking,
    Finalizing,
}

impl PipelineStage {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Configuring => "configuring",
            Self::Composing => "composing",
            Self::Rendering => "rendering",
            Self::Persisting => "persisting",
            Self::Preflight => "preflight",
            Self::Invoking => "invoking",
            Self::Finalizing => "finalizing",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root error type for tvpack core operations.
#[derive(Debug, Error, Clone)]
pub enum PackError {
    /// Errors from the domain layer (metadata validation).
    #[error("Validation error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration failures).
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// A failure annotated with the pipeline stage it aborted.
    #[error("{stage} stage failed: {source}")]
    Stage {
        stage: PipelineStage,
        source: Box<PackError>,
    },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl PackError {
    /// The innermost error, with stage annotations stripped.
    pub fn root(&self) -> &PackError {
        match self {
            Self::Stage { source, .. } => source.root(),
            other => other,
        }
    }

    /// The outermost stage annotation, if any.
    pub fn stage(&self) -> Option<PipelineStage> {
        match self {
            Self::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// The application error at the root, if that is what failed.
    pub fn as_application(&self) -> Option<&ApplicationError> {
        match self.root() {
            Self::Application(e) => Some(e),
            _ => None,
        }
    }

    /// The domain error at the root, if that is what failed.
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self.root() {
            Self::Domain(e) => Some(e),
            _ => None,
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Stage { source, .. } => source.suggestions(),
            Self::Internal { .. } => vec![
                "This appears to be a bug in tvpack".into(),
                "Please report it together with the output of `tvpack -vvv`".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
            },
            Self::Application(e) => e.category(),
            Self::Stage { source, .. } => source.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
    Configuration,
    /// An external tool failed or is missing.
    External,
    Internal,
}

/// Convenient result type alias.
pub type PackResult<T> = Result<T, PackError>;

/// Extension trait for tagging a failure with the stage it aborted.
pub trait StageExt<T> {
    fn in_stage(self, stage: PipelineStage) -> PackResult<T>;
}

impl<T, E> StageExt<T> for Result<T, E>
where
    E: Into<PackError>,
{
    fn in_stage(self, stage: PipelineStage) -> PackResult<T> {
        self.map_err(|e| match e.into() {
            // Keep the innermost stage; it is the one that actually failed.
            already @ PackError::Stage { .. } => already,
            other => PackError::Stage {
                stage,
                source: Box::new(other),
            },
        })
    }
}
