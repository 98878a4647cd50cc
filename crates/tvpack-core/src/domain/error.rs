// ============================================================================
// domain/error.rs - VALIDATION ERROR DOMAIN
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// Every variant is a validation failure: user-supplied or stored metadata
/// that does not satisfy a platform rule. All errors are:
/// - Cloneable (re-prompting keeps the original error around)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid value for '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: String },

    #[error("Invalid version '{version}': {reason}")]
    InvalidVersion { version: String, reason: String },

    #[error("Unknown platform '{0}'")]
    UnknownPlatform(String),

    #[error("Unknown resolution '{0}'")]
    UnknownResolution(String),

    #[error("Unknown category '{0}'")]
    UnknownCategory(String),
}

impl DomainError {
    /// Shorthand for the most common variant.
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidField { field, reason } => vec![
                format!("Field '{}' was rejected: {}", field, reason),
                "Re-run interactively to be prompted again".into(),
            ],
            Self::MissingRequiredField { field } => vec![
                format!("'{}' must be provided", field),
                "Set it under [project] in tvpack.toml or answer the prompt".into(),
            ],
            Self::InvalidVersion { version, .. } => vec![
                format!("'{}' is not accepted here", version),
                "Orsay expects MAJOR.MINOR (e.g. 1.0203)".into(),
                "webOS expects MAJOR.MINOR.PATCH (e.g. 1.2.3)".into(),
            ],
            Self::UnknownPlatform(_) => vec![
                "Supported platforms:".into(),
                "  • orsay  - Samsung Orsay (legacy Smart TV)".into(),
                "  • webos  - LG webOS TV".into(),
            ],
            Self::UnknownResolution(_) => vec![
                "Supported resolutions: 960x540, 1280x720, 1920x1080".into(),
            ],
            Self::UnknownCategory(_) => vec![
                "Supported categories: VOD, sports, game, lifestyle, information, education"
                    .into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownPlatform(_) => ErrorCategory::NotFound,
            _ => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
}
