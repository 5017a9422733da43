//! Error types for the onboarding engine.

use std::collections::BTreeMap;

use crate::onboarding::steps::StepId;

/// Top-level error type for the onboarding engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Auto-save error: {0}")]
    Save(#[from] SaveError),

    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),
}

impl Error {
    /// Whether this error means the session's credentials are no longer valid.
    pub fn is_stale_token(&self) -> bool {
        match self {
            Self::Backend(e) => e.is_stale_token(),
            Self::Save(SaveError::Backend(e)) => e.is_stale_token(),
            _ => false,
        }
    }
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors returned by the profile backend.
///
/// Cloneable so the most recent failure can be kept inside a `SaveState`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("Network request failed: {reason}")]
    Network { reason: String },

    #[error("Authentication expired, please sign in again")]
    StaleToken,

    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Serialization error: {reason}")]
    Serialization { reason: String },
}

impl BackendError {
    pub fn network(reason: impl Into<String>) -> Self {
        Self::Network {
            reason: reason.into(),
        }
    }

    pub fn is_stale_token(&self) -> bool {
        matches!(self, Self::StaleToken)
    }
}

/// Errors surfaced by an auto-save coordinator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SaveError {
    #[error("{0}")]
    Backend(#[from] BackendError),

    #[error("Auto-save coordinator is no longer running")]
    Closed,
}

/// Per-field validation failures that block completing a step.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("Validation failed for {} field(s)", .fields.len())]
pub struct ValidationErrors {
    /// Field path (e.g. `emergencyContact.phone`) → message.
    pub fields: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// `Ok(())` when no field failed, otherwise `Err(self)`.
    pub fn into_result(self) -> std::result::Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Step navigation refused by the progress tracker.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("Step {step} is locked until earlier steps are completed")]
    Locked { step: StepId },

    #[error("Step {step} has not been completed and cannot be reviewed")]
    NotCompleted { step: StepId },

    #[error("Step {step} must be submitted through the prescreen scorer")]
    RequiresScoring { step: StepId },

    #[error("Already at the last step")]
    NoNextStep,

    #[error("Already at the first step")]
    NoPreviousStep,
}

/// Result type alias for the onboarding engine.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_into_result() {
        assert!(ValidationErrors::new().into_result().is_ok());

        let mut errors = ValidationErrors::new();
        errors.add("currentLocation", "Current location is required");
        let err = errors.into_result().unwrap_err();
        assert_eq!(err.get("currentLocation"), Some("Current location is required"));
        assert_eq!(err.to_string(), "Validation failed for 1 field(s)");
    }

    #[test]
    fn stale_token_detected_through_wrappers() {
        assert!(Error::from(BackendError::StaleToken).is_stale_token());
        assert!(Error::from(SaveError::from(BackendError::StaleToken)).is_stale_token());
        assert!(!Error::from(BackendError::network("reset")).is_stale_token());
        assert!(!Error::from(SaveError::Closed).is_stale_token());
    }
}
