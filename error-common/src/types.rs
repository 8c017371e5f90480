use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::codes;

/// Cross-component error enum
#[derive(Error, Debug)]
pub enum EasyMedError {
    /// Short-lived speech credential could not be fetched
    #[error("Credential fetch failed: {0}")]
    CredentialFetch(String),

    /// Microphone or speaker unavailable
    #[error("Audio device initialization failed: {0}")]
    DeviceInit(String),

    /// No speech detected or recognition provider error
    #[error("Speech recognition failed: {0}")]
    Recognition(String),

    /// Speech synthesis failed
    #[error("Speech synthesis failed: {0}")]
    Synthesis(String),

    /// Incomplete or malformed input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Rejected login attempt
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Network communication errors outside the voice flow
    #[error("Network error: {0}")]
    Network(String),

    /// Internal system errors
    #[error("Internal error: {0}")]
    Internal(String),

    /// Wrapped external errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for EasyMed operations
pub type Result<T> = std::result::Result<T, EasyMedError>;

/// Coarse classification used for codes and user-facing messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    CredentialFetch,
    DeviceInit,
    Recognition,
    Synthesis,
    Validation,
    Authentication,
    Configuration,
    Network,
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CredentialFetch => "credential_fetch",
            Self::DeviceInit => "device_init",
            Self::Recognition => "recognition",
            Self::Synthesis => "synthesis",
            Self::Validation => "validation",
            Self::Authentication => "authentication",
            Self::Configuration => "configuration",
            Self::Network => "network",
            Self::Internal => "internal",
        };
        f.write_str(name)
    }
}

impl EasyMedError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::CredentialFetch(_) => ErrorCategory::CredentialFetch,
            Self::DeviceInit(_) => ErrorCategory::DeviceInit,
            Self::Recognition(_) => ErrorCategory::Recognition,
            Self::Synthesis(_) => ErrorCategory::Synthesis,
            Self::Validation(_) => ErrorCategory::Validation,
            Self::Authentication(_) => ErrorCategory::Authentication,
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::Network(_) => ErrorCategory::Network,
            Self::Internal(_) | Self::Other(_) => ErrorCategory::Internal,
        }
    }

    /// Stable error code for logs and front-end mapping
    pub fn code(&self) -> &'static str {
        match self.category() {
            ErrorCategory::CredentialFetch => codes::voice::CREDENTIAL_FETCH_FAILED,
            ErrorCategory::DeviceInit => codes::voice::DEVICE_UNAVAILABLE,
            ErrorCategory::Recognition => codes::voice::RECOGNITION_FAILED,
            ErrorCategory::Synthesis => codes::voice::SYNTHESIS_FAILED,
            ErrorCategory::Validation => codes::validation::INVALID_INPUT,
            ErrorCategory::Authentication => codes::authentication::INVALID_CREDENTIALS,
            ErrorCategory::Configuration => codes::system::CONFIGURATION,
            ErrorCategory::Network => codes::system::NETWORK,
            ErrorCategory::Internal => codes::system::INTERNAL,
        }
    }

    /// Status string safe to show to the user
    pub fn user_message(&self) -> String {
        match self {
            // Validation and authentication messages are authored by us, not a provider.
            Self::Validation(msg) | Self::Authentication(msg) => msg.clone(),
            other => crate::sanitization::status_for(other.category()).to_string(),
        }
    }

    /// Whether the user can recover by simply re-triggering the action
    pub fn is_user_retryable(&self) -> bool {
        !matches!(
            self.category(),
            ErrorCategory::Configuration | ErrorCategory::Internal
        )
    }
}
