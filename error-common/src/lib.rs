//! Common error handling utilities for EasyMed
//!
//! Every component of the assistant (voice flow, symptom wizard, login screen)
//! handles its failures locally: it sets a user-visible status string and
//! returns its flow to idle. This crate provides the shared vocabulary for that:
//!
//! - **`EasyMedError`**: the cross-crate error enum with the failure taxonomy
//! - **Error codes**: stable codes for logs and front-end mapping
//! - **Sanitization**: user-facing messages that never leak provider detail
//! - **Reporting**: structured diagnostics through `tracing`
//!
//! # Error Categories
//!
//! - **CredentialFetch**: the short-lived speech credential could not be obtained
//! - **DeviceInit**: microphone or speaker unavailable
//! - **Recognition**: no speech detected or recognition provider error
//! - **Synthesis**: the speech provider failed to produce the reply
//! - **Validation**: incomplete or malformed form input
//! - **Authentication**: rejected login attempt
//!
//! # Example
//!
//! ```rust
//! use error_common::{EasyMedError, ErrorCategory};
//!
//! let err = EasyMedError::CredentialFetch("endpoint returned 503".to_string());
//! assert_eq!(err.category(), ErrorCategory::CredentialFetch);
//! // Provider detail stays in the logs, the user sees a fixed status.
//! assert!(!err.user_message().contains("503"));
//! ```

pub mod codes;
pub mod reporting;
pub mod sanitization;
pub mod types;

pub use codes::*;
pub use reporting::*;
pub use sanitization::*;
pub use types::*;
