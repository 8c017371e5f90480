//! Role-based login for EasyMed
//!
//! This module provides the login screen's behavior:
//! - Role selection (patient, ASHA worker, doctor, admin)
//! - Phone login with a one-time code
//! - E-mail/password login against the user store and a demo account table
//! - Localized status messages for every outcome
//!
//! Demo shortcuts (a universal OTP and an admin phone that skips the OTP)
//! are off unless [`DemoAuthConfig::demo`] is used.
//!
//! # Example
//!
//! ```rust,no_run
//! use auth_identity::*;
//! use locale_context::LocaleContext;
//! use std::sync::Arc;
//!
//! # async fn demo() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let mut login = LoginController::new(
//!     DemoAuthConfig::demo(),
//!     LocaleContext::embedded()?,
//!     Arc::new(InMemoryUserStore::new()),
//!     Arc::new(DemoCredentialPolicy::embedded()?),
//!     Arc::new(DemoOtpIssuer::fixed("123456")),
//! );
//! login.set_phone("9876543210");
//! login.send_otp().await?;
//! login.set_otp("123456");
//! if let LoginOutcome::Authenticated(user) = login.verify_otp().await? {
//!     println!("{} logged in as {}", user.name, user.role);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod otp;
pub mod policy;
pub mod repository;
pub mod service;

pub use config::*;
pub use error::*;
pub use models::*;
pub use otp::*;
pub use policy::*;
pub use repository::*;
pub use service::*;
