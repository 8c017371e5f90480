//! Voice assistant for EasyMed
//!
//! Two assistants share the same speech plumbing:
//!
//! - [`VoiceAssistant`]: fetches a short-lived credential, recognizes one
//!   utterance, hands the transcript to an [`UnderstandingPolicy`], picks a
//!   voice by locale and urgency tone and speaks the reply.
//! - [`CommandAssistant`]: a fixed start / next / back / help vocabulary with
//!   continuous listening.
//!
//! # Providers
//!
//! - **Azure Speech** (REST): short-audio recognition and SSML synthesis,
//!   authorized with the bearer token from the credential endpoint.
//!
//! Devices are pluggable through [`AudioDevices`]; [`WavDevices`] replays a
//! WAV recording as the microphone and writes replies to disk.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use locale_context::LocaleContext;
//! use voice_assistant::*;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = VoiceConfig::from_env()?;
//! let locale = LocaleContext::embedded()?;
//! let services = VoiceServices {
//!     credentials: Arc::new(HttpCredentialProvider::new(&config.token_endpoint)),
//!     devices: Arc::new(WavDevices::new("question.wav", "replies")),
//!     backend: Arc::from(create_backend(&config)),
//!     policy: Arc::new(KeywordTriage::new(locale.clone())),
//! };
//! let assistant = VoiceAssistant::new(config, locale, services);
//!
//! if let CycleOutcome::Completed(turn) = assistant.start_listening().await? {
//!     println!("{} -> {}", turn.transcript, turn.reply);
//! }
//! # Ok(())
//! # }
//! ```

pub mod commands;
pub mod config;
pub mod credential;
pub mod devices;
pub mod error;
pub mod flow;
pub mod providers;
pub mod speech;
pub mod ssml;
pub mod understanding;
pub mod vocabulary;
pub mod voices;

pub use commands::*;
pub use config::*;
pub use credential::*;
pub use devices::*;
pub use error::*;
pub use flow::*;
pub use providers::*;
pub use speech::*;
pub use ssml::*;
pub use understanding::*;
pub use voices::*;
