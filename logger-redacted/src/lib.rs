//! Tracing setup with automatic PII redaction for EasyMed
//!
//! The login and voice flows handle phone numbers, e-mail addresses, one-time
//! codes and short-lived speech tokens. None of these may reach a log file in
//! clear text, so every line written by the subscriber installed here passes
//! through [`PiiRedactor`] before it hits the output.
//!
//! # Detected Data Types
//!
//! - **Email Addresses**: patient@demo.com → EMAIL[hash] or p***@d***
//! - **Phone Numbers**: 9060328119, +91 9845012345 → PHONE[hash] or ******19
//! - **National IDs**: 12-digit Aadhaar-style numbers
//! - **One-time codes**: six digits following `otp`, `code`, `passcode` or `pin` → ******
//! - **Credentials**: `Bearer ...` headers and `"token": "..."` fields
//!
//! # Example
//!
//! ```rust,no_run
//! use logger_redacted::{init_tracing, LoggerConfig};
//!
//! init_tracing(&LoggerConfig::default()).ok();
//! tracing::info!("OTP sent to 9060328119");
//! // Output: "OTP sent to PHONE[hJ3k...]"
//! ```

pub mod config;
pub mod macros;
pub mod redactor;

pub use config::*;
pub use redactor::*;

use error_common::{EasyMedError, Result};
use lazy_static::lazy_static;
use std::io::{self, Write};
use tracing_subscriber::{
    fmt::{self, time::ChronoUtc, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

lazy_static! {
    static ref DEFAULT_REDACTOR: PiiRedactor = PiiRedactor::new(RedactionConfig::default());
}

/// Redacts `text` with the default configuration
pub fn redact(text: &str) -> String {
    DEFAULT_REDACTOR.redact(text)
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing(config: &LoggerConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| EasyMedError::Configuration(format!("invalid log filter: {}", e)))?;
    let writer = RedactingMakeWriter::new(config.redaction_enabled);

    let installed = if config.json {
        // Structured JSON logging for production
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(config.with_target)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(writer),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(config.with_target)
                    .with_ansi(false)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(writer),
            )
            .try_init()
    };

    installed.map_err(|e| EasyMedError::Configuration(format!("tracing already initialized: {}", e)))
}

/// `MakeWriter` handing out redacting stderr writers
#[derive(Debug, Clone, Copy)]
pub struct RedactingMakeWriter {
    enabled: bool,
}

impl RedactingMakeWriter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl<'a> MakeWriter<'a> for RedactingMakeWriter {
    type Writer = RedactingWriter<io::Stderr>;

    fn make_writer(&'a self) -> Self::Writer {
        RedactingWriter::new(io::stderr(), self.enabled)
    }
}

/// Redacts each formatted event before forwarding it to `inner`
pub struct RedactingWriter<W> {
    inner: W,
    enabled: bool,
}

impl<W: Write> RedactingWriter<W> {
    pub fn new(inner: W, enabled: bool) -> Self {
        Self { inner, enabled }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for RedactingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.enabled {
            return self.inner.write(buf);
        }
        // The fmt layer writes one fully formatted event per call.
        let text = String::from_utf8_lossy(buf);
        self.inner.write_all(redact(&text).as_bytes())?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
