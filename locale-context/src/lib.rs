//! Locale state and translation resource bundles for EasyMed
//!
//! Replaces ambient global language state with an explicit [`LocaleContext`]
//! handed to each component at construction. Translations live in per-locale
//! YAML resource documents (UI strings, voice command phrases, intent trigger
//! phrases and emergency vocabulary) that are loaded once and never mutated.
//!
//! Lookups never fail: a key missing from the active locale falls back to
//! English, and a key missing there renders as `[key]` so gaps are visible.
//!
//! ```rust
//! use locale_context::{Locale, LocaleContext};
//!
//! let ctx = LocaleContext::embedded().unwrap();
//! ctx.set_locale(Locale::Hindi);
//! assert_eq!(ctx.speech_tag(), "hi-IN");
//! assert_eq!(ctx.t("does.not.exist"), "[does.not.exist]");
//! ```

pub mod bundle;
pub mod context;
pub mod error;
pub mod locale;

pub use bundle::*;
pub use context::*;
pub use error::*;
pub use locale::*;
