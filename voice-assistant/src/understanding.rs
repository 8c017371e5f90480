//! Turning a transcript into a reply
//!
//! [`UnderstandingPolicy`] is the seam where a real clinical triage model
//! plugs in. [`KeywordTriage`] is the built-in fallback: it upgrades the tone
//! to emergency when the transcript mentions any term from the emergency
//! vocabulary and otherwise gives the normal canned reply.

use async_trait::async_trait;
use locale_context::{Locale, LocaleContext};
use tracing::debug;

use crate::error::VoiceResult;
use crate::vocabulary::normalize_transcript;
use crate::voices::UrgencyTone;

/// Reply text plus an optional tone; no tone means "use the assistant default"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub tone: Option<UrgencyTone>,
}

impl Reply {
    pub fn with_tone(text: impl Into<String>, tone: UrgencyTone) -> Self {
        Self {
            text: text.into(),
            tone: Some(tone),
        }
    }
}

impl From<String> for Reply {
    fn from(text: String) -> Self {
        Self { text, tone: None }
    }
}

impl From<&str> for Reply {
    fn from(text: &str) -> Self {
        Self::from(text.to_string())
    }
}

#[async_trait]
pub trait UnderstandingPolicy: Send + Sync {
    /// `speech_tag` is the recognition language, e.g. `hi-IN`
    async fn understand(&self, transcript: &str, speech_tag: &str) -> VoiceResult<Reply>;
}

/// Keyword-based fallback triage
#[derive(Debug, Clone)]
pub struct KeywordTriage {
    locale: LocaleContext,
}

impl KeywordTriage {
    pub fn new(locale: LocaleContext) -> Self {
        Self { locale }
    }

    /// Emergency vocabulary for the reply language plus English
    fn terms_for(&self, reply_locale: Locale) -> Vec<String> {
        let bundle = self.locale.bundle();
        let mut terms: Vec<String> = self.locale.emergency_terms();
        for locale in [reply_locale, Locale::DEFAULT] {
            if let Some(table) = bundle.table(locale) {
                for term in &table.emergency_terms {
                    if !terms.contains(term) {
                        terms.push(term.clone());
                    }
                }
            }
        }
        terms
    }

    /// Tone the transcript calls for
    pub fn classify(&self, transcript: &str, reply_locale: Locale) -> UrgencyTone {
        let normalized = normalize_transcript(transcript);
        let matched = self
            .terms_for(reply_locale)
            .into_iter()
            .find(|term| normalized.contains(&term.to_lowercase()));

        match matched {
            Some(term) => {
                debug!(term = %term, "Emergency term matched");
                UrgencyTone::Emergency
            }
            None => UrgencyTone::Normal,
        }
    }
}

#[async_trait]
impl UnderstandingPolicy for KeywordTriage {
    async fn understand(&self, transcript: &str, speech_tag: &str) -> VoiceResult<Reply> {
        let reply_locale = speech_tag.parse::<Locale>().unwrap_or_else(|_| self.locale.current());
        let tone = self.classify(transcript, reply_locale);
        let key = match tone {
            UrgencyTone::Emergency => "voice.emergency.reply",
            UrgencyTone::Normal => "voice.normal.reply",
        };
        Ok(Reply::with_tone(self.locale.t_in(reply_locale, key), tone))
    }
}
