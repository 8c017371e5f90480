use parking_lot::RwLock;
use std::sync::Arc;
use tracing::warn;

use crate::bundle::ResourceBundle;
use crate::error::Result;
use crate::locale::Locale;

/// Explicit locale state threaded through component construction.
///
/// Clones share the active locale; any holder may read it, only
/// [`LocaleContext::set_locale`] changes it.
#[derive(Debug, Clone)]
pub struct LocaleContext {
    bundle: Arc<ResourceBundle>,
    current: Arc<RwLock<Locale>>,
}

impl LocaleContext {
    pub fn new(bundle: Arc<ResourceBundle>, initial: Locale) -> Self {
        Self {
            bundle,
            current: Arc::new(RwLock::new(initial)),
        }
    }

    /// Context over the embedded tables, starting in the default locale
    pub fn embedded() -> Result<Self> {
        Ok(Self::new(Arc::new(ResourceBundle::embedded()?), Locale::DEFAULT))
    }

    pub fn current(&self) -> Locale {
        *self.current.read()
    }

    pub fn set_locale(&self, locale: Locale) {
        let mut current = self.current.write();
        let previous = *current;
        if previous != locale {
            tracing::info!(from = %previous, to = %locale, "Locale changed");
            *current = locale;
        }
    }

    pub fn speech_tag(&self) -> &'static str {
        self.current().speech_tag()
    }

    pub fn bundle(&self) -> &ResourceBundle {
        &self.bundle
    }

    /// Localized string for `key`; `[key]` when neither the active nor the
    /// default table has it.
    pub fn t(&self, key: &str) -> String {
        self.t_in(self.current(), key)
    }

    pub fn t_in(&self, locale: Locale, key: &str) -> String {
        match self.bundle.lookup(locale, key) {
            Some(value) => value.to_string(),
            None => {
                warn!(key = key, locale = %locale, "Missing translation");
                format!("[{}]", key)
            }
        }
    }

    /// `t` with `{name}` placeholders substituted
    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        args.iter().fold(self.t(key), |text, (name, value)| {
            text.replace(&format!("{{{}}}", name), value)
        })
    }

    /// Phrase for a voice command; the command name itself when untranslated
    pub fn voice_command(&self, command: &str) -> String {
        self.bundle
            .lookup_command(self.current(), command)
            .unwrap_or(command)
            .to_string()
    }

    /// Trigger phrases for `intent` in the active locale, else the default one
    pub fn intent_phrases(&self, intent: &str) -> Vec<String> {
        [self.current(), Locale::DEFAULT]
            .into_iter()
            .filter_map(|locale| self.bundle.table(locale))
            .find_map(|table| table.intents.get(intent).filter(|p| !p.is_empty()))
            .cloned()
            .unwrap_or_default()
    }

    /// Emergency vocabulary of the active locale plus the default locale
    pub fn emergency_terms(&self) -> Vec<String> {
        let mut terms: Vec<String> = Vec::new();
        let mut locales = vec![self.current()];
        if self.current() != Locale::DEFAULT {
            locales.push(Locale::DEFAULT);
        }
        for table in locales.into_iter().filter_map(|l| self.bundle.table(l)) {
            for term in &table.emergency_terms {
                if !terms.contains(term) {
                    terms.push(term.clone());
                }
            }
        }
        terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> LocaleContext {
        LocaleContext::embedded().unwrap()
    }

    #[test]
    fn missing_keys_render_as_bracketed_placeholder() {
        let ctx = context();
        assert_eq!(ctx.t("no.such.key"), "[no.such.key]");
        ctx.set_locale(Locale::Tamil);
        assert_eq!(ctx.t("no.such.key"), "[no.such.key]");
    }

    #[test]
    fn clones_share_the_active_locale() {
        let ctx = context();
        let reader = ctx.clone();
        ctx.set_locale(Locale::Hindi);
        assert_eq!(reader.current(), Locale::Hindi);
        assert_eq!(reader.speech_tag(), "hi-IN");
    }

    #[test]
    fn placeholders_are_substituted() {
        let ctx = context();
        let text = ctx.t_with("auth.otp_sent", &[("phone", "9876543210")]);
        assert!(text.contains("9876543210"));
        assert!(!text.contains("{phone}"));
    }

    #[test]
    fn voice_command_falls_back_to_command_name() {
        let ctx = context();
        ctx.set_locale(Locale::Hindi);
        assert_eq!(ctx.voice_command("start"), "परामर्श शुरू करें");
        assert_eq!(ctx.voice_command("dance"), "dance");
    }

    #[test]
    fn emergency_terms_include_default_locale() {
        let ctx = context();
        ctx.set_locale(Locale::Hindi);
        let terms = ctx.emergency_terms();
        assert!(terms.iter().any(|t| t == "chest pain"));
        assert!(terms.iter().any(|t| t == "सीने में दर्द"));
    }
}
