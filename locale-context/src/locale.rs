use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LocaleError;

/// Supported UI and speech languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum Locale {
    #[default]
    #[serde(rename = "en", alias = "english", alias = "en-IN")]
    English,
    #[serde(rename = "hi", alias = "hindi", alias = "hi-IN")]
    Hindi,
    #[serde(rename = "ta", alias = "tamil", alias = "ta-IN")]
    Tamil,
    #[serde(rename = "te", alias = "telugu", alias = "te-IN")]
    Telugu,
    #[serde(rename = "bn", alias = "bengali", alias = "bn-IN")]
    Bengali,
    #[serde(rename = "kn", alias = "kannada", alias = "kn-IN")]
    Kannada,
}

impl Locale {
    pub const ALL: [Locale; 6] = [
        Locale::English,
        Locale::Hindi,
        Locale::Tamil,
        Locale::Telugu,
        Locale::Bengali,
        Locale::Kannada,
    ];

    /// Locale used when a key or table is missing
    pub const DEFAULT: Locale = Locale::English;

    pub fn code(self) -> &'static str {
        match self {
            Locale::English => "en",
            Locale::Hindi => "hi",
            Locale::Tamil => "ta",
            Locale::Telugu => "te",
            Locale::Bengali => "bn",
            Locale::Kannada => "kn",
        }
    }

    /// BCP-47 tag handed to the recognizer and the synthesis markup
    pub fn speech_tag(self) -> &'static str {
        match self {
            Locale::English => "en-IN",
            Locale::Hindi => "hi-IN",
            Locale::Tamil => "ta-IN",
            Locale::Telugu => "te-IN",
            Locale::Bengali => "bn-IN",
            Locale::Kannada => "kn-IN",
        }
    }

    /// Name of the language in that language, for the language selector
    pub fn native_name(self) -> &'static str {
        match self {
            Locale::English => "English",
            Locale::Hindi => "हिन्दी",
            Locale::Tamil => "தமிழ்",
            Locale::Telugu => "తెలుగు",
            Locale::Bengali => "বাংলা",
            Locale::Kannada => "ಕನ್ನಡ",
        }
    }

    pub fn english_name(self) -> &'static str {
        match self {
            Locale::English => "english",
            Locale::Hindi => "hindi",
            Locale::Tamil => "tamil",
            Locale::Telugu => "telugu",
            Locale::Bengali => "bengali",
            Locale::Kannada => "kannada",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    /// Accepts a code (`hi`), an English name (`hindi`) or a speech tag (`hi-IN`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Locale::ALL
            .into_iter()
            .find(|locale| {
                needle == locale.code()
                    || needle == locale.english_name()
                    || needle == locale.speech_tag().to_lowercase()
            })
            .ok_or_else(|| LocaleError::UnknownLocale(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_names_and_tags() {
        assert_eq!("hi".parse::<Locale>().unwrap(), Locale::Hindi);
        assert_eq!("Tamil".parse::<Locale>().unwrap(), Locale::Tamil);
        assert_eq!("kn-IN".parse::<Locale>().unwrap(), Locale::Kannada);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn speech_tags_are_indian_variants() {
        for locale in Locale::ALL {
            assert!(locale.speech_tag().ends_with("-IN"));
            assert!(locale.speech_tag().starts_with(locale.code()));
        }
    }
}
