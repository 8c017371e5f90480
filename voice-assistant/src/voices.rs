/// Voice identity selection by speech language and urgency tone
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::VoiceError;

/// Urgency classification driving voice style and escalation messaging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyTone {
    #[default]
    Normal,
    Emergency,
}

impl UrgencyTone {
    /// Expressive style used in the synthesis markup
    pub fn style(self) -> &'static str {
        match self {
            UrgencyTone::Normal => "empathetic",
            UrgencyTone::Emergency => "serious",
        }
    }
}

impl fmt::Display for UrgencyTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrgencyTone::Normal => f.write_str("normal"),
            UrgencyTone::Emergency => f.write_str("emergency"),
        }
    }
}

impl FromStr for UrgencyTone {
    type Err = VoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" => Ok(UrgencyTone::Normal),
            "emergency" => Ok(UrgencyTone::Emergency),
            other => Err(VoiceError::Config(format!("Unknown urgency tone: {}", other))),
        }
    }
}

// (speech tag, normal voice, emergency voice)
const VOICE_TABLE: [(&str, &str, &str); 5] = [
    ("en-IN", "en-IN-NeerjaNeural", "en-IN-PrabhatNeural"),
    ("hi-IN", "hi-IN-SwaraNeural", "hi-IN-MadhurNeural"),
    ("ta-IN", "ta-IN-PadmaNeural", "ta-IN-ValluvarNeural"),
    ("te-IN", "te-IN-SreeNeural", "te-IN-ChaitanyaNeural"),
    ("kn-IN", "kn-IN-ManjulaNeural", "kn-IN-GuruNeural"),
];

/// Voice name for `speech_tag` and `tone`, falling back to the English (India) voices
pub fn voice_for(speech_tag: &str, tone: UrgencyTone) -> &'static str {
    let (normal, emergency) = VOICE_TABLE
        .iter()
        .find(|(tag, _, _)| tag.eq_ignore_ascii_case(speech_tag))
        .map(|&(_, normal, emergency)| (normal, emergency))
        .unwrap_or(("en-IN-NeerjaNeural", "en-IN-PrabhatNeural"));

    match tone {
        UrgencyTone::Normal => normal,
        UrgencyTone::Emergency => emergency,
    }
}

/// Whether `speech_tag` has its own voices rather than the fallback ones
pub fn has_voices(speech_tag: &str) -> bool {
    VOICE_TABLE
        .iter()
        .any(|(tag, _, _)| tag.eq_ignore_ascii_case(speech_tag))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_voice_by_tone() {
        assert_eq!(voice_for("hi-IN", UrgencyTone::Normal), "hi-IN-SwaraNeural");
        assert_eq!(voice_for("hi-IN", UrgencyTone::Emergency), "hi-IN-MadhurNeural");
        assert_eq!(voice_for("kn-IN", UrgencyTone::Emergency), "kn-IN-GuruNeural");
    }

    #[test]
    fn unknown_tags_use_english_voices() {
        assert!(!has_voices("bn-IN"));
        assert_eq!(voice_for("bn-IN", UrgencyTone::Normal), "en-IN-NeerjaNeural");
        assert_eq!(voice_for("fr-FR", UrgencyTone::Emergency), "en-IN-PrabhatNeural");
    }

    #[test]
    fn tone_parses_and_maps_to_style() {
        assert_eq!("Emergency".parse::<UrgencyTone>().unwrap(), UrgencyTone::Emergency);
        assert_eq!(UrgencyTone::Normal.style(), "empathetic");
        assert_eq!(UrgencyTone::Emergency.style(), "serious");
        assert!("loud".parse::<UrgencyTone>().is_err());
    }
}
