use locale_context::Locale;
use serde::{Deserialize, Serialize};

use crate::error::{VoiceError, VoiceResult};
use crate::voices::UrgencyTone;

/// Server endpoint that issues short-lived speech credentials
pub const DEFAULT_TOKEN_ENDPOINT: &str = "http://localhost:3000/api/azure-tts-token";

/// Azure speech REST base URLs. `None` derives them from the credential's region.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SpeechEndpoints {
    /// e.g. `https://centralindia.stt.speech.microsoft.com`
    pub stt_base_url: Option<String>,
    /// e.g. `https://centralindia.tts.speech.microsoft.com`
    pub tts_base_url: Option<String>,
}

/// Voice assistant configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct VoiceConfig {
    pub token_endpoint: String,
    /// Locale the assistant starts in
    pub locale: Locale,
    /// Speak the reply after understanding; when false the flow stops at "Reply ready"
    pub auto_play: bool,
    /// Tone used when the understanding policy does not pick one
    pub default_tone: UrgencyTone,
    pub speech: SpeechEndpoints,
    /// Re-arm listening after each spoken command response
    pub continuous_commands: bool,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            token_endpoint: DEFAULT_TOKEN_ENDPOINT.to_string(),
            locale: Locale::DEFAULT,
            auto_play: true,
            default_tone: UrgencyTone::Normal,
            speech: SpeechEndpoints::default(),
            continuous_commands: true,
        }
    }
}

impl VoiceConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> VoiceResult<Self> {
        let defaults = Self::default();

        let token_endpoint = std::env::var("EASYMED_TOKEN_ENDPOINT")
            .unwrap_or(defaults.token_endpoint);

        let locale = match std::env::var("EASYMED_VOICE_LOCALE") {
            Ok(value) => value
                .parse::<Locale>()
                .map_err(|e| VoiceError::Config(format!("EASYMED_VOICE_LOCALE: {}", e)))?,
            Err(_) => defaults.locale,
        };

        let auto_play = std::env::var("EASYMED_VOICE_AUTOPLAY")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.auto_play);

        let default_tone = match std::env::var("EASYMED_VOICE_TONE") {
            Ok(value) => value.parse::<UrgencyTone>()?,
            Err(_) => defaults.default_tone,
        };

        let continuous_commands = std::env::var("EASYMED_VOICE_CONTINUOUS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.continuous_commands);

        let speech = SpeechEndpoints {
            stt_base_url: std::env::var("EASYMED_AZURE_STT_URL").ok(),
            tts_base_url: std::env::var("EASYMED_AZURE_TTS_URL").ok(),
        };

        let config = Self {
            token_endpoint,
            locale,
            auto_play,
            default_tone,
            speech,
            continuous_commands,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> VoiceResult<()> {
        if self.token_endpoint.trim().is_empty() {
            return Err(VoiceError::Config("token endpoint must not be empty".to_string()));
        }
        Ok(())
    }
}
