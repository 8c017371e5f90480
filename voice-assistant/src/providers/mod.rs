pub mod azure;

pub use azure::AzureSpeechBackend;

use crate::config::VoiceConfig;
use crate::speech::SpeechBackend;

/// Create the speech backend for a configuration
pub fn create_backend(config: &VoiceConfig) -> Box<dyn SpeechBackend> {
    Box::new(AzureSpeechBackend::new(config.speech.clone()))
}
