use async_trait::async_trait;

use crate::credential::SpeechCredential;
use crate::devices::{Microphone, Speaker};
use crate::error::VoiceResult;

/// Outcome of a single-shot recognition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recognition {
    Recognized(String),
    /// Audio was captured but no speech matched
    NoMatch,
}

/// A live recognizer bound to one credential, language and microphone
#[async_trait]
pub trait SpeechRecognizer: Send {
    async fn recognize_once(&mut self) -> VoiceResult<Recognition>;

    /// Releases the microphone
    async fn close(&mut self) -> VoiceResult<()>;
}

/// A live synthesizer bound to one credential, voice and speaker
#[async_trait]
pub trait SpeechSynthesizer: Send {
    /// Synthesizes the markup document and plays it to completion
    async fn speak_ssml(&mut self, ssml: &str) -> VoiceResult<()>;

    /// Releases the speaker
    async fn close(&mut self) -> VoiceResult<()>;
}

/// Speech provider factory
#[async_trait]
pub trait SpeechBackend: Send + Sync {
    async fn recognizer(
        &self,
        credential: &SpeechCredential,
        language: &str,
        microphone: Box<dyn Microphone>,
    ) -> VoiceResult<Box<dyn SpeechRecognizer>>;

    async fn synthesizer(
        &self,
        credential: &SpeechCredential,
        voice: &str,
        speaker: Box<dyn Speaker>,
    ) -> VoiceResult<Box<dyn SpeechSynthesizer>>;
}
