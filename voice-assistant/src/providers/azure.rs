/// Azure Speech Service over its REST endpoints
///
/// Recognition uses the short-audio endpoint (one utterance per request),
/// synthesis posts the markup document and receives a RIFF WAV body.
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::SpeechEndpoints;
use crate::credential::SpeechCredential;
use crate::devices::{Microphone, Speaker};
use crate::error::{VoiceError, VoiceResult};
use crate::speech::{Recognition, SpeechBackend, SpeechRecognizer, SpeechSynthesizer};

const RECOGNITION_PATH: &str = "/speech/recognition/conversation/cognitiveservices/v1";
const SYNTHESIS_PATH: &str = "/cognitiveservices/v1";
const OUTPUT_FORMAT: &str = "riff-16khz-16bit-mono-pcm";

pub struct AzureSpeechBackend {
    client: reqwest::Client,
    endpoints: SpeechEndpoints,
}

impl AzureSpeechBackend {
    pub fn new(endpoints: SpeechEndpoints) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoints,
        }
    }

    fn stt_base(&self, region: &str) -> String {
        self.endpoints
            .stt_base_url
            .clone()
            .unwrap_or_else(|| format!("https://{}.stt.speech.microsoft.com", region))
    }

    fn tts_base(&self, region: &str) -> String {
        self.endpoints
            .tts_base_url
            .clone()
            .unwrap_or_else(|| format!("https://{}.tts.speech.microsoft.com", region))
    }
}

#[async_trait]
impl SpeechBackend for AzureSpeechBackend {
    async fn recognizer(
        &self,
        credential: &SpeechCredential,
        language: &str,
        microphone: Box<dyn Microphone>,
    ) -> VoiceResult<Box<dyn SpeechRecognizer>> {
        Ok(Box::new(AzureRecognizer {
            client: self.client.clone(),
            url: format!("{}{}", self.stt_base(&credential.region), RECOGNITION_PATH),
            token: credential.token.clone(),
            language: language.to_string(),
            microphone: Some(microphone),
        }))
    }

    async fn synthesizer(
        &self,
        credential: &SpeechCredential,
        voice: &str,
        speaker: Box<dyn Speaker>,
    ) -> VoiceResult<Box<dyn SpeechSynthesizer>> {
        Ok(Box::new(AzureSynthesizer {
            client: self.client.clone(),
            url: format!("{}{}", self.tts_base(&credential.region), SYNTHESIS_PATH),
            token: credential.token.clone(),
            voice: voice.to_string(),
            speaker: Some(speaker),
        }))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RecognitionResponse {
    recognition_status: String,
    #[serde(default)]
    display_text: Option<String>,
}

struct AzureRecognizer {
    client: reqwest::Client,
    url: String,
    token: String,
    language: String,
    microphone: Option<Box<dyn Microphone>>,
}

#[async_trait]
impl SpeechRecognizer for AzureRecognizer {
    async fn recognize_once(&mut self) -> VoiceResult<Recognition> {
        let microphone = self
            .microphone
            .as_mut()
            .ok_or_else(|| VoiceError::Recognition("recognizer is closed".to_string()))?;
        let utterance = microphone.capture_utterance().await?;

        debug!(
            language = %self.language,
            audio_bytes = utterance.wav.len(),
            "Sending utterance for recognition"
        );

        let response = self
            .client
            .post(&self.url)
            .query(&[("language", self.language.as_str()), ("format", "simple")])
            .bearer_auth(&self.token)
            .header(
                reqwest::header::CONTENT_TYPE,
                format!("audio/wav; codecs=audio/pcm; samplerate={}", utterance.sample_rate),
            )
            .header(reqwest::header::ACCEPT, "application/json")
            .body(utterance.wav)
            .send()
            .await
            .map_err(|e| VoiceError::Recognition(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(VoiceError::Recognition(format!("provider returned {}", status)));
        }

        let body: RecognitionResponse = response
            .json()
            .await
            .map_err(|e| VoiceError::Recognition(format!("malformed response: {}", e)))?;

        match body.recognition_status.as_str() {
            "Success" => match body.display_text.map(|t| t.trim().to_string()) {
                Some(text) if !text.is_empty() => Ok(Recognition::Recognized(text)),
                _ => Ok(Recognition::NoMatch),
            },
            "NoMatch" | "InitialSilenceTimeout" | "BabbleTimeout" => Ok(Recognition::NoMatch),
            other => Err(VoiceError::Recognition(format!(
                "recognition status {}",
                other
            ))),
        }
    }

    async fn close(&mut self) -> VoiceResult<()> {
        match self.microphone.take() {
            Some(mut microphone) => microphone.close().await,
            None => Ok(()),
        }
    }
}

struct AzureSynthesizer {
    client: reqwest::Client,
    url: String,
    token: String,
    voice: String,
    speaker: Option<Box<dyn Speaker>>,
}

#[async_trait]
impl SpeechSynthesizer for AzureSynthesizer {
    async fn speak_ssml(&mut self, ssml: &str) -> VoiceResult<()> {
        let speaker = self
            .speaker
            .as_mut()
            .ok_or_else(|| VoiceError::Synthesis("synthesizer is closed".to_string()))?;

        debug!(voice = %self.voice, "Requesting speech synthesis");

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.token)
            .header(reqwest::header::CONTENT_TYPE, "application/ssml+xml")
            .header("X-Microsoft-OutputFormat", OUTPUT_FORMAT)
            .header(reqwest::header::USER_AGENT, "easymed-voice-assistant")
            .body(ssml.to_string())
            .send()
            .await
            .map_err(|e| VoiceError::Synthesis(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            warn!(voice = %self.voice, status = %status, "Synthesis rejected");
            return Err(VoiceError::Synthesis(format!("provider returned {}", status)));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| VoiceError::Synthesis(format!("incomplete audio: {}", e)))?;

        speaker
            .play(&audio)
            .await
            .map_err(|e| VoiceError::Synthesis(format!("playback failed: {}", e)))
    }

    async fn close(&mut self) -> VoiceResult<()> {
        match self.speaker.take() {
            Some(mut speaker) => speaker.close().await,
            None => Ok(()),
        }
    }
}
