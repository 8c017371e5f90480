//! One spoken utterance in, one spoken reply out
//!
//! ```text
//! Idle -> AwaitingCredential -> Listening -> Transcribing -> Understanding -> Synthesizing -> Idle
//! ```
//!
//! Any failure returns the flow to `Idle` with a user-visible status; nothing
//! is retried. Each cycle fetches a fresh credential for the recognizer and
//! another for the synthesizer. At most one recognizer and one synthesizer are
//! live per assistant, and at most one cycle is in flight: spawning a new one
//! aborts the previous one.

use error_common::{EasyMedError, ErrorReporter};
use locale_context::LocaleContext;
use parking_lot::Mutex as SyncMutex;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, info, warn};

use crate::config::VoiceConfig;
use crate::credential::CredentialProvider;
use crate::devices::AudioDevices;
use crate::error::{VoiceError, VoiceResult};
use crate::speech::{Recognition, SpeechBackend, SpeechRecognizer, SpeechSynthesizer};
use crate::ssml::build_ssml;
use crate::understanding::UnderstandingPolicy;
use crate::voices::{voice_for, UrgencyTone};

pub const STATUS_REQUESTING: &str = "Requesting access to microphone...";
pub const STATUS_LISTENING: &str = "Listening...";
pub const STATUS_TRANSCRIBED: &str = "Transcription complete";
pub const STATUS_PROCESSING: &str = "Processing...";
pub const STATUS_PREPARING: &str = "Preparing reply...";
pub const STATUS_SPOKEN: &str = "Spoken";
pub const STATUS_REPLY_READY: &str = "Reply ready";
pub const STATUS_NO_MATCH: &str = "Could not recognize speech. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowState {
    Idle,
    AwaitingCredential,
    Listening,
    Transcribing,
    Understanding,
    Synthesizing,
}

/// Observable view of the assistant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoiceSnapshot {
    pub state: FlowState,
    pub status: Option<String>,
    /// Last transcript
    pub transcript: Option<String>,
    pub reply: Option<String>,
    pub tone: Option<UrgencyTone>,
    pub voice: Option<String>,
}

impl Default for VoiceSnapshot {
    fn default() -> Self {
        Self {
            state: FlowState::Idle,
            status: None,
            transcript: None,
            reply: None,
            tone: None,
            voice: None,
        }
    }
}

impl VoiceSnapshot {
    /// Whether the talk control should be disabled
    pub fn is_busy(&self) -> bool {
        self.state != FlowState::Idle
    }
}

/// Result of one completed exchange
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub transcript: String,
    pub reply: String,
    pub tone: UrgencyTone,
    pub voice: String,
    /// False when auto-play is off
    pub spoken: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    NoMatch,
    Completed(Turn),
}

/// Live device sessions of one assistant
#[derive(Default)]
struct VoiceSession {
    recognizer: Option<Box<dyn SpeechRecognizer>>,
    synthesizer: Option<Box<dyn SpeechSynthesizer>>,
}

impl VoiceSession {
    fn has_open_handles(&self) -> bool {
        self.recognizer.is_some() || self.synthesizer.is_some()
    }

    async fn close_recognizer(&mut self) {
        if let Some(mut recognizer) = self.recognizer.take() {
            if let Err(e) = recognizer.close().await {
                warn!(error = %e, "Failed to close recognizer");
            }
        }
    }

    async fn close_synthesizer(&mut self) {
        if let Some(mut synthesizer) = self.synthesizer.take() {
            if let Err(e) = synthesizer.close().await {
                warn!(error = %e, "Failed to close synthesizer");
            }
        }
    }

    async fn close_all(&mut self) {
        self.close_recognizer().await;
        self.close_synthesizer().await;
    }
}

impl Drop for VoiceSession {
    fn drop(&mut self) {
        if !self.has_open_handles() {
            return;
        }
        let recognizer = self.recognizer.take();
        let synthesizer = self.synthesizer.take();
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn(async move {
                    let mut session = VoiceSession {
                        recognizer,
                        synthesizer,
                    };
                    session.close_all().await;
                });
            }
            Err(_) => warn!("Voice session dropped outside a runtime; handles released unclosed"),
        }
    }
}

/// Collaborators of a [`VoiceAssistant`]
#[derive(Clone)]
pub struct VoiceServices {
    pub credentials: Arc<dyn CredentialProvider>,
    pub devices: Arc<dyn AudioDevices>,
    pub backend: Arc<dyn SpeechBackend>,
    pub policy: Arc<dyn UnderstandingPolicy>,
}

struct Inner {
    config: VoiceConfig,
    locale: LocaleContext,
    services: VoiceServices,
    session: Mutex<VoiceSession>,
    snapshot: watch::Sender<VoiceSnapshot>,
    reporter: ErrorReporter,
}

/// Credential-backed voice assistant: listen once, understand, speak the reply
pub struct VoiceAssistant {
    inner: Arc<Inner>,
    active: SyncMutex<Option<AbortHandle>>,
}

/// Handle to a spawned listen-and-reply cycle
pub struct ListenTask {
    handle: JoinHandle<VoiceResult<CycleOutcome>>,
}

impl ListenTask {
    /// Waits for the cycle's single settlement
    pub async fn settle(self) -> VoiceResult<CycleOutcome> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(VoiceError::Cancelled),
            Err(e) => Err(VoiceError::Unknown(format!("voice cycle panicked: {}", e))),
        }
    }

    pub fn abort(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl VoiceAssistant {
    pub fn new(config: VoiceConfig, locale: LocaleContext, services: VoiceServices) -> Self {
        let (snapshot, _) = watch::channel(VoiceSnapshot::default());
        Self {
            inner: Arc::new(Inner {
                config,
                locale,
                services,
                session: Mutex::new(VoiceSession::default()),
                snapshot,
                reporter: ErrorReporter::new("voice-assistant"),
            }),
            active: SyncMutex::new(None),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<VoiceSnapshot> {
        self.inner.snapshot.subscribe()
    }

    pub fn snapshot(&self) -> VoiceSnapshot {
        self.inner.snapshot.borrow().clone()
    }

    /// Runs one listen-and-reply cycle to completion
    pub async fn start_listening(&self) -> VoiceResult<CycleOutcome> {
        self.spawn_listening().settle().await
    }

    /// Starts a cycle in the background, aborting any cycle still in flight
    pub fn spawn_listening(&self) -> ListenTask {
        let mut active = self.active.lock();
        if let Some(previous) = active.take() {
            if !previous.is_finished() {
                info!("Aborting in-flight voice cycle");
            }
            previous.abort();
        }

        let inner = self.inner.clone();
        let handle = tokio::spawn(async move { inner.run_cycle().await });
        *active = Some(handle.abort_handle());
        ListenTask { handle }
    }

    /// Aborts any in-flight cycle and closes open handles. Close failures are
    /// logged and swallowed.
    pub async fn dispose(&self) {
        let previous = self.active.lock().take();
        if let Some(handle) = previous {
            handle.abort();
        }
        self.inner.session.lock().await.close_all().await;
        self.inner.publish(|s| s.state = FlowState::Idle);
        debug!("Voice assistant disposed");
    }

    /// Whether a recognizer or synthesizer is currently open
    pub async fn has_open_handles(&self) -> bool {
        self.inner.session.lock().await.has_open_handles()
    }
}

impl Drop for VoiceAssistant {
    fn drop(&mut self) {
        if let Some(handle) = self.active.get_mut().take() {
            handle.abort();
        }
    }
}

impl Inner {
    fn publish(&self, update: impl FnOnce(&mut VoiceSnapshot)) {
        self.snapshot.send_modify(update);
    }

    fn set_status(&self, state: FlowState, status: &str) {
        self.publish(|s| {
            s.state = state;
            s.status = Some(status.to_string());
        });
    }

    async fn run_cycle(&self) -> VoiceResult<CycleOutcome> {
        match self.exchange().await {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                self.session.lock().await.close_all().await;
                let status = self
                    .reporter
                    .report("voice_cycle", &EasyMedError::from(err.clone()));
                self.set_status(FlowState::Idle, &status);
                Err(err)
            }
        }
    }

    async fn exchange(&self) -> VoiceResult<CycleOutcome> {
        let speech_tag = self.locale.speech_tag();
        self.session.lock().await.close_all().await;
        self.set_status(FlowState::AwaitingCredential, STATUS_REQUESTING);

        let credential = self.services.credentials.fetch().await?;
        let microphone = self.services.devices.open_microphone().await?;

        let recognition = {
            let mut session = self.session.lock().await;
            session.close_recognizer().await;
            let recognizer = self
                .services
                .backend
                .recognizer(&credential, speech_tag, microphone)
                .await?;
            let recognizer = session.recognizer.insert(recognizer);

            self.set_status(FlowState::Listening, STATUS_LISTENING);
            let recognition = recognizer.recognize_once().await;
            session.close_recognizer().await;
            recognition?
        };

        let transcript = match recognition {
            Recognition::Recognized(text) => text,
            Recognition::NoMatch => {
                self.set_status(FlowState::Idle, STATUS_NO_MATCH);
                return Ok(CycleOutcome::NoMatch);
            }
        };

        info!(language = speech_tag, chars = transcript.chars().count(), "Utterance transcribed");
        self.publish(|s| {
            s.state = FlowState::Transcribing;
            s.status = Some(STATUS_TRANSCRIBED.to_string());
            s.transcript = Some(transcript.clone());
        });

        self.set_status(FlowState::Understanding, STATUS_PROCESSING);
        let reply = self
            .services
            .policy
            .understand(&transcript, speech_tag)
            .await?;
        let tone = reply.tone.unwrap_or(self.config.default_tone);
        let voice = voice_for(speech_tag, tone);

        self.publish(|s| {
            s.reply = Some(reply.text.clone());
            s.tone = Some(tone);
            s.voice = Some(voice.to_string());
        });

        let mut turn = Turn {
            transcript,
            reply: reply.text,
            tone,
            voice: voice.to_string(),
            spoken: false,
        };

        if !self.config.auto_play {
            self.set_status(FlowState::Idle, STATUS_REPLY_READY);
            return Ok(CycleOutcome::Completed(turn));
        }

        self.set_status(FlowState::Synthesizing, STATUS_PREPARING);
        self.speak(speech_tag, voice, tone, &turn.reply).await?;
        turn.spoken = true;

        self.set_status(FlowState::Idle, STATUS_SPOKEN);
        Ok(CycleOutcome::Completed(turn))
    }

    async fn speak(&self, speech_tag: &str, voice: &str, tone: UrgencyTone, text: &str) -> VoiceResult<()> {
        let credential = self.services.credentials.fetch().await?;
        let speaker = self.services.devices.open_speaker().await?;

        let mut session = self.session.lock().await;
        session.close_synthesizer().await;
        let synthesizer = self
            .services
            .backend
            .synthesizer(&credential, voice, speaker)
            .await?;
        let synthesizer = session.synthesizer.insert(synthesizer);

        let ssml = build_ssml(speech_tag, voice, tone, text);
        let spoken = synthesizer.speak_ssml(&ssml).await;
        session.close_synthesizer().await;
        spoken
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_snapshot_is_not_busy() {
        let snapshot = VoiceSnapshot::default();
        assert!(!snapshot.is_busy());
        assert_eq!(snapshot.status, None);
    }

    #[test]
    fn reported_errors_keep_their_category() {
        let err: EasyMedError = VoiceError::CredentialFetch("503".to_string()).into();
        assert_eq!(err.user_message(), "Failed to fetch speech credential");
    }
}
