#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;
use voice_assistant::*;

/// Records everything the fakes were asked to do
#[derive(Default)]
pub struct Journal {
    pub credential_fetches: AtomicUsize,
    pub recognizers_opened: AtomicUsize,
    pub recognizers_closed: AtomicUsize,
    pub synthesizers_opened: AtomicUsize,
    pub synthesizers_closed: AtomicUsize,
    pub spoken: Mutex<Vec<String>>,
    pub languages: Mutex<Vec<String>>,
    pub voices: Mutex<Vec<String>>,
}

impl Journal {
    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    pub fn open_recognizers(&self) -> usize {
        Self::count(&self.recognizers_opened) - Self::count(&self.recognizers_closed)
    }

    pub fn open_synthesizers(&self) -> usize {
        Self::count(&self.synthesizers_opened) - Self::count(&self.synthesizers_closed)
    }
}

pub struct FakeCredentials {
    pub journal: Arc<Journal>,
    pub fail: bool,
}

#[async_trait]
impl CredentialProvider for FakeCredentials {
    async fn fetch(&self) -> VoiceResult<SpeechCredential> {
        self.journal.credential_fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(VoiceError::CredentialFetch("endpoint returned 503".to_string()));
        }
        Ok(SpeechCredential::new("tok", "centralindia"))
    }
}

pub struct FakeDevices {
    pub fail_microphone: bool,
}

struct NullMicrophone;

#[async_trait]
impl Microphone for NullMicrophone {
    async fn capture_utterance(&mut self) -> VoiceResult<Utterance> {
        Ok(Utterance {
            wav: Vec::new(),
            sample_rate: 16000,
        })
    }

    async fn close(&mut self) -> VoiceResult<()> {
        Ok(())
    }
}

struct NullSpeaker;

#[async_trait]
impl Speaker for NullSpeaker {
    async fn play(&mut self, _wav: &[u8]) -> VoiceResult<()> {
        Ok(())
    }

    async fn close(&mut self) -> VoiceResult<()> {
        Ok(())
    }
}

#[async_trait]
impl AudioDevices for FakeDevices {
    async fn open_microphone(&self) -> VoiceResult<Box<dyn Microphone>> {
        if self.fail_microphone {
            return Err(VoiceError::DeviceInit("permission denied".to_string()));
        }
        Ok(Box::new(NullMicrophone))
    }

    async fn open_speaker(&self) -> VoiceResult<Box<dyn Speaker>> {
        Ok(Box::new(NullSpeaker))
    }
}

/// What the next recognition does
pub enum Script {
    Say(&'static str),
    Silence,
    Fail,
    /// Never completes until the gate is notified
    Hang(Arc<Notify>),
}

pub struct FakeBackend {
    pub journal: Arc<Journal>,
    pub script: Mutex<VecDeque<Script>>,
    pub fail_synthesis: bool,
    /// Close calls fail, to check they are swallowed
    pub failing_close: bool,
    /// Playback never completes until the gate is notified
    pub synthesis_gate: Option<Arc<Notify>>,
}

impl FakeBackend {
    pub fn new(journal: Arc<Journal>, script: Vec<Script>) -> Self {
        Self {
            journal,
            script: Mutex::new(script.into()),
            fail_synthesis: false,
            failing_close: false,
            synthesis_gate: None,
        }
    }
}

struct FakeRecognizer {
    journal: Arc<Journal>,
    next: Option<Script>,
    failing_close: bool,
}

#[async_trait]
impl SpeechRecognizer for FakeRecognizer {
    async fn recognize_once(&mut self) -> VoiceResult<Recognition> {
        match self.next.take() {
            Some(Script::Say(text)) => Ok(Recognition::Recognized(text.to_string())),
            Some(Script::Silence) | None => Ok(Recognition::NoMatch),
            Some(Script::Fail) => Err(VoiceError::Recognition("provider error".to_string())),
            Some(Script::Hang(gate)) => {
                gate.notified().await;
                Ok(Recognition::NoMatch)
            }
        }
    }

    async fn close(&mut self) -> VoiceResult<()> {
        self.journal.recognizers_closed.fetch_add(1, Ordering::SeqCst);
        if self.failing_close {
            return Err(VoiceError::Unknown("close blew up".to_string()));
        }
        Ok(())
    }
}

struct FakeSynthesizer {
    journal: Arc<Journal>,
    fail: bool,
    failing_close: bool,
    gate: Option<Arc<Notify>>,
}

#[async_trait]
impl SpeechSynthesizer for FakeSynthesizer {
    async fn speak_ssml(&mut self, ssml: &str) -> VoiceResult<()> {
        if self.fail {
            return Err(VoiceError::Synthesis("synthesis failed".to_string()));
        }
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.journal.spoken.lock().push(ssml.to_string());
        Ok(())
    }

    async fn close(&mut self) -> VoiceResult<()> {
        self.journal.synthesizers_closed.fetch_add(1, Ordering::SeqCst);
        if self.failing_close {
            return Err(VoiceError::Unknown("close blew up".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl SpeechBackend for FakeBackend {
    async fn recognizer(
        &self,
        _credential: &SpeechCredential,
        language: &str,
        _microphone: Box<dyn Microphone>,
    ) -> VoiceResult<Box<dyn SpeechRecognizer>> {
        self.journal.recognizers_opened.fetch_add(1, Ordering::SeqCst);
        self.journal.languages.lock().push(language.to_string());
        Ok(Box::new(FakeRecognizer {
            journal: self.journal.clone(),
            next: self.script.lock().pop_front(),
            failing_close: self.failing_close,
        }))
    }

    async fn synthesizer(
        &self,
        _credential: &SpeechCredential,
        voice: &str,
        _speaker: Box<dyn Speaker>,
    ) -> VoiceResult<Box<dyn SpeechSynthesizer>> {
        self.journal.synthesizers_opened.fetch_add(1, Ordering::SeqCst);
        self.journal.voices.lock().push(voice.to_string());
        Ok(Box::new(FakeSynthesizer {
            journal: self.journal.clone(),
            fail: self.fail_synthesis,
            failing_close: self.failing_close,
            gate: self.synthesis_gate.clone(),
        }))
    }
}
