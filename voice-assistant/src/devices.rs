//! Microphone and speaker handles
//!
//! The flow only ever holds one open microphone (inside a recognizer) and one
//! open speaker (inside a synthesizer). Closing is fallible; callers treat it
//! as best-effort.

use async_trait::async_trait;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{VoiceError, VoiceResult};

/// One captured utterance as a WAV document
#[derive(Debug, Clone)]
pub struct Utterance {
    pub wav: Vec<u8>,
    pub sample_rate: u32,
}

#[async_trait]
pub trait Microphone: Send {
    /// Blocks until one utterance has been captured
    async fn capture_utterance(&mut self) -> VoiceResult<Utterance>;

    async fn close(&mut self) -> VoiceResult<()>;
}

#[async_trait]
pub trait Speaker: Send {
    /// Plays a WAV document to completion
    async fn play(&mut self, wav: &[u8]) -> VoiceResult<()>;

    async fn close(&mut self) -> VoiceResult<()>;
}

/// Opens device handles; failures surface as `DeviceInit`
#[async_trait]
pub trait AudioDevices: Send + Sync {
    async fn open_microphone(&self) -> VoiceResult<Box<dyn Microphone>>;

    async fn open_speaker(&self) -> VoiceResult<Box<dyn Speaker>>;
}

/// File-backed devices for headless use: the microphone replays a WAV
/// recording and the speaker writes each reply to `output_dir`.
#[derive(Debug, Clone)]
pub struct WavDevices {
    input: PathBuf,
    output_dir: PathBuf,
    played: Arc<AtomicUsize>,
}

impl WavDevices {
    pub fn new(input: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_dir: output_dir.into(),
            played: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of replies written so far
    pub fn replies_played(&self) -> usize {
        self.played.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AudioDevices for WavDevices {
    async fn open_microphone(&self) -> VoiceResult<Box<dyn Microphone>> {
        let wav = tokio::fs::read(&self.input).await.map_err(|e| {
            VoiceError::DeviceInit(format!("cannot open {}: {}", self.input.display(), e))
        })?;
        let spec = hound::WavReader::new(Cursor::new(&wav))?.spec();
        if spec.channels != 1 || spec.bits_per_sample != 16 {
            return Err(VoiceError::DeviceInit(format!(
                "expected 16-bit mono input, got {} channel(s) at {} bits",
                spec.channels, spec.bits_per_sample
            )));
        }
        debug!(path = %self.input.display(), sample_rate = spec.sample_rate, "Opened WAV microphone");
        Ok(Box::new(WavMicrophone {
            wav: Some(wav),
            sample_rate: spec.sample_rate,
        }))
    }

    async fn open_speaker(&self) -> VoiceResult<Box<dyn Speaker>> {
        tokio::fs::create_dir_all(&self.output_dir).await.map_err(|e| {
            VoiceError::DeviceInit(format!("cannot open {}: {}", self.output_dir.display(), e))
        })?;
        Ok(Box::new(WavSpeaker {
            output_dir: self.output_dir.clone(),
            played: self.played.clone(),
            open: true,
        }))
    }
}

struct WavMicrophone {
    wav: Option<Vec<u8>>,
    sample_rate: u32,
}

#[async_trait]
impl Microphone for WavMicrophone {
    async fn capture_utterance(&mut self) -> VoiceResult<Utterance> {
        let wav = self
            .wav
            .take()
            .ok_or_else(|| VoiceError::DeviceInit("microphone is closed or exhausted".to_string()))?;
        Ok(Utterance {
            wav,
            sample_rate: self.sample_rate,
        })
    }

    async fn close(&mut self) -> VoiceResult<()> {
        self.wav = None;
        Ok(())
    }
}

struct WavSpeaker {
    output_dir: PathBuf,
    played: Arc<AtomicUsize>,
    open: bool,
}

impl WavSpeaker {
    fn reply_path(dir: &Path, index: usize) -> PathBuf {
        dir.join(format!("reply-{:03}.wav", index))
    }
}

#[async_trait]
impl Speaker for WavSpeaker {
    async fn play(&mut self, wav: &[u8]) -> VoiceResult<()> {
        if !self.open {
            return Err(VoiceError::DeviceInit("speaker is closed".to_string()));
        }
        let spec = hound::WavReader::new(Cursor::new(wav))?.spec();
        let index = self.played.fetch_add(1, Ordering::SeqCst) + 1;
        let path = Self::reply_path(&self.output_dir, index);
        tokio::fs::write(&path, wav).await.map_err(|e| {
            VoiceError::DeviceInit(format!("cannot write {}: {}", path.display(), e))
        })?;
        info!(path = %path.display(), sample_rate = spec.sample_rate, "Reply audio written");
        Ok(())
    }

    async fn close(&mut self) -> VoiceResult<()> {
        self.open = false;
        Ok(())
    }
}

/// Encodes 16-bit mono samples as an in-memory WAV document
pub fn encode_wav(samples: &[i16], sample_rate: u32) -> VoiceResult<Vec<u8>> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
        for sample in samples {
            writer.write_sample(*sample)?;
        }
        writer.finalize()?;
    }
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn microphone_yields_the_recording_once() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("input.wav");
        std::fs::write(&input, encode_wav(&[0, 120, -120, 0], 16000).unwrap()).unwrap();

        let devices = WavDevices::new(&input, dir.path().join("out"));
        let mut mic = devices.open_microphone().await.unwrap();
        let utterance = mic.capture_utterance().await.unwrap();
        assert_eq!(utterance.sample_rate, 16000);
        assert!(mic.capture_utterance().await.is_err());
        mic.close().await.unwrap();
    }

    #[tokio::test]
    async fn missing_input_is_a_device_failure() {
        let dir = TempDir::new().unwrap();
        let devices = WavDevices::new(dir.path().join("nope.wav"), dir.path());
        let err = devices.open_microphone().await.err().unwrap();
        assert!(matches!(err, VoiceError::DeviceInit(_)));
    }

    #[tokio::test]
    async fn speaker_writes_numbered_replies() {
        let dir = TempDir::new().unwrap();
        let devices = WavDevices::new(dir.path().join("in.wav"), dir.path().join("replies"));
        let mut speaker = devices.open_speaker().await.unwrap();
        let wav = encode_wav(&[1, 2, 3], 16000).unwrap();
        speaker.play(&wav).await.unwrap();
        speaker.play(&wav).await.unwrap();
        assert_eq!(devices.replies_played(), 2);
        assert!(dir.path().join("replies/reply-002.wav").exists());

        speaker.close().await.unwrap();
        assert!(speaker.play(&wav).await.is_err());
    }

    #[tokio::test]
    async fn speaker_rejects_non_wav_audio() {
        let dir = TempDir::new().unwrap();
        let devices = WavDevices::new(dir.path().join("in.wav"), dir.path());
        let mut speaker = devices.open_speaker().await.unwrap();
        assert!(speaker.play(b"not audio").await.is_err());
    }
}
