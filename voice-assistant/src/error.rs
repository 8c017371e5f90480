use error_common::EasyMedError;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum VoiceError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Credential fetch failed: {0}")]
    CredentialFetch(String),

    #[error("Audio device error: {0}")]
    DeviceInit(String),

    #[error("Recognition error: {0}")]
    Recognition(String),

    #[error("Synthesis error: {0}")]
    Synthesis(String),

    #[error("Understanding error: {0}")]
    Understanding(String),

    #[error("Voice cycle was cancelled")]
    Cancelled,

    #[error("Unknown error: {0}")]
    Unknown(String),
}

pub type VoiceResult<T> = Result<T, VoiceError>;

impl From<VoiceError> for EasyMedError {
    fn from(err: VoiceError) -> Self {
        match err {
            VoiceError::Config(msg) => EasyMedError::Configuration(msg),
            VoiceError::CredentialFetch(msg) => EasyMedError::CredentialFetch(msg),
            VoiceError::DeviceInit(msg) => EasyMedError::DeviceInit(msg),
            VoiceError::Recognition(msg) => EasyMedError::Recognition(msg),
            VoiceError::Synthesis(msg) => EasyMedError::Synthesis(msg),
            VoiceError::Understanding(msg) | VoiceError::Unknown(msg) => EasyMedError::Internal(msg),
            VoiceError::Cancelled => EasyMedError::Internal("voice cycle cancelled".to_string()),
        }
    }
}

impl From<hound::Error> for VoiceError {
    fn from(err: hound::Error) -> Self {
        VoiceError::DeviceInit(format!("WAV audio error: {}", err))
    }
}
