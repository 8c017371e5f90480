use error_common::EasyMedError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SymptomError {
    /// Incomplete or out-of-range form input. Carries the localized message.
    #[error("{0}")]
    Validation(String),

    #[error("Unknown symptom: {0}")]
    UnknownSymptom(String),

    #[error("Analysis is only available on the final step")]
    NotReady,

    #[error("Analysis failed: {0}")]
    Analysis(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type SymptomResult<T> = Result<T, SymptomError>;

impl From<SymptomError> for EasyMedError {
    fn from(err: SymptomError) -> Self {
        match err {
            SymptomError::Validation(msg) => EasyMedError::Validation(msg),
            SymptomError::UnknownSymptom(id) => {
                EasyMedError::Validation(format!("unknown symptom {}", id))
            }
            SymptomError::NotReady => {
                EasyMedError::Validation("analysis requested before the final step".to_string())
            }
            SymptomError::Analysis(msg) => EasyMedError::Network(msg),
            SymptomError::Config(msg) => EasyMedError::Configuration(msg),
        }
    }
}
