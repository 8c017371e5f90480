use error_common::EasyMedError;
use thiserror::Error;

use crate::locale::Locale;

#[derive(Error, Debug)]
pub enum LocaleError {
    #[error("Unknown locale: {0}")]
    UnknownLocale(String),

    #[error("Failed to parse resource document {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Resource bundle has no table for the default locale {0}")]
    MissingDefault(Locale),

    #[error("Failed to read resource directory: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LocaleError>;

impl From<LocaleError> for EasyMedError {
    fn from(err: LocaleError) -> Self {
        match err {
            LocaleError::UnknownLocale(_) => EasyMedError::Validation(err.to_string()),
            other => EasyMedError::Configuration(other.to_string()),
        }
    }
}
