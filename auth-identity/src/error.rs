use error_common::EasyMedError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Phone number is too short")]
    InvalidPhone,

    #[error("OTP has not been requested")]
    OtpNotRequested,

    #[error("OTP is incomplete")]
    IncompleteOtp,

    #[error("Invalid OTP")]
    InvalidOtp,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Access denied")]
    AccessDenied,

    #[error("Required fields are missing")]
    MissingFields,

    #[error("User store error: {0}")]
    Store(String),

    #[error("Hashing error: {0}")]
    Hashing(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, IdentityError>;

impl IdentityError {
    /// Translation key of the status shown on the login screen
    pub fn message_key(&self) -> &'static str {
        match self {
            IdentityError::InvalidPhone => "auth.invalid_phone",
            IdentityError::OtpNotRequested => "auth.otp_not_requested",
            IdentityError::IncompleteOtp => "auth.incomplete_otp",
            IdentityError::InvalidOtp => "auth.invalid_otp",
            IdentityError::InvalidCredentials => "auth.invalid_credentials",
            IdentityError::AccessDenied => "auth.access_denied",
            IdentityError::MissingFields => "auth.missing_fields",
            IdentityError::Store(_) | IdentityError::Hashing(_) | IdentityError::Config(_) => {
                "auth.login_failed"
            }
        }
    }
}

impl From<IdentityError> for EasyMedError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::InvalidPhone
            | IdentityError::OtpNotRequested
            | IdentityError::IncompleteOtp
            | IdentityError::MissingFields => EasyMedError::Validation(err.to_string()),
            IdentityError::InvalidOtp
            | IdentityError::InvalidCredentials
            | IdentityError::AccessDenied => EasyMedError::Authentication(err.to_string()),
            IdentityError::Store(msg) | IdentityError::Hashing(msg) => EasyMedError::Internal(msg),
            IdentityError::Config(msg) => EasyMedError::Configuration(msg),
        }
    }
}

impl From<argon2::password_hash::Error> for IdentityError {
    fn from(err: argon2::password_hash::Error) -> Self {
        IdentityError::Hashing(err.to_string())
    }
}
