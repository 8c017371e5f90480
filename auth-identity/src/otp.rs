use async_trait::async_trait;
use logger_redacted::redacted_info;
use rand::Rng;

use crate::error::*;

/// Sends a one-time code to a phone and returns the code that was sent
#[async_trait]
pub trait OtpIssuer: Send + Sync {
    async fn issue(&self, phone: &str) -> Result<String>;
}

/// Nothing is delivered; the code is only logged (redacted)
pub struct DemoOtpIssuer {
    length: usize,
    fixed: Option<String>,
}

impl DemoOtpIssuer {
    pub fn random(length: usize) -> Self {
        Self {
            length,
            fixed: None,
        }
    }

    pub fn fixed(code: impl Into<String>) -> Self {
        let code = code.into();
        Self {
            length: code.len(),
            fixed: Some(code),
        }
    }

    fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..self.length)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect()
    }
}

#[async_trait]
impl OtpIssuer for DemoOtpIssuer {
    async fn issue(&self, phone: &str) -> Result<String> {
        let code = match &self.fixed {
            Some(code) => code.clone(),
            None => self.generate(),
        };
        redacted_info!("Demo OTP for {}: {}", phone, code);
        Ok(code)
    }
}
