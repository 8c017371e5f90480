/// Short-lived speech credentials issued by a server proxy
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;
use tracing::debug;

use crate::error::{VoiceError, VoiceResult};

/// Time-boxed token plus the region it is valid for
#[derive(Clone)]
pub struct SpeechCredential {
    pub token: String,
    pub region: String,
    pub issued_at: DateTime<Utc>,
}

impl SpeechCredential {
    pub fn new(token: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            region: region.into(),
            issued_at: Utc::now(),
        }
    }
}

// Keeps the token out of debug output and logs
impl fmt::Debug for SpeechCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpeechCredential")
            .field("token", &"***")
            .field("region", &self.region)
            .field("issued_at", &self.issued_at)
            .finish()
    }
}

/// Source of fresh credentials. Called once per device session, never cached.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn fetch(&self) -> VoiceResult<SpeechCredential>;
}

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
    region: String,
}

/// POSTs with no body to the token endpoint and expects `{ "token", "region" }`
pub struct HttpCredentialProvider {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpCredentialProvider {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl CredentialProvider for HttpCredentialProvider {
    async fn fetch(&self) -> VoiceResult<SpeechCredential> {
        debug!(endpoint = %self.endpoint, "Requesting speech credential");

        let response = self
            .client
            .post(&self.endpoint)
            .send()
            .await
            .map_err(|e| VoiceError::CredentialFetch(format!("endpoint unreachable: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(VoiceError::CredentialFetch(format!(
                "endpoint returned {}",
                status
            )));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| VoiceError::CredentialFetch(format!("malformed token response: {}", e)))?;

        if body.token.is_empty() || body.region.is_empty() {
            return Err(VoiceError::CredentialFetch(
                "token response is missing token or region".to_string(),
            ));
        }

        debug!(region = %body.region, "Speech credential issued");
        Ok(SpeechCredential::new(body.token, body.region))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_token() {
        let credential = SpeechCredential::new("secret-token", "centralindia");
        let rendered = format!("{:?}", credential);
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("centralindia"));
    }
}
