//! Contract with the external symptom analysis service
use async_trait::async_trait;
use locale_context::Locale;
use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, warn};

use crate::error::{SymptomError, SymptomResult};
use crate::models::{DiagnosisResult, PatientInfo, Symptom};

pub const DEFAULT_ANALYSIS_ENDPOINT: &str = "http://localhost:3000/api/analyze-symptoms";

/// Everything the wizard has collected, sent in one call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub symptoms: Vec<Symptom>,
    pub patient: PatientInfo,
    pub description: String,
    pub locale: Locale,
}

#[async_trait]
pub trait SymptomAnalyzer: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> SymptomResult<DiagnosisResult>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub endpoint: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ANALYSIS_ENDPOINT.to_string(),
        }
    }
}

impl AnalysisConfig {
    pub fn from_env() -> SymptomResult<Self> {
        let config = Self {
            endpoint: env::var("EASYMED_ANALYSIS_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_ANALYSIS_ENDPOINT.to_string()),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SymptomResult<()> {
        let endpoint = self.endpoint.trim();
        if endpoint.is_empty() {
            return Err(SymptomError::Config("analysis endpoint is empty".to_string()));
        }
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(SymptomError::Config(format!(
                "analysis endpoint must be an http(s) URL, got '{}'",
                endpoint
            )));
        }
        Ok(())
    }
}

/// POSTs the request as JSON and reads a [`DiagnosisResult`] back
pub struct HttpSymptomAnalyzer {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSymptomAnalyzer {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
        }
    }
}

#[async_trait]
impl SymptomAnalyzer for HttpSymptomAnalyzer {
    async fn analyze(&self, request: &AnalysisRequest) -> SymptomResult<DiagnosisResult> {
        debug!(
            endpoint = %self.endpoint,
            symptoms = request.symptoms.len(),
            locale = %request.locale,
            "Submitting symptom analysis"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| SymptomError::Analysis(format!("analysis service unreachable: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Analysis service rejected the request");
            return Err(SymptomError::Analysis(format!(
                "analysis service returned {}",
                status
            )));
        }

        response
            .json::<DiagnosisResult>()
            .await
            .map_err(|e| SymptomError::Analysis(format!("malformed diagnosis: {}", e)))
    }
}
