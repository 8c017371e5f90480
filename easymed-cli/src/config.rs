//! Application configuration
//!
//! Sources, later ones winning: built-in defaults, an optional `easymed.yaml`
//! (or the file given with `--config`), then `EASYMED__SECTION__KEY`
//! environment variables.

use anyhow::{Context, Result};
use auth_identity::DemoAuthConfig;
use locale_context::Locale;
use logger_redacted::LoggerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use symptom_checker::AnalysisConfig;
use voice_assistant::VoiceConfig;

pub const DEFAULT_CONFIG_FILE: &str = "easymed";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Language used when `--locale` is not given
    pub locale: Locale,
    /// Extra translation YAML files layered over the built-in ones
    pub resources_dir: Option<PathBuf>,
    pub logging: LoggerConfig,
    pub voice: VoiceConfig,
    pub analysis: AnalysisConfig,
    pub auth: DemoAuthConfig,
}

impl AppConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let builder = config::Config::builder();
        let builder = match path {
            Some(path) => builder.add_source(config::File::from(path).required(true)),
            None => builder.add_source(config::File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        let settings = builder
            .add_source(
                config::Environment::with_prefix("EASYMED")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("failed to read configuration")?;

        let app: AppConfig = settings
            .try_deserialize()
            .context("invalid configuration")?;
        app.validate()?;
        Ok(app)
    }

    pub fn validate(&self) -> Result<()> {
        self.voice.validate().context("voice")?;
        self.analysis.validate().context("analysis")?;
        self.auth.validate().context("auth")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn yaml_file() -> NamedTempFile {
        tempfile::Builder::new().suffix(".yaml").tempfile().unwrap()
    }

    #[test]
    fn loads_sections_from_yaml() {
        let mut file = yaml_file();
        writeln!(
            file,
            "locale: ta\nvoice:\n  auto_play: false\n  default_tone: emergency\nauth:\n  universal_otp: \"654321\"\n"
        )
        .unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.locale, Locale::Tamil);
        assert!(!config.voice.auto_play);
        assert_eq!(config.auth.universal_otp.as_deref(), Some("654321"));
        assert_eq!(config.auth.otp_length, 6);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        assert!(AppConfig::load(Some(Path::new("/nonexistent/easymed.yaml"))).is_err());
    }

    #[test]
    fn invalid_section_fails_validation() {
        let mut file = yaml_file();
        writeln!(file, "analysis:\n  endpoint: \"not a url\"\n").unwrap();
        assert!(AppConfig::load(Some(file.path())).is_err());
    }
}
