//! # Symptom Checker
//!
//! Guided four-step symptom assessment: patient details, symptom selection,
//! duration and severity, then a call to an external analysis service whose
//! [`DiagnosisResult`] is rendered in the active locale.
//!
//! ```no_run
//! use locale_context::LocaleContext;
//! use symptom_checker::{AnalysisConfig, Gender, HttpSymptomAnalyzer, SymptomWizard};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let locale = LocaleContext::embedded()?;
//! let mut wizard = SymptomWizard::new(locale);
//! wizard.set_age_text("42")?;
//! wizard.set_gender(Gender::Male);
//! wizard.next()?;
//! wizard.add_symptom("fever")?;
//! wizard.next()?;
//! wizard.next()?;
//!
//! let analyzer = HttpSymptomAnalyzer::new(&AnalysisConfig::from_env()?);
//! let result = wizard.analyze(&analyzer).await?;
//! println!("{}", result.condition);
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod catalog;
pub mod error;
pub mod models;
pub mod report;
pub mod wizard;

pub use analysis::{AnalysisConfig, AnalysisRequest, HttpSymptomAnalyzer, SymptomAnalyzer};
pub use catalog::{find_symptom, SymptomTemplate, COMMON_SYMPTOMS, EXISTING_CONDITIONS};
pub use error::{SymptomError, SymptomResult};
pub use models::{
    BodyRegion, DiagnosisResult, DurationBucket, Gender, PatientInfo, Severity, Symptom, Urgency,
};
pub use report::{format_probability, DiagnosisReport};
pub use wizard::{SymptomWizard, WizardStep};
