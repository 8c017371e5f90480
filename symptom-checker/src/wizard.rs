//! Four-step symptom checker
//!
//! Patient info, then symptom selection, then duration and severity, then
//! analysis. Moving forward is gated per step; moving back never discards
//! what was entered, so the patient can resume where they left off.

use error_common::{EasyMedError, ErrorReporter};
use locale_context::LocaleContext;
use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

use crate::analysis::{AnalysisRequest, SymptomAnalyzer};
use crate::catalog::find_symptom;
use crate::error::{SymptomError, SymptomResult};
use crate::models::{DiagnosisResult, DurationBucket, Gender, PatientInfo, Severity, Symptom};

pub const MIN_AGE: u8 = 1;
pub const MAX_AGE: u8 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum WizardStep {
    PatientInfo,
    Symptoms,
    Details,
    Analysis,
}

impl WizardStep {
    /// One-based position shown in the progress bar
    pub fn number(self) -> u8 {
        match self {
            WizardStep::PatientInfo => 1,
            WizardStep::Symptoms => 2,
            WizardStep::Details => 3,
            WizardStep::Analysis => 4,
        }
    }

    pub fn title_key(self) -> &'static str {
        match self {
            WizardStep::PatientInfo => "symptoms.patient_information",
            WizardStep::Symptoms => "symptoms.select_symptoms",
            WizardStep::Details => "symptoms.duration_severity",
            WizardStep::Analysis => "symptoms.analysis_title",
        }
    }

    fn next(self) -> WizardStep {
        match self {
            WizardStep::PatientInfo => WizardStep::Symptoms,
            WizardStep::Symptoms => WizardStep::Details,
            WizardStep::Details | WizardStep::Analysis => WizardStep::Analysis,
        }
    }

    fn previous(self) -> WizardStep {
        match self {
            WizardStep::PatientInfo | WizardStep::Symptoms => WizardStep::PatientInfo,
            WizardStep::Details => WizardStep::Symptoms,
            WizardStep::Analysis => WizardStep::Details,
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {}", self.number())
    }
}

pub struct SymptomWizard {
    locale: LocaleContext,
    reporter: ErrorReporter,
    step: WizardStep,
    patient: PatientInfo,
    symptoms: Vec<Symptom>,
    result: Option<DiagnosisResult>,
    status: Option<String>,
}

impl SymptomWizard {
    pub fn new(locale: LocaleContext) -> Self {
        Self {
            locale,
            reporter: ErrorReporter::new("symptom-checker"),
            step: WizardStep::PatientInfo,
            patient: PatientInfo::default(),
            symptoms: Vec::new(),
            result: None,
            status: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn patient(&self) -> &PatientInfo {
        &self.patient
    }

    pub fn symptoms(&self) -> &[Symptom] {
        &self.symptoms
    }

    pub fn result(&self) -> Option<&DiagnosisResult> {
        self.result.as_ref()
    }

    /// Last user-visible message (validation or analysis failure)
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn locale(&self) -> &LocaleContext {
        &self.locale
    }

    fn invalid(&mut self, key: &str) -> SymptomError {
        let message = self.locale.t(key);
        self.status = Some(message.clone());
        SymptomError::Validation(message)
    }

    /// Age as typed. Blank clears it; anything else must be a whole number in 1..=120.
    pub fn set_age_text(&mut self, text: &str) -> SymptomResult<()> {
        let text = text.trim();
        if text.is_empty() {
            self.patient.age = None;
            return Ok(());
        }
        match text.parse::<u8>() {
            Ok(age) => self.set_age(age),
            Err(_) => Err(self.invalid("symptoms.invalid_age")),
        }
    }

    pub fn set_age(&mut self, age: u8) -> SymptomResult<()> {
        if !(MIN_AGE..=MAX_AGE).contains(&age) {
            return Err(self.invalid("symptoms.invalid_age"));
        }
        self.patient.age = Some(age);
        Ok(())
    }

    pub fn set_gender(&mut self, gender: Gender) {
        self.patient.gender = Some(gender);
    }

    /// Checks or unchecks an existing condition. Returns whether it is now checked.
    pub fn toggle_condition(&mut self, condition: &str) -> bool {
        if self.patient.existing_conditions.remove(condition) {
            false
        } else {
            self.patient.existing_conditions.insert(condition.to_string());
            true
        }
    }

    pub fn add_medication(&mut self, medication: &str) {
        let medication = medication.trim();
        if !medication.is_empty() {
            self.patient.medications.push(medication.to_string());
        }
    }

    pub fn remove_medication(&mut self, index: usize) -> Option<String> {
        (index < self.patient.medications.len()).then(|| self.patient.medications.remove(index))
    }

    pub fn set_description(&mut self, description: &str) {
        self.patient.description = description.to_string();
    }

    /// Selects a catalog symptom. Returns false when it was already selected.
    pub fn add_symptom(&mut self, id: &str) -> SymptomResult<bool> {
        let template = find_symptom(id).ok_or_else(|| SymptomError::UnknownSymptom(id.to_string()))?;
        if self.symptoms.iter().any(|s| s.id == id) {
            return Ok(false);
        }
        debug!(symptom = id, "Symptom selected");
        self.symptoms.push(template.instantiate());
        Ok(true)
    }

    pub fn remove_symptom(&mut self, id: &str) -> bool {
        let before = self.symptoms.len();
        self.symptoms.retain(|s| s.id != id);
        self.symptoms.len() != before
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.symptoms.iter().any(|s| s.id == id)
    }

    fn selected_mut(&mut self, id: &str) -> SymptomResult<&mut Symptom> {
        self.symptoms
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| SymptomError::UnknownSymptom(id.to_string()))
    }

    pub fn set_duration(&mut self, id: &str, duration: DurationBucket) -> SymptomResult<()> {
        self.selected_mut(id)?.duration = duration;
        Ok(())
    }

    pub fn set_severity(&mut self, id: &str, severity: Severity) -> SymptomResult<()> {
        self.selected_mut(id)?.severity = severity;
        Ok(())
    }

    /// Gate for leaving the current step
    pub fn check_step(&mut self) -> SymptomResult<()> {
        let step = self.step;
        match step {
            WizardStep::PatientInfo if self.patient.age.is_none() => {
                Err(self.invalid("symptoms.age_required"))
            }
            WizardStep::PatientInfo if self.patient.gender.is_none() => {
                Err(self.invalid("symptoms.gender_required"))
            }
            WizardStep::Symptoms if self.symptoms.is_empty() => {
                Err(self.invalid("symptoms.symptoms_required"))
            }
            _ => Ok(()),
        }
    }

    pub fn next(&mut self) -> SymptomResult<WizardStep> {
        self.check_step()?;
        self.status = None;
        let from = self.step;
        self.step = from.next();
        if from != self.step {
            info!(from = %from, to = %self.step, "Symptom wizard advanced");
        }
        Ok(self.step)
    }

    pub fn back(&mut self) -> WizardStep {
        self.status = None;
        self.step = self.step.previous();
        self.step
    }

    pub fn analysis_request(&self) -> AnalysisRequest {
        AnalysisRequest {
            symptoms: self.symptoms.clone(),
            patient: self.patient.clone(),
            description: self.patient.description.clone(),
            locale: self.locale.current(),
        }
    }

    /// Runs the external analysis. Only valid on the final step; a failure
    /// leaves the wizard there with no result and a localized status.
    pub async fn analyze(&mut self, analyzer: &dyn SymptomAnalyzer) -> SymptomResult<&DiagnosisResult> {
        if self.step != WizardStep::Analysis {
            return Err(SymptomError::NotReady);
        }
        self.result = None;
        self.status = Some(self.locale.t("symptoms.analyzing"));

        let request = self.analysis_request();
        info!(
            symptoms = request.symptoms.len(),
            locale = %request.locale,
            "Starting symptom analysis"
        );

        match analyzer.analyze(&request).await {
            Ok(result) => {
                info!(urgency = ?result.urgency, "Symptom analysis complete");
                self.status = None;
                Ok(&*self.result.insert(result))
            }
            Err(err) => {
                self.reporter
                    .report("symptom analysis", &EasyMedError::from(err.clone()));
                self.status = Some(self.locale.t("symptoms.analysis_failed"));
                Err(err)
            }
        }
    }

    /// New analysis: clears all form state and returns to the first step
    pub fn reset(&mut self) {
        self.step = WizardStep::PatientInfo;
        self.patient = PatientInfo::default();
        self.symptoms.clear();
        self.result = None;
        self.status = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wizard() -> SymptomWizard {
        SymptomWizard::new(LocaleContext::embedded().unwrap())
    }

    #[test]
    fn first_step_requires_age_then_gender() {
        let mut wizard = wizard();
        assert_eq!(
            wizard.next(),
            Err(SymptomError::Validation("Please enter the patient's age".to_string()))
        );

        wizard.set_age_text("34").unwrap();
        assert_eq!(
            wizard.next(),
            Err(SymptomError::Validation("Please select a gender".to_string()))
        );
        assert_eq!(wizard.status(), Some("Please select a gender"));

        wizard.set_gender(Gender::Female);
        assert_eq!(wizard.next(), Ok(WizardStep::Symptoms));
        assert_eq!(wizard.status(), None);
    }

    #[test]
    fn age_outside_range_is_rejected() {
        let mut wizard = wizard();
        for text in ["0", "121", "abc", "-4", "300"] {
            assert!(
                matches!(wizard.set_age_text(text), Err(SymptomError::Validation(_))),
                "{} should be rejected",
                text
            );
        }
        assert_eq!(wizard.patient().age, None);
        wizard.set_age_text(" 120 ").unwrap();
        assert_eq!(wizard.patient().age, Some(120));
        wizard.set_age_text("").unwrap();
        assert_eq!(wizard.patient().age, None);
    }

    #[test]
    fn second_step_requires_a_symptom() {
        let mut wizard = wizard();
        wizard.set_age(40).unwrap();
        wizard.set_gender(Gender::Male);
        wizard.next().unwrap();

        assert!(wizard.next().is_err());
        assert!(wizard.add_symptom("cough").unwrap());
        assert_eq!(wizard.next(), Ok(WizardStep::Details));
        assert_eq!(wizard.next(), Ok(WizardStep::Analysis));
        assert_eq!(wizard.next(), Ok(WizardStep::Analysis));
    }

    #[test]
    fn adding_a_selected_symptom_is_a_no_op() {
        let mut wizard = wizard();
        assert!(wizard.add_symptom("fever").unwrap());
        wizard.set_duration("fever", DurationBucket::OneToTwoWeeks).unwrap();
        assert!(!wizard.add_symptom("fever").unwrap());
        assert_eq!(wizard.symptoms().len(), 1);
        assert_eq!(wizard.symptoms()[0].duration, DurationBucket::OneToTwoWeeks);
        assert!(matches!(
            wizard.add_symptom("hiccups"),
            Err(SymptomError::UnknownSymptom(_))
        ));
    }

    #[test]
    fn editing_an_unselected_symptom_fails() {
        let mut wizard = wizard();
        assert!(wizard.set_severity("nausea", Severity::Severe).is_err());
        wizard.add_symptom("nausea").unwrap();
        wizard.set_severity("nausea", Severity::Severe).unwrap();
        assert!(wizard.remove_symptom("nausea"));
        assert!(!wizard.remove_symptom("nausea"));
    }

    #[test]
    fn back_keeps_entered_data() {
        let mut wizard = wizard();
        wizard.set_age(60).unwrap();
        wizard.set_gender(Gender::Other);
        wizard.toggle_condition("Diabetes");
        wizard.next().unwrap();
        wizard.add_symptom("dizziness").unwrap();
        wizard.next().unwrap();

        assert_eq!(wizard.back(), WizardStep::Symptoms);
        assert_eq!(wizard.back(), WizardStep::PatientInfo);
        assert_eq!(wizard.back(), WizardStep::PatientInfo);
        assert_eq!(wizard.patient().age, Some(60));
        assert!(wizard.patient().existing_conditions.contains("Diabetes"));
        assert!(wizard.is_selected("dizziness"));
    }

    #[test]
    fn toggling_a_condition_twice_unchecks_it() {
        let mut wizard = wizard();
        assert!(wizard.toggle_condition("Asthma"));
        assert!(!wizard.toggle_condition("Asthma"));
        assert!(wizard.patient().existing_conditions.is_empty());
    }

    #[test]
    fn medications_ignore_blank_entries() {
        let mut wizard = wizard();
        wizard.add_medication("Metformin 500mg");
        wizard.add_medication("   ");
        assert_eq!(wizard.patient().medications, vec!["Metformin 500mg".to_string()]);
        assert_eq!(wizard.remove_medication(3), None);
        assert_eq!(wizard.remove_medication(0).as_deref(), Some("Metformin 500mg"));
    }

    struct FixedAnalyzer(SymptomResult<DiagnosisResult>);

    #[async_trait::async_trait]
    impl SymptomAnalyzer for FixedAnalyzer {
        async fn analyze(&self, _request: &AnalysisRequest) -> SymptomResult<DiagnosisResult> {
            self.0.clone()
        }
    }

    fn at_final_step() -> SymptomWizard {
        let mut wizard = wizard();
        wizard.set_age(28).unwrap();
        wizard.set_gender(Gender::Female);
        wizard.next().unwrap();
        wizard.add_symptom("fever").unwrap();
        wizard.next().unwrap();
        wizard.next().unwrap();
        wizard
    }

    #[test]
    fn analysis_result_is_kept_until_reset() {
        let diagnosis = DiagnosisResult {
            condition: "Viral fever".to_string(),
            probability: 72.0,
            urgency: crate::models::Urgency::Routine,
            specialist: "General Physician".to_string(),
            recommendations: vec!["Rest".to_string()],
        };
        let analyzer = FixedAnalyzer(Ok(diagnosis.clone()));
        let mut wizard = at_final_step();

        let result = tokio_test::block_on(wizard.analyze(&analyzer)).unwrap().clone();
        assert_eq!(result, diagnosis);
        assert_eq!(wizard.result(), Some(&diagnosis));
        assert_eq!(wizard.status(), None);

        wizard.reset();
        assert_eq!(wizard.step(), WizardStep::PatientInfo);
        assert!(wizard.result().is_none());
        assert!(wizard.symptoms().is_empty());
    }

    #[test]
    fn failed_analysis_sets_localized_status() {
        let analyzer = FixedAnalyzer(Err(SymptomError::Analysis("HTTP 500".to_string())));
        let mut wizard = at_final_step();

        let outcome = tokio_test::block_on(wizard.analyze(&analyzer));
        assert!(matches!(outcome, Err(SymptomError::Analysis(_))));
        assert_eq!(wizard.status(), Some("Symptom analysis failed. Please try again."));
        assert_eq!(wizard.step(), WizardStep::Analysis);
    }
}
