use crate::models::{BodyRegion, DurationBucket, Severity, Symptom};

/// A predefined symptom the patient can pick on step 2
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymptomTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub severity: Severity,
    pub body_region: BodyRegion,
}

impl SymptomTemplate {
    pub fn instantiate(&self) -> Symptom {
        Symptom {
            id: self.id.to_string(),
            name: self.name.to_string(),
            severity: self.severity,
            body_region: self.body_region,
            duration: DurationBucket::default(),
        }
    }
}

const fn template(
    id: &'static str,
    name: &'static str,
    severity: Severity,
    body_region: BodyRegion,
) -> SymptomTemplate {
    SymptomTemplate {
        id,
        name,
        severity,
        body_region,
    }
}

pub const COMMON_SYMPTOMS: [SymptomTemplate; 10] = [
    template("fever", "Fever", Severity::Moderate, BodyRegion::General),
    template("headache", "Headache", Severity::Mild, BodyRegion::Head),
    template("chest_pain", "Chest Pain", Severity::Severe, BodyRegion::Chest),
    template("cough", "Cough", Severity::Mild, BodyRegion::Respiratory),
    template("fatigue", "Fatigue", Severity::Mild, BodyRegion::General),
    template("nausea", "Nausea", Severity::Moderate, BodyRegion::Stomach),
    template("dizziness", "Dizziness", Severity::Moderate, BodyRegion::Head),
    template("shortness_breath", "Shortness of Breath", Severity::Severe, BodyRegion::Respiratory),
    template("abdominal_pain", "Abdominal Pain", Severity::Moderate, BodyRegion::Stomach),
    template("joint_pain", "Joint Pain", Severity::Mild, BodyRegion::Joints),
];

pub const EXISTING_CONDITIONS: [&str; 8] = [
    "Diabetes",
    "Hypertension",
    "Heart Disease",
    "Asthma",
    "Arthritis",
    "Thyroid Disorder",
    "Kidney Disease",
    "Liver Disease",
];

pub fn find_symptom(id: &str) -> Option<&'static SymptomTemplate> {
    COMMON_SYMPTOMS.iter().find(|t| t.id == id)
}
