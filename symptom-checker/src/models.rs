//! Form state and analysis result types
//!
//! Every enum here carries the translation key used to label it, so views
//! never hard-code display text.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Mild, Severity::Moderate, Severity::Severe];

    pub fn label_key(self) -> &'static str {
        match self {
            Severity::Mild => "symptoms.mild",
            Severity::Moderate => "symptoms.moderate",
            Severity::Severe => "symptoms.severe",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyRegion {
    General,
    Head,
    Chest,
    Respiratory,
    Stomach,
    Joints,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DurationBucket {
    #[serde(rename = "few-hours")]
    FewHours,
    #[default]
    #[serde(rename = "1-2-days")]
    OneToTwoDays,
    #[serde(rename = "3-7-days")]
    ThreeToSevenDays,
    #[serde(rename = "1-2-weeks")]
    OneToTwoWeeks,
    #[serde(rename = "more-than-2-weeks")]
    MoreThanTwoWeeks,
}

impl DurationBucket {
    pub const ALL: [DurationBucket; 5] = [
        DurationBucket::FewHours,
        DurationBucket::OneToTwoDays,
        DurationBucket::ThreeToSevenDays,
        DurationBucket::OneToTwoWeeks,
        DurationBucket::MoreThanTwoWeeks,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DurationBucket::FewHours => "few-hours",
            DurationBucket::OneToTwoDays => "1-2-days",
            DurationBucket::ThreeToSevenDays => "3-7-days",
            DurationBucket::OneToTwoWeeks => "1-2-weeks",
            DurationBucket::MoreThanTwoWeeks => "more-than-2-weeks",
        }
    }

    pub fn label_key(self) -> &'static str {
        match self {
            DurationBucket::FewHours => "symptoms.few_hours",
            DurationBucket::OneToTwoDays => "symptoms.one_two_days",
            DurationBucket::ThreeToSevenDays => "symptoms.three_seven_days",
            DurationBucket::OneToTwoWeeks => "symptoms.one_two_weeks",
            DurationBucket::MoreThanTwoWeeks => "symptoms.more_than_two_weeks",
        }
    }
}

impl fmt::Display for DurationBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DurationBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DurationBucket::ALL
            .into_iter()
            .find(|bucket| bucket.as_str() == s.trim())
            .ok_or_else(|| format!("unknown duration '{}'", s))
    }
}

/// A selected symptom. Duration and severity are edited in place on step 3.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symptom {
    pub id: String,
    pub name: String,
    pub severity: Severity,
    pub body_region: BodyRegion,
    pub duration: DurationBucket,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn label_key(self) -> &'static str {
        match self {
            Gender::Male => "symptoms.male",
            Gender::Female => "symptoms.female",
            Gender::Other => "symptoms.other",
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            "other" | "o" => Ok(Gender::Other),
            other => Err(format!("unknown gender '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientInfo {
    pub age: Option<u8>,
    pub gender: Option<Gender>,
    pub existing_conditions: BTreeSet<String>,
    pub medications: Vec<String>,
    /// Free-text description in the patient's own words
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Emergency,
    Urgent,
    Routine,
}

impl Urgency {
    pub fn label_key(self) -> &'static str {
        match self {
            Urgency::Emergency => "symptoms.emergency",
            Urgency::Urgent => "symptoms.urgent",
            Urgency::Routine => "symptoms.routine",
        }
    }

    pub fn description_key(self) -> &'static str {
        match self {
            Urgency::Emergency => "symptoms.emergency_desc",
            Urgency::Urgent => "symptoms.urgent_desc",
            Urgency::Routine => "symptoms.routine_desc",
        }
    }
}

/// Returned by the external analysis service and rendered as-is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisResult {
    pub condition: String,
    /// Percentage, 0 to 100
    pub probability: f64,
    pub urgency: Urgency,
    pub specialist: String,
    pub recommendations: Vec<String>,
}
