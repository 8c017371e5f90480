/// Transcript normalization before triage
///
/// Speech providers return casual abbreviations and typographic apostrophes;
/// both are normalized so keyword matching sees one spelling.
use lazy_static::lazy_static;
use regex::Regex;

const ABBREVIATIONS: [(&str, &str); 12] = [
    ("sob", "shortness of breath"),
    ("cp", "chest pain"),
    ("bp", "blood pressure"),
    ("hr", "heart rate"),
    ("spo2", "oxygen saturation"),
    ("temp", "temperature"),
    ("mi", "myocardial infarction"),
    ("cva", "cerebrovascular accident"),
    ("loc", "loss of consciousness"),
    ("copd", "chronic obstructive pulmonary disease"),
    ("chf", "congestive heart failure"),
    ("uti", "urinary tract infection"),
];

lazy_static! {
    static ref ABBREVIATION_PATTERNS: Vec<(Regex, &'static str)> = ABBREVIATIONS
        .iter()
        .map(|(short, long)| (Regex::new(&format!(r"(?i)\b{}\b", short)).unwrap(), *long))
        .collect();
}

/// Lowercases, unifies apostrophes and expands known abbreviations
pub fn normalize_transcript(text: &str) -> String {
    let mut normalized = text.to_lowercase().replace(['\u{2019}', '\u{2018}'], "'");
    for (pattern, expansion) in ABBREVIATION_PATTERNS.iter() {
        normalized = pattern.replace_all(&normalized, *expansion).into_owned();
    }
    normalized
}
