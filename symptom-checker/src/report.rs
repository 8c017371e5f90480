use locale_context::LocaleContext;
use std::fmt::Write;

use crate::models::DiagnosisResult;

/// Localized view of a [`DiagnosisResult`]
pub struct DiagnosisReport<'a> {
    result: &'a DiagnosisResult,
    locale: &'a LocaleContext,
}

impl<'a> DiagnosisReport<'a> {
    pub fn new(result: &'a DiagnosisResult, locale: &'a LocaleContext) -> Self {
        Self { result, locale }
    }

    pub fn urgency_label(&self) -> String {
        self.locale.t(self.result.urgency.label_key())
    }

    pub fn urgency_description(&self) -> String {
        self.locale.t(self.result.urgency.description_key())
    }

    pub fn probability(&self) -> String {
        format_probability(self.result.probability)
    }

    /// Text read aloud by "listen to diagnosis"
    pub fn spoken_summary(&self) -> String {
        let probability = self.probability();
        let urgency = self.urgency_label();
        self.locale.t_with(
            "symptoms.spoken_summary",
            &[
                ("condition", self.result.condition.as_str()),
                ("probability", probability.as_str()),
                ("urgency", urgency.as_str()),
                ("specialist", self.result.specialist.as_str()),
            ],
        )
    }

    /// Plain-text rendering, one field per line
    pub fn render(&self) -> String {
        let t = |key: &str| self.locale.t(key);
        let mut out = String::new();

        let _ = writeln!(out, "{}", t("symptoms.results"));
        let _ = writeln!(out, "{} - {}", self.urgency_label(), self.urgency_description());
        let _ = writeln!(out, "{} {}", t("symptoms.likely_condition"), self.result.condition);
        let _ = writeln!(out, "{} {}%", t("symptoms.confidence"), self.probability());
        let _ = writeln!(out, "{} {}", t("symptoms.specialist"), self.result.specialist);

        if !self.result.recommendations.is_empty() {
            let _ = writeln!(out, "{}", t("symptoms.recommendations"));
            for recommendation in &self.result.recommendations {
                let _ = writeln!(out, "  - {}", recommendation);
            }
        }

        let _ = writeln!(out, "{}: {}", t("symptoms.disclaimer_title"), t("symptoms.disclaimer"));
        out
    }
}

/// Whole percentages print without decimals, others with one
pub fn format_probability(probability: f64) -> String {
    let rounded = (probability * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{:.0}", rounded)
    } else {
        format!("{:.1}", rounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Urgency;
    use locale_context::Locale;

    fn result() -> DiagnosisResult {
        DiagnosisResult {
            condition: "Viral Fever".to_string(),
            probability: 82.0,
            urgency: Urgency::Urgent,
            specialist: "General Physician".to_string(),
            recommendations: vec!["Stay hydrated".to_string(), "Rest for two days".to_string()],
        }
    }

    #[test]
    fn spoken_summary_fills_every_placeholder() {
        let locale = LocaleContext::embedded().unwrap();
        let result = result();
        let summary = DiagnosisReport::new(&result, &locale).spoken_summary();
        assert_eq!(
            summary,
            "Analysis complete. Condition: Viral Fever. Probability: 82%. \
             Urgency level: Urgent. Recommended specialist: General Physician."
        );
    }

    #[test]
    fn render_uses_active_locale_labels() {
        let locale = LocaleContext::embedded().unwrap();
        locale.set_locale(Locale::Hindi);
        let result = result();
        let report = DiagnosisReport::new(&result, &locale);
        let text = report.render();

        assert!(text.contains(&locale.t("symptoms.urgent")));
        assert!(text.contains("  - Stay hydrated"));
        assert!(text.contains(&locale.t("symptoms.disclaimer")));
        assert!(!text.contains("[symptoms."));
    }

    #[test]
    fn probability_formatting() {
        assert_eq!(format_probability(75.0), "75");
        assert_eq!(format_probability(66.66), "66.7");
        assert_eq!(format_probability(0.04), "0");
    }
}
