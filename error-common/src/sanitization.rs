// User-facing status strings
// Provider exceptions are never surfaced verbatim; each category maps to a fixed status.

use crate::types::ErrorCategory;

pub fn status_for(category: ErrorCategory) -> &'static str {
    match category {
        ErrorCategory::CredentialFetch => "Failed to fetch speech credential",
        ErrorCategory::DeviceInit => "Microphone access failed",
        ErrorCategory::Recognition => "Could not recognize speech. Please try again.",
        ErrorCategory::Synthesis => "Error during processing",
        ErrorCategory::Validation => "Please complete the required fields",
        ErrorCategory::Authentication => "Login failed. Please try again.",
        ErrorCategory::Configuration => "Service is not configured",
        ErrorCategory::Network => "Network error. Please try again.",
        ErrorCategory::Internal => "Something went wrong. Please try again.",
    }
}

/// Sanitizes free-form diagnostic text before it is attached to a log event
pub struct DataSanitizer {
    max_len: usize,
}

impl Default for DataSanitizer {
    fn default() -> Self {
        Self { max_len: 512 }
    }
}

impl DataSanitizer {
    pub fn new(max_len: usize) -> Self {
        Self { max_len }
    }

    /// Strips control characters and truncates on a char boundary
    pub fn sanitize_for_logging(&self, data: &str) -> String {
        let cleaned: String = data
            .chars()
            .map(|c| if c.is_control() { ' ' } else { c })
            .collect();
        if cleaned.chars().count() <= self.max_len {
            return cleaned;
        }
        let mut truncated: String = cleaned.chars().take(self.max_len).collect();
        truncated.push('…');
        truncated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_control_characters() {
        let sanitizer = DataSanitizer::default();
        assert_eq!(sanitizer.sanitize_for_logging("a\nb\tc"), "a b c");
    }

    #[test]
    fn truncates_long_payloads() {
        let sanitizer = DataSanitizer::new(4);
        assert_eq!(sanitizer.sanitize_for_logging("नमस्ते दुनिया"), "नमस्…");
    }
}
