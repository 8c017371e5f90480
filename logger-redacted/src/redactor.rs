use base64::{engine::general_purpose, Engine as _};
use lazy_static::lazy_static;
use regex::Regex;
use sha2::{Digest, Sha256};

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap();
    static ref NATIONAL_ID_REGEX: Regex = Regex::new(r"\b\d{4}[\s-]?\d{4}[\s-]?\d{4}\b").unwrap();
    static ref PHONE_REGEX: Regex = Regex::new(r"(?:\+(?:91|1)[-.\s]?)?\(?\b\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}\b").unwrap();
    // Six digits only count as a one-time code when a code keyword precedes them on the same line.
    static ref OTP_REGEX: Regex =
        Regex::new(r"(?i)(?P<lead>\b(?:otp|passcode|code|pin)\b[^\n]{0,48}?)\b\d{6}\b").unwrap();
    static ref BEARER_REGEX: Regex = Regex::new(r"(?i)\bbearer\s+[A-Za-z0-9._~+/=-]+").unwrap();
    static ref TOKEN_FIELD_REGEX: Regex = Regex::new(r#"(?i)"(token|password|otp)"\s*:\s*"[^"]*""#).unwrap();
}

/// PII redaction configuration
#[derive(Debug, Clone)]
pub struct RedactionConfig {
    pub redact_emails: bool,
    pub redact_phones: bool,
    pub redact_national_ids: bool,
    pub redact_otps: bool,
    pub redact_tokens: bool,
    pub hash_for_correlation: bool,
    pub custom_patterns: Vec<(Regex, String)>,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            redact_emails: true,
            redact_phones: true,
            redact_national_ids: true,
            redact_otps: true,
            redact_tokens: true,
            hash_for_correlation: true,
            custom_patterns: Vec::new(),
        }
    }
}

impl RedactionConfig {
    /// Adds an extra pattern; invalid expressions are rejected
    pub fn with_custom_pattern(mut self, pattern: &str, replacement: &str) -> Result<Self, regex::Error> {
        self.custom_patterns
            .push((Regex::new(pattern)?, replacement.to_string()));
        Ok(self)
    }
}

/// PII redactor for log messages
pub struct PiiRedactor {
    config: RedactionConfig,
}

impl PiiRedactor {
    pub fn new(config: RedactionConfig) -> Self {
        Self { config }
    }

    pub fn redact(&self, text: &str) -> String {
        let mut result = text.to_string();

        // Credentials first, their payloads may look like other identifiers.
        if self.config.redact_tokens {
            result = self.redact_tokens(&result);
        }

        if self.config.redact_emails {
            result = self.redact_emails(&result);
        }

        // 12-digit national ids before phones so they are not split up.
        if self.config.redact_national_ids {
            result = self.redact_national_ids(&result);
        }

        if self.config.redact_phones {
            result = self.redact_phones(&result);
        }

        if self.config.redact_otps {
            result = OTP_REGEX.replace_all(&result, "${lead}******").to_string();
        }

        for (pattern, replacement) in &self.config.custom_patterns {
            result = pattern.replace_all(&result, replacement.as_str()).to_string();
        }

        result
    }

    fn redact_tokens(&self, text: &str) -> String {
        let text = BEARER_REGEX.replace_all(text, "Bearer [REDACTED]");
        TOKEN_FIELD_REGEX
            .replace_all(&text, |caps: &regex::Captures| format!(r#""{}":"[REDACTED]""#, &caps[1]))
            .to_string()
    }

    fn redact_emails(&self, text: &str) -> String {
        EMAIL_REGEX.replace_all(text, |caps: &regex::Captures| {
            let email = &caps[0];
            if self.config.hash_for_correlation {
                format!("EMAIL[{}]", self.hash_value(email))
            } else {
                match email.split_once('@') {
                    Some((local, domain)) => format!(
                        "{}***@{}***",
                        local.chars().next().unwrap_or('*'),
                        domain.chars().next().unwrap_or('*')
                    ),
                    None => "***@***".to_string(),
                }
            }
        }).to_string()
    }

    fn redact_national_ids(&self, text: &str) -> String {
        NATIONAL_ID_REGEX.replace_all(text, |caps: &regex::Captures| {
            if self.config.hash_for_correlation {
                format!("ID[{}]", self.hash_value(&caps[0]))
            } else {
                "XXXX-XXXX-XXXX".to_string()
            }
        }).to_string()
    }

    fn redact_phones(&self, text: &str) -> String {
        PHONE_REGEX.replace_all(text, |caps: &regex::Captures| {
            let phone = &caps[0];
            if self.config.hash_for_correlation {
                format!("PHONE[{}]", self.hash_value(phone))
            } else {
                // Keep the last two digits so support staff can confirm the number.
                let digits: Vec<char> = phone.chars().filter(char::is_ascii_digit).collect();
                let tail: String = digits.iter().rev().take(2).rev().collect();
                format!("******{}", tail)
            }
        }).to_string()
    }

    fn hash_value(&self, value: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(value.as_bytes());
        let result = hasher.finalize();
        general_purpose::URL_SAFE_NO_PAD.encode(&result[..8]) // First 8 bytes are enough for correlation
    }
}
