// Error reporting through tracing
// Full detail goes to the diagnostics log, the caller receives the user status.

use crate::sanitization::DataSanitizer;
use crate::types::EasyMedError;

pub struct ErrorReporter {
    component: &'static str,
    sanitizer: DataSanitizer,
}

impl ErrorReporter {
    pub fn new(component: &'static str) -> Self {
        Self {
            component,
            sanitizer: DataSanitizer::default(),
        }
    }

    /// Logs the error and returns the status string to display
    pub fn report(&self, context: &str, error: &EasyMedError) -> String {
        let detail = self.sanitizer.sanitize_for_logging(&error.to_string());
        tracing::error!(
            component = self.component,
            context = context,
            error_code = error.code(),
            error_category = %error.category(),
            detail = %detail,
            "EasyMed error occurred"
        );
        error.user_message()
    }
}
