use serde::{Deserialize, Serialize};

use crate::error::{IdentityError, Result};

/// Universal OTP accepted in demo deployments
pub const DEMO_UNIVERSAL_OTP: &str = "123456";
/// Admin phone that skips the OTP step in demo deployments
pub const DEMO_ADMIN_PHONE: &str = "9060328119";

/// Login rules. `Default` is strict; [`DemoAuthConfig::demo`] switches on the
/// demo shortcuts (universal OTP and admin phone auto-login).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoAuthConfig {
    pub min_phone_digits: usize,
    pub otp_length: usize,
    /// Code accepted regardless of the one that was issued
    pub universal_otp: Option<String>,
    /// Admin phone number that logs in without an OTP
    pub admin_auto_login_phone: Option<String>,
    /// Issue this code instead of a random one
    pub fixed_otp: Option<String>,
}

impl Default for DemoAuthConfig {
    fn default() -> Self {
        Self {
            min_phone_digits: 10,
            otp_length: 6,
            universal_otp: None,
            admin_auto_login_phone: None,
            fixed_otp: None,
        }
    }
}

impl DemoAuthConfig {
    pub fn demo() -> Self {
        Self {
            universal_otp: Some(DEMO_UNIVERSAL_OTP.to_string()),
            admin_auto_login_phone: Some(DEMO_ADMIN_PHONE.to_string()),
            fixed_otp: Some(DEMO_UNIVERSAL_OTP.to_string()),
            ..Self::default()
        }
    }

    /// `EASYMED_AUTH_DEMO=true` starts from [`DemoAuthConfig::demo`];
    /// `EASYMED_UNIVERSAL_OTP` and `EASYMED_ADMIN_PHONE` override single fields.
    pub fn from_env() -> Result<Self> {
        let demo = std::env::var("EASYMED_AUTH_DEMO")
            .ok()
            .and_then(|s| s.parse::<bool>().ok())
            .unwrap_or(false);
        let mut config = if demo { Self::demo() } else { Self::default() };

        if let Ok(code) = std::env::var("EASYMED_UNIVERSAL_OTP") {
            config.universal_otp = Some(code);
        }
        if let Ok(phone) = std::env::var("EASYMED_ADMIN_PHONE") {
            config.admin_auto_login_phone = Some(phone);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.otp_length == 0 {
            return Err(IdentityError::Config("otp_length must be positive".to_string()));
        }
        for (name, code) in [
            ("universal_otp", &self.universal_otp),
            ("fixed_otp", &self.fixed_otp),
        ] {
            if let Some(code) = code {
                if code.len() != self.otp_length || !code.chars().all(|c| c.is_ascii_digit()) {
                    return Err(IdentityError::Config(format!(
                        "{} must be {} digits",
                        name, self.otp_length
                    )));
                }
            }
        }
        Ok(())
    }
}
