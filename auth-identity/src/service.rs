//! Login screen state machine
//!
//! Phone logins go through an OTP step; e-mail logins check the user store
//! first and then the demo credential table. Every failure leaves a localized
//! status message behind and returns the flow to an editable state.

use locale_context::LocaleContext;
use logger_redacted::{redacted_info, redacted_warn};
use std::sync::Arc;
use tracing::info;

use crate::{config::*, error::*, models::*, otp::OtpIssuer, policy::CredentialPolicy, repository::UserStore};

/// What a login action led to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// A code was sent; waiting for [`LoginController::verify_otp`]
    OtpSent,
    Authenticated(AuthenticatedUser),
    /// Enter was pressed with nothing to submit
    Idle,
}

pub struct LoginController {
    config: DemoAuthConfig,
    locale: LocaleContext,
    store: Arc<dyn UserStore>,
    policy: Arc<dyn CredentialPolicy>,
    otp_issuer: Arc<dyn OtpIssuer>,
    role: Role,
    method: LoginMethod,
    phone: String,
    email: String,
    password: String,
    otp: String,
    issued_otp: Option<String>,
    message: Option<String>,
}

impl LoginController {
    pub fn new(
        config: DemoAuthConfig,
        locale: LocaleContext,
        store: Arc<dyn UserStore>,
        policy: Arc<dyn CredentialPolicy>,
        otp_issuer: Arc<dyn OtpIssuer>,
    ) -> Self {
        Self {
            config,
            locale,
            store,
            policy,
            otp_issuer,
            role: Role::default(),
            method: LoginMethod::default(),
            phone: String::new(),
            email: String::new(),
            password: String::new(),
            otp: String::new(),
            issued_otp: None,
            message: None,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn method(&self) -> LoginMethod {
        self.method
    }

    /// Localized status line (OTP sent, errors, success)
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn otp_sent(&self) -> bool {
        self.issued_otp.is_some()
    }

    pub fn select_role(&mut self, role: Role) {
        self.role = role;
    }

    pub fn select_method(&mut self, method: LoginMethod) {
        self.method = method;
    }

    pub fn set_phone(&mut self, phone: &str) {
        self.phone = phone.trim().to_string();
    }

    pub fn set_email(&mut self, email: &str) {
        self.email = email.trim().to_string();
    }

    pub fn set_password(&mut self, password: &str) {
        self.password = password.to_string();
    }

    pub fn set_otp(&mut self, otp: &str) {
        self.otp = otp.trim().to_string();
    }

    fn fail<T>(&mut self, err: IdentityError) -> Result<T> {
        self.message = Some(self.locale.t(err.message_key()));
        Err(err)
    }

    fn succeed(&mut self, user: AuthenticatedUser) -> LoginOutcome {
        info!(role = %user.role, method = ?user.login_method, "Login successful");
        self.message = Some(self.locale.t("auth.login_success"));
        self.password.clear();
        self.otp.clear();
        self.issued_otp = None;
        LoginOutcome::Authenticated(user)
    }

    fn is_admin_phone(&self) -> bool {
        self.config.admin_auto_login_phone.as_deref() == Some(self.phone.as_str())
    }

    /// Validates the phone and sends a code. The configured admin phone on the
    /// admin tab logs in straight away.
    pub async fn send_otp(&mut self) -> Result<LoginOutcome> {
        let digits = self.phone.chars().filter(|c| c.is_ascii_digit()).count();
        if digits < self.config.min_phone_digits {
            return self.fail(IdentityError::InvalidPhone);
        }

        if self.role == Role::Admin && self.is_admin_phone() {
            redacted_info!("Admin auto-login for {}", self.phone);
            let user = self.admin_phone_user();
            return Ok(self.succeed(user));
        }

        let issued = self.otp_issuer.issue(&self.phone).await;
        let code = match issued {
            Ok(code) => code,
            Err(err) => return self.fail(err),
        };
        self.issued_otp = Some(code);
        self.otp.clear();
        self.message = Some(self.locale.t_with("auth.otp_sent", &[("phone", self.phone.as_str())]));
        Ok(LoginOutcome::OtpSent)
    }

    /// Checks the entered code against the issued (or universal) one and
    /// completes the phone login.
    pub async fn verify_otp(&mut self) -> Result<LoginOutcome> {
        let Some(issued) = self.issued_otp.clone() else {
            return self.fail(IdentityError::OtpNotRequested);
        };
        if self.otp.len() < self.config.otp_length {
            return self.fail(IdentityError::IncompleteOtp);
        }

        let universal = self.config.universal_otp.as_deref() == Some(self.otp.as_str());
        if self.otp != issued && !universal {
            redacted_warn!("OTP mismatch for {}", self.phone);
            return self.fail(IdentityError::InvalidOtp);
        }

        let user = self.phone_user().await?;
        Ok(self.succeed(user))
    }

    fn admin_phone_user(&self) -> AuthenticatedUser {
        let mut user = AuthenticatedUser::new(self.policy.admin_phone_name(), Role::Admin, LoginMethod::Phone);
        user.phone = Some(self.phone.clone());
        user
    }

    fn demo_user(&self) -> AuthenticatedUser {
        let role_title = self.role.title();
        let name = self.locale.t_with("auth.demo_user", &[("role", role_title.as_str())]);
        let mut user = AuthenticatedUser::new(name, self.role, LoginMethod::Phone);
        user.phone = Some(self.phone.clone());
        user
    }

    async fn phone_user(&mut self) -> Result<AuthenticatedUser> {
        if self.role == Role::Admin {
            if self.is_admin_phone() {
                return Ok(self.admin_phone_user());
            }
            return self.fail(IdentityError::AccessDenied);
        }

        match self.store.find(&self.phone, self.role).await {
            Ok(Some(record)) => {
                let mut user = AuthenticatedUser::from_record(&record, LoginMethod::Phone);
                user.phone = Some(self.phone.clone());
                Ok(user)
            }
            Ok(None) => Ok(self.demo_user()),
            Err(err) => {
                redacted_warn!("User store lookup failed for {}: {}, using demo login", self.phone, err);
                Ok(self.demo_user())
            }
        }
    }

    /// E-mail/password login. Admins are checked against the demo table only;
    /// other roles try the user store first.
    pub async fn login_email(&mut self) -> Result<LoginOutcome> {
        if self.email.is_empty() || self.password.is_empty() {
            return self.fail(IdentityError::MissingFields);
        }

        if self.role != Role::Admin {
            let found = self.store.find(&self.email, self.role).await;
            match found {
                Ok(Some(record)) => {
                    let mut user = AuthenticatedUser::from_record(&record, LoginMethod::Email);
                    user.email = Some(self.email.clone());
                    return Ok(self.succeed(user));
                }
                Ok(None) => {}
                Err(err) => {
                    redacted_warn!("User store lookup failed for {}: {}", self.email, err);
                }
            }
        }

        let verified = self.policy.verify(self.role, &self.email, &self.password);
        let name = match verified {
            Ok(Some(name)) => name,
            Ok(None) if self.role == Role::Admin => return self.fail(IdentityError::AccessDenied),
            Ok(None) => return self.fail(IdentityError::InvalidCredentials),
            Err(err) => return self.fail(err),
        };

        let mut user = AuthenticatedUser::new(name, self.role, LoginMethod::Email);
        user.email = Some(self.email.clone());
        Ok(self.succeed(user))
    }

    /// Enter-key dispatch: verify a pending OTP, else send one, else try e-mail
    pub async fn submit(&mut self) -> Result<LoginOutcome> {
        if self.otp_sent() {
            return self.verify_otp().await;
        }
        match self.method {
            LoginMethod::Phone if !self.phone.is_empty() => self.send_otp().await,
            LoginMethod::Email if !self.email.is_empty() && !self.password.is_empty() => {
                self.login_email().await
            }
            _ => Ok(LoginOutcome::Idle),
        }
    }
}
