use async_trait::async_trait;
use auth_identity::*;
use locale_context::{Locale, LocaleContext};
use std::sync::Arc;

struct BrokenStore;

#[async_trait]
impl UserStore for BrokenStore {
    async fn find(&self, _identifier: &str, _role: Role) -> auth_identity::Result<Option<UserRecord>> {
        Err(IdentityError::Store("connection refused".to_string()))
    }
}

fn controller_with(config: DemoAuthConfig, store: Arc<dyn UserStore>, issuer: DemoOtpIssuer) -> LoginController {
    LoginController::new(
        config,
        LocaleContext::embedded().unwrap(),
        store,
        Arc::new(DemoCredentialPolicy::embedded().unwrap()),
        Arc::new(issuer),
    )
}

fn demo_controller() -> LoginController {
    controller_with(
        DemoAuthConfig::demo(),
        Arc::new(InMemoryUserStore::new()),
        DemoOtpIssuer::fixed("123456"),
    )
}

fn authenticated(outcome: LoginOutcome) -> AuthenticatedUser {
    match outcome {
        LoginOutcome::Authenticated(user) => user,
        other => panic!("expected a login, got {:?}", other),
    }
}

#[tokio::test]
async fn short_phone_is_rejected_before_sending() {
    let mut login = demo_controller();
    login.set_phone("98765");

    assert_eq!(login.send_otp().await, Err(IdentityError::InvalidPhone));
    assert_eq!(login.message(), Some("Please enter a valid 10-digit phone number"));
    assert!(!login.otp_sent());
}

#[tokio::test]
async fn phone_login_creates_demo_identity_for_unknown_user() {
    let mut login = demo_controller();
    login.select_role(Role::Asha);
    login.set_phone("9876543210");

    assert_eq!(login.send_otp().await, Ok(LoginOutcome::OtpSent));
    assert_eq!(
        login.message(),
        Some("OTP sent to 9876543210. Your verification code is ready.")
    );

    login.set_otp("123456");
    let user = authenticated(login.verify_otp().await.unwrap());
    assert_eq!(user.name, "Asha User");
    assert_eq!(user.role, Role::Asha);
    assert_eq!(user.login_method, LoginMethod::Phone);
    assert_eq!(user.phone.as_deref(), Some("9876543210"));
    assert_eq!(user.user_id, None);
    assert_eq!(login.message(), Some("Login successful!"));
    assert!(!login.otp_sent());
}

#[tokio::test]
async fn phone_login_uses_store_record_when_present() {
    let record = UserRecord::new("Lakshmi Devi", Role::Patient).with_phone("9123456780");
    let id = record.id;
    let mut login = controller_with(
        DemoAuthConfig::demo(),
        Arc::new(InMemoryUserStore::with_users([record])),
        DemoOtpIssuer::fixed("123456"),
    );
    login.set_phone("9123456780");
    login.send_otp().await.unwrap();
    login.set_otp("123456");

    let user = authenticated(login.verify_otp().await.unwrap());
    assert_eq!(user.name, "Lakshmi Devi");
    assert_eq!(user.user_id, Some(id));
}

#[tokio::test]
async fn store_failure_falls_back_to_demo_identity() {
    let mut login = controller_with(DemoAuthConfig::demo(), Arc::new(BrokenStore), DemoOtpIssuer::fixed("123456"));
    login.select_role(Role::Doctor);
    login.set_phone("9000000000");
    login.send_otp().await.unwrap();
    login.set_otp("123456");

    let user = authenticated(login.verify_otp().await.unwrap());
    assert_eq!(user.name, "Doctor User");
}

#[tokio::test]
async fn otp_checks_order_and_length() {
    let mut login = controller_with(
        DemoAuthConfig::default(),
        Arc::new(InMemoryUserStore::new()),
        DemoOtpIssuer::fixed("482913"),
    );
    login.set_phone("9876543210");

    login.set_otp("482913");
    assert_eq!(login.verify_otp().await, Err(IdentityError::OtpNotRequested));

    login.send_otp().await.unwrap();
    login.set_otp("4829");
    assert_eq!(login.verify_otp().await, Err(IdentityError::IncompleteOtp));
    assert_eq!(login.message(), Some("Please enter the complete 6-digit OTP"));

    login.set_otp("111111");
    assert_eq!(login.verify_otp().await, Err(IdentityError::InvalidOtp));
    assert!(login.otp_sent());

    login.set_otp("482913");
    assert!(matches!(login.verify_otp().await, Ok(LoginOutcome::Authenticated(_))));
}

#[tokio::test]
async fn universal_code_only_works_when_configured() {
    let mut strict = controller_with(
        DemoAuthConfig::default(),
        Arc::new(InMemoryUserStore::new()),
        DemoOtpIssuer::fixed("482913"),
    );
    strict.set_phone("9876543210");
    strict.send_otp().await.unwrap();
    strict.set_otp("123456");
    assert_eq!(strict.verify_otp().await, Err(IdentityError::InvalidOtp));

    let mut demo = controller_with(
        DemoAuthConfig::demo(),
        Arc::new(InMemoryUserStore::new()),
        DemoOtpIssuer::random(6),
    );
    demo.set_phone("9876543210");
    demo.send_otp().await.unwrap();
    demo.set_otp("123456");
    assert!(matches!(demo.verify_otp().await, Ok(LoginOutcome::Authenticated(_))));
}

#[tokio::test]
async fn admin_phone_skips_otp_only_in_demo_mode() {
    let mut demo = demo_controller();
    demo.select_role(Role::Admin);
    demo.set_phone("9060328119");
    let user = authenticated(demo.send_otp().await.unwrap());
    assert_eq!(user.role, Role::Admin);
    assert_eq!(user.name, "Super Admin");

    let mut strict = controller_with(
        DemoAuthConfig::default(),
        Arc::new(InMemoryUserStore::new()),
        DemoOtpIssuer::fixed("123456"),
    );
    strict.select_role(Role::Admin);
    strict.set_phone("9060328119");
    assert_eq!(strict.send_otp().await, Ok(LoginOutcome::OtpSent));
    strict.set_otp("123456");
    assert_eq!(strict.verify_otp().await, Err(IdentityError::AccessDenied));
    assert_eq!(
        strict.message(),
        Some("Access denied. Please check your credentials.")
    );
}

#[tokio::test]
async fn email_login_checks_demo_table_per_role() {
    let mut login = demo_controller();
    login.select_method(LoginMethod::Email);
    login.select_role(Role::Doctor);
    login.set_email("doctor@demo.com");
    login.set_password("doctor123");

    let user = authenticated(login.login_email().await.unwrap());
    assert_eq!(user.name, "Dr. Demo");
    assert_eq!(user.email.as_deref(), Some("doctor@demo.com"));

    login.select_role(Role::Patient);
    login.set_password("doctor123");
    assert_eq!(login.login_email().await, Err(IdentityError::InvalidCredentials));
    assert_eq!(
        login.message(),
        Some("Invalid credentials. Please use the demo credentials provided.")
    );
}

#[tokio::test]
async fn email_login_prefers_store_records() {
    let record = UserRecord::new("Ravi Kumar", Role::Patient).with_email("ravi@example.org");
    let mut login = controller_with(
        DemoAuthConfig::default(),
        Arc::new(InMemoryUserStore::with_users([record])),
        DemoOtpIssuer::random(6),
    );
    login.select_method(LoginMethod::Email);
    login.set_email("ravi@example.org");
    login.set_password("anything");

    let user = authenticated(login.login_email().await.unwrap());
    assert_eq!(user.name, "Ravi Kumar");
}

#[tokio::test]
async fn admin_email_login_is_denied_on_mismatch() {
    let mut login = demo_controller();
    login.select_method(LoginMethod::Email);
    login.select_role(Role::Admin);
    login.set_email("admin@easymed.in");
    login.set_password("letmein");
    assert_eq!(login.login_email().await, Err(IdentityError::AccessDenied));

    login.set_password("easymed2025");
    let user = authenticated(login.login_email().await.unwrap());
    assert_eq!(user.role, Role::Admin);
}

#[tokio::test]
async fn missing_email_fields_are_reported() {
    let mut login = demo_controller();
    login.select_method(LoginMethod::Email);
    login.set_email("patient@demo.com");
    assert_eq!(login.login_email().await, Err(IdentityError::MissingFields));
}

#[tokio::test]
async fn submit_dispatches_like_the_enter_key() {
    let mut login = demo_controller();
    assert_eq!(login.submit().await, Ok(LoginOutcome::Idle));

    login.set_phone("9876543210");
    assert_eq!(login.submit().await, Ok(LoginOutcome::OtpSent));

    login.set_otp("123456");
    assert!(matches!(login.submit().await, Ok(LoginOutcome::Authenticated(_))));

    login.select_method(LoginMethod::Email);
    login.set_email("patient@easymed.in");
    login.set_password("patient123");
    let user = authenticated(login.submit().await.unwrap());
    assert_eq!(user.name, "EasyMed Patient");
}

#[tokio::test]
async fn status_messages_follow_the_active_locale() {
    let mut login = demo_controller();
    let locale = LocaleContext::embedded().unwrap();
    locale.set_locale(Locale::Hindi);
    let mut hindi = LoginController::new(
        DemoAuthConfig::demo(),
        locale.clone(),
        Arc::new(InMemoryUserStore::new()),
        Arc::new(DemoCredentialPolicy::embedded().unwrap()),
        Arc::new(DemoOtpIssuer::fixed("123456")),
    );

    login.set_phone("123");
    hindi.set_phone("123");
    let _ = login.send_otp().await;
    let _ = hindi.send_otp().await;

    assert_eq!(hindi.message().map(str::to_string), Some(locale.t("auth.invalid_phone")));
    assert_ne!(hindi.message(), login.message());
}
