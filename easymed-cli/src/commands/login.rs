//! Interactive login against the demo identity setup

use anyhow::Result;
use auth_identity::{
    AuthenticatedUser, DemoCredentialPolicy, DemoOtpIssuer, IdentityError, InMemoryUserStore, LoginController,
    LoginMethod, LoginOutcome, Role,
};
use colored::*;
use dialoguer::{theme::ColorfulTheme, Input, Password, Select};
use locale_context::LocaleContext;
use std::sync::Arc;

use super::{prompt_error, require_terminal};
use crate::App;

const METHODS: [LoginMethod; 2] = [LoginMethod::Phone, LoginMethod::Email];

pub async fn run(app: &App) -> Result<()> {
    require_terminal("login")?;
    let theme = ColorfulTheme::default();
    let locale = &app.locale;
    let auth = &app.config.auth;

    let issuer = match &auth.fixed_otp {
        Some(code) => DemoOtpIssuer::fixed(code.clone()),
        None => DemoOtpIssuer::random(auth.otp_length),
    };
    let mut login = LoginController::new(
        auth.clone(),
        locale.clone(),
        Arc::new(InMemoryUserStore::new()),
        Arc::new(DemoCredentialPolicy::embedded()?),
        Arc::new(issuer),
    );

    println!("{}", locale.t("auth.welcome").bright_cyan().bold());

    let roles: Vec<String> = Role::ALL.iter().map(|r| locale.t(r.label_key())).collect();
    let role = Select::with_theme(&theme)
        .items(&roles)
        .default(0)
        .interact()
        .map_err(prompt_error)?;
    login.select_role(Role::ALL[role]);

    let methods: Vec<String> = METHODS.iter().map(|m| locale.t(m.label_key())).collect();
    let method = Select::with_theme(&theme)
        .items(&methods)
        .default(0)
        .interact()
        .map_err(prompt_error)?;
    login.select_method(METHODS[method]);

    loop {
        let user = match login.method() {
            LoginMethod::Phone => phone_login(&mut login, locale, &theme).await?,
            LoginMethod::Email => email_login(&mut login, locale, &theme).await?,
        };
        if let Some(user) = user {
            print_user(&user, &login, locale);
            return Ok(());
        }
    }
}

fn show_status(login: &LoginController) {
    if let Some(message) = login.message() {
        println!("{}", message.yellow());
    }
}

async fn phone_login(
    login: &mut LoginController,
    locale: &LocaleContext,
    theme: &ColorfulTheme,
) -> Result<Option<AuthenticatedUser>> {
    let phone: String = Input::with_theme(theme)
        .with_prompt(locale.t("auth.phone"))
        .interact_text()
        .map_err(prompt_error)?;
    login.set_phone(&phone);

    match login.send_otp().await {
        Ok(LoginOutcome::Authenticated(user)) => return Ok(Some(user)),
        Ok(_) => println!("{}", login.message().unwrap_or_default().bright_blue()),
        Err(_) => {
            show_status(login);
            return Ok(None);
        }
    }

    loop {
        let otp: String = Input::with_theme(theme)
            .with_prompt(locale.t("auth.otp"))
            .interact_text()
            .map_err(prompt_error)?;
        login.set_otp(&otp);

        match login.verify_otp().await {
            Ok(LoginOutcome::Authenticated(user)) => return Ok(Some(user)),
            Ok(_) => return Ok(None),
            Err(IdentityError::InvalidOtp | IdentityError::IncompleteOtp) => show_status(login),
            Err(_) => {
                show_status(login);
                return Ok(None);
            }
        }
    }
}

async fn email_login(
    login: &mut LoginController,
    locale: &LocaleContext,
    theme: &ColorfulTheme,
) -> Result<Option<AuthenticatedUser>> {
    let email: String = Input::with_theme(theme)
        .with_prompt(locale.t("auth.email"))
        .interact_text()
        .map_err(prompt_error)?;
    let password = Password::with_theme(theme)
        .with_prompt(locale.t("auth.password"))
        .interact()
        .map_err(prompt_error)?;
    login.set_email(&email);
    login.set_password(&password);

    match login.login_email().await {
        Ok(LoginOutcome::Authenticated(user)) => Ok(Some(user)),
        Ok(_) => Ok(None),
        Err(_) => {
            show_status(login);
            Ok(None)
        }
    }
}

fn print_user(user: &AuthenticatedUser, login: &LoginController, locale: &LocaleContext) {
    if let Some(message) = login.message() {
        println!("{}", message.bright_green().bold());
    }
    println!("  {} ({})", user.name.bold(), locale.t(user.role.label_key()));
    let contact = user.phone.as_deref().or(user.email.as_deref()).unwrap_or("-");
    println!("  {} {}", locale.t(user.login_method.label_key()).dimmed(), contact);
    println!("  session {}", user.session_id.to_string().dimmed());
}
