//! EasyMed terminal front-end
//!
//! Wires configuration, logging and the shared locale context together and
//! dispatches the subcommands defined in [`cli`].

pub mod cli;
pub mod commands;
pub mod config;

use anyhow::{Context, Result};
use locale_context::{Locale, LocaleContext, ResourceBundle};
use std::sync::Arc;

pub use cli::{Cli, Command};
pub use config::AppConfig;

/// Everything a subcommand needs
pub struct App {
    pub config: AppConfig,
    pub locale: LocaleContext,
}

impl App {
    /// `locale` wins over the configured language when given
    pub fn new(config: AppConfig, locale: Option<Locale>) -> Result<Self> {
        let bundle = match &config.resources_dir {
            Some(dir) => ResourceBundle::with_overrides(dir)
                .with_context(|| format!("failed to load translations from {}", dir.display()))?,
            None => ResourceBundle::embedded().context("failed to load built-in translations")?,
        };
        let active = locale.unwrap_or(config.locale);
        Ok(Self {
            locale: LocaleContext::new(Arc::new(bundle), active),
            config,
        })
    }

    pub async fn run(&self, command: Command) -> Result<()> {
        match command {
            Command::Translate { key, all } => commands::text::translate(self, &key, all),
            Command::Command { transcript } => commands::text::command(self, &transcript),
            Command::Triage { transcript, ssml } => commands::text::triage(self, &transcript, ssml).await,
            Command::Talk { input, output_dir } => commands::talk::run(self, &input, &output_dir).await,
            Command::Symptoms => commands::symptoms::run(self).await,
            Command::Login => commands::login::run(self).await,
        }
    }
}
