use clap::Parser;
use colored::*;
use error_common::EasyMedError;
use logger_redacted::init_tracing;
use tracing::{debug, error};

use easymed_cli::{App, AppConfig, Cli};

#[tokio::main]
async fn main() {
    // A missing .env is fine
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        error!("{:#}", err);
        // Provider failures carry raw details; show the user-facing text only.
        let message = match err.downcast_ref::<EasyMedError>() {
            Some(easymed) => easymed.user_message(),
            None => format!("{:#}", err),
        };
        eprintln!("{} {}", "error:".bright_red().bold(), message);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?;

    let mut logging = config.logging.clone().verbose(cli.verbose);
    if cli.json_logs {
        logging.json = true;
    }
    init_tracing(&logging)?;
    debug!(locale = ?cli.locale, "Configuration loaded");

    let app = App::new(config, cli.locale)?;
    app.run(cli.command).await
}
