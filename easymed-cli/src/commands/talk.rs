use anyhow::Result;
use colored::*;
use error_common::EasyMedError;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use voice_assistant::{
    create_backend, CycleOutcome, HttpCredentialProvider, KeywordTriage, UrgencyTone, VoiceAssistant,
    VoiceServices, WavDevices, STATUS_NO_MATCH,
};

use crate::App;

/// One listen-understand-speak cycle with `input` standing in for the microphone
pub async fn run(app: &App, input: &Path, output_dir: &Path) -> Result<()> {
    let mut config = app.config.voice.clone();
    config.locale = app.locale.current();

    let services = VoiceServices {
        credentials: Arc::new(HttpCredentialProvider::new(config.token_endpoint.clone())),
        devices: Arc::new(WavDevices::new(input, output_dir)),
        backend: Arc::from(create_backend(&config)),
        policy: Arc::new(KeywordTriage::new(app.locale.clone())),
    };
    let assistant = VoiceAssistant::new(config, app.locale.clone(), services);
    info!(input = %input.display(), locale = %app.locale.current(), "Starting voice cycle");

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner:.cyan} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(80));

    let mut updates = assistant.subscribe();
    let progress = spinner.clone();
    let watcher = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let status = updates.borrow_and_update().status.clone();
            if let Some(status) = status {
                progress.set_message(status);
            }
        }
    });

    let outcome = assistant.start_listening().await;
    watcher.abort();
    spinner.finish_and_clear();
    assistant.dispose().await;

    let turn = match outcome.map_err(EasyMedError::from)? {
        CycleOutcome::NoMatch => {
            println!("{}", STATUS_NO_MATCH.yellow());
            return Ok(());
        }
        CycleOutcome::Completed(turn) => turn,
    };

    let tone = match turn.tone {
        UrgencyTone::Emergency => turn.tone.to_string().bright_red().bold(),
        UrgencyTone::Normal => turn.tone.to_string().bright_green(),
    };
    println!("{} {}", "you said:".bold(), turn.transcript);
    println!("{} {}", "reply:   ".bold(), turn.reply);
    println!("{} {} ({})", "voice:   ".bold(), turn.voice, tone);
    if turn.spoken {
        println!("{} {}", "saved to:".bold(), output_dir.display().to_string().bright_cyan());
    } else if let Some(status) = assistant.snapshot().status {
        println!("{}", status.dimmed());
    }
    Ok(())
}
