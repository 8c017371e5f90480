//! Non-interactive commands working on a typed transcript

use anyhow::Result;
use colored::*;
use error_common::EasyMedError;
use locale_context::Locale;
use voice_assistant::{build_ssml, voice_for, CommandAssistant, KeywordTriage, UnderstandingPolicy, UrgencyTone};

use crate::App;

pub fn translate(app: &App, key: &str, all: bool) -> Result<()> {
    if !all {
        println!("{}", app.locale.t(key));
        return Ok(());
    }
    for locale in Locale::ALL {
        println!(
            "{:<3} {:<10} {}",
            locale.code().bright_cyan(),
            locale.english_name(),
            app.locale.t_in(locale, key)
        );
    }
    Ok(())
}

pub fn command(app: &App, transcript: &str) -> Result<()> {
    let assistant = CommandAssistant::new(app.locale.clone(), app.config.voice.continuous_commands);
    let response = assistant.handle_transcript(transcript);

    println!("{} {}", "intent:".bold(), response.intent.to_string().bright_yellow());
    println!("{} {}", "reply: ".bold(), response.reply);
    Ok(())
}

pub async fn triage(app: &App, transcript: &str, show_ssml: bool) -> Result<()> {
    let policy = KeywordTriage::new(app.locale.clone());
    let speech_tag = app.locale.speech_tag();
    let reply = policy
        .understand(transcript, speech_tag)
        .await
        .map_err(EasyMedError::from)?;

    let tone = reply.tone.unwrap_or(app.config.voice.default_tone);
    let voice = voice_for(speech_tag, tone);
    let tone_label = match tone {
        UrgencyTone::Emergency => tone.to_string().bright_red().bold(),
        UrgencyTone::Normal => tone.to_string().bright_green(),
    };

    println!("{} {}", "tone: ".bold(), tone_label);
    println!("{} {}", "voice:".bold(), voice);
    println!("{} {}", "reply:".bold(), reply.text);
    if show_ssml {
        println!();
        println!("{}", build_ssml(speech_tag, voice, tone, &reply.text));
    }
    Ok(())
}
