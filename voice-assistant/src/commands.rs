//! Fixed-vocabulary command assistant
//!
//! Matches transcripts against the locale bundle's intent phrases
//! (start / next / back / help) and answers with the localized response.
//! Unlike [`crate::flow::VoiceAssistant`] it listens continuously until stopped.

use locale_context::LocaleContext;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::VoiceResult;
use crate::speech::{Recognition, SpeechRecognizer, SpeechSynthesizer};
use crate::ssml::build_ssml;
use crate::voices::{voice_for, UrgencyTone};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandIntent {
    Start,
    Next,
    Back,
    Help,
    NotUnderstood,
}

impl CommandIntent {
    /// Intents in matching priority order
    pub const MATCHABLE: [CommandIntent; 4] = [
        CommandIntent::Start,
        CommandIntent::Next,
        CommandIntent::Back,
        CommandIntent::Help,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CommandIntent::Start => "start",
            CommandIntent::Next => "next",
            CommandIntent::Back => "back",
            CommandIntent::Help => "help",
            CommandIntent::NotUnderstood => "not_understood",
        }
    }

    fn response_key(self) -> &'static str {
        match self {
            CommandIntent::Start => "command.starting",
            CommandIntent::Next => "command.next",
            CommandIntent::Back => "command.back",
            CommandIntent::Help => "command.help",
            CommandIntent::NotUnderstood => "command.not_understood",
        }
    }
}

impl fmt::Display for CommandIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResponse {
    pub intent: CommandIntent,
    pub reply: String,
    /// Listen again after the reply has been spoken
    pub rearm: bool,
}

pub type CommandCallback = Arc<dyn Fn(CommandIntent) + Send + Sync>;

pub struct CommandAssistant {
    locale: LocaleContext,
    continuous: bool,
    on_command: Option<CommandCallback>,
    active: watch::Sender<bool>,
}

impl CommandAssistant {
    pub fn new(locale: LocaleContext, continuous: bool) -> Self {
        let (active, _) = watch::channel(false);
        Self {
            locale,
            continuous,
            on_command: None,
            active,
        }
    }

    pub fn with_on_command(mut self, callback: CommandCallback) -> Self {
        self.on_command = Some(callback);
        self
    }

    pub fn is_active(&self) -> bool {
        *self.active.borrow()
    }

    /// Turns the assistant on and returns the welcome text to speak
    pub fn activate(&self) -> String {
        self.active.send_replace(true);
        self.locale.t("command.welcome")
    }

    /// Stops a running [`CommandAssistant::run`] loop
    pub fn deactivate(&self) {
        self.active.send_replace(false);
    }

    /// Flips the active state. Returns the welcome text when switching on.
    pub fn toggle(&self) -> Option<String> {
        if self.is_active() {
            self.deactivate();
            None
        } else {
            Some(self.activate())
        }
    }

    /// First intent whose trigger phrase appears in the transcript
    pub fn match_intent(&self, transcript: &str) -> CommandIntent {
        let heard = transcript.trim().to_lowercase();
        CommandIntent::MATCHABLE
            .into_iter()
            .find(|intent| {
                self.locale
                    .intent_phrases(intent.name())
                    .iter()
                    .any(|phrase| heard.contains(&phrase.to_lowercase()))
            })
            .unwrap_or(CommandIntent::NotUnderstood)
    }

    pub fn handle_transcript(&self, transcript: &str) -> CommandResponse {
        let intent = self.match_intent(transcript);
        debug!(intent = %intent, "Voice command matched");
        if intent != CommandIntent::NotUnderstood {
            if let Some(callback) = &self.on_command {
                callback(intent);
            }
        }
        CommandResponse {
            intent,
            reply: self.locale.t(intent.response_key()),
            rearm: self.continuous,
        }
    }

    async fn say(&self, synthesizer: &mut dyn SpeechSynthesizer, text: &str) -> VoiceResult<()> {
        let speech_tag = self.locale.speech_tag();
        let voice = voice_for(speech_tag, UrgencyTone::Normal);
        synthesizer
            .speak_ssml(&build_ssml(speech_tag, voice, UrgencyTone::Normal, text))
            .await
    }

    /// Speaks the welcome, then listens and answers until deactivated or until
    /// a reply does not re-arm listening. A recognition error speaks the error
    /// response and ends the loop.
    pub async fn run(
        &self,
        recognizer: &mut dyn SpeechRecognizer,
        synthesizer: &mut dyn SpeechSynthesizer,
    ) -> VoiceResult<Vec<CommandResponse>> {
        let welcome = self.activate();
        let mut stop = self.active.subscribe();
        self.say(synthesizer, &welcome).await?;
        info!(locale = %self.locale.current(), "Command assistant listening");

        let mut handled = Vec::new();
        while self.is_active() {
            let recognition = tokio::select! {
                changed = stop.changed() => {
                    if changed.is_err() || !*stop.borrow_and_update() {
                        break;
                    }
                    continue;
                }
                recognition = recognizer.recognize_once() => recognition,
            };

            match recognition {
                Ok(Recognition::Recognized(transcript)) => {
                    let response = self.handle_transcript(&transcript);
                    self.say(synthesizer, &response.reply).await?;
                    let rearm = response.rearm;
                    handled.push(response);
                    if !rearm {
                        break;
                    }
                }
                Ok(Recognition::NoMatch) => continue,
                Err(err) => {
                    warn!(error = %err, "Command recognition failed");
                    if let Err(e) = self.say(synthesizer, &self.locale.t("command.error")).await {
                        warn!(error = %e, "Failed to speak error response");
                    }
                    self.deactivate();
                    return Err(err);
                }
            }
        }

        self.deactivate();
        Ok(handled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use locale_context::Locale;
    use parking_lot::Mutex;

    fn assistant() -> CommandAssistant {
        CommandAssistant::new(LocaleContext::embedded().unwrap(), true)
    }

    #[test]
    fn matches_english_phrases() {
        let assistant = assistant();
        assert_eq!(assistant.match_intent("Please START CONSULTATION"), CommandIntent::Start);
        assert_eq!(assistant.match_intent("let's proceed"), CommandIntent::Next);
        assert_eq!(assistant.match_intent("go to the previous page"), CommandIntent::Back);
        assert_eq!(assistant.match_intent("what can you do"), CommandIntent::Help);
        assert_eq!(assistant.match_intent("order a pizza"), CommandIntent::NotUnderstood);
    }

    #[test]
    fn matches_phrases_of_the_active_locale() {
        let assistant = assistant();
        assistant.locale.set_locale(Locale::Hindi);
        let response = assistant.handle_transcript("कृपया परामर्श शुरू करें");
        assert_eq!(response.intent, CommandIntent::Start);
        assert_eq!(response.reply, "आपका परामर्श बुकिंग शुरू कर रहा हूं।");
    }

    #[test]
    fn callback_receives_understood_intents_only() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let assistant = assistant().with_on_command(Arc::new(move |intent: CommandIntent| sink.lock().push(intent)));

        assistant.handle_transcript("next");
        assistant.handle_transcript("gibberish");
        assert_eq!(*seen.lock(), vec![CommandIntent::Next]);
    }

    #[test]
    fn toggle_returns_welcome_when_switching_on() {
        let assistant = assistant();
        let welcome = assistant.toggle().unwrap();
        assert!(welcome.contains("start consultation"));
        assert!(assistant.is_active());
        assert_eq!(assistant.toggle(), None);
        assert!(!assistant.is_active());
    }
}
