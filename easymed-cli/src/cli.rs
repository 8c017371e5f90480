use clap::{Parser, Subcommand};
use locale_context::Locale;
use std::path::PathBuf;

/// EasyMed assistant in the terminal
#[derive(Parser, Debug)]
#[command(name = "easymed")]
#[command(about = "Multilingual telehealth assistant: voice triage, symptom checker and demo login")]
#[command(version)]
pub struct Cli {
    /// UI and speech language (en, hi, ta, te, bn, kn)
    #[arg(short, long, global = true, env = "EASYMED_LOCALE")]
    pub locale: Option<Locale>,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Print a translated string
    Translate {
        key: String,
        /// Show the string in every supported language
        #[arg(long)]
        all: bool,
    },

    /// Match a spoken command and print the response
    Command { transcript: String },

    /// Classify a transcript and preview the spoken reply
    Triage {
        transcript: String,
        /// Also print the synthesis markup
        #[arg(long)]
        ssml: bool,
    },

    /// Run one listen-understand-speak cycle over WAV files
    Talk {
        /// 16-bit mono WAV recording used as the microphone
        #[arg(short, long)]
        input: PathBuf,
        /// Directory the spoken replies are written to
        #[arg(short, long, default_value = "replies")]
        output_dir: PathBuf,
    },

    /// Interactive symptom checker
    Symptoms,

    /// Interactive login
    Login,
}
