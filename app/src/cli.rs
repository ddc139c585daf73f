use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use intervallo_domain_theory::{Language, NoteName};
use intervallo_ports::settings::{DirectionPolicy, QuizSettings, StartNote};
use std::fs;
use std::path::PathBuf;

/// Interval ear-training in the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JSON settings file used as the starting point (never written back)
    #[arg(long)]
    pub settings: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub language: Option<LanguageArg>,

    /// Enabled intervals in semitones, e.g. 0,4,7
    #[arg(long, value_delimiter = ',')]
    pub intervals: Option<Vec<u8>>,

    /// Fixed start note (C, C#, ...) or "random"
    #[arg(long)]
    pub start_note: Option<String>,

    /// Octaves to draw questions from, e.g. 3,4
    #[arg(long, value_delimiter = ',')]
    pub octaves: Option<Vec<i32>>,

    #[arg(long, value_enum)]
    pub direction: Option<DirectionArg>,

    /// Answer on the keyboard instead of by interval name
    #[arg(long)]
    pub keyboard: bool,

    #[arg(long)]
    pub no_highlight_start: bool,

    /// Seed for reproducible question sequences
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print core events as JSON lines
    #[arg(long)]
    pub json: bool,

    /// Ring the terminal bell on wrong answers
    #[arg(long)]
    pub bell: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LanguageArg {
    Anglo,
    Italian,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum DirectionArg {
    Ascending,
    Descending,
    Both,
}

impl From<LanguageArg> for Language {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::Anglo => Language::Anglo,
            LanguageArg::Italian => Language::Italian,
        }
    }
}

impl From<DirectionArg> for DirectionPolicy {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Ascending => DirectionPolicy::Ascending,
            DirectionArg::Descending => DirectionPolicy::Descending,
            DirectionArg::Both => DirectionPolicy::Both,
        }
    }
}

pub fn parse_start_note(value: &str) -> Result<StartNote> {
    if value.trim().eq_ignore_ascii_case("random") {
        return Ok(StartNote::Random);
    }
    let name = value.parse::<NoteName>()?;
    Ok(StartNote::Fixed(name))
}

impl Cli {
    pub fn quiz_settings(&self) -> Result<QuizSettings> {
        let mut settings = match self.settings.as_ref() {
            Some(path) => {
                let data = fs::read(path)
                    .with_context(|| format!("reading settings from {}", path.display()))?;
                serde_json::from_slice(&data)
                    .with_context(|| format!("parsing settings from {}", path.display()))?
            }
            None => QuizSettings::default(),
        };

        if let Some(language) = self.language {
            settings.language = language.into();
        }
        if let Some(intervals) = self.intervals.as_ref() {
            settings.enabled_intervals = intervals.iter().copied().collect();
        }
        if let Some(start_note) = self.start_note.as_deref() {
            settings.start_note = parse_start_note(start_note)?;
        }
        if let Some(octaves) = self.octaves.as_ref() {
            settings.octaves = octaves.iter().copied().collect();
        }
        if let Some(direction) = self.direction {
            settings.direction = direction.into();
        }
        if self.keyboard {
            settings.keyboard_mode = true;
        }
        if self.no_highlight_start {
            settings.highlight_start = false;
        }

        settings.validate()?;
        Ok(settings)
    }
}
