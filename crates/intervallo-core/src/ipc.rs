use intervallo_domain_theory::{Language, Pitch};
use intervallo_ports::settings::{DirectionPolicy, QuizSettings, StartNote};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Command {
    RequestPlay,
    SubmitIntervalGuess { semitones: u8 },
    SubmitPitchGuess { pitch: Pitch },
    NextQuestion,
    UpdateSettings { settings: QuizSettings },
    ToggleInterval { semitones: u8 },
    ToggleAllIntervals,
    ToggleOctave { octave: i32 },
    SetStartNote { start_note: StartNote },
    SetDirection { direction: DirectionPolicy },
    SetLanguage { language: Language },
    SetKeyboardMode { enabled: bool },
    SetHighlightStart { enabled: bool },
}

impl Command {
    /// Commands that count as a user gesture for unlocking audio.
    pub fn is_interaction(&self) -> bool {
        matches!(
            self,
            Command::RequestPlay
                | Command::SubmitIntervalGuess { .. }
                | Command::SubmitPitchGuess { .. }
                | Command::NextQuestion
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Waiting,
    Success,
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unavailable {
    EmptySelection,
    NoValidQuestion,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Event {
    QuestionChanged { start: Pitch },
    QuestionUnavailable { reason: Unavailable },
    GameStateUpdated { state: GameState },
    WrongIntervalFlagged { semitones: Option<u8> },
    PlaybackUpdated { sounding: bool },
    AnswerRevealed { target: Pitch, semitones: u8 },
    SettingsUpdated { settings: QuizSettings },
    AudioUnavailable { message: String },
}

/// Snapshot of everything the UI renders.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuizView {
    pub game_state: GameState,
    pub start: Option<Pitch>,
    pub revealed_target: Option<Pitch>,
    pub wrong_interval: Option<u8>,
    pub sounding: bool,
    pub answer_choices: Vec<u8>,
    pub highlights: Vec<Pitch>,
    pub unavailable: Option<Unavailable>,
}
