use intervallo_core::{Event, GameState, QuizView, Unavailable};
use intervallo_domain_theory::{
    interval_by_semitones, keyboard_pitches, Language, DEFAULT_KEYBOARD_OCTAVES,
};
use intervallo_ports::settings::QuizSettings;

fn interval_name(semitones: u8, language: Language) -> String {
    interval_by_semitones(semitones)
        .map(|interval| interval.display_name(language).to_string())
        .unwrap_or_else(|| format!("{semitones} semitones"))
}

fn unavailable_message(reason: Unavailable) -> &'static str {
    match reason {
        Unavailable::EmptySelection => "no intervals selected, enable at least one (t <n> or a)",
        Unavailable::NoValidQuestion => {
            "no question fits the selected octaves, intervals and direction"
        }
    }
}

/// Text for one core event, or `None` when the event needs no line of its own.
pub fn event_line(event: &Event, language: Language) -> Option<String> {
    let line = match event {
        Event::QuestionChanged { start } => {
            format!("new question, start note {}", start.display_name(language))
        }
        Event::QuestionUnavailable { reason } => unavailable_message(*reason).to_string(),
        Event::GameStateUpdated { state } => match state {
            GameState::Success => "correct!".to_string(),
            GameState::Error => "wrong, try again".to_string(),
            GameState::Waiting => return None,
        },
        Event::WrongIntervalFlagged { semitones } => {
            let semitones = (*semitones)?;
            format!("not {}", interval_name(semitones, language))
        }
        Event::PlaybackUpdated { .. } => return None,
        Event::AnswerRevealed { target, semitones } => format!(
            "it was {} ({})",
            interval_name(*semitones, language),
            target.display_name(language)
        ),
        Event::SettingsUpdated { settings } => settings_line(settings),
        Event::AudioUnavailable { message } => format!("audio unavailable: {message}"),
    };
    Some(line)
}

pub fn settings_line(settings: &QuizSettings) -> String {
    let intervals: Vec<String> = settings
        .enabled_intervals
        .iter()
        .map(|semitones| semitones.to_string())
        .collect();
    let octaves: Vec<String> = settings.octaves.iter().map(|o| o.to_string()).collect();
    format!(
        "settings: intervals [{}] octaves [{}] start {:?} direction {:?} keyboard {} highlight {}",
        intervals.join(" "),
        octaves.join(" "),
        settings.start_note,
        settings.direction,
        if settings.keyboard_mode { "on" } else { "off" },
        if settings.highlight_start { "on" } else { "off" },
    )
}

/// Multi-line status: game state, answer choices and the keyboard with highlights.
pub fn status(view: &QuizView, settings: &QuizSettings) -> String {
    let language = settings.language;
    let mut lines = Vec::new();

    match (view.start, view.unavailable) {
        (_, Some(reason)) => lines.push(unavailable_message(reason).to_string()),
        (Some(start), None) => lines.push(format!(
            "state {:?}, start {}{}",
            view.game_state,
            start.display_name(language),
            if view.sounding { ", playing" } else { "" }
        )),
        (None, None) => lines.push("no question yet".to_string()),
    }

    if let Some(target) = view.revealed_target {
        lines.push(format!("answer {}", target.display_name(language)));
    }

    if !settings.keyboard_mode {
        let choices: Vec<String> = view
            .answer_choices
            .iter()
            .map(|&semitones| {
                let mark = if view.wrong_interval == Some(semitones) {
                    "✗"
                } else {
                    ""
                };
                format!("[{semitones}] {}{mark}", interval_name(semitones, language))
            })
            .collect();
        lines.push(choices.join("  "));
    }

    let keys: Vec<String> = keyboard_pitches(DEFAULT_KEYBOARD_OCTAVES)
        .into_iter()
        .map(|pitch| {
            if view.highlights.contains(&pitch) {
                format!("*{pitch}*")
            } else {
                pitch.to_string()
            }
        })
        .collect();
    lines.push(keys.join(" "));

    lines.join("\n")
}
