use crate::cli::parse_start_note;
use anyhow::{anyhow, bail, Result};
use intervallo_core::Command;
use intervallo_domain_theory::{Language, Pitch};
use intervallo_ports::settings::DirectionPolicy;

#[derive(Debug)]
pub enum Input {
    Command(Command),
    Status,
    Help,
    Quit,
}

pub const HELP: &str = "\
  p            play the interval
  <n> | i <n>  guess the interval by semitones (0 2 4 5 7 9 11 12)
  k <pitch>    guess the target key, e.g. k G4
  n            skip to a new question
  t <n>        toggle an interval        a   toggle all intervals
  o <octave>   toggle an octave (2-5)    d   asc | desc | both
  start <note> fixed start note or random
  lang <anglo|italian>   kb <on|off>   hl <on|off>
  s            status      h  help      q  quit";

/// Parses one line of user input. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Input>> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();

    let input = match head.to_ascii_lowercase().as_str() {
        "p" | "play" => Input::Command(Command::RequestPlay),
        "n" | "next" => Input::Command(Command::NextQuestion),
        "s" | "status" => Input::Status,
        "h" | "help" | "?" => Input::Help,
        "q" | "quit" | "exit" => Input::Quit,
        "a" => Input::Command(Command::ToggleAllIntervals),
        "i" => Input::Command(Command::SubmitIntervalGuess {
            semitones: required(arg)?.parse()?,
        }),
        "k" | "key" => Input::Command(Command::SubmitPitchGuess {
            pitch: required(arg)?.parse::<Pitch>()?,
        }),
        "t" => Input::Command(Command::ToggleInterval {
            semitones: required(arg)?.parse()?,
        }),
        "o" => Input::Command(Command::ToggleOctave {
            octave: required(arg)?.parse()?,
        }),
        "d" => Input::Command(Command::SetDirection {
            direction: match required(arg)?.to_ascii_lowercase().as_str() {
                "asc" | "ascending" => DirectionPolicy::Ascending,
                "desc" | "descending" => DirectionPolicy::Descending,
                "both" => DirectionPolicy::Both,
                other => bail!("unknown direction: {other}"),
            },
        }),
        "start" => Input::Command(Command::SetStartNote {
            start_note: parse_start_note(required(arg)?)?,
        }),
        "lang" => Input::Command(Command::SetLanguage {
            language: match required(arg)?.to_ascii_lowercase().as_str() {
                "anglo" | "en" => Language::Anglo,
                "italian" | "it" => Language::Italian,
                other => bail!("unknown language: {other}"),
            },
        }),
        "kb" => Input::Command(Command::SetKeyboardMode {
            enabled: switch(required(arg)?)?,
        }),
        "hl" => Input::Command(Command::SetHighlightStart {
            enabled: switch(required(arg)?)?,
        }),
        other => match other.parse::<u8>() {
            Ok(semitones) => Input::Command(Command::SubmitIntervalGuess { semitones }),
            Err(_) => bail!("unknown input: {other} (h for help)"),
        },
    };
    Ok(Some(input))
}

fn required(arg: Option<&str>) -> Result<&str> {
    arg.ok_or_else(|| anyhow!("missing argument"))
}

fn switch(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "yes" | "1" => Ok(true),
        "off" | "no" | "0" => Ok(false),
        other => bail!("expected on or off, got {other}"),
    }
}
