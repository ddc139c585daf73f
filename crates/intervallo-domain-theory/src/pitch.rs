use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

pub const SEMITONES_PER_OCTAVE: i32 = 12;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Anglo,
    #[default]
    Italian,
}

/// One of the 12 chromatic letter classes, in ascending order from C.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NoteName {
    C,
    #[serde(rename = "C#")]
    Cs,
    D,
    #[serde(rename = "D#")]
    Ds,
    E,
    F,
    #[serde(rename = "F#")]
    Fs,
    G,
    #[serde(rename = "G#")]
    Gs,
    A,
    #[serde(rename = "A#")]
    As,
    B,
}

impl NoteName {
    pub const ALL: [NoteName; 12] = [
        NoteName::C,
        NoteName::Cs,
        NoteName::D,
        NoteName::Ds,
        NoteName::E,
        NoteName::F,
        NoteName::Fs,
        NoteName::G,
        NoteName::Gs,
        NoteName::A,
        NoteName::As,
        NoteName::B,
    ];

    pub fn index(self) -> i32 {
        self as i32
    }

    /// Floor-mod lookup: `from_index(-1)` is B, `from_index(12)` is C.
    pub fn from_index(index: i32) -> Self {
        Self::ALL[index.rem_euclid(SEMITONES_PER_OCTAVE) as usize]
    }

    pub fn is_sharp(self) -> bool {
        matches!(
            self,
            NoteName::Cs | NoteName::Ds | NoteName::Fs | NoteName::Gs | NoteName::As
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NoteName::C => "C",
            NoteName::Cs => "C#",
            NoteName::D => "D",
            NoteName::Ds => "D#",
            NoteName::E => "E",
            NoteName::F => "F",
            NoteName::Fs => "F#",
            NoteName::G => "G",
            NoteName::Gs => "G#",
            NoteName::A => "A",
            NoteName::As => "A#",
            NoteName::B => "B",
        }
    }

    pub fn display_name(self, language: Language) -> &'static str {
        match language {
            Language::Anglo => self.as_str(),
            Language::Italian => match self {
                NoteName::C => "Do",
                NoteName::Cs => "Do#",
                NoteName::D => "Re",
                NoteName::Ds => "Re#",
                NoteName::E => "Mi",
                NoteName::F => "Fa",
                NoteName::Fs => "Fa#",
                NoteName::G => "Sol",
                NoteName::Gs => "Sol#",
                NoteName::A => "La",
                NoteName::As => "La#",
                NoteName::B => "Si",
            },
        }
    }
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PitchParseError {
    #[error("empty pitch")]
    Empty,
    #[error("unknown note name: {0}")]
    UnknownNote(String),
    #[error("invalid octave: {0}")]
    InvalidOctave(String),
}

impl FromStr for NoteName {
    type Err = PitchParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PitchParseError::Empty);
        }
        NoteName::ALL
            .iter()
            .copied()
            .find(|name| name.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| PitchParseError::UnknownNote(s.to_string()))
    }
}

/// A named pitch: letter class plus octave register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pitch {
    pub name: NoteName,
    pub octave: i32,
}

impl Pitch {
    pub const fn new(name: NoteName, octave: i32) -> Self {
        Self { name, octave }
    }

    pub fn absolute_index(self) -> i32 {
        self.octave * SEMITONES_PER_OCTAVE + self.name.index()
    }

    pub fn from_absolute_index(index: i32) -> Self {
        Self {
            name: NoteName::from_index(index),
            octave: index.div_euclid(SEMITONES_PER_OCTAVE),
        }
    }

    /// Moves the pitch by a signed semitone count, carrying or borrowing octaves.
    pub fn shift(self, semitones: i32) -> Self {
        let raw = self.name.index() + semitones;
        Self {
            name: NoteName::from_index(raw),
            octave: self.octave + raw.div_euclid(SEMITONES_PER_OCTAVE),
        }
    }

    pub fn display_name(self, language: Language) -> String {
        format!("{}{}", self.name.display_name(language), self.octave)
    }
}

impl Ord for Pitch {
    fn cmp(&self, other: &Self) -> Ordering {
        self.absolute_index().cmp(&other.absolute_index())
    }
}

impl PartialOrd for Pitch {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.octave)
    }
}

impl FromStr for Pitch {
    type Err = PitchParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PitchParseError::Empty);
        }
        let split = s
            .find(|c: char| c.is_ascii_digit() || c == '-')
            .ok_or_else(|| PitchParseError::InvalidOctave(s.to_string()))?;
        let (name, octave) = s.split_at(split);
        let name = name.parse::<NoteName>()?;
        let octave = octave
            .parse::<i32>()
            .map_err(|_| PitchParseError::InvalidOctave(octave.to_string()))?;
        Ok(Self { name, octave })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    pub fn sign(self) -> i32 {
        match self {
            Direction::Ascending => 1,
            Direction::Descending => -1,
        }
    }

    pub fn signed(self, semitones: u8) -> i32 {
        self.sign() * i32::from(semitones)
    }
}
