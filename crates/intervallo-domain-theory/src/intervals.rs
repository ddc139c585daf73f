use crate::pitch::Language;
use serde::Serialize;

/// A catalog interval: unsigned semitone distance and its display names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Interval {
    pub semitones: u8,
    pub anglo: &'static str,
    pub italian: &'static str,
}

impl Interval {
    pub fn display_name(&self, language: Language) -> &'static str {
        match language {
            Language::Anglo => self.anglo,
            Language::Italian => self.italian,
        }
    }
}

pub const CATALOG_SEMITONES: [u8; 8] = [0, 2, 4, 5, 7, 9, 11, 12];

static INTERVALS: [Interval; 8] = [
    Interval {
        semitones: 0,
        anglo: "Unison",
        italian: "Prima Giusta",
    },
    Interval {
        semitones: 2,
        anglo: "Major 2nd",
        italian: "Seconda Maggiore",
    },
    Interval {
        semitones: 4,
        anglo: "Major 3rd",
        italian: "Terza Maggiore",
    },
    Interval {
        semitones: 5,
        anglo: "Perfect 4th",
        italian: "Quarta Giusta",
    },
    Interval {
        semitones: 7,
        anglo: "Perfect 5th",
        italian: "Quinta Giusta",
    },
    Interval {
        semitones: 9,
        anglo: "Major 6th",
        italian: "Sesta Maggiore",
    },
    Interval {
        semitones: 11,
        anglo: "Major 7th",
        italian: "Settima Maggiore",
    },
    Interval {
        semitones: 12,
        anglo: "Octave",
        italian: "Ottava",
    },
];

/// Diatonic major-scale distances from unison to octave, in ascending order.
pub fn all_intervals() -> &'static [Interval] {
    &INTERVALS
}

pub fn interval_by_semitones(semitones: u8) -> Option<&'static Interval> {
    INTERVALS.iter().find(|interval| interval.semitones == semitones)
}
