use intervallo_domain_theory::{interval_by_semitones, Direction, Interval, NoteName, Pitch};
use intervallo_ports::settings::{DirectionPolicy, QuizSettings, StartNote};
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Question {
    pub start: Pitch,
    pub interval: Interval,
    pub direction: Direction,
}

impl Question {
    pub fn new(start: Pitch, interval: Interval, direction: Direction) -> Self {
        Self {
            start,
            interval,
            direction,
        }
    }

    pub fn signed_semitones(&self) -> i32 {
        self.direction.signed(self.interval.semitones)
    }

    pub fn target(&self) -> Pitch {
        self.start.shift(self.signed_semitones())
    }
}

/// Inputs to question generation, derived from the user's settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionConstraints {
    pub enabled_semitones: BTreeSet<u8>,
    pub start: StartNote,
    pub octaves: BTreeSet<i32>,
    pub direction: DirectionPolicy,
}

impl From<&QuizSettings> for QuestionConstraints {
    fn from(settings: &QuizSettings) -> Self {
        Self {
            enabled_semitones: settings.enabled_intervals.clone(),
            start: settings.start_note,
            octaves: settings.octaves.clone(),
            direction: settings.direction,
        }
    }
}

impl QuestionConstraints {
    /// Enabled intervals that exist in the catalog, in catalog order.
    pub fn enabled_intervals(&self) -> Vec<Interval> {
        self.enabled_semitones
            .iter()
            .filter_map(|&semitones| interval_by_semitones(semitones).copied())
            .collect()
    }

    /// Absolute-index window from C of the lowest octave to B of the highest.
    pub fn bounds(&self) -> Option<(i32, i32)> {
        let low = *self.octaves.first()?;
        let high = *self.octaves.last()?;
        Some((
            Pitch::new(NoteName::C, low).absolute_index(),
            Pitch::new(NoteName::B, high).absolute_index(),
        ))
    }

    pub fn contains(&self, pitch: Pitch) -> bool {
        match self.bounds() {
            Some((low, high)) => (low..=high).contains(&pitch.absolute_index()),
            None => false,
        }
    }

    pub fn allows_direction(&self, direction: Direction) -> bool {
        match self.direction {
            DirectionPolicy::Ascending => direction == Direction::Ascending,
            DirectionPolicy::Descending => direction == Direction::Descending,
            DirectionPolicy::Both => true,
        }
    }

    /// Whether `question` could have been generated under these constraints.
    pub fn admits(&self, question: &Question) -> bool {
        let start_matches = match self.start {
            StartNote::Random => true,
            StartNote::Fixed(name) => question.start.name == name,
        };
        self.enabled_semitones.contains(&question.interval.semitones)
            && start_matches
            && self.octaves.contains(&question.start.octave)
            && self.allows_direction(question.direction)
            && self.contains(question.start)
            && self.contains(question.target())
    }
}
