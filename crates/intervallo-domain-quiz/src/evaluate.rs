use crate::question::Question;
use intervallo_domain_theory::{Interval, Pitch};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum IntervalVerdict {
    Success { target: Pitch },
    Failure { guessed: Interval },
}

/// `Ignored` means the player re-auditioned the start pitch; it is not a wrong answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum PitchVerdict {
    Success { target: Pitch },
    Ignored,
    Failure { clicked: Pitch },
}

impl IntervalVerdict {
    pub fn is_success(&self) -> bool {
        matches!(self, IntervalVerdict::Success { .. })
    }
}

impl PitchVerdict {
    pub fn is_success(&self) -> bool {
        matches!(self, PitchVerdict::Success { .. })
    }
}

pub fn evaluate_interval_guess(question: &Question, guessed: &Interval) -> IntervalVerdict {
    if guessed.semitones == question.interval.semitones {
        IntervalVerdict::Success {
            target: question.target(),
        }
    } else {
        IntervalVerdict::Failure { guessed: *guessed }
    }
}

pub fn evaluate_pitch_guess(question: &Question, clicked: Pitch) -> PitchVerdict {
    let target = question.target();
    if clicked == target {
        PitchVerdict::Success { target }
    } else if clicked == question.start {
        PitchVerdict::Ignored
    } else {
        PitchVerdict::Failure { clicked }
    }
}
