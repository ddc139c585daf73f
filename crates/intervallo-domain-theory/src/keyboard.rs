use crate::pitch::{NoteName, Pitch};
use std::ops::RangeInclusive;

/// Octaves spanned by the on-screen keyboard (C3 to B5).
pub const DEFAULT_KEYBOARD_OCTAVES: RangeInclusive<i32> = 3..=5;

pub fn keyboard_pitches(octaves: RangeInclusive<i32>) -> Vec<Pitch> {
    octaves
        .flat_map(|octave| NoteName::ALL.iter().map(move |&name| Pitch::new(name, octave)))
        .collect()
}
