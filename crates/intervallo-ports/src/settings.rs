use intervallo_domain_theory::{interval_by_semitones, Language, NoteName, CATALOG_SEMITONES};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ops::RangeInclusive;

pub const SUPPORTED_OCTAVES: RangeInclusive<i32> = 2..=5;

fn default_enabled_intervals() -> BTreeSet<u8> {
    CATALOG_SEMITONES.iter().copied().collect()
}

fn default_octaves() -> BTreeSet<i32> {
    [3, 4].into_iter().collect()
}

fn default_highlight_start() -> bool {
    true
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartNote {
    #[default]
    Random,
    Fixed(NoteName),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirectionPolicy {
    #[default]
    Ascending,
    Descending,
    Both,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("interval of {0} semitones is not in the catalog")]
    UnknownInterval(u8),
    #[error("octave {0} is not supported")]
    UnsupportedOctave(i32),
    #[error("at least one octave must be selected")]
    NoOctaves,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizSettings {
    pub language: Language,
    #[serde(default = "default_enabled_intervals")]
    pub enabled_intervals: BTreeSet<u8>,
    pub start_note: StartNote,
    #[serde(default = "default_octaves")]
    pub octaves: BTreeSet<i32>,
    pub direction: DirectionPolicy,
    pub keyboard_mode: bool,
    #[serde(default = "default_highlight_start")]
    pub highlight_start: bool,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            language: Language::Italian,
            enabled_intervals: default_enabled_intervals(),
            start_note: StartNote::Random,
            octaves: default_octaves(),
            direction: DirectionPolicy::Ascending,
            keyboard_mode: false,
            highlight_start: true,
        }
    }
}

impl QuizSettings {
    /// An empty interval set is valid: it is the "nothing to practice" state.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if let Some(&unknown) = self
            .enabled_intervals
            .iter()
            .find(|&&semitones| interval_by_semitones(semitones).is_none())
        {
            return Err(SettingsError::UnknownInterval(unknown));
        }
        if self.octaves.is_empty() {
            return Err(SettingsError::NoOctaves);
        }
        if let Some(&octave) = self
            .octaves
            .iter()
            .find(|octave| !SUPPORTED_OCTAVES.contains(octave))
        {
            return Err(SettingsError::UnsupportedOctave(octave));
        }
        Ok(())
    }

    /// Never removes the last enabled interval.
    pub fn toggle_interval(&mut self, semitones: u8) -> Result<(), SettingsError> {
        if interval_by_semitones(semitones).is_none() {
            return Err(SettingsError::UnknownInterval(semitones));
        }
        if self.enabled_intervals.contains(&semitones) {
            if self.enabled_intervals.len() > 1 {
                self.enabled_intervals.remove(&semitones);
            }
        } else {
            self.enabled_intervals.insert(semitones);
        }
        Ok(())
    }

    pub fn toggle_all_intervals(&mut self) {
        if self.enabled_intervals.len() == CATALOG_SEMITONES.len() {
            self.enabled_intervals.clear();
        } else {
            self.enabled_intervals = default_enabled_intervals();
        }
    }

    /// Never removes the last selected octave.
    pub fn toggle_octave(&mut self, octave: i32) -> Result<(), SettingsError> {
        if !SUPPORTED_OCTAVES.contains(&octave) {
            return Err(SettingsError::UnsupportedOctave(octave));
        }
        if self.octaves.contains(&octave) {
            if self.octaves.len() > 1 {
                self.octaves.remove(&octave);
            }
        } else {
            self.octaves.insert(octave);
        }
        Ok(())
    }
}
