use intervallo_domain_theory::Pitch;
use std::time::Duration;

#[derive(thiserror::Error, Debug)]
pub enum AudioError {
    #[error("audio context locked: {0}")]
    Locked(String),
    #[error("instrument unavailable: {0}")]
    InstrumentUnavailable(String),
    #[error("backend error: {0}")]
    Backend(String),
}

/// Sound output used by the quiz. Everything except `initialize` is fire-and-forget.
///
/// Thread model: all calls come from the thread that owns the quiz core.
pub trait AudioCuePort: Send + Sync {
    /// Unlocks output. Called once, on the first user interaction.
    fn initialize(&self) -> Result<(), AudioError>;

    fn play_pitch(&self, pitch: Pitch);

    /// Sounds `first` now and `second` after `offset`.
    fn play_two_pitch_sequence(&self, first: Pitch, second: Pitch, offset: Duration);

    fn play_error_cue(&self);
}
