use intervallo_domain_quiz::Question;
use intervallo_ports::audio::AudioCuePort;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    Idle,
    Sounding,
}

/// Gates two-note playback so sequences never overlap.
#[derive(Debug)]
pub struct PlaybackSequencer {
    second_note_offset: Duration,
    state: PlaybackState,
    generation: u64,
}

impl PlaybackSequencer {
    pub fn new(second_note_offset: Duration) -> Self {
        Self {
            second_note_offset,
            state: PlaybackState::Idle,
            generation: 0,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_sounding(&self) -> bool {
        self.state == PlaybackState::Sounding
    }

    /// Starts the start-then-target sequence. Returns the generation the caller must
    /// pass to `finish`, or `None` if a sequence is already sounding (request dropped).
    pub fn play(&mut self, question: &Question, audio: &dyn AudioCuePort) -> Option<u64> {
        if self.is_sounding() {
            return None;
        }
        self.generation = self.generation.wrapping_add(1);
        self.state = PlaybackState::Sounding;
        audio.play_two_pitch_sequence(question.start, question.target(), self.second_note_offset);
        Some(self.generation)
    }

    /// Returns to Idle if `generation` is the run currently sounding.
    pub fn finish(&mut self, generation: u64) -> bool {
        if self.state == PlaybackState::Sounding && generation == self.generation {
            self.state = PlaybackState::Idle;
            true
        } else {
            false
        }
    }
}
