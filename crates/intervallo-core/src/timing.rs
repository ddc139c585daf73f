use std::time::Duration;

/// Pacing of playback and feedback. The two error delays are independent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuizTiming {
    /// Gap between the start pitch and the target pitch.
    pub second_note_offset: Duration,
    /// How long a two-note sequence blocks further play requests.
    pub playback_window: Duration,
    pub next_question_delay: Duration,
    pub wrong_flag_clear: Duration,
    pub error_reset: Duration,
}

impl Default for QuizTiming {
    fn default() -> Self {
        Self {
            second_note_offset: Duration::from_millis(800),
            playback_window: Duration::from_millis(2000),
            next_question_delay: Duration::from_millis(1500),
            wrong_flag_clear: Duration::from_millis(500),
            error_reset: Duration::from_millis(800),
        }
    }
}
