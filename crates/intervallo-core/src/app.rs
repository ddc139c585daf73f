use crate::ipc::{Command, Event, GameState, QuizView, Unavailable};
use crate::sequencer::PlaybackSequencer;
use crate::timers::{Timer, TimerKind, TimerQueue};
use crate::timing::QuizTiming;
use intervallo_domain_quiz::{
    evaluate_interval_guess, evaluate_pitch_guess, GenerateError, IntervalVerdict, PitchVerdict,
    Question, QuestionConstraints, QuestionGenerator,
};
use intervallo_domain_theory::{all_intervals, interval_by_semitones, Pitch};
use intervallo_ports::audio::AudioCuePort;
use intervallo_ports::settings::{QuizSettings, SettingsError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::time::Instant;

#[derive(thiserror::Error, Debug)]
pub enum CoreError {
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("interval of {0} semitones is not in the catalog")]
    UnknownInterval(u8),
}

/// Owns the quiz state. Every transition goes through `handle_command` or `tick`,
/// both of which take the current time so pacing is driven by the caller.
pub struct QuizCore<R: Rng = StdRng> {
    audio: Box<dyn AudioCuePort>,
    settings: QuizSettings,
    timing: QuizTiming,
    generator: QuestionGenerator<R>,
    question: Option<Question>,
    unavailable: Option<Unavailable>,
    // Bumped on every new question and every verdict; timers from older epochs are dropped.
    epoch: u64,
    game_state: GameState,
    wrong_interval: Option<u8>,
    sequencer: PlaybackSequencer,
    timers: TimerQueue,
    interacted: bool,
    events: VecDeque<Event>,
}

impl QuizCore<StdRng> {
    pub fn new(audio: Box<dyn AudioCuePort>, settings: QuizSettings) -> Result<Self, CoreError> {
        Self::with_rng(audio, settings, StdRng::from_entropy())
    }
}

impl<R: Rng> QuizCore<R> {
    pub fn with_rng(
        audio: Box<dyn AudioCuePort>,
        settings: QuizSettings,
        rng: R,
    ) -> Result<Self, CoreError> {
        settings.validate()?;
        let timing = QuizTiming::default();

        Ok(Self {
            audio,
            settings,
            timing,
            generator: QuestionGenerator::new(rng),
            question: None,
            unavailable: None,
            epoch: 0,
            game_state: GameState::Waiting,
            wrong_interval: None,
            sequencer: PlaybackSequencer::new(timing.second_note_offset),
            timers: TimerQueue::new(),
            interacted: false,
            events: VecDeque::new(),
        })
    }

    pub fn with_timing(mut self, timing: QuizTiming) -> Self {
        self.timing = timing;
        self.sequencer = PlaybackSequencer::new(timing.second_note_offset);
        self
    }

    /// Generates the first question. Nothing is played until the user interacts.
    pub fn start(&mut self, now: Instant) {
        self.next_question(now);
    }

    pub fn handle_command(&mut self, cmd: Command, now: Instant) -> Result<(), CoreError> {
        if cmd.is_interaction() {
            self.ensure_audio();
        }

        match cmd {
            Command::RequestPlay => self.request_play(now),
            Command::SubmitIntervalGuess { semitones } => {
                self.submit_interval_guess(semitones, now)?;
            }
            Command::SubmitPitchGuess { pitch } => self.submit_pitch_guess(pitch, now),
            Command::NextQuestion => self.next_question(now),
            Command::UpdateSettings { settings } => {
                settings.validate()?;
                self.apply_settings(settings, now);
            }
            Command::ToggleInterval { semitones } => {
                let mut settings = self.settings.clone();
                settings.toggle_interval(semitones)?;
                self.apply_settings(settings, now);
            }
            Command::ToggleAllIntervals => {
                let mut settings = self.settings.clone();
                settings.toggle_all_intervals();
                self.apply_settings(settings, now);
            }
            Command::ToggleOctave { octave } => {
                let mut settings = self.settings.clone();
                settings.toggle_octave(octave)?;
                self.apply_settings(settings, now);
            }
            Command::SetStartNote { start_note } => {
                let settings = QuizSettings {
                    start_note,
                    ..self.settings.clone()
                };
                self.apply_settings(settings, now);
            }
            Command::SetDirection { direction } => {
                let settings = QuizSettings {
                    direction,
                    ..self.settings.clone()
                };
                self.apply_settings(settings, now);
            }
            Command::SetLanguage { language } => {
                let settings = QuizSettings {
                    language,
                    ..self.settings.clone()
                };
                self.apply_settings(settings, now);
            }
            Command::SetKeyboardMode { enabled } => {
                let settings = QuizSettings {
                    keyboard_mode: enabled,
                    ..self.settings.clone()
                };
                self.apply_settings(settings, now);
            }
            Command::SetHighlightStart { enabled } => {
                let settings = QuizSettings {
                    highlight_start: enabled,
                    ..self.settings.clone()
                };
                self.apply_settings(settings, now);
            }
        }
        Ok(())
    }

    /// Fires every timer due at `now`.
    pub fn tick(&mut self, now: Instant) {
        for timer in self.timers.pop_due(now) {
            self.fire(timer, now);
        }
    }

    pub fn drain_events(&mut self) -> Vec<Event> {
        self.events.drain(..).collect()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_due()
    }

    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    pub fn timing(&self) -> QuizTiming {
        self.timing
    }

    pub fn game_state(&self) -> GameState {
        self.game_state
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    pub fn is_sounding(&self) -> bool {
        self.sequencer.is_sounding()
    }

    pub fn view(&self) -> QuizView {
        let success = self.game_state == GameState::Success;
        let revealed_target = self
            .question
            .filter(|_| success)
            .map(|question| question.target());

        let mut highlights = Vec::new();
        if let Some(question) = self.question.as_ref() {
            if self.settings.keyboard_mode || self.settings.highlight_start || success {
                highlights.push(question.start);
            }
            if let Some(target) = revealed_target {
                if !highlights.contains(&target) {
                    highlights.push(target);
                }
            }
        }

        QuizView {
            game_state: self.game_state,
            start: self.question.map(|question| question.start),
            revealed_target,
            wrong_interval: self.wrong_interval,
            sounding: self.sequencer.is_sounding(),
            answer_choices: all_intervals()
                .iter()
                .map(|interval| interval.semitones)
                .filter(|semitones| self.settings.enabled_intervals.contains(semitones))
                .collect(),
            highlights,
            unavailable: self.unavailable,
        }
    }

    fn ensure_audio(&mut self) {
        if self.interacted {
            return;
        }
        self.interacted = true;
        if let Err(err) = self.audio.initialize() {
            tracing::warn!(%err, "audio initialization failed");
            self.events.push_back(Event::AudioUnavailable {
                message: err.to_string(),
            });
        }
    }

    fn request_play(&mut self, now: Instant) {
        let Some(question) = self.question else {
            tracing::debug!("play requested without a question");
            return;
        };
        match self.sequencer.play(&question, self.audio.as_ref()) {
            Some(generation) => {
                self.timers.schedule(
                    now + self.timing.playback_window,
                    TimerKind::PlaybackFinished,
                    generation,
                );
                self.events.push_back(Event::PlaybackUpdated { sounding: true });
            }
            None => tracing::debug!("sequence already sounding, play request dropped"),
        }
    }

    /// The question a guess would be judged against, if guesses are accepted right now.
    fn guessable_question(&self) -> Option<Question> {
        if self.game_state != GameState::Waiting || self.sequencer.is_sounding() {
            return None;
        }
        self.question
    }

    fn submit_interval_guess(&mut self, semitones: u8, now: Instant) -> Result<(), CoreError> {
        let guessed = interval_by_semitones(semitones).ok_or(CoreError::UnknownInterval(semitones))?;
        let Some(question) = self.guessable_question() else {
            tracing::debug!(semitones, state = ?self.game_state, "interval guess dropped");
            return Ok(());
        };

        match evaluate_interval_guess(&question, guessed) {
            IntervalVerdict::Success { target } => self.on_success(&question, target, now),
            IntervalVerdict::Failure { guessed } => self.on_failure(Some(guessed.semitones), now),
        }
        Ok(())
    }

    fn submit_pitch_guess(&mut self, pitch: Pitch, now: Instant) {
        let Some(question) = self.guessable_question() else {
            tracing::debug!(%pitch, state = ?self.game_state, "pitch guess dropped");
            return;
        };

        match evaluate_pitch_guess(&question, pitch) {
            PitchVerdict::Success { target } => self.on_success(&question, target, now),
            PitchVerdict::Ignored => self.audio.play_pitch(pitch),
            PitchVerdict::Failure { .. } => self.on_failure(None, now),
        }
    }

    fn on_success(&mut self, question: &Question, target: Pitch, now: Instant) {
        tracing::info!(start = %question.start, %target, "correct answer");
        self.epoch = self.epoch.wrapping_add(1);
        self.set_game_state(GameState::Success);
        self.audio.play_pitch(target);
        self.events.push_back(Event::AnswerRevealed {
            target,
            semitones: question.interval.semitones,
        });
        self.timers.schedule(
            now + self.timing.next_question_delay,
            TimerKind::NextQuestion,
            self.epoch,
        );
    }

    fn on_failure(&mut self, wrong_interval: Option<u8>, now: Instant) {
        tracing::info!(?wrong_interval, "wrong answer");
        self.epoch = self.epoch.wrapping_add(1);
        self.set_game_state(GameState::Error);
        self.audio.play_error_cue();
        if let Some(semitones) = wrong_interval {
            self.set_wrong_interval(Some(semitones));
            self.timers.schedule(
                now + self.timing.wrong_flag_clear,
                TimerKind::ClearWrongFlag,
                self.epoch,
            );
        }
        self.timers.schedule(
            now + self.timing.error_reset,
            TimerKind::ResetToWaiting,
            self.epoch,
        );
    }

    fn fire(&mut self, timer: Timer, now: Instant) {
        match timer.kind {
            TimerKind::PlaybackFinished => {
                if self.sequencer.finish(timer.epoch) {
                    self.events.push_back(Event::PlaybackUpdated { sounding: false });
                }
            }
            _ if timer.epoch != self.epoch => {
                tracing::debug!(kind = ?timer.kind, "stale timer dropped");
            }
            TimerKind::NextQuestion => {
                if self.game_state == GameState::Success {
                    self.next_question(now);
                }
            }
            TimerKind::ClearWrongFlag => self.set_wrong_interval(None),
            TimerKind::ResetToWaiting => {
                if self.game_state == GameState::Error {
                    self.set_game_state(GameState::Waiting);
                }
            }
        }
    }

    fn next_question(&mut self, now: Instant) {
        self.epoch = self.epoch.wrapping_add(1);
        self.set_wrong_interval(None);
        self.set_game_state(GameState::Waiting);

        // The generator is not consulted at all for an empty selection.
        if self.settings.enabled_intervals.is_empty() {
            self.mark_unavailable(Unavailable::EmptySelection);
            return;
        }

        let constraints = QuestionConstraints::from(&self.settings);
        match self.generator.generate(&constraints) {
            Ok(question) => {
                tracing::info!(start = %question.start, "new question");
                self.question = Some(question);
                self.unavailable = None;
                self.events.push_back(Event::QuestionChanged {
                    start: question.start,
                });
                if self.interacted {
                    self.request_play(now);
                }
            }
            Err(GenerateError::EmptySelection) => {
                self.mark_unavailable(Unavailable::EmptySelection);
            }
            Err(err @ GenerateError::NoValidQuestion { .. }) => {
                tracing::warn!(%err, octaves = ?self.settings.octaves, "cannot build a question");
                self.mark_unavailable(Unavailable::NoValidQuestion);
            }
        }
    }

    fn mark_unavailable(&mut self, reason: Unavailable) {
        self.question = None;
        self.unavailable = Some(reason);
        self.events.push_back(Event::QuestionUnavailable { reason });
    }

    fn apply_settings(&mut self, settings: QuizSettings, now: Instant) {
        let before = QuestionConstraints::from(&self.settings);
        let after = QuestionConstraints::from(&settings);
        self.settings = settings;
        self.events.push_back(Event::SettingsUpdated {
            settings: self.settings.clone(),
        });

        if before == after {
            return;
        }
        let still_valid = self
            .question
            .as_ref()
            .is_some_and(|question| after.admits(question));
        if !still_valid {
            self.next_question(now);
        }
    }

    fn set_game_state(&mut self, state: GameState) {
        if self.game_state != state {
            self.game_state = state;
            self.events.push_back(Event::GameStateUpdated { state });
        }
    }

    fn set_wrong_interval(&mut self, semitones: Option<u8>) {
        if self.wrong_interval != semitones {
            self.wrong_interval = semitones;
            self.events.push_back(Event::WrongIntervalFlagged { semitones });
        }
    }
}
