use intervallo_core::{Command, CoreError, Event, GameState, QuizCore, QuizTiming, Unavailable};
use intervallo_domain_theory::{NoteName, Pitch};
use intervallo_ports::{AudioCuePort, AudioError, DirectionPolicy, QuizSettings, StartNote};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Clone, Debug, PartialEq)]
enum Cue {
    Init,
    Pitch(Pitch),
    Sequence(Pitch, Pitch),
    Error,
}

#[derive(Clone, Default)]
struct RecordingAudio {
    cues: Arc<Mutex<Vec<Cue>>>,
    fail_init: bool,
}

impl RecordingAudio {
    fn cues(&self) -> Vec<Cue> {
        self.cues.lock().clone()
    }
}

impl AudioCuePort for RecordingAudio {
    fn initialize(&self) -> Result<(), AudioError> {
        self.cues.lock().push(Cue::Init);
        if self.fail_init {
            return Err(AudioError::Locked("no user gesture".to_string()));
        }
        Ok(())
    }

    fn play_pitch(&self, pitch: Pitch) {
        self.cues.lock().push(Cue::Pitch(pitch));
    }

    fn play_two_pitch_sequence(&self, first: Pitch, second: Pitch, _offset: Duration) {
        self.cues.lock().push(Cue::Sequence(first, second));
    }

    fn play_error_cue(&self) {
        self.cues.lock().push(Cue::Error);
    }
}

const C4: Pitch = Pitch::new(NoteName::C, 4);
const D4: Pitch = Pitch::new(NoteName::D, 4);
const E4: Pitch = Pitch::new(NoteName::E, 4);

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

/// Every question is C4 up a major third to E4.
fn major_third_from_c4() -> QuizSettings {
    QuizSettings {
        enabled_intervals: [4].into_iter().collect(),
        start_note: StartNote::Fixed(NoteName::C),
        octaves: [4].into_iter().collect(),
        direction: DirectionPolicy::Ascending,
        ..QuizSettings::default()
    }
}

fn started_core(settings: QuizSettings, audio: RecordingAudio, t0: Instant) -> QuizCore<StdRng> {
    let mut core =
        QuizCore::with_rng(Box::new(audio), settings, StdRng::seed_from_u64(42)).unwrap();
    core.start(t0);
    core
}

/// Plays the question and lets the two-note window elapse. Returns the new time.
fn play_through(core: &mut QuizCore<StdRng>, t: Instant) -> Instant {
    core.handle_command(Command::RequestPlay, t).unwrap();
    let done = t + ms(2000);
    core.tick(done);
    done
}

fn count_question_changes(events: &[Event]) -> usize {
    events
        .iter()
        .filter(|event| matches!(event, Event::QuestionChanged { .. }))
        .count()
}

#[test]
fn start_generates_question_silently() {
    let audio = RecordingAudio::default();
    let t0 = Instant::now();
    let mut core = started_core(major_third_from_c4(), audio.clone(), t0);

    assert_eq!(core.view().start, Some(C4));
    assert_eq!(core.current_question().map(|q| q.target()), Some(E4));
    assert_eq!(core.game_state(), GameState::Waiting);
    assert!(audio.cues().is_empty());
    assert_eq!(
        core.drain_events(),
        vec![Event::QuestionChanged { start: C4 }]
    );
}

#[test]
fn first_play_unlocks_audio_once_and_drops_overlaps() {
    let audio = RecordingAudio::default();
    let t0 = Instant::now();
    let mut core = started_core(major_third_from_c4(), audio.clone(), t0);

    core.handle_command(Command::RequestPlay, t0).unwrap();
    core.handle_command(Command::RequestPlay, t0 + ms(500)).unwrap();
    assert!(core.is_sounding());
    assert_eq!(audio.cues(), vec![Cue::Init, Cue::Sequence(C4, E4)]);

    core.tick(t0 + ms(1999));
    assert!(core.view().sounding);
    core.tick(t0 + ms(2000));
    assert!(!core.view().sounding);

    core.handle_command(Command::RequestPlay, t0 + ms(2100)).unwrap();
    assert_eq!(
        audio.cues(),
        vec![Cue::Init, Cue::Sequence(C4, E4), Cue::Sequence(C4, E4)]
    );
}

#[test]
fn guesses_are_blocked_while_sounding() {
    let audio = RecordingAudio::default();
    let t0 = Instant::now();
    let mut core = started_core(major_third_from_c4(), audio.clone(), t0);

    core.handle_command(Command::RequestPlay, t0).unwrap();
    core.handle_command(Command::SubmitIntervalGuess { semitones: 7 }, t0 + ms(1000))
        .unwrap();
    assert_eq!(core.game_state(), GameState::Waiting);
    assert!(!audio.cues().contains(&Cue::Error));

    core.tick(t0 + ms(2000));
    core.handle_command(Command::SubmitIntervalGuess { semitones: 4 }, t0 + ms(2000))
        .unwrap();
    assert_eq!(core.game_state(), GameState::Success);
}

#[test]
fn correct_interval_reveals_target_and_moves_on() {
    let audio = RecordingAudio::default();
    let t0 = Instant::now();
    let mut core = started_core(major_third_from_c4(), audio.clone(), t0);
    let t = play_through(&mut core, t0);
    core.drain_events();

    core.handle_command(Command::SubmitIntervalGuess { semitones: 4 }, t)
        .unwrap();
    let view = core.view();
    assert_eq!(view.game_state, GameState::Success);
    assert_eq!(view.revealed_target, Some(E4));
    assert_eq!(view.highlights, vec![C4, E4]);
    assert_eq!(audio.cues().last(), Some(&Cue::Pitch(E4)));
    assert!(core
        .drain_events()
        .contains(&Event::AnswerRevealed {
            target: E4,
            semitones: 4
        }));

    core.tick(t + ms(1499));
    assert_eq!(core.game_state(), GameState::Success);

    core.tick(t + ms(1500));
    assert_eq!(core.game_state(), GameState::Waiting);
    assert_eq!(core.view().revealed_target, None);
    assert_eq!(count_question_changes(&core.drain_events()), 1);
    // The new question replays once on its own.
    assert_eq!(audio.cues().last(), Some(&Cue::Sequence(C4, E4)));
    assert!(core.is_sounding());
}

#[test]
fn wrong_interval_flashes_then_allows_retry() {
    let audio = RecordingAudio::default();
    let t0 = Instant::now();
    let mut core = started_core(major_third_from_c4(), audio.clone(), t0);
    let t = play_through(&mut core, t0);

    core.handle_command(Command::SubmitIntervalGuess { semitones: 7 }, t)
        .unwrap();
    assert_eq!(core.game_state(), GameState::Error);
    assert_eq!(core.view().wrong_interval, Some(7));
    assert_eq!(audio.cues().last(), Some(&Cue::Error));

    // Guesses are ignored while the error is showing.
    core.handle_command(Command::SubmitIntervalGuess { semitones: 4 }, t + ms(100))
        .unwrap();
    assert_eq!(core.game_state(), GameState::Error);

    core.tick(t + ms(500));
    assert_eq!(core.view().wrong_interval, None);
    assert_eq!(core.game_state(), GameState::Error);

    core.tick(t + ms(800));
    assert_eq!(core.game_state(), GameState::Waiting);
    assert_eq!(core.view().start, Some(C4));

    core.handle_command(Command::SubmitIntervalGuess { semitones: 4 }, t + ms(900))
        .unwrap();
    assert_eq!(core.game_state(), GameState::Success);
}

#[test]
fn unison_guess_is_flagged_too() {
    let audio = RecordingAudio::default();
    let t0 = Instant::now();
    let mut core = started_core(major_third_from_c4(), audio, t0);

    core.handle_command(Command::SubmitIntervalGuess { semitones: 0 }, t0)
        .unwrap();
    assert_eq!(core.view().wrong_interval, Some(0));
}

#[test]
fn clicking_start_pitch_only_auditions_it() {
    let audio = RecordingAudio::default();
    let t0 = Instant::now();
    let mut core = started_core(major_third_from_c4(), audio.clone(), t0);
    core.drain_events();

    core.handle_command(Command::SubmitPitchGuess { pitch: C4 }, t0)
        .unwrap();
    assert_eq!(core.game_state(), GameState::Waiting);
    assert_eq!(audio.cues(), vec![Cue::Init, Cue::Pitch(C4)]);
    assert!(core.drain_events().is_empty());
}

#[test]
fn wrong_pitch_errors_without_flagging_an_interval() {
    let audio = RecordingAudio::default();
    let t0 = Instant::now();
    let mut core = started_core(major_third_from_c4(), audio.clone(), t0);

    core.handle_command(Command::SubmitPitchGuess { pitch: D4 }, t0)
        .unwrap();
    assert_eq!(core.game_state(), GameState::Error);
    assert_eq!(core.view().wrong_interval, None);
    assert_eq!(audio.cues().last(), Some(&Cue::Error));

    core.tick(t0 + ms(800));
    core.handle_command(Command::SubmitPitchGuess { pitch: E4 }, t0 + ms(800))
        .unwrap();
    assert_eq!(core.game_state(), GameState::Success);
}

#[test]
fn unknown_interval_guess_is_rejected() {
    let t0 = Instant::now();
    let mut core = started_core(major_third_from_c4(), RecordingAudio::default(), t0);
    let err = core
        .handle_command(Command::SubmitIntervalGuess { semitones: 3 }, t0)
        .unwrap_err();
    assert!(matches!(err, CoreError::UnknownInterval(3)));
    assert_eq!(core.game_state(), GameState::Waiting);
}

#[test]
fn empty_selection_has_no_question() {
    let audio = RecordingAudio::default();
    let t0 = Instant::now();
    let mut core = started_core(QuizSettings::default(), audio.clone(), t0);
    core.drain_events();

    core.handle_command(Command::ToggleAllIntervals, t0).unwrap();
    let view = core.view();
    assert_eq!(view.start, None);
    assert_eq!(view.unavailable, Some(Unavailable::EmptySelection));
    assert!(view.answer_choices.is_empty());
    assert!(core.drain_events().contains(&Event::QuestionUnavailable {
        reason: Unavailable::EmptySelection
    }));

    core.handle_command(Command::RequestPlay, t0).unwrap();
    assert_eq!(audio.cues(), vec![Cue::Init]);

    core.handle_command(Command::ToggleAllIntervals, t0).unwrap();
    assert!(core.view().start.is_some());
    assert_eq!(core.view().unavailable, None);
    assert_eq!(core.view().answer_choices, vec![0, 2, 4, 5, 7, 9, 11, 12]);
}

#[test]
fn unreachable_configuration_reports_no_valid_question() {
    let t0 = Instant::now();
    let mut core = started_core(major_third_from_c4(), RecordingAudio::default(), t0);
    core.drain_events();

    let settings = QuizSettings {
        enabled_intervals: [12].into_iter().collect(),
        start_note: StartNote::Fixed(NoteName::A),
        octaves: [3].into_iter().collect(),
        direction: DirectionPolicy::Ascending,
        ..QuizSettings::default()
    };
    core.handle_command(Command::UpdateSettings { settings }, t0)
        .unwrap();

    assert_eq!(core.current_question(), None);
    assert_eq!(core.view().unavailable, Some(Unavailable::NoValidQuestion));
    assert!(core.drain_events().contains(&Event::QuestionUnavailable {
        reason: Unavailable::NoValidQuestion
    }));
}

#[test]
fn invalid_settings_are_rejected_without_change() {
    let t0 = Instant::now();
    let mut core = started_core(major_third_from_c4(), RecordingAudio::default(), t0);
    let settings = QuizSettings {
        octaves: Default::default(),
        ..QuizSettings::default()
    };
    assert!(core
        .handle_command(Command::UpdateSettings { settings }, t0)
        .is_err());
    assert_eq!(core.settings(), &major_third_from_c4());
}

#[test]
fn manual_skip_cancels_pending_advance() {
    let t0 = Instant::now();
    let mut core = started_core(major_third_from_c4(), RecordingAudio::default(), t0);
    let t = play_through(&mut core, t0);

    core.handle_command(Command::SubmitIntervalGuess { semitones: 4 }, t)
        .unwrap();
    core.handle_command(Command::NextQuestion, t + ms(100))
        .unwrap();
    core.drain_events();

    core.tick(t + ms(1500));
    assert_eq!(count_question_changes(&core.drain_events()), 0);
    assert_eq!(core.game_state(), GameState::Waiting);
}

#[test]
fn stale_error_timers_do_not_touch_new_question() {
    let t0 = Instant::now();
    let timing = QuizTiming {
        wrong_flag_clear: ms(4000),
        error_reset: ms(5000),
        ..QuizTiming::default()
    };
    let mut core = QuizCore::with_rng(
        Box::new(RecordingAudio::default()),
        major_third_from_c4(),
        StdRng::seed_from_u64(7),
    )
    .unwrap()
    .with_timing(timing);
    core.start(t0);

    core.handle_command(Command::SubmitIntervalGuess { semitones: 7 }, t0)
        .unwrap();
    core.handle_command(Command::NextQuestion, t0 + ms(100))
        .unwrap();
    // The replacement question auto-plays; fail it once the sequence is over.
    core.tick(t0 + ms(2100));
    core.handle_command(Command::SubmitIntervalGuess { semitones: 9 }, t0 + ms(2100))
        .unwrap();

    // Timers from the first failure come due here and must do nothing.
    core.tick(t0 + ms(5000));
    assert_eq!(core.view().wrong_interval, Some(9));
    assert_eq!(core.game_state(), GameState::Error);

    core.tick(t0 + ms(6100));
    assert_eq!(core.view().wrong_interval, None);
    core.tick(t0 + ms(7100));
    assert_eq!(core.game_state(), GameState::Waiting);
}

#[test]
fn cosmetic_settings_keep_the_question() {
    let t0 = Instant::now();
    let mut core = started_core(major_third_from_c4(), RecordingAudio::default(), t0);
    core.drain_events();

    core.handle_command(
        Command::SetLanguage {
            language: intervallo_domain_theory::Language::Anglo,
        },
        t0,
    )
    .unwrap();
    core.handle_command(Command::SetHighlightStart { enabled: false }, t0)
        .unwrap();

    let events = core.drain_events();
    assert_eq!(count_question_changes(&events), 0);
    assert!(core.view().highlights.is_empty());

    core.handle_command(Command::SetKeyboardMode { enabled: true }, t0)
        .unwrap();
    assert_eq!(core.view().highlights, vec![C4]);
}

#[test]
fn widening_constraints_keeps_an_admitted_question() {
    let t0 = Instant::now();
    let mut core = started_core(major_third_from_c4(), RecordingAudio::default(), t0);
    core.drain_events();

    core.handle_command(Command::ToggleOctave { octave: 5 }, t0)
        .unwrap();
    core.handle_command(Command::ToggleInterval { semitones: 7 }, t0)
        .unwrap();
    assert_eq!(count_question_changes(&core.drain_events()), 0);

    core.handle_command(
        Command::SetStartNote {
            start_note: StartNote::Fixed(NoteName::G),
        },
        t0,
    )
    .unwrap();
    assert_eq!(count_question_changes(&core.drain_events()), 1);
    assert_eq!(core.view().start.map(|p| p.name), Some(NoteName::G));
}

#[test]
fn failed_audio_unlock_is_reported_once() {
    let audio = RecordingAudio {
        fail_init: true,
        ..RecordingAudio::default()
    };
    let t0 = Instant::now();
    let mut core = started_core(major_third_from_c4(), audio.clone(), t0);
    core.drain_events();

    core.handle_command(Command::RequestPlay, t0).unwrap();
    core.handle_command(Command::RequestPlay, t0 + ms(3000))
        .unwrap();

    let events = core.drain_events();
    assert_eq!(
        events
            .iter()
            .filter(|event| matches!(event, Event::AudioUnavailable { .. }))
            .count(),
        1
    );
    let inits = audio.cues().iter().filter(|cue| **cue == Cue::Init).count();
    assert_eq!(inits, 1);
}

#[test]
fn commands_use_tagged_json() {
    let json = serde_json::to_string(&Command::SubmitIntervalGuess { semitones: 7 }).unwrap();
    assert_eq!(json, r#"{"type":"SubmitIntervalGuess","payload":{"semitones":7}}"#);

    let cmd: Command =
        serde_json::from_str(r#"{"type":"SubmitPitchGuess","payload":{"pitch":{"name":"G","octave":4}}}"#)
            .unwrap();
    assert!(matches!(
        cmd,
        Command::SubmitPitchGuess { pitch } if pitch == Pitch::new(NoteName::G, 4)
    ));
}
