use std::time::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerKind {
    PlaybackFinished,
    NextQuestion,
    ClearWrongFlag,
    ResetToWaiting,
}

/// A one-shot timer. `epoch` identifies the question (or playback run) it belongs to;
/// the owner drops timers whose epoch is no longer current.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timer {
    pub due: Instant,
    pub kind: TimerKind,
    pub epoch: u64,
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    timers: Vec<Timer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Instant, kind: TimerKind, epoch: u64) {
        // Stays sorted by due time; equal deadlines fire in scheduling order.
        let at = self.timers.partition_point(|timer| timer.due <= due);
        self.timers.insert(at, Timer { due, kind, epoch });
    }

    pub fn pop_due(&mut self, now: Instant) -> Vec<Timer> {
        let split = self.timers.partition_point(|timer| timer.due <= now);
        self.timers.drain(..split).collect()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.timers.first().map(|timer| timer.due)
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
