use intervallo_domain_theory::{Language, Pitch};
use intervallo_ports::audio::{AudioCuePort, AudioError};
use parking_lot::Mutex;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Renders audio cues as text on a writer (stdout by default) instead of sound.
pub struct ConsoleAudio {
    out: Mutex<Box<dyn Write + Send>>,
    language: Language,
    bell: bool,
    initialized: AtomicBool,
}

impl ConsoleAudio {
    pub fn new(out: Box<dyn Write + Send>, language: Language) -> Self {
        Self {
            out: Mutex::new(out),
            language,
            bell: false,
            initialized: AtomicBool::new(false),
        }
    }

    pub fn stdout(language: Language) -> Self {
        Self::new(Box::new(std::io::stdout()), language)
    }

    /// Rings the terminal bell on error cues.
    pub fn with_bell(mut self, bell: bool) -> Self {
        self.bell = bell;
        self
    }

    fn emit(&self, line: &str) {
        if !self.initialized.load(Ordering::Relaxed) {
            tracing::debug!(line, "audio not initialized, cue dropped");
            return;
        }
        let mut out = self.out.lock();
        if let Err(err) = writeln!(out, "{line}").and_then(|_| out.flush()) {
            tracing::warn!(%err, "failed to write audio cue");
        }
    }
}

impl AudioCuePort for ConsoleAudio {
    fn initialize(&self) -> Result<(), AudioError> {
        if self.initialized.swap(true, Ordering::Relaxed) {
            tracing::debug!("audio already initialized");
        } else {
            tracing::info!("console audio ready");
        }
        Ok(())
    }

    fn play_pitch(&self, pitch: Pitch) {
        tracing::debug!(%pitch, "play pitch");
        self.emit(&format!("♪ {}", pitch.display_name(self.language)));
    }

    fn play_two_pitch_sequence(&self, first: Pitch, second: Pitch, offset: Duration) {
        tracing::debug!(%first, %second, offset_ms = offset.as_millis() as u64, "play sequence");
        self.emit(&format!(
            "♪ {} … {}",
            first.display_name(self.language),
            second.display_name(self.language)
        ));
    }

    fn play_error_cue(&self) {
        tracing::debug!("play error cue");
        let line = if self.bell { "✗ quack\x07" } else { "✗ quack" };
        self.emit(line);
    }
}
