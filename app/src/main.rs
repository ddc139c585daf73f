mod cli;
mod input;
mod render;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use input::{parse_line, Input, HELP};
use intervallo_core::{Event, QuizCore};
use intervallo_infra_audio_console::ConsoleAudio;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::BufRead;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const POLL_INTERVAL: Duration = Duration::from_millis(16);

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_events(events: Vec<Event>, cli: &Cli, core: &QuizCore) -> Result<()> {
    let language = core.settings().language;
    for event in events {
        if cli.json {
            println!("{}", serde_json::to_string(&event)?);
        } else if let Some(line) = render::event_line(&event, language) {
            println!("{line}");
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let settings = cli.quiz_settings()?;
    let audio = ConsoleAudio::stdout(settings.language).with_bell(cli.bell);
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut core = QuizCore::with_rng(Box::new(audio), settings, rng)?;
    tracing::info!(seed = ?cli.seed, "quiz starting");

    let (tx, rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    if !cli.json {
        println!("{HELP}");
    }
    core.start(Instant::now());
    let mut stdin_open = true;

    loop {
        let events = core.drain_events();
        print_events(events, &cli, &core)?;

        if !stdin_open {
            // Let pending cues and transitions play out before exiting.
            match core.next_deadline() {
                Some(deadline) => {
                    thread::sleep(deadline.saturating_duration_since(Instant::now()));
                    core.tick(Instant::now());
                    continue;
                }
                None => break,
            }
        }

        match rx.recv_timeout(POLL_INTERVAL) {
            Ok(line) => match parse_line(&line) {
                Ok(Some(Input::Command(cmd))) => {
                    if let Err(err) = core.handle_command(cmd, Instant::now()) {
                        println!("{err}");
                    }
                }
                Ok(Some(Input::Status)) => {
                    println!("{}", render::status(&core.view(), core.settings()));
                }
                Ok(Some(Input::Help)) => println!("{HELP}"),
                Ok(Some(Input::Quit)) => break,
                Ok(None) => {}
                Err(err) => println!("{err}"),
            },
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => stdin_open = false,
        }
        core.tick(Instant::now());
    }

    tracing::debug!("quiz finished");
    Ok(())
}
