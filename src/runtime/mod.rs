use std::env;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use tracing::{info, warn};

use crate::audio::{AudioEvent, RodioBackend};
use crate::controller::PlaybackController;
use crate::error::Result;
use crate::library::LoftyExtractor;

mod command;
mod event_loop;
mod logging;
mod settings;
mod startup;

#[cfg(test)]
mod tests;

/// Read stdin line by line on its own thread so the event loop can keep
/// delivering audio notifications while waiting for input.
fn spawn_input_reader() -> Receiver<event_loop::Input> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(event_loop::Input::Line(line)).is_err() {
                        return;
                    }
                }
                Err(e) => {
                    warn!(error = %e, "failed to read from stdin");
                    break;
                }
            }
        }
        let _ = tx.send(event_loop::Input::Closed);
    });
    rx
}

pub fn run() -> Result<()> {
    let (settings, problem) = settings::load_settings();
    logging::init(&settings.log);
    if let Some(msg) = problem {
        warn!("{msg}");
    }

    let paths: Vec<PathBuf> = env::args_os().skip(1).map(PathBuf::from).collect();

    let (audio_tx, audio_rx) = mpsc::channel::<AudioEvent>();
    let backend = RodioBackend::spawn(&settings.audio, audio_tx)?;
    let mut controller = PlaybackController::new(backend, LoftyExtractor, &settings)?;

    let mut stdout = io::stdout();
    startup::apply_startup_paths(
        &mut controller,
        &paths,
        settings.controls.scrub_seconds,
        &mut stdout,
    )?;

    let input_rx = spawn_input_reader();
    let mut state = event_loop::EventLoopState::new(&controller);
    let run_result = event_loop::run(
        &settings,
        &mut controller,
        &audio_rx,
        &input_rx,
        &mut state,
        &mut stdout,
    );

    info!("shutting down");
    controller.shutdown(Duration::from_millis(settings.audio.quit_fade_out_ms));

    run_result.map_err(Into::into)
}
