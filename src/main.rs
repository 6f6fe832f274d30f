//! Digit Span Test - adaptive working-memory evaluation
//!
//! Single-session, self-contained CLI application. Presents growing digit
//! sequences, collects forward then backward recall, and records the maximum
//! achieved span per direction.

mod cli;
mod results;
mod sequence;
mod session;

use clap::Parser;
use cli::display::Display;
use cli::input::InputHandler;
use results::{FileStore, Phase};
use session::{Controller, Mode, SessionError, TestSession};
use std::error::Error;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "Digit Span Test")]
#[command(about = "Adaptive digit span test for working memory evaluation")]
struct Args {
    /// Directory for result records
    #[arg(short, long, default_value = "data")]
    data_dir: String,

    /// How long each digit stays on screen, in milliseconds
    #[arg(short, long, default_value_t = 1000)]
    interval: u64,

    /// Enable debug logging on stderr
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    if args.debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let mut display = Display::new(Duration::from_millis(args.interval));
    let mut input = InputHandler::new();
    let mut store = FileStore::new(args.data_dir.clone());

    InputHandler::enable_raw_mode()?;
    let outcome = run(&mut display, &mut input, &mut store);
    InputHandler::disable_raw_mode()?;
    display.clear()?;

    match outcome {
        // Esc / Ctrl+C: leave quietly without a result record
        Err(SessionError::Interrupted) => {
            println!("Session aborted.");
            Ok(())
        }
        other => other.map_err(Into::into),
    }
}

/// Intro, subject id, then the mode menu. Practice returns to the menu;
/// a measured session ends the program after its summary.
fn run(
    display: &mut Display,
    input: &mut InputHandler,
    store: &mut FileStore,
) -> Result<(), SessionError> {
    display.show_intro()?;

    let subject_id = loop {
        let id = input.read_line("Please enter your ID: ")?;
        let id = id.trim();
        if !id.is_empty() {
            break id.to_string();
        }
    };

    loop {
        display.show_intro()?;
        display.show_menu()?;
        let mode = match input.read_choice(&['p', '1', '2', 'q'])? {
            'p' => Mode::Practice,
            '1' => Mode::Measured(Phase::Pre),
            '2' => Mode::Measured(Phase::Post),
            _ => return Ok(()),
        };

        run_session(&subject_id, mode, display, input, store)?;
        if !mode.is_practice() {
            return Ok(());
        }
    }
}

/// Run one staircase session to termination
fn run_session(
    subject_id: &str,
    mode: Mode,
    display: &mut Display,
    input: &mut InputHandler,
    store: &mut FileStore,
) -> Result<(), SessionError> {
    let session = TestSession::new(subject_id, mode)?;
    tracing::info!(subject_id, ?mode, "session started");

    let mut rng = rand::thread_rng();
    let finished = Controller::new(session, &mut rng, display, input, store).run()?;
    tracing::info!(
        max_forward = finished.max_forward_length(),
        max_backward = finished.max_backward_length(),
        "session finished"
    );

    // Leave the summary on screen until the subject moves on.
    input.wait_for_key()
}
