//! Terminal runner for the classic falling-block puzzle.
//!
//! One thread owns the game: key events and gravity ticks are applied in
//! turn from the same loop, so the game never sees concurrent mutation.

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Instant;
use tetris_classic::input::{Command, InputHandler};
use tetris_classic::settings::Settings;
use tetris_classic::ticker::Ticker;
use tetris_classic::{Action, Game, ui};

/// Get the log directory, creating it if needed
fn log_dir() -> PathBuf {
    let dir = std::env::temp_dir().join("tetris-classic");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn main() -> Result<()> {
    let session_id: u32 = rand::random();

    // Log to a file; the terminal belongs to the UI
    let dir = log_dir();
    let log_file = format!("{:08x}.log", session_id);
    let file_appender = tracing_appender::rolling::never(&dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("tetris_classic=debug"));
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();

    tracing::info!(
        "Starting up, session={:08x}, log={}",
        session_id,
        dir.join(&log_file).display()
    );

    let settings = Settings::load();
    let mut game = Game::new();

    enable_raw_mode().context("Failed to enable raw mode")?;
    execute!(stdout(), EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout());
    let result = Terminal::new(backend)
        .context("Failed to create terminal")
        .and_then(|mut terminal| run_app(&mut terminal, &mut game, &settings));

    // Always try to restore terminal state
    let _ = disable_raw_mode();
    let _ = execute!(stdout(), LeaveAlternateScreen);

    if let Err(e) = &result {
        tracing::error!("Exited with error: {:#}", e);
    }

    // Seed an editable settings file on first run
    if let Some(path) = Settings::settings_path() {
        if let Err(e) = settings.save_if_missing(&path) {
            tracing::warn!("Could not write default settings: {:#}", e);
        }
    }
    result?;

    println!("\nThanks for playing!");
    println!("Final Score: {}", game.score());
    println!("Level: {} | Lines: {}", game.level(), game.lines_cleared());
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    game: &mut Game,
    settings: &Settings,
) -> Result<()> {
    let input = InputHandler::from_settings(settings);
    let mut ticker = Ticker::new(game.tick_interval(), Instant::now());
    let mut dirty = true;

    loop {
        if dirty {
            terminal.draw(|frame| ui::render_game(frame, game, settings))?;
            dirty = false;
        }

        // Wait for input until the next tick is due
        if event::poll(ticker.timeout(Instant::now()))? {
            if let Event::Key(key) = event::read()? {
                // Non-press events fall through to the tick check below
                match input.key_event(key, game.is_game_over()) {
                    Some(Command::Quit) => {
                        tracing::info!("Quit requested");
                        return Ok(());
                    }
                    Some(Command::Game(action)) => {
                        dirty |= game.process_action(action);
                        if action == Action::Restart {
                            ticker.reschedule(game.tick_interval(), Instant::now());
                        }
                    }
                    None => {}
                }
            } else {
                // Resize and the like
                dirty = true;
            }
        }

        // A stale tick after game over is swallowed here and by step()
        if ticker.poll(Instant::now()) && !game.is_game_over() {
            let outcome = game.step();
            dirty = true;
            if outcome.level_changed() {
                tracing::info!(
                    "Level {}: tick interval now {:?}",
                    game.level(),
                    game.tick_interval()
                );
                ticker.reschedule(game.tick_interval(), Instant::now());
            }
        }
    }
}
