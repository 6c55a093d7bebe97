//! # math-quiz
//!
//! A timed arithmetic quiz for the terminal. Players log in, answer
//! questions against a countdown that shrinks level by level, and compete on
//! a shared leaderboard. Sessions can be paused, saved and resumed later.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use math_quiz::{GameConfig, Quiz, QuizError};
//!
//! fn main() -> Result<(), QuizError> {
//!     let config = GameConfig::load(None)?;
//!     Quiz::from_config(&config).run()
//! }
//! ```
//!
//! The engine can also be driven directly, without a terminal:
//!
//! ```rust
//! use math_quiz::engine::{QuizEngine, Rules};
//!
//! let mut engine = QuizEngine::new(Rules::default());
//! let answer = engine.current_question().unwrap().answer;
//! engine.submit_answer(&answer.to_string()).unwrap();
//! assert_eq!(engine.score(), 1);
//! ```

pub mod app;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod storage;
pub mod terminal;
mod ui;

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use thiserror::Error;
use tracing::info;

pub use app::App;
pub use config::GameConfig;
pub use error::{AccountError, ConfigError, EngineError, StorageError};

use terminal::{AppTerminal, TerminalGuard};

/// Longest the event loop blocks waiting for a key.
const MAX_POLL_WAIT: Duration = Duration::from_millis(100);

/// Error type for running the game.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
}

/// A game ready to take over the terminal.
pub struct Quiz {
    app: App,
}

impl Quiz {
    pub fn new(app: App) -> Self {
        Self { app }
    }

    /// Open the data files named by `config`.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(App::from_config(config))
    }

    /// Run until the player quits. The terminal is restored on return,
    /// including on error.
    pub fn run(mut self) -> Result<(), QuizError> {
        let mut guard = TerminalGuard::new()?;
        info!("game started");
        let result = run_event_loop(guard.terminal(), &mut self.app);
        info!("game closed");
        result
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

fn run_event_loop(terminal: &mut AppTerminal, app: &mut App) -> Result<(), QuizError> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        let timeout = app
            .ticker()
            .time_until_due(Instant::now())
            .map_or(MAX_POLL_WAIT, |due| due.min(MAX_POLL_WAIT));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app::handle_key(app, key, Instant::now()) {
                    break;
                }
            }
        }

        app.poll_tick(Instant::now());
        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
