//! The controller that binds the engine and the stores to the screens.
//!
//! Every method takes the current [`Instant`] instead of reading the clock,
//! so the whole flow can be driven from tests.

mod input;
mod state;

use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::config::GameConfig;
use crate::engine::{AnswerOutcome, EngineState, QuizEngine, Rules, Ticker, TimerEvent};
use crate::error::{AccountError, EngineError, StorageError};
use crate::models::{LeaderboardEntry, ProgressSnapshot};
use crate::storage::{ProgressStore, UserStore};

pub use input::handle_key;
pub use state::{
    AppState, CredentialsForm, EndChoice, Field, MenuItem, PauseChoice, SessionEnd, StatusKind,
    StatusMessage, MAX_FIELD_LENGTH,
};

/// Longest answer the input box accepts.
const MAX_ANSWER_LENGTH: usize = 12;

pub struct App {
    pub state: AppState,
    users: UserStore,
    progress: ProgressStore,
    engine: QuizEngine,
    ticker: Ticker,
    user: Option<String>,
    answer_input: String,
    status: Option<StatusMessage>,
    leaderboard: Vec<LeaderboardEntry>,
    leaderboard_size: usize,
    should_quit: bool,
}

impl App {
    pub fn new(
        users: UserStore,
        progress: ProgressStore,
        rules: Rules,
        tick_interval: Duration,
        leaderboard_size: usize,
    ) -> Self {
        let leaderboard = users.top_scores(leaderboard_size);
        Self {
            state: AppState::default(),
            users,
            progress,
            engine: QuizEngine::new(rules),
            ticker: Ticker::new(tick_interval),
            user: None,
            answer_input: String::new(),
            status: None,
            leaderboard,
            leaderboard_size,
            should_quit: false,
        }
    }

    /// Open the stores named by `config`.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            UserStore::open(config.users_path()),
            ProgressStore::open(config.progress_path()),
            config.rules.clone(),
            config.tick_interval(),
            config.leaderboard_size,
        )
    }

    pub fn engine(&self) -> &QuizEngine {
        &self.engine
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn answer_input(&self) -> &str {
        &self.answer_input
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn leaderboard(&self) -> &[LeaderboardEntry] {
        &self.leaderboard
    }

    pub fn users(&self) -> &UserStore {
        &self.users
    }

    pub fn progress(&self) -> &ProgressStore {
        &self.progress
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.ticker.cancel();
        self.should_quit = true;
    }

    // Login and registration

    pub fn submit_login(&mut self) {
        let AppState::Login(form) = &mut self.state else {
            return;
        };
        let (username, password) = form.credentials();

        match self.users.login(&username, &password) {
            Ok(()) => {
                self.user = Some(username);
                self.status = None;
                self.refresh_leaderboard();
                self.state = AppState::menu();
            }
            Err(err) => {
                warn!(username = %username, "login failed");
                form.error = Some(err.to_string());
            }
        }
    }

    pub fn open_register(&mut self) {
        if matches!(self.state, AppState::Login(_)) {
            self.state = AppState::Register(CredentialsForm::default());
        }
    }

    pub fn cancel_register(&mut self) {
        if matches!(self.state, AppState::Register(_)) {
            self.state = AppState::default();
        }
    }

    pub fn submit_register(&mut self) {
        let AppState::Register(form) = &mut self.state else {
            return;
        };
        let (username, password) = form.credentials();

        match self.users.register(&username, &password) {
            Ok(()) => {
                self.refresh_leaderboard();
                self.state = AppState::Login(CredentialsForm::with_notice(
                    "Account created, please log in",
                ));
            }
            Err(AccountError::Storage(err)) => {
                form.error = Some(format!("Could not save account: {err}"));
            }
            Err(err) => form.error = Some(err.to_string()),
        }
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            info!(username = %user, "logout");
        }
        self.ticker.cancel();
        self.answer_input.clear();
        self.status = None;
        self.state = AppState::default();
    }

    // Menu

    pub fn select_next(&mut self) {
        match &mut self.state {
            AppState::Menu { selected } => *selected = (*selected + 1) % MenuItem::ALL.len(),
            AppState::Paused { choice } => {
                *choice = match choice {
                    PauseChoice::Continue => PauseChoice::SaveAndQuit,
                    PauseChoice::SaveAndQuit => PauseChoice::Continue,
                }
            }
            AppState::GameEnd { choice, .. } => {
                *choice = match choice {
                    EndChoice::Retry => EndChoice::Exit,
                    EndChoice::Exit => EndChoice::Retry,
                }
            }
            _ => {}
        }
    }

    pub fn select_previous(&mut self) {
        if let AppState::Menu { selected } = &mut self.state {
            *selected = (*selected + MenuItem::ALL.len() - 1) % MenuItem::ALL.len();
        } else {
            // the dialogs only have two entries
            self.select_next();
        }
    }

    /// Run the highlighted entry of the menu or dialog on screen.
    pub fn confirm(&mut self, now: Instant) {
        match self.state {
            AppState::Menu { selected } => match MenuItem::ALL[selected] {
                MenuItem::StartGame => self.start_game(now),
                MenuItem::Logout => self.logout(),
            },
            AppState::Paused { choice } => match choice {
                PauseChoice::Continue => self.continue_game(now),
                PauseChoice::SaveAndQuit => self.save_and_quit(),
            },
            AppState::GameEnd { choice, .. } => match choice {
                EndChoice::Retry => self.retry(now),
                EndChoice::Exit => self.exit_to_menu(),
            },
            _ => {}
        }
    }

    /// Offer the saved session if there is one, otherwise start fresh.
    pub fn start_game(&mut self, now: Instant) {
        let Some(user) = self.user.as_deref() else {
            return;
        };
        match self.progress.get(user) {
            Some(saved) => self.state = AppState::ResumePrompt { saved },
            None => self.begin(None, now),
        }
    }

    pub fn answer_resume(&mut self, resume: bool, now: Instant) {
        let AppState::ResumePrompt { saved } = self.state else {
            return;
        };
        if resume {
            self.begin(Some(saved), now);
        } else {
            self.begin(None, now);
            self.clear_saved_progress();
        }
    }

    fn begin(&mut self, seed: Option<ProgressSnapshot>, now: Instant) {
        self.engine.start_session(seed);
        self.enter_play(now);
    }

    fn enter_play(&mut self, now: Instant) {
        self.answer_input.clear();
        self.status = None;
        self.refresh_leaderboard();
        self.ticker.arm(now, self.engine.epoch());
        self.state = AppState::Playing;
    }

    // Playing

    pub fn push_answer_char(&mut self, c: char) {
        if self.answer_input.chars().count() < MAX_ANSWER_LENGTH {
            self.answer_input.push(c);
        }
    }

    pub fn pop_answer_char(&mut self) {
        self.answer_input.pop();
    }

    pub fn submit_answer(&mut self, now: Instant) {
        if self.state != AppState::Playing {
            return;
        }

        match self.engine.submit_answer(&self.answer_input) {
            Err(EngineError::InvalidInput(_)) => {
                // the countdown keeps running
                self.status = Some(StatusMessage::warning("Please enter a whole number"));
            }
            Err(EngineError::NotAwaitingAnswer) => {}
            Ok(AnswerOutcome::Correct { score }) => {
                self.next_question(now);
                self.status = None;
                self.record_score(score);
            }
            Ok(AnswerOutcome::LevelUp {
                score,
                level,
                time_limit,
            }) => {
                self.next_question(now);
                self.status = Some(StatusMessage::info(format!(
                    "Level {level}! {time_limit:.1}s per question"
                )));
                self.record_score(score);
            }
            Ok(AnswerOutcome::Completed { score }) => {
                self.finish(SessionEnd::Completed);
                self.record_score(score);
            }
            Ok(AnswerOutcome::Wrong { expected }) => {
                self.finish(SessionEnd::WrongAnswer { expected });
            }
        }
    }

    /// Deliver every countdown tick that is due at `now`.
    pub fn poll_tick(&mut self, now: Instant) {
        if self.state != AppState::Playing {
            return;
        }
        while self.ticker.poll(now, self.engine.epoch()) {
            match self.engine.tick() {
                TimerEvent::Running { .. } => {}
                TimerEvent::Expired => {
                    self.finish(SessionEnd::TimeExpired);
                    break;
                }
                TimerEvent::Ignored => break,
            }
        }
    }

    pub fn pause(&mut self) {
        if self.state == AppState::Playing && self.engine.pause() {
            self.ticker.cancel();
            self.state = AppState::Paused {
                choice: PauseChoice::default(),
            };
        }
    }

    pub fn continue_game(&mut self, now: Instant) {
        if matches!(self.state, AppState::Paused { .. }) && self.engine.resume() {
            self.ticker.arm(now, self.engine.epoch());
            self.state = AppState::Playing;
        }
    }

    /// Write the paused session to disk and go back to the menu.
    pub fn save_and_quit(&mut self) {
        if !matches!(self.state, AppState::Paused { .. }) {
            return;
        }
        let Some(user) = self.user.as_deref() else {
            return;
        };
        let result = self.progress.save(user, self.engine.snapshot());
        self.report_storage(result);
        self.ticker.cancel();
        self.state = AppState::menu();
    }

    pub fn retry(&mut self, now: Instant) {
        if matches!(self.state, AppState::GameEnd { .. }) {
            self.engine.restart();
            self.enter_play(now);
        }
    }

    /// Leave the end-of-game dialog. Any saved session is discarded.
    pub fn exit_to_menu(&mut self) {
        if matches!(self.state, AppState::GameEnd { .. }) {
            self.clear_saved_progress();
            self.state = AppState::menu();
        }
    }

    fn next_question(&mut self, now: Instant) {
        self.answer_input.clear();
        self.ticker.arm(now, self.engine.epoch());
    }

    fn finish(&mut self, end: SessionEnd) {
        self.ticker.cancel();
        self.answer_input.clear();
        self.status = None;
        debug_assert!(!matches!(
            self.engine.state(),
            EngineState::AwaitingAnswer | EngineState::Paused
        ));
        self.state = AppState::GameEnd {
            end,
            score: self.engine.score(),
            choice: EndChoice::default(),
        };
    }

    fn record_score(&mut self, score: u32) {
        let Some(user) = self.user.as_deref() else {
            return;
        };
        let result = self.users.update_score(user, score);
        if let Ok(true) = result {
            self.refresh_leaderboard();
        }
        self.report_storage(result.map(|_| ()));
    }

    fn clear_saved_progress(&mut self) {
        if let Some(user) = self.user.as_deref() {
            let result = self.progress.clear(user);
            self.report_storage(result);
        }
    }

    fn refresh_leaderboard(&mut self) {
        self.leaderboard = self.users.top_scores(self.leaderboard_size);
    }

    /// Show a failed write. Call this after any status set for the same step
    /// so the error is not overwritten.
    fn report_storage(&mut self, result: Result<(), StorageError>) {
        if let Err(err) = result {
            self.status = Some(StatusMessage::error(format!("Save failed: {err}")));
        }
    }
}
