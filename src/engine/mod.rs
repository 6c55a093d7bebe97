//! The level/timer/question progression engine.
//!
//! [`QuizEngine`] is a plain state machine. The host feeds it answers and
//! ticks one at a time and reads back what happened; it never blocks and
//! knows nothing about the terminal.

pub mod generator;
pub mod rules;
mod ticker;

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::error::EngineError;
use crate::models::{ProgressSnapshot, Question};

pub use generator::generate_question;
pub use rules::Rules;
pub use ticker::Ticker;

use rules::LOW_TIME_THRESHOLD;

/// Why a session ended early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    WrongAnswer,
    TimeExpired,
}

impl fmt::Display for GameOverReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOverReason::WrongAnswer => write!(f, "wrong answer"),
            GameOverReason::TimeExpired => write!(f, "time expired"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// A question is open and the countdown is running.
    AwaitingAnswer,
    /// The countdown is frozen; answers and ticks are rejected.
    Paused,
    GameOver(GameOverReason),
    /// Every level has been cleared.
    Completed,
}

/// What a submitted answer did to the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnswerOutcome {
    /// Right answer, same level, next question is open.
    Correct { score: u32 },
    /// Right answer that finished a level. The next question is open under
    /// the shorter time limit.
    LevelUp {
        score: u32,
        level: u32,
        time_limit: f64,
    },
    /// Right answer that finished the last level. The session is over.
    Completed { score: u32 },
    /// Wrong answer. The session is over.
    Wrong { expected: u32 },
}

/// Result of one countdown step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimerEvent {
    Running {
        remaining: f64,
        /// `remaining / time_limit`, for the progress bar.
        fraction: f64,
        low_time: bool,
    },
    /// The countdown hit zero and the session is over.
    Expired,
    /// No question was open, nothing changed.
    Ignored,
}

pub struct QuizEngine<R = StdRng> {
    rules: Rules,
    rng: R,
    state: EngineState,
    score: u32,
    level: u32,
    correct_in_level: u32,
    time_limit: f64,
    time_remaining: f64,
    question: Option<Question>,
    epoch: u64,
}

impl QuizEngine<StdRng> {
    /// Create an engine with a fresh session already started.
    pub fn new(rules: Rules) -> Self {
        Self::with_rng(rules, StdRng::from_os_rng())
    }
}

impl<R: Rng> QuizEngine<R> {
    pub fn with_rng(rules: Rules, rng: R) -> Self {
        let mut engine = Self {
            time_limit: rules.base_time_limit,
            time_remaining: rules.base_time_limit,
            rules,
            rng,
            state: EngineState::AwaitingAnswer,
            score: 0,
            level: 1,
            correct_in_level: 0,
            question: None,
            epoch: 0,
        };
        engine.start_session(None);
        engine
    }

    /// Reset the session to `initial`, or to a fresh game when `None`, and
    /// open the first question.
    pub fn start_session(&mut self, initial: Option<ProgressSnapshot>) {
        let seed = match initial {
            Some(snapshot) => self.sanitize(snapshot),
            None => self.fresh_progress(),
        };

        self.score = seed.score;
        self.level = seed.level;
        self.time_limit = seed.time_limit;
        self.correct_in_level = seed.correct_in_level;
        self.state = EngineState::AwaitingAnswer;
        self.next_question();

        info!(
            score = self.score,
            level = self.level,
            time_limit = self.time_limit,
            "session started"
        );
    }

    /// Start over from level 1.
    pub fn restart(&mut self) {
        self.start_session(None);
    }

    /// Check `raw` against the open question.
    ///
    /// Text that is not an integer yields [`EngineError::InvalidInput`] and
    /// leaves the question and countdown untouched.
    pub fn submit_answer(&mut self, raw: &str) -> Result<AnswerOutcome, EngineError> {
        if self.state != EngineState::AwaitingAnswer {
            return Err(EngineError::NotAwaitingAnswer);
        }
        let Some(question) = self.question.as_ref() else {
            return Err(EngineError::NotAwaitingAnswer);
        };

        let raw = raw.trim();
        let value: i64 = raw
            .parse()
            .map_err(|_| EngineError::InvalidInput(raw.to_string()))?;

        if !question.is_correct(value) {
            let expected = question.answer;
            self.end(EngineState::GameOver(GameOverReason::WrongAnswer));
            return Ok(AnswerOutcome::Wrong { expected });
        }

        self.score += 1;
        self.correct_in_level += 1;

        if self.correct_in_level < self.rules.questions_per_level {
            self.next_question();
            return Ok(AnswerOutcome::Correct { score: self.score });
        }

        self.correct_in_level = 0;

        // the level stays at max_level so a snapshot taken now restores as-is
        if self.level >= self.rules.max_level {
            self.question = None;
            self.end(EngineState::Completed);
            return Ok(AnswerOutcome::Completed { score: self.score });
        }

        self.level += 1;
        self.time_limit = self.rules.shrink(self.time_limit);

        info!(level = self.level, time_limit = self.time_limit, "level up");
        self.next_question();
        Ok(AnswerOutcome::LevelUp {
            score: self.score,
            level: self.level,
            time_limit: self.time_limit,
        })
    }

    /// Advance the countdown by one time unit.
    pub fn tick(&mut self) -> TimerEvent {
        if self.state != EngineState::AwaitingAnswer {
            return TimerEvent::Ignored;
        }

        self.time_remaining -= 1.0;
        if self.time_remaining <= 0.0 {
            self.time_remaining = 0.0;
            self.end(EngineState::GameOver(GameOverReason::TimeExpired));
            return TimerEvent::Expired;
        }

        TimerEvent::Running {
            remaining: self.time_remaining,
            fraction: self.time_fraction(),
            low_time: self.is_low_time(),
        }
    }

    /// Freeze the countdown. Returns `false` if no question was open.
    pub fn pause(&mut self) -> bool {
        if self.state != EngineState::AwaitingAnswer {
            return false;
        }
        self.state = EngineState::Paused;
        self.epoch += 1;
        true
    }

    /// Reopen the question with the time that was left at pause.
    pub fn resume(&mut self) -> bool {
        if self.state != EngineState::Paused {
            return false;
        }
        self.state = EngineState::AwaitingAnswer;
        self.epoch += 1;
        true
    }

    /// Current progress for saving.
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            score: self.score,
            level: self.level,
            time_limit: self.time_limit,
            correct_in_level: self.correct_in_level,
        }
    }

    fn next_question(&mut self) {
        let question = generate_question(&mut self.rng, self.level, &self.rules.operators);
        debug!(level = self.level, %question, "new question");
        self.question = Some(question);
        self.time_remaining = self.time_limit;
        self.epoch += 1;
    }

    fn end(&mut self, state: EngineState) {
        self.state = state;
        self.epoch += 1;
        match state {
            EngineState::GameOver(reason) => {
                info!(score = self.score, level = self.level, %reason, "game over")
            }
            EngineState::Completed => info!(score = self.score, "all levels cleared"),
            _ => {}
        }
    }

    fn fresh_progress(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            score: 0,
            level: 1,
            time_limit: self.rules.base_time_limit,
            correct_in_level: 0,
        }
    }

    /// Pull a restored snapshot back into the ranges the engine relies on.
    fn sanitize(&self, snapshot: ProgressSnapshot) -> ProgressSnapshot {
        let rules = &self.rules;
        let time_limit = if snapshot.time_limit.is_finite() {
            snapshot.time_limit.max(rules.min_time_limit)
        } else {
            rules.base_time_limit
        };
        let clean = ProgressSnapshot {
            score: snapshot.score,
            level: snapshot.level.clamp(1, rules.max_level),
            time_limit,
            correct_in_level: snapshot
                .correct_in_level
                .min(rules.questions_per_level - 1),
        };
        if clean != snapshot {
            warn!(?snapshot, ?clean, "saved progress out of range, clamped");
        }
        clean
    }
}

impl<R> QuizEngine<R> {
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn correct_in_level(&self) -> u32 {
        self.correct_in_level
    }

    pub fn time_limit(&self) -> f64 {
        self.time_limit
    }

    pub fn time_remaining(&self) -> f64 {
        self.time_remaining
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    /// Advances on every question and state change. A tick scheduled under
    /// an older epoch must not be delivered.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn time_fraction(&self) -> f64 {
        if self.time_limit > 0.0 {
            (self.time_remaining / self.time_limit).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn is_low_time(&self) -> bool {
        self.time_remaining <= LOW_TIME_THRESHOLD
    }
}

#[cfg(test)]
mod tests {
    use super::rules::{BASE_TIME_LIMIT, MAX_LEVEL, MIN_TIME_LIMIT, QUESTIONS_PER_LEVEL};
    use super::*;

    fn engine() -> QuizEngine {
        QuizEngine::with_rng(Rules::default(), StdRng::seed_from_u64(42))
    }

    fn answer_correctly<R: Rng>(engine: &mut QuizEngine<R>) -> AnswerOutcome {
        let answer = engine.current_question().unwrap().answer;
        engine.submit_answer(&answer.to_string()).unwrap()
    }

    fn clear_level<R: Rng>(engine: &mut QuizEngine<R>) -> AnswerOutcome {
        let mut last = None;
        for _ in 0..QUESTIONS_PER_LEVEL {
            last = Some(answer_correctly(engine));
        }
        last.unwrap()
    }

    #[test]
    fn fresh_session_defaults() {
        let engine = engine();
        assert_eq!(engine.state(), EngineState::AwaitingAnswer);
        assert_eq!(engine.snapshot(), ProgressSnapshot::default());
        assert_eq!(engine.time_remaining(), BASE_TIME_LIMIT);
        assert!(engine.current_question().is_some());
    }

    #[test]
    fn correct_answer_scores_one_point() {
        let mut engine = engine();
        let before = engine.epoch();
        assert_eq!(answer_correctly(&mut engine), AnswerOutcome::Correct { score: 1 });
        assert_eq!(engine.score(), 1);
        assert_eq!(engine.correct_in_level(), 1);
        assert!(engine.epoch() > before);
    }

    #[test]
    fn wrong_answer_ends_the_session() {
        let mut engine = engine();
        answer_correctly(&mut engine);
        let answer = engine.current_question().unwrap().answer;

        let outcome = engine.submit_answer(&(i64::from(answer) + 1).to_string());
        assert_eq!(outcome, Ok(AnswerOutcome::Wrong { expected: answer }));
        assert_eq!(
            engine.state(),
            EngineState::GameOver(GameOverReason::WrongAnswer)
        );
        assert_eq!(engine.score(), 1);
        assert_eq!(
            engine.submit_answer(&answer.to_string()),
            Err(EngineError::NotAwaitingAnswer)
        );
    }

    #[test]
    fn invalid_input_keeps_question_and_timer() {
        let mut engine = engine();
        engine.tick();
        let question = engine.current_question().cloned();
        let remaining = engine.time_remaining();
        let epoch = engine.epoch();

        assert_eq!(
            engine.submit_answer(" twelve "),
            Err(EngineError::InvalidInput("twelve".to_string()))
        );
        assert_eq!(engine.current_question().cloned(), question);
        assert_eq!(engine.time_remaining(), remaining);
        assert_eq!(engine.epoch(), epoch);
        assert_eq!(engine.state(), EngineState::AwaitingAnswer);
    }

    #[test]
    fn answer_text_is_trimmed() {
        let mut engine = engine();
        let answer = engine.current_question().unwrap().answer;
        assert!(matches!(
            engine.submit_answer(&format!("  {answer}\n")),
            Ok(AnswerOutcome::Correct { .. })
        ));
    }

    #[test]
    fn ten_correct_answers_level_up_once() {
        let mut engine = engine();
        for _ in 0..QUESTIONS_PER_LEVEL - 1 {
            answer_correctly(&mut engine);
            assert_eq!(engine.level(), 1);
            assert_eq!(engine.time_limit(), BASE_TIME_LIMIT);
        }

        match answer_correctly(&mut engine) {
            AnswerOutcome::LevelUp {
                score,
                level,
                time_limit,
            } => {
                assert_eq!(score, 10);
                assert_eq!(level, 2);
                assert!((time_limit - 13.5).abs() < 1e-9);
            }
            other => panic!("expected level up, got {other:?}"),
        }
        assert_eq!(engine.correct_in_level(), 0);
        assert!((engine.time_remaining() - 13.5).abs() < 1e-9);
    }

    #[test]
    fn time_limit_shrinks_to_floor_and_stays() {
        let mut engine = engine();
        let mut previous = engine.time_limit();
        for _ in 1..MAX_LEVEL {
            clear_level(&mut engine);
            assert!(engine.time_limit() <= previous);
            assert!(engine.time_limit() >= MIN_TIME_LIMIT);
            previous = engine.time_limit();
        }
        assert_eq!(engine.level(), MAX_LEVEL);
        assert_eq!(engine.time_limit(), MIN_TIME_LIMIT);
    }

    #[test]
    fn clearing_the_last_level_completes() {
        let mut engine = engine();
        for _ in 1..MAX_LEVEL {
            clear_level(&mut engine);
        }
        let outcome = clear_level(&mut engine);

        assert_eq!(
            outcome,
            AnswerOutcome::Completed {
                score: MAX_LEVEL * QUESTIONS_PER_LEVEL
            }
        );
        assert_eq!(engine.state(), EngineState::Completed);
        assert!(engine.current_question().is_none());
        assert_eq!(engine.tick(), TimerEvent::Ignored);
        assert_eq!(engine.level(), MAX_LEVEL);
    }

    #[test]
    fn countdown_expires_after_ceil_time_limit_ticks() {
        let mut engine = engine();
        for _ in 0..14 {
            assert!(matches!(engine.tick(), TimerEvent::Running { .. }));
        }
        assert_eq!(engine.tick(), TimerEvent::Expired);
        assert_eq!(
            engine.state(),
            EngineState::GameOver(GameOverReason::TimeExpired)
        );
    }

    #[test]
    fn fractional_limit_rounds_up_tick_count() {
        let mut engine = engine();
        clear_level(&mut engine);
        let ticks = engine.time_limit().ceil() as u32;
        assert_eq!(ticks, 14);

        for _ in 1..ticks {
            assert!(matches!(engine.tick(), TimerEvent::Running { .. }));
        }
        assert_eq!(engine.tick(), TimerEvent::Expired);
    }

    #[test]
    fn tick_reports_fraction_and_low_time() {
        let mut engine = engine();
        for _ in 0..9 {
            engine.tick();
        }
        assert_eq!(
            engine.tick(),
            TimerEvent::Running {
                remaining: 5.0,
                fraction: 5.0 / 15.0,
                low_time: true,
            }
        );

        let mut engine = self::engine();
        match engine.tick() {
            TimerEvent::Running { low_time, .. } => assert!(!low_time),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn answering_resets_the_countdown() {
        let mut engine = engine();
        engine.tick();
        engine.tick();
        answer_correctly(&mut engine);
        assert_eq!(engine.time_remaining(), BASE_TIME_LIMIT);
    }

    #[test]
    fn pause_freezes_the_session() {
        let mut engine = engine();
        engine.tick();
        assert!(engine.pause());
        assert!(!engine.pause());

        assert_eq!(engine.tick(), TimerEvent::Ignored);
        assert_eq!(engine.submit_answer("1"), Err(EngineError::NotAwaitingAnswer));
        assert_eq!(engine.time_remaining(), BASE_TIME_LIMIT - 1.0);

        assert!(engine.resume());
        assert_eq!(engine.state(), EngineState::AwaitingAnswer);
        assert_eq!(engine.time_remaining(), BASE_TIME_LIMIT - 1.0);
    }

    #[test]
    fn pause_and_resume_advance_the_epoch() {
        let mut engine = engine();
        let start = engine.epoch();
        engine.pause();
        let paused = engine.epoch();
        engine.resume();
        assert!(start < paused && paused < engine.epoch());
    }

    #[test]
    fn snapshot_round_trips_through_start_session() {
        let mut engine = engine();
        clear_level(&mut engine);
        for _ in 0..3 {
            answer_correctly(&mut engine);
        }
        engine.tick();
        let snapshot = engine.snapshot();

        let mut restored = QuizEngine::with_rng(Rules::default(), StdRng::seed_from_u64(1));
        restored.start_session(Some(snapshot));
        assert_eq!(restored.snapshot(), snapshot);
        assert_eq!(restored.time_remaining(), snapshot.time_limit);
        assert_eq!(restored.state(), EngineState::AwaitingAnswer);
    }

    #[test]
    fn restored_snapshot_is_clamped() {
        let mut engine = engine();
        engine.start_session(Some(ProgressSnapshot {
            score: 7,
            level: 99,
            time_limit: 0.5,
            correct_in_level: 42,
        }));
        assert_eq!(
            engine.snapshot(),
            ProgressSnapshot {
                score: 7,
                level: MAX_LEVEL,
                time_limit: MIN_TIME_LIMIT,
                correct_in_level: QUESTIONS_PER_LEVEL - 1,
            }
        );
    }

    #[test]
    fn restart_resets_everything() {
        let mut engine = engine();
        clear_level(&mut engine);
        engine.submit_answer("-1").unwrap();

        engine.restart();
        assert_eq!(engine.snapshot(), ProgressSnapshot::default());
        assert_eq!(engine.state(), EngineState::AwaitingAnswer);
    }

    #[test]
    fn reduced_rules_complete_early() {
        let rules = Rules {
            max_level: 1,
            questions_per_level: 2,
            operators: vec![crate::models::Operator::Add],
            ..Rules::default()
        };
        let mut engine = QuizEngine::with_rng(rules, StdRng::seed_from_u64(9));
        assert_eq!(answer_correctly(&mut engine), AnswerOutcome::Correct { score: 1 });
        assert_eq!(answer_correctly(&mut engine), AnswerOutcome::Completed { score: 2 });
    }

    #[test]
    fn snapshot_after_completion_restores_unchanged() {
        let rules = Rules {
            max_level: 1,
            questions_per_level: 1,
            ..Rules::default()
        };
        let mut engine = QuizEngine::with_rng(rules.clone(), StdRng::seed_from_u64(4));
        assert_eq!(answer_correctly(&mut engine), AnswerOutcome::Completed { score: 1 });

        let snap = engine.snapshot();
        assert_eq!(snap.level, 1);

        let mut restored = QuizEngine::with_rng(rules, StdRng::seed_from_u64(5));
        restored.start_session(Some(snap));
        assert_eq!(restored.snapshot(), snap);
    }
}
