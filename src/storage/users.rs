//! Registered players and their high scores.

use std::cmp::Reverse;
use std::path::PathBuf;

use tracing::info;

use crate::error::{AccountError, StorageError};
use crate::models::{LeaderboardEntry, UserRecord};

use super::json::JsonMap;

/// Default number of rows on the leaderboard.
pub const DEFAULT_LEADERBOARD_SIZE: usize = 5;

#[derive(Debug)]
pub struct UserStore {
    users: JsonMap<UserRecord>,
}

impl UserStore {
    /// Load the users file at `path`. A missing or corrupt file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            users: JsonMap::open(path),
        }
    }

    /// A store that keeps everything in memory.
    pub fn in_memory() -> Self {
        Self {
            users: JsonMap::in_memory(),
        }
    }

    pub fn len(&self) -> usize {
        self.users.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.entries().is_empty()
    }

    pub fn get(&self, username: &str) -> Option<&UserRecord> {
        self.users.entries().get(username)
    }

    pub fn authenticate(&self, username: &str, password: &str) -> bool {
        self.get(username)
            .is_some_and(|user| user.password == password)
    }

    /// Same as [`authenticate`](Self::authenticate), as a `Result`.
    pub fn login(&self, username: &str, password: &str) -> Result<(), AccountError> {
        if self.authenticate(username, password) {
            info!(username, "login");
            Ok(())
        } else {
            Err(AccountError::AuthFailure)
        }
    }

    /// Create an account with a high score of 0. Usernames are
    /// case-sensitive. Nothing is kept if the file cannot be written.
    pub fn register(&mut self, username: &str, password: &str) -> Result<(), AccountError> {
        if username.trim().is_empty() || password.trim().is_empty() {
            return Err(AccountError::EmptyCredentials);
        }
        if self.users.entries().contains_key(username) {
            return Err(AccountError::DuplicateUsername);
        }

        self.users
            .entries_mut()
            .insert(username.to_string(), UserRecord::new(password));
        if let Err(err) = self.users.flush() {
            self.users.entries_mut().remove(username);
            return Err(err.into());
        }
        info!(username, "registered");
        Ok(())
    }

    pub fn high_score(&self, username: &str) -> Option<u32> {
        self.get(username).map(|user| user.high_score)
    }

    /// Raise the stored high score to `score`. Lower scores and unknown
    /// users are ignored. Returns whether anything changed. On a failed
    /// write the old high score is kept.
    pub fn update_score(&mut self, username: &str, score: u32) -> Result<bool, StorageError> {
        let Some(user) = self.users.entries_mut().get_mut(username) else {
            return Ok(false);
        };
        if score <= user.high_score {
            return Ok(false);
        }

        let previous = std::mem::replace(&mut user.high_score, score);
        if let Err(err) = self.users.flush() {
            if let Some(user) = self.users.entries_mut().get_mut(username) {
                user.high_score = previous;
            }
            return Err(err);
        }
        Ok(true)
    }

    /// The `n` best players, highest score first. Equal scores keep
    /// username order.
    pub fn top_scores(&self, n: usize) -> Vec<LeaderboardEntry> {
        let mut ranked: Vec<_> = self.users.entries().iter().collect();
        ranked.sort_by_key(|(_, user)| Reverse(user.high_score));

        ranked
            .into_iter()
            .take(n)
            .enumerate()
            .map(|(i, (username, user))| LeaderboardEntry {
                rank: i + 1,
                username: username.clone(),
                high_score: user.high_score,
            })
            .collect()
    }
}
