use serde::{Deserialize, Serialize};

/// A registered player. The username is the key of the users map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Stored as typed; hardening is out of scope for this game.
    pub password: String,
    #[serde(rename = "score", default)]
    pub high_score: u32,
}

impl UserRecord {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            high_score: 0,
        }
    }
}

/// One row of the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub username: String,
    pub high_score: u32,
}
