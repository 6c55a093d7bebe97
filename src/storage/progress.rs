//! Saved in-progress sessions, at most one per username.

use std::path::PathBuf;

use tracing::info;

use crate::error::StorageError;
use crate::models::ProgressSnapshot;

use super::json::JsonMap;

#[derive(Debug)]
pub struct ProgressStore {
    states: JsonMap<ProgressSnapshot>,
}

impl ProgressStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            states: JsonMap::open(path),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            states: JsonMap::in_memory(),
        }
    }

    pub fn get(&self, username: &str) -> Option<ProgressSnapshot> {
        self.states.entries().get(username).copied()
    }

    /// Store `snapshot` for `username`, replacing any earlier one. If the
    /// file cannot be written the earlier snapshot stays in place.
    pub fn save(&mut self, username: &str, snapshot: ProgressSnapshot) -> Result<(), StorageError> {
        let previous = self
            .states
            .entries_mut()
            .insert(username.to_string(), snapshot);
        if let Err(err) = self.states.flush() {
            self.restore(username, previous);
            return Err(err);
        }
        info!(username, level = snapshot.level, score = snapshot.score, "progress saved");
        Ok(())
    }

    /// Drop the snapshot for `username`. Does not write if there was none.
    pub fn clear(&mut self, username: &str) -> Result<(), StorageError> {
        let Some(removed) = self.states.entries_mut().remove(username) else {
            return Ok(());
        };
        if let Err(err) = self.states.flush() {
            self.restore(username, Some(removed));
            return Err(err);
        }
        info!(username, "progress cleared");
        Ok(())
    }

    fn restore(&mut self, username: &str, snapshot: Option<ProgressSnapshot>) {
        let entries = self.states.entries_mut();
        match snapshot {
            Some(snapshot) => {
                entries.insert(username.to_string(), snapshot);
            }
            None => {
                entries.remove(username);
            }
        }
    }
}
