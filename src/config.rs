//! Game configuration.
//!
//! Loaded from an optional TOML file; every field has a default so an empty
//! file (or no file) is a valid configuration. Relative file names are
//! resolved against `data_dir`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::engine::Rules;
use crate::error::ConfigError;
use crate::storage::DEFAULT_LEADERBOARD_SIZE;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Directory holding the data and log files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_users_file")]
    pub users_file: PathBuf,
    #[serde(default = "default_progress_file")]
    pub progress_file: PathBuf,
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
    /// Length of one countdown unit in milliseconds.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default = "default_leaderboard_size")]
    pub leaderboard_size: usize,
    #[serde(default)]
    pub rules: Rules,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_users_file() -> PathBuf {
    PathBuf::from("math_game_users.json")
}
fn default_progress_file() -> PathBuf {
    PathBuf::from("math_game_state.json")
}
fn default_log_file() -> PathBuf {
    PathBuf::from("math_quiz.log")
}
fn default_tick_interval_ms() -> u64 {
    1000
}
fn default_leaderboard_size() -> usize {
    DEFAULT_LEADERBOARD_SIZE
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            users_file: default_users_file(),
            progress_file: default_progress_file(),
            log_file: default_log_file(),
            tick_interval_ms: default_tick_interval_ms(),
            leaderboard_size: default_leaderboard_size(),
            rules: Rules::default(),
        }
    }
}

impl GameConfig {
    /// Load the file at `path`, or use defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.rules.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join(&self.users_file)
    }

    pub fn progress_path(&self) -> PathBuf {
        self.data_dir.join(&self.progress_file)
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(&self.log_file)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Operator;

    #[test]
    fn no_file_means_defaults() {
        let config = GameConfig::load(None).unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.users_path(), Path::new("./math_game_users.json"));
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
    }

    #[test]
    fn file_overrides_selected_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quiz.toml");
        fs::write(
            &path,
            r#"
            data_dir = "/var/games"
            leaderboard_size = 10

            [rules]
            max_level = 5
            operators = ["add", "subtract", "multiply"]
            "#,
        )
        .unwrap();

        let config = GameConfig::load(Some(&path)).unwrap();
        assert_eq!(config.progress_path(), Path::new("/var/games/math_game_state.json"));
        assert_eq!(config.leaderboard_size, 10);
        assert_eq!(config.rules.max_level, 5);
        assert!(!config.rules.operators.contains(&Operator::Divide));
        assert_eq!(config.tick_interval_ms, 1000);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = GameConfig::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn invalid_rules_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quiz.toml");
        fs::write(&path, "[rules]\noperators = []\n").unwrap();

        let err = GameConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRules(_)));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quiz.toml");
        fs::write(&path, "leaderboard_size = \"many\"").unwrap();

        let err = GameConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
