//! Error types, one enum per concern.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by the quiz engine. Neither ends a session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// The answer text is not an integer. The question and timer stay as
    /// they were so the player can resubmit.
    #[error("not a number: {0:?}")]
    InvalidInput(String),

    /// An answer arrived while no question was open (paused or ended).
    #[error("no question is waiting for an answer")]
    NotAwaitingAnswer,
}

/// Failures reading or writing one of the JSON data files.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot encode {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Login and registration failures.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("username is already taken")]
    DuplicateUsername,

    #[error("wrong username or password")]
    AuthFailure,

    #[error("username and password are both required")]
    EmptyCredentials,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Problems with the configuration file or the rules it declares.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid rules: {0}")]
    InvalidRules(&'static str),
}
