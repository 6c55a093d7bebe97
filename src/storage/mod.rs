//! JSON-backed stores for players and saved progress.
//!
//! Each store reads its whole file once when opened and writes it back
//! after every change. Nothing guards against another process editing the
//! same file.

mod json;
mod progress;
mod users;

pub use json::{load_json, save_json};
pub use progress::ProgressStore;
pub use users::{DEFAULT_LEADERBOARD_SIZE, UserStore};
