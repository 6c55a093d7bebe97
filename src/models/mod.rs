mod progress;
mod question;
mod user;

pub use progress::ProgressSnapshot;
pub use question::{Operator, Question};
pub use user::{LeaderboardEntry, UserRecord};
