use serde::{Deserialize, Serialize};

use crate::engine::rules::BASE_TIME_LIMIT;

/// Serializable capture of session progress, stored per username for
/// pause/resume.
///
/// Older save files do not carry `correct_cnt`; it loads as 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub score: u32,
    pub level: u32,
    pub time_limit: f64,
    #[serde(rename = "correct_cnt", default)]
    pub correct_in_level: u32,
}

impl Default for ProgressSnapshot {
    fn default() -> Self {
        Self {
            score: 0,
            level: 1,
            time_limit: BASE_TIME_LIMIT,
            correct_in_level: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_correct_cnt_defaults_to_zero() {
        let json = r#"{"score": 12, "level": 2, "time_limit": 13.5}"#;
        let snapshot: ProgressSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.score, 12);
        assert_eq!(snapshot.level, 2);
        assert_eq!(snapshot.correct_in_level, 0);
    }

    #[test]
    fn writes_the_on_disk_field_names() {
        let snapshot = ProgressSnapshot {
            score: 3,
            level: 1,
            time_limit: 15.0,
            correct_in_level: 3,
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"correct_cnt\":3"));
        assert!(json.contains("\"time_limit\":15.0"));
    }
}
