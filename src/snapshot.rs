//! JSON export of a game's levels, submissions, and profiles.

use serde::{Deserialize, Serialize};

use crate::leaderboard::{EngineConfig, Leaderboard};
use crate::model::{Level, Profile, Submission};
use crate::AppResult;

/// Everything the engine needs for one game, as exported by the data store.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct Snapshot {
    pub levels: Vec<Level>,
    #[serde(default)]
    pub submissions: Vec<Submission>,
    #[serde(default)]
    pub profiles: Vec<Profile>,
}

impl Snapshot {
    pub fn from_json(json: &str) -> AppResult<Self> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        tracing::debug!(
            levels = snapshot.levels.len(),
            submissions = snapshot.submissions.len(),
            profiles = snapshot.profiles.len(),
            "Parsed snapshot.",
        );
        Ok(snapshot)
    }

    /// Splits the snapshot into a leaderboard and its submissions.
    pub fn into_leaderboard(self, config: EngineConfig) -> (Leaderboard, Vec<Submission>) {
        let Self {
            levels,
            submissions,
            profiles,
        } = self;
        (
            Leaderboard::new(levels, profiles).with_config(config),
            submissions,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, LevelId, Metric};
    use crate::sort_mode::SortMode;
    use crate::AppError;

    const SNAPSHOT: &str = r#"{
        "levels": [
            { "id": 1, "name": "L1", "mode": "M", "order_index": 0 }
        ],
        "submissions": [
            { "id": 1, "level_id": 1, "user_id": 10, "time_ms": 10, "submitted_at": "2024-03-02T00:00:00Z" },
            { "id": 2, "level_id": 1, "user_id": 10, "time_ms": 20, "submitted_at": "2024-03-01T00:00:00Z" },
            { "id": 3, "level_id": 1, "user_id": 20, "time_ms": 10, "submitted_at": "2024-03-03T00:00:00Z" },
            { "id": 4, "level_id": 1, "user_id": 30, "time_ms": 5, "submitted_at": "2024-03-04T00:00:00Z", "assisted": true }
        ],
        "profiles": [
            { "id": 10, "username": "A" },
            { "id": 20, "username": "B" }
        ]
    }"#;

    #[test]
    fn parses_and_builds_records() -> AppResult {
        let snapshot = Snapshot::from_json(SNAPSHOT)?;
        assert_eq!(snapshot.submissions.len(), 4);
        assert_eq!(snapshot.submissions[0].score, None);
        assert!(snapshot.submissions[3].assisted);

        let (board, submissions) = snapshot.into_leaderboard(EngineConfig {
            verify_ordering: true,
        });
        let table =
            board.records(&submissions, Category::Unassisted, Metric::Time, SortMode::Time)?;
        let entry = &table.get("M").unwrap_or_default()[0];
        assert_eq!(entry.level_id, LevelId(1));
        assert_eq!(entry.record, Some(10));
        let holders: Vec<&str> = entry.tied_users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(holders, ["A", "B"]);
        Ok(())
    }

    #[test]
    fn submissions_and_profiles_are_optional() -> AppResult {
        let snapshot = Snapshot::from_json(r#"{ "levels": [] }"#)?;
        assert!(snapshot.submissions.is_empty());
        assert!(snapshot.profiles.is_empty());
        Ok(())
    }

    #[test]
    fn rejects_malformed_json() {
        let result = Snapshot::from_json(r#"{ "levels": [{ "id": "one" }] }"#);
        assert!(matches!(result, Err(AppError::Json(_))));
    }
}
