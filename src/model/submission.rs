use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Direction, LevelId, Metric, UserId};

id_struct!(SubmissionId, "submission");
/// Attempt on a level, as supplied by the data store.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub id: SubmissionId,
    pub level_id: LevelId,
    pub user_id: UserId,

    // Score
    #[serde(default)]
    pub score: Option<i64>,
    /// Completion time in milliseconds.
    #[serde(default)]
    pub time_ms: Option<i64>,

    pub submitted_at: DateTime<Utc>,
    /// Whether the run used assistance. Assisted and unassisted runs are
    /// ranked separately.
    #[serde(default)]
    pub assisted: bool,
}

impl Submission {
    /// Returns the value compared for `metric`, if the submission has one.
    pub fn metric_value(&self, metric: Metric) -> Option<i64> {
        match metric {
            Metric::Score => self.score,
            Metric::Time => self.time_ms,
        }
    }

    /// Returns the pair that identifies a user's entry on a level.
    pub fn level_user(&self) -> (LevelId, UserId) {
        (self.level_id, self.user_id)
    }

    /// Returns the key by which to sort submissions before removing obsolete
    /// ones.
    pub fn history_sort_key(&self) -> impl Ord {
        // Most recent first within each (level, user) pair. Submissions with
        // the same timestamp fall back to the later-created one.
        (
            self.level_id,
            self.user_id,
            Reverse(self.submitted_at),
            Reverse(self.id),
        )
    }

    /// Returns the key by which to sort submissions within a level's
    /// leaderboard.
    pub fn record_sort_key(&self, metric: Metric, direction: Direction) -> impl Ord {
        // Sort by value first and use submission date and ID as tiebreakers.
        let value = self.metric_value(metric);
        (
            value.is_none(),
            value.map(|v| direction.sort_key(v)),
            self.submitted_at,
            self.id,
        )
    }
}


#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::fixtures::submission;
    use super::*;

    #[test]
    fn history_order_puts_newest_first() {
        let sorted = [
            submission(1, 1, 1, 10, 100),
            submission(2, 1, 1, 10, 300),
            submission(3, 1, 0, 10, 200),
        ]
        .into_iter()
        .sorted_by_key(|s| s.history_sort_key())
        .map(|s| s.id.0)
        .collect_vec();
        assert_eq!(sorted, [3, 2, 1]);
    }

    #[test]
    fn record_order_puts_missing_values_last() {
        let mut missing = submission(1, 1, 1, 0, 0);
        missing.time_ms = None;
        let sorted = [missing, submission(2, 1, 2, 50, 10), submission(3, 1, 3, 40, 20)]
            .into_iter()
            .sorted_by_key(|s| s.record_sort_key(Metric::Time, Direction::Ascending))
            .map(|s| s.id.0)
            .collect_vec();
        assert_eq!(sorted, [3, 2, 1]);
    }
}
