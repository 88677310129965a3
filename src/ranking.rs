//! Ranked leaderboard for a single level.

use itertools::Itertools;
use serde::Serialize;

use crate::model::{Direction, LevelId, Metric, ProfileDirectory, PublicUser, Submission};

/// Current submission on a level, plus its rank.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RankedSubmission {
    pub rank: i64,
    pub user: PublicUser,
    pub submission: Submission,
}

/// Ranks the current submissions on `level_id` by `metric`.
///
/// `current` must contain at most one submission per user per level (see
/// [`crate::dedup::remove_obsolete()`]); any order is accepted. Submissions
/// without a value for `metric` are left out. Equal values share a rank and
/// the following rank is skipped (1, 2, 2, 4).
pub fn rank_level(
    current: &[Submission],
    level_id: LevelId,
    metric: Metric,
    direction: Direction,
    profiles: &ProfileDirectory,
) -> Vec<RankedSubmission> {
    let mut ranked: Vec<RankedSubmission> = Vec::new();
    let sorted = current
        .iter()
        .filter(|s| s.level_id == level_id && s.metric_value(metric).is_some())
        .sorted_by_key(|s| s.record_sort_key(metric, direction));

    for (i, submission) in sorted.enumerate() {
        let rank = match ranked.last() {
            Some(prev)
                if prev.submission.metric_value(metric) == submission.metric_value(metric) =>
            {
                prev.rank
            }
            _ => i as i64 + 1,
        };
        ranked.push(RankedSubmission {
            rank,
            user: profiles.public_user(submission.user_id),
            submission: submission.clone(),
        });
    }
    ranked
}
