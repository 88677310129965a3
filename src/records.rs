//! Per-mode record tables: the best value on every level and everyone tied
//! at it.

use std::collections::{HashMap, HashSet};

use itertools::Itertools;
use serde::Serialize;

use crate::error::InvariantViolation;
use crate::model::{Direction, Level, LevelId, Metric, ProfileDirectory, PublicUser, Submission};

/// Record on a single level.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RecordEntry {
    pub level_id: LevelId,
    pub level_name: String,
    /// Best value on the level, or `None` if nobody has a value for it.
    pub record: Option<i64>,
    /// Every user whose current submission equals `record`, in leaderboard
    /// order.
    pub tied_users: Vec<PublicUser>,
}

/// Entries for all levels in one mode.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ModeRecords<E> {
    pub mode: String,
    pub entries: Vec<E>,
}

/// Record entries grouped by mode. Modes are kept in the order they first
/// appear among the levels, and entries in the order of the levels.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct RecordTable<E = RecordEntry> {
    modes: Vec<ModeRecords<E>>,
}

impl<E> RecordTable<E> {
    /// Creates a table with an empty entry list for every distinct mode.
    fn with_modes<'a>(modes: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            modes: modes
                .into_iter()
                .unique()
                .map(|mode| ModeRecords {
                    mode: mode.to_string(),
                    entries: vec![],
                })
                .collect(),
        }
    }

    /// Returns the entries for `mode`.
    pub fn get(&self, mode: &str) -> Option<&[E]> {
        self.modes
            .iter()
            .find(|m| m.mode == mode)
            .map(|m| m.entries.as_slice())
    }

    pub fn modes(&self) -> impl Iterator<Item = &ModeRecords<E>> {
        self.modes.iter()
    }

    /// Iterates over every entry, mode by mode.
    pub fn entries(&self) -> impl Iterator<Item = &E> {
        self.modes.iter().flat_map(|m| &m.entries)
    }
}

/// Builds the record table for `metric`.
///
/// `submissions` must contain at most one submission per user per level
/// (see [`crate::dedup::remove_obsolete()`]) and must be sorted to match
/// `levels`: grouped by level in the same order as `levels`, best value first
/// within each level. [`sort_for_records()`] establishes this order. The first
/// submission on each level is taken as the record.
///
/// Every level gets an entry, even if it has no submissions.
pub fn build_record_table(
    levels: &[Level],
    submissions: &[Submission],
    metric: Metric,
    profiles: &ProfileDirectory,
) -> RecordTable {
    let mut table = RecordTable::with_modes(levels.iter().map(|l| l.mode.as_str()));
    let mode_index: HashMap<&str, usize> = table
        .modes
        .iter()
        .enumerate()
        .map(|(i, m)| (m.mode.as_str(), i))
        .collect();
    let mut entries_by_mode: Vec<Vec<RecordEntry>> = vec![vec![]; table.modes.len()];

    let mut j = 0;
    for level in levels {
        let on_level = |j: usize| submissions.get(j).filter(|s| s.level_id == level.id);

        let record = on_level(j).and_then(|best| best.metric_value(metric));
        let mut tied_users = vec![];
        while let Some(submission) = on_level(j) {
            if record.is_some() && submission.metric_value(metric) == record {
                tied_users.push(profiles.public_user(submission.user_id));
            }
            j += 1;
        }

        if let Some(&i) = mode_index.get(level.mode.as_str()) {
            entries_by_mode[i].push(RecordEntry {
                level_id: level.id,
                level_name: level.name.clone(),
                record,
                tied_users,
            });
        }
    }

    for (mode, entries) in table.modes.iter_mut().zip(entries_by_mode) {
        mode.entries = entries;
    }

    tracing::trace!(
        %metric,
        levels = levels.len(),
        submissions = submissions.len(),
        consumed = j,
        "Built record table.",
    );
    table
}

/// Same as [`build_record_table()`], but first verifies that `submissions`
/// are ordered for `direction` and contain one submission per user per
/// level.
pub fn build_record_table_checked(
    levels: &[Level],
    submissions: &[Submission],
    metric: Metric,
    direction: Direction,
    profiles: &ProfileDirectory,
) -> Result<RecordTable, InvariantViolation> {
    check_record_order(levels, submissions, metric, direction)?;
    Ok(build_record_table(levels, submissions, metric, profiles))
}

/// Returns an error describing the first submission that is out of order for
/// [`build_record_table()`].
pub fn check_record_order(
    levels: &[Level],
    submissions: &[Submission],
    metric: Metric,
    direction: Direction,
) -> Result<(), InvariantViolation> {
    let violation = |index: usize, message: String| {
        tracing::warn!(index, %message, "Record submissions are out of order.");
        Err(InvariantViolation::new("build_record_table", index, message))
    };

    let level_positions = level_positions(levels);
    let mut seen = HashSet::new();
    let mut previous: Option<(usize, &Submission)> = None;

    for (i, submission) in submissions.iter().enumerate() {
        let Some(&position) = level_positions.get(&submission.level_id) else {
            return violation(
                i,
                format!("level {} is not in the level list", submission.level_id),
            );
        };
        if !seen.insert(submission.level_user()) {
            return violation(
                i,
                format!(
                    "user {} has more than one submission on level {}",
                    submission.user_id, submission.level_id,
                ),
            );
        }

        if let Some((previous_position, prev)) = previous {
            if position < previous_position {
                return violation(
                    i,
                    format!(
                        "level {} appears after level {}",
                        submission.level_id, prev.level_id,
                    ),
                );
            }
            if position == previous_position
                && !direction
                    .precedes_or_ties(prev.metric_value(metric), submission.metric_value(metric))
            {
                return violation(
                    i,
                    format!(
                        "{metric} {:?} on level {} is better than the {:?} before it",
                        submission.metric_value(metric),
                        submission.level_id,
                        prev.metric_value(metric),
                    ),
                );
            }
        }
        previous = Some((position, submission));
    }
    Ok(())
}

/// Sorts submissions into the order [`build_record_table()`] expects.
///
/// Submissions on levels that are not in `levels` are removed.
pub fn sort_for_records(
    submissions: &mut Vec<Submission>,
    levels: &[Level],
    metric: Metric,
    direction: Direction,
) {
    let level_positions = level_positions(levels);
    submissions.retain(|s| level_positions.contains_key(&s.level_id));
    submissions.sort_by_cached_key(|s| {
        (
            level_positions.get(&s.level_id).copied(),
            s.record_sort_key(metric, direction),
        )
    });
}

/// Returns the first position of each level in `levels`.
fn level_positions(levels: &[Level]) -> HashMap<LevelId, usize> {
    let mut positions = HashMap::with_capacity(levels.len());
    for (i, level) in levels.iter().enumerate() {
        positions.entry(level.id).or_insert(i);
    }
    positions
}

/// Score and time records on a single level.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CombinedRecordEntry {
    pub level_id: LevelId,
    pub level_name: String,

    pub score_record: Option<i64>,
    pub score_holders: Vec<PublicUser>,

    pub time_record: Option<i64>,
    pub time_holders: Vec<PublicUser>,
}

pub type CombinedRecordTable = RecordTable<CombinedRecordEntry>;

/// Merges a score table and a time table into one table with both records
/// per level.
///
/// Modes and levels follow `score`; anything only present in `time` is
/// appended after it.
pub fn merge_record_tables(score: &RecordTable, time: &RecordTable) -> CombinedRecordTable {
    let mut time_entries: HashMap<LevelId, &RecordEntry> =
        time.entries().map(|e| (e.level_id, e)).collect();

    let mut merged = CombinedRecordTable::with_modes(
        score
            .modes()
            .chain(time.modes())
            .map(|m| m.mode.as_str()),
    );

    for (mode, target) in score.modes().zip(&mut merged.modes) {
        for entry in &mode.entries {
            let time_entry = time_entries.remove(&entry.level_id);
            target.entries.push(CombinedRecordEntry {
                level_id: entry.level_id,
                level_name: entry.level_name.clone(),
                score_record: entry.record,
                score_holders: entry.tied_users.clone(),
                time_record: time_entry.and_then(|e| e.record),
                time_holders: time_entry.map(|e| e.tied_users.clone()).unwrap_or_default(),
            });
        }
    }

    for mode in time.modes() {
        let Some(target) = merged.modes.iter_mut().find(|m| m.mode == mode.mode) else {
            continue;
        };
        for entry in &mode.entries {
            if time_entries.remove(&entry.level_id).is_some() {
                target.entries.push(CombinedRecordEntry {
                    level_id: entry.level_id,
                    level_name: entry.level_name.clone(),
                    score_record: None,
                    score_holders: vec![],
                    time_record: entry.record,
                    time_holders: entry.tied_users.clone(),
                });
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dedup::remove_obsolete;
    use crate::model::fixtures::submission;
    use crate::model::{Profile, UserId};

    fn level(id: i64, mode: &str) -> Level {
        Level {
            id: LevelId(id),
            name: format!("L{id}"),
            mode: mode.to_string(),
            order_index: id as i32,
        }
    }

    fn profiles() -> ProfileDirectory {
        [(1, "A"), (2, "B"), (3, "C"), (4, "D")]
            .into_iter()
            .map(|(id, username)| Profile {
                id: UserId(id),
                username: username.to_string(),
            })
            .collect()
    }

    fn usernames(entry: &RecordEntry) -> Vec<&str> {
        entry.tied_users.iter().map(|u| u.username.as_str()).collect()
    }

    #[test]
    fn scenario_tied_record() -> Result<(), InvariantViolation> {
        let levels = [level(1, "M")];
        let mut current = remove_obsolete(vec![
            submission(1, 1, 1, 10, 2),
            submission(2, 1, 1, 20, 1),
            submission(3, 1, 2, 10, 3),
        ]);
        sort_for_records(&mut current, &levels, Metric::Time, Direction::Ascending);

        let table = build_record_table_checked(
            &levels,
            &current,
            Metric::Time,
            Direction::Ascending,
            &profiles(),
        )?;
        let entries = table.get("M").unwrap_or_default();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level_name, "L1");
        assert_eq!(entries[0].record, Some(10));
        assert_eq!(usernames(&entries[0]), ["A", "B"]);
        Ok(())
    }

    #[test]
    fn level_without_submissions_has_no_record() {
        let levels = [level(1, "M"), level(2, "M")];
        let submissions = [submission(1, 2, 1, 5, 0)];
        let table = build_record_table(&levels, &submissions, Metric::Score, &profiles());

        let entries = table.get("M").unwrap_or_default();
        assert_eq!(entries[0].record, None);
        assert!(entries[0].tied_users.is_empty());
        assert_eq!(entries[1].record, Some(5));
        assert_eq!(usernames(&entries[1]), ["A"]);
    }

    #[test]
    fn worse_values_are_consumed_but_not_listed() {
        let levels = [level(1, "M"), level(2, "M")];
        // Descending score: 30, 30, 20 on level 1; 7 on level 2.
        let submissions = [
            submission(1, 1, 3, 30, 5),
            submission(2, 1, 1, 30, 9),
            submission(3, 1, 2, 20, 1),
            submission(4, 2, 2, 7, 1),
        ];
        let table = build_record_table(&levels, &submissions, Metric::Score, &profiles());

        let entries = table.get("M").unwrap_or_default();
        assert_eq!(entries[0].record, Some(30));
        assert_eq!(usernames(&entries[0]), ["C", "A"]);
        assert_eq!(entries[1].record, Some(7));
        assert_eq!(usernames(&entries[1]), ["B"]);
    }

    #[test]
    fn one_entry_per_level_grouped_by_mode() {
        let levels = [level(1, "Normal"), level(2, "Hard"), level(3, "Normal"), level(4, "Hard")];
        let table = build_record_table(&levels, &[], Metric::Time, &profiles());

        assert_eq!(table.entries().count(), levels.len());
        assert_eq!(
            table.modes().map(|m| m.mode.as_str()).collect_vec(),
            ["Normal", "Hard"],
        );
        let normal = table.get("Normal").unwrap_or_default();
        assert_eq!(normal.iter().map(|e| e.level_id.0).collect_vec(), [1, 3]);
        let hard = table.get("Hard").unwrap_or_default();
        assert_eq!(hard.iter().map(|e| e.level_id.0).collect_vec(), [2, 4]);
        assert!(table.get("Extreme").is_none());
    }

    #[test]
    fn tie_group_is_complete() {
        let levels = [level(1, "M"), level(2, "M"), level(3, "N")];
        let mut submissions = vec![
            submission(1, 1, 1, 12, 0),
            submission(2, 1, 2, 9, 0),
            submission(3, 1, 3, 9, 0),
            submission(4, 1, 4, 15, 0),
            submission(5, 2, 1, 3, 0),
            submission(6, 2, 2, 4, 0),
            submission(7, 3, 3, 8, 0),
            submission(8, 3, 4, 8, 0),
        ];
        sort_for_records(&mut submissions, &levels, Metric::Time, Direction::Ascending);
        let table = build_record_table(&levels, &submissions, Metric::Time, &profiles());

        for entry in table.entries() {
            let record = entry.record;
            let tied: HashSet<UserId> = entry.tied_users.iter().map(|u| u.user_id).collect();
            for s in submissions.iter().filter(|s| s.level_id == entry.level_id) {
                assert_eq!(tied.contains(&s.user_id), s.time_ms == record);
            }
        }
    }

    #[test]
    fn missing_values_never_hold_records() {
        let levels = [level(1, "M"), level(2, "M")];
        let mut no_score = submission(1, 1, 1, 0, 0);
        no_score.score = None;
        let mut also_no_score = submission(2, 1, 2, 0, 0);
        also_no_score.score = None;
        let mut submissions = vec![no_score, also_no_score, submission(3, 2, 3, 0, 0)];
        sort_for_records(&mut submissions, &levels, Metric::Score, Direction::Descending);

        let table = build_record_table(&levels, &submissions, Metric::Score, &profiles());
        let entries = table.get("M").unwrap_or_default();
        assert_eq!(entries[0].record, None);
        assert!(entries[0].tied_users.is_empty());
        assert_eq!(entries[1].record, Some(0));
    }

    #[test]
    fn sorting_drops_unknown_levels() {
        let levels = [level(2, "M"), level(1, "M")];
        let mut submissions = vec![
            submission(1, 1, 1, 5, 0),
            submission(2, 9, 1, 1, 0),
            submission(3, 2, 1, 8, 0),
            submission(4, 1, 2, 3, 0),
        ];
        sort_for_records(&mut submissions, &levels, Metric::Time, Direction::Ascending);
        assert_eq!(submissions.iter().map(|s| s.id.0).collect_vec(), [3, 4, 1]);
    }

    #[test]
    fn checked_rejects_unknown_level() {
        let levels = [level(1, "M")];
        let submissions = [submission(1, 2, 1, 5, 0)];
        let err = build_record_table_checked(
            &levels,
            &submissions,
            Metric::Time,
            Direction::Ascending,
            &profiles(),
        )
        .unwrap_err();
        assert_eq!(err.index, 0);
        assert!(err.message.contains("not in the level list"));
    }

    #[test]
    fn checked_rejects_levels_out_of_order() {
        let levels = [level(1, "M"), level(2, "M")];
        let submissions = [submission(1, 2, 1, 5, 0), submission(2, 1, 1, 5, 0)];
        let err = check_record_order(&levels, &submissions, Metric::Time, Direction::Ascending)
            .unwrap_err();
        assert_eq!(err.index, 1);
    }

    #[test]
    fn checked_rejects_values_out_of_order() {
        let levels = [level(1, "M")];
        let submissions = [submission(1, 1, 1, 5, 0), submission(2, 1, 2, 9, 0)];
        let check = |direction| check_record_order(&levels, &submissions, Metric::Score, direction);
        assert!(check(Direction::Ascending).is_ok());
        assert!(check(Direction::Descending).is_err());
    }

    #[test]
    fn checked_rejects_duplicate_users() {
        let levels = [level(1, "M")];
        let submissions = [submission(1, 1, 1, 5, 0), submission(2, 1, 1, 5, 1)];
        let err = check_record_order(&levels, &submissions, Metric::Time, Direction::Ascending)
            .unwrap_err();
        assert!(err.message.contains("more than one submission"));
    }

    #[test]
    fn merged_table_has_both_records() {
        let levels = [level(1, "M"), level(2, "N")];
        let profiles = profiles();

        let mut first = submission(1, 1, 1, 0, 0);
        first.score = Some(100);
        first.time_ms = Some(9000);
        let mut second = submission(2, 1, 2, 0, 0);
        second.score = Some(80);
        second.time_ms = Some(8000);

        let mut by_score = vec![first.clone(), second.clone()];
        sort_for_records(&mut by_score, &levels, Metric::Score, Direction::Descending);
        let score_table = build_record_table(&levels, &by_score, Metric::Score, &profiles);

        let mut by_time = vec![first, second];
        sort_for_records(&mut by_time, &levels, Metric::Time, Direction::Ascending);
        let time_table = build_record_table(&levels, &by_time, Metric::Time, &profiles);

        let merged = merge_record_tables(&score_table, &time_table);
        assert_eq!(merged.entries().count(), 2);

        let m = &merged.get("M").unwrap_or_default()[0];
        assert_eq!(m.score_record, Some(100));
        assert_eq!(m.score_holders[0].username, "A");
        assert_eq!(m.time_record, Some(8000));
        assert_eq!(m.time_holders[0].username, "B");

        let n = &merged.get("N").unwrap_or_default()[0];
        assert_eq!((n.score_record, n.time_record), (None, None));
    }

    #[test]
    fn serializes_modes_in_order() -> Result<(), serde_json::Error> {
        let levels = [level(1, "M")];
        let submissions = [submission(1, 1, 2, 4, 0)];
        let table = build_record_table(&levels, &submissions, Metric::Time, &profiles());
        assert_eq!(
            serde_json::to_value(&table)?,
            serde_json::json!([{
                "mode": "M",
                "entries": [{
                    "level_id": 1,
                    "level_name": "L1",
                    "record": 4,
                    "tied_users": [{ "user_id": 2, "username": "B" }],
                }],
            }]),
        );
        Ok(())
    }
}
