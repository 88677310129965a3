//! End-to-end leaderboard computation over an in-memory game.

use crate::dedup::{current_submissions, remove_obsolete_checked};
use crate::model::{Category, Level, LevelId, Metric, Profile, ProfileDirectory, Submission};
use crate::ranking::{rank_level, RankedSubmission};
use crate::records::{
    build_record_table, build_record_table_checked, merge_record_tables, sort_for_records,
    CombinedRecordTable, RecordTable,
};
use crate::sort_mode::SortMode;
use crate::{AppError, AppResult};

/// Options for a [`Leaderboard`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Whether to re-check the ordering of each intermediate result before
    /// using it.
    pub verify_ordering: bool,
}
impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            verify_ordering: cfg!(debug_assertions),
        }
    }
}

/// Levels and profiles of one game.
#[derive(Debug, Clone)]
pub struct Leaderboard {
    levels: Vec<Level>,
    profiles: ProfileDirectory,
    config: EngineConfig,
}

impl Leaderboard {
    /// Constructs a leaderboard. Levels are put into presentation order;
    /// levels with the same order index keep the order they were given in.
    pub fn new(
        levels: impl IntoIterator<Item = Level>,
        profiles: impl IntoIterator<Item = Profile>,
    ) -> Self {
        Self {
            levels: Level::in_presentation_order(levels),
            profiles: profiles.into_iter().collect(),
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn profiles(&self) -> &ProfileDirectory {
        &self.profiles
    }

    pub fn level(&self, id: LevelId) -> AppResult<&Level> {
        self.levels
            .iter()
            .find(|l| l.id == id)
            .ok_or(AppError::UnknownLevel(id))
    }

    /// Returns each user's current submission on each level in `category`.
    pub fn history(
        &self,
        submissions: &[Submission],
        category: Category,
    ) -> AppResult<Vec<Submission>> {
        let current = current_submissions(submissions, category);
        if self.config.verify_ordering {
            // Already deduplicated, so this only checks the ordering.
            return Ok(remove_obsolete_checked(current)?);
        }
        Ok(current)
    }

    /// Returns the record table for `metric`, ranked in the direction
    /// `sort_mode` selects for it.
    pub fn records(
        &self,
        submissions: &[Submission],
        category: Category,
        metric: Metric,
        sort_mode: SortMode,
    ) -> AppResult<RecordTable> {
        let direction = sort_mode.direction(metric);
        let mut current = self.history(submissions, category)?;
        sort_for_records(&mut current, &self.levels, metric, direction);

        tracing::debug!(
            %category,
            %metric,
            ?direction,
            levels = self.levels.len(),
            submissions = current.len(),
            "Building record table.",
        );

        if self.config.verify_ordering {
            Ok(build_record_table_checked(
                &self.levels,
                &current,
                metric,
                direction,
                &self.profiles,
            )?)
        } else {
            Ok(build_record_table(
                &self.levels,
                &current,
                metric,
                &self.profiles,
            ))
        }
    }

    /// Returns score and time records side by side.
    pub fn combined_records(
        &self,
        submissions: &[Submission],
        category: Category,
        sort_mode: SortMode,
    ) -> AppResult<CombinedRecordTable> {
        let score = self.records(submissions, category, Metric::Score, sort_mode)?;
        let time = self.records(submissions, category, Metric::Time, sort_mode)?;
        Ok(merge_record_tables(&score, &time))
    }

    /// Returns the ranked current submissions on one level.
    pub fn level_ranking(
        &self,
        submissions: &[Submission],
        level_id: LevelId,
        category: Category,
        metric: Metric,
        sort_mode: SortMode,
    ) -> AppResult<Vec<RankedSubmission>> {
        let level = self.level(level_id)?;
        let on_level = submissions
            .iter()
            .filter(|s| s.level_id == level.id)
            .cloned()
            .collect::<Vec<_>>();
        let current = self.history(&on_level, category)?;
        Ok(rank_level(
            &current,
            level.id,
            metric,
            sort_mode.direction(metric),
            &self.profiles,
        ))
    }
}
