//! Toggle state for which metrics are ranked lower-is-better.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::{Direction, Metric};
use crate::AppError;

/// Set of metrics currently treated as ascending (lower is better).
///
/// The caller owns the state and applies toggle events one at a time with
/// [`SortMode::transition()`].
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Neither metric is ascending.
    #[default]
    None,
    /// Only score is ascending.
    Score,
    /// Only time is ascending.
    Time,
    /// Both metrics are ascending.
    Both,
}

impl SortMode {
    pub const ALL: [SortMode; 4] = [
        SortMode::None,
        SortMode::Score,
        SortMode::Time,
        SortMode::Both,
    ];

    /// Mode where time is lower-is-better and score is higher-is-better.
    pub fn natural() -> Self {
        SortMode::Time
    }

    /// Returns the mode containing only `metric`.
    pub fn single(metric: Metric) -> Self {
        match metric {
            Metric::Score => SortMode::Score,
            Metric::Time => SortMode::Time,
        }
    }

    /// Returns the new mode after the toggle for `metric` was set to
    /// `checked`.
    ///
    /// Unchecking the only active metric, checking the active metric again,
    /// and checking anything while in [`SortMode::Both`] all reset to
    /// [`SortMode::None`].
    pub fn transition(self, metric: Metric, checked: bool) -> Self {
        let other = Self::single(metric.other());
        match (self, checked) {
            (SortMode::None, true) => Self::single(metric),
            (current, true) if current == other => SortMode::Both,
            (SortMode::Both, false) => other,
            _ => SortMode::None,
        }
    }

    /// Returns whether `metric` is ascending in this mode.
    pub fn includes(self, metric: Metric) -> bool {
        match self {
            SortMode::None => false,
            SortMode::Both => true,
            SortMode::Score => metric == Metric::Score,
            SortMode::Time => metric == Metric::Time,
        }
    }

    pub fn direction(self, metric: Metric) -> Direction {
        if self.includes(metric) {
            Direction::Ascending
        } else {
            Direction::Descending
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortMode::None => write!(f, "none"),
            SortMode::Score => write!(f, "score"),
            SortMode::Time => write!(f, "time"),
            SortMode::Both => write!(f, "both"),
        }
    }
}

impl FromStr for SortMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "none" => Ok(SortMode::None),
            "score" => Ok(SortMode::Score),
            "time" => Ok(SortMode::Time),
            "both" => Ok(SortMode::Both),
            other => Err(AppError::InvalidArgument(format!(
                "unknown sort mode {other:?}"
            ))),
        }
    }
}
