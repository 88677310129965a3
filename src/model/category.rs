use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Submission;
use crate::AppError;

/// Comparable quantity by which submissions are ranked.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Points (higher is better unless toggled).
    Score,
    /// Completion time (lower is better unless toggled).
    Time,
}
impl Metric {
    pub const ALL: [Metric; 2] = [Metric::Score, Metric::Time];

    /// Returns the metric not named by `self`.
    pub fn other(self) -> Metric {
        match self {
            Metric::Score => Metric::Time,
            Metric::Time => Metric::Score,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Metric::Score => "score",
            Metric::Time => "time",
        }
    }
}
impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
impl FromStr for Metric {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "score" => Ok(Metric::Score),
            "time" => Ok(Metric::Time),
            other => Err(AppError::InvalidArgument(format!("unknown metric {other:?}"))),
        }
    }
}

/// Order in which metric values are ranked.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Lower is better.
    Ascending,
    /// Higher is better.
    Descending,
}
impl Direction {
    /// Compares two values so that the better one is `Less`.
    pub fn compare(self, a: i64, b: i64) -> Ordering {
        match self {
            Direction::Ascending => a.cmp(&b),
            Direction::Descending => b.cmp(&a),
        }
    }

    /// Returns a key that sorts values best-first.
    pub fn sort_key(self, value: i64) -> i128 {
        match self {
            Direction::Ascending => value as i128,
            Direction::Descending => -(value as i128),
        }
    }

    /// Returns whether `a` may come before `b` in a best-first ordering.
    /// Missing values sort last.
    pub fn precedes_or_ties(self, a: Option<i64>, b: Option<i64>) -> bool {
        match (a, b) {
            (Some(a), Some(b)) => self.compare(a, b) != Ordering::Greater,
            (Some(_), None) | (None, None) => true,
            (None, Some(_)) => false,
        }
    }
}

/// Class of submissions that compete against each other.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Runs without assistance.
    #[default]
    Unassisted,
    /// Assisted runs only.
    Assisted,
    /// Every run regardless of assistance.
    All,
}
impl Category {
    pub fn includes(self, submission: &Submission) -> bool {
        match self {
            Category::Unassisted => !submission.assisted,
            Category::Assisted => submission.assisted,
            Category::All => true,
        }
    }
}
impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Unassisted => write!(f, "unassisted"),
            Category::Assisted => write!(f, "assisted"),
            Category::All => write!(f, "all"),
        }
    }
}
impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "unassisted" => Ok(Category::Unassisted),
            "assisted" => Ok(Category::Assisted),
            "all" => Ok(Category::All),
            other => Err(AppError::InvalidArgument(format!(
                "unknown category {other:?}"
            ))),
        }
    }
}
