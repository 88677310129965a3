use std::path::PathBuf;

use level_records::model::{Category, Metric};
use level_records::SortMode;

/// Record tables and level rankings from a leaderboard snapshot.
#[derive(clap::Parser, Debug)]
#[command(version, about, long_about = None)]
pub(crate) struct Args {
    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = Format::Json)]
    pub format: Format,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Command {
    /// Prints the record table of every mode
    Records {
        #[command(flatten)]
        query: Query,
        /// Metric to find records for
        #[arg(long, value_enum, default_value_t = MetricChoice::Both)]
        metric: MetricChoice,
    },
    /// Prints every user's current submission on every level
    History {
        /// JSON snapshot of levels, submissions, and profiles
        #[arg(long)]
        snapshot: PathBuf,
        /// Submissions to include (unassisted, assisted, or all)
        #[arg(long, default_value = "unassisted")]
        category: Category,
    },
    /// Prints the ranked current submissions on one level
    Ranking {
        #[command(flatten)]
        query: Query,
        /// Level ID
        #[arg(long)]
        level: i64,
        /// Metric to rank by
        #[arg(long, default_value = "time")]
        metric: Metric,
    },
    /// Prints the sort mode after toggling a metric
    Toggle {
        /// Current sort mode (none, score, time, or both)
        #[arg(long, default_value = "none")]
        state: SortMode,
        /// Metric whose toggle changed
        #[arg(long)]
        metric: Metric,
        /// New state of the toggle
        #[arg(long, action = clap::ArgAction::Set)]
        checked: bool,
    },
}

/// Options shared by commands that rank submissions.
#[derive(clap::Args, Debug)]
pub(crate) struct Query {
    /// JSON snapshot of levels, submissions, and profiles
    #[arg(long)]
    pub snapshot: PathBuf,
    /// Submissions to include (unassisted, assisted, or all)
    #[arg(long, default_value = "unassisted")]
    pub category: Category,
    /// Metrics ranked lower-is-better (none, score, time, or both)
    #[arg(long, default_value = "time")]
    pub sort_mode: SortMode,
}

#[derive(clap::ValueEnum, Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum MetricChoice {
    Score,
    Time,
    Both,
}
impl MetricChoice {
    pub fn metric(self) -> Option<Metric> {
        match self {
            MetricChoice::Score => Some(Metric::Score),
            MetricChoice::Time => Some(Metric::Time),
            MetricChoice::Both => None,
        }
    }
}

#[derive(clap::ValueEnum, Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Format {
    Json,
    Text,
}
