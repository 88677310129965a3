//! Leaderboard aggregation for level-based games: each user's current
//! submission per level, per-mode record tables with tied record holders, and
//! the toggle state that picks which metrics rank lower-is-better.
//!
//! Everything here works on already-fetched, in-memory collections and
//! performs no I/O.

#[macro_use]
mod macros;

pub mod dedup;
pub mod error;
pub mod leaderboard;
pub mod model;
pub mod ranking;
pub mod records;
pub mod snapshot;
pub mod sort_mode;
pub mod util;

pub use error::{AppError, AppResult, InvariantViolation};
pub use leaderboard::{EngineConfig, Leaderboard};
pub use sort_mode::SortMode;
