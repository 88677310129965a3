use itertools::Itertools;
use serde::{Deserialize, Serialize};

id_struct!(LevelId, Level);
/// Level of a game.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Level {
    pub id: LevelId,
    /// Display name. (e.g., "1-1")
    pub name: String,
    /// Leaderboard section the level belongs to. (e.g., "Normal", "Hard")
    pub mode: String,
    /// Intended presentation rank within the game.
    #[serde(default)]
    pub order_index: i32,
}

impl Level {
    /// Returns the key by which to sort levels for presentation.
    pub fn presentation_sort_key(&self) -> impl Ord {
        self.order_index
    }

    /// Sorts levels into presentation order. Levels sharing an order index
    /// keep the order they were given in.
    pub fn in_presentation_order(levels: impl IntoIterator<Item = Level>) -> Vec<Level> {
        levels
            .into_iter()
            .sorted_by_key(|level| level.presentation_sort_key())
            .collect()
    }
}
