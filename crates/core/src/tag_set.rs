//! Tag vocabulary - the denormalized per-game record of tags in use.

use crate::id::{GameId, TagSetId};
use crate::Time;
use serde::{Deserialize, Serialize};

/// Per-game tag vocabulary.
///
/// Kept in sync with the tags actually attached to notes and resources by a
/// read-modify-write in the library services; it exists so tag pickers can be
/// populated without scanning every record. One `TagSet` per game, created
/// lazily on first read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagSet {
    /// Unique identifier
    pub id: TagSetId,

    /// Owning game
    pub game_id: GameId,

    /// Tags used by the game's notes, case-insensitively sorted
    pub note_tags: Vec<String>,

    /// Tags used by the game's resources, case-insensitively sorted
    pub resource_tags: Vec<String>,

    /// Creation timestamp
    pub created_at: Time,

    /// Last update timestamp
    pub updated_at: Time,
}

impl TagSet {
    /// Create an empty vocabulary for a game.
    pub fn empty(game_id: GameId) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: TagSetId::new(),
            game_id,
            note_tags: Vec::new(),
            resource_tags: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}
