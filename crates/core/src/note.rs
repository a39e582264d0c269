//! Note model - rich-text notes attached to a game.

use crate::id::{GameId, NoteId};
use crate::Time;
use serde::{Deserialize, Serialize};

/// A tagged note. Content is stored as an opaque rich-text string; rendering
/// is the front end's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier
    pub id: NoteId,

    /// Owning game
    pub game_id: GameId,

    /// Note title (non-empty)
    pub title: String,

    /// Serialized rich-text body
    pub content: String,

    /// Labels; mirrored into the game's tag vocabulary
    pub tags: Vec<String>,

    /// Creation timestamp
    pub created_at: Time,

    /// Last update timestamp
    pub updated_at: Time,
}

impl Note {
    /// Create a new note.
    pub fn new(
        game_id: GameId,
        title: impl Into<String>,
        content: impl Into<String>,
        tags: Vec<String>,
    ) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: NoteId::new(),
            game_id,
            title: title.into(),
            content: content.into(),
            tags,
            created_at: now,
            updated_at: now,
        }
    }
}
