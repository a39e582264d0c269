//! Resource model - bookmarked links attached to a game.

use crate::id::{GameId, ResourceId};
use crate::Time;
use serde::{Deserialize, Serialize};

/// A bookmarked external resource (guide, wiki page, build planner, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    /// Unique identifier
    pub id: ResourceId,

    /// Owning game
    pub game_id: GameId,

    /// Display title (non-empty)
    pub title: String,

    /// Target URL (non-empty)
    pub url: String,

    /// Free-form description
    pub description: String,

    /// Labels; mirrored into the game's tag vocabulary
    pub tags: Vec<String>,

    /// Creation timestamp
    pub created_at: Time,

    /// Last update timestamp
    pub updated_at: Time,
}

impl Resource {
    /// Create a new resource.
    pub fn new(
        game_id: GameId,
        title: impl Into<String>,
        url: impl Into<String>,
        description: impl Into<String>,
        tags: Vec<String>,
    ) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: ResourceId::new(),
            game_id,
            title: title.into(),
            url: url.into(),
            description: description.into(),
            tags,
            created_at: now,
            updated_at: now,
        }
    }
}
