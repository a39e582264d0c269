//! Game model - the top-level grouping for tasks, notes and resources.

use crate::id::GameId;
use crate::Time;
use serde::{Deserialize, Serialize};

/// A tracked game. Tasks, notes and resources all belong to exactly one game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    /// Unique identifier
    pub id: GameId,

    /// Display title
    pub title: String,

    /// Free-form labels attached to the game itself
    pub tags: Vec<String>,

    /// Creation timestamp
    pub created_at: Time,

    /// Last update timestamp
    pub updated_at: Time,
}

impl Game {
    /// Create a new game with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: GameId::new(),
            title: title.into(),
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}
