//! Storage trait abstraction.

use async_trait::async_trait;
use questlog_core::{
    Game, GameId, Note, NoteId, NoteQuery, Page, Preferences, Resource, ResourceId, ResourceQuery,
    TagSet, Task, TaskId,
};

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Item not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Storage abstraction for questlog data.
///
/// This trait allows different record stores to be plugged in. List and
/// search operations do their filtering and sorting behind this seam, so
/// callers receive records in the order they will be displayed.
#[async_trait]
pub trait Storage: Send + Sync {
    // === Game operations ===

    /// Save a game (create or update).
    async fn save_game(&mut self, game: &Game) -> Result<()>;

    /// Load a game by ID.
    async fn load_game(&self, id: GameId) -> Result<Option<Game>>;

    /// List all games, sorted by title.
    async fn list_games(&self) -> Result<Vec<Game>>;

    /// Delete a game record. Does not cascade; see the services for that.
    async fn delete_game(&mut self, id: GameId) -> Result<()>;

    // === Task operations ===

    /// Save a task (create or update).
    async fn save_task(&mut self, task: &Task) -> Result<()>;

    /// Load a task by ID.
    async fn load_task(&self, id: TaskId) -> Result<Option<Task>>;

    /// List a game's tasks sorted ascending by position.
    async fn list_tasks(&self, game_id: GameId) -> Result<Vec<Task>>;

    /// Delete a task.
    async fn delete_task(&mut self, id: TaskId) -> Result<()>;

    // === Note operations ===

    /// Save a note (create or update).
    async fn save_note(&mut self, note: &Note) -> Result<()>;

    /// Load a note by ID.
    async fn load_note(&self, id: NoteId) -> Result<Option<Note>>;

    /// List all of a game's notes, unfiltered.
    async fn list_notes(&self, game_id: GameId) -> Result<Vec<Note>>;

    /// Search a game's notes with filtering, sorting and pagination.
    async fn search_notes(&self, query: &NoteQuery) -> Result<Page<Note>>;

    /// Delete a note.
    async fn delete_note(&mut self, id: NoteId) -> Result<()>;

    // === Resource operations ===

    /// Save a resource (create or update).
    async fn save_resource(&mut self, resource: &Resource) -> Result<()>;

    /// Load a resource by ID.
    async fn load_resource(&self, id: ResourceId) -> Result<Option<Resource>>;

    /// List all of a game's resources, unfiltered.
    async fn list_resources(&self, game_id: GameId) -> Result<Vec<Resource>>;

    /// Search a game's resources with filtering, sorting and pagination.
    async fn search_resources(&self, query: &ResourceQuery) -> Result<Page<Resource>>;

    /// Delete a resource.
    async fn delete_resource(&mut self, id: ResourceId) -> Result<()>;

    // === Tag vocabulary operations ===

    /// Save a game's tag vocabulary.
    async fn save_tag_set(&mut self, tag_set: &TagSet) -> Result<()>;

    /// Load a game's tag vocabulary, if one has been created.
    async fn load_tag_set(&self, game_id: GameId) -> Result<Option<TagSet>>;

    /// Delete a game's tag vocabulary.
    async fn delete_tag_set(&mut self, game_id: GameId) -> Result<()>;

    // === Preferences ===

    /// Load persisted preferences; defaults when none have been saved.
    async fn load_preferences(&self) -> Result<Preferences>;

    /// Persist preferences.
    async fn save_preferences(&mut self, prefs: &Preferences) -> Result<()>;
}
