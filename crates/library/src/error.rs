//! Error type shared by the library services.

use questlog_core::{GameId, NoteId, ResourceId};
use questlog_storage::StorageError;

/// Errors from game, note, resource and tag vocabulary operations.
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    /// The referenced game does not exist
    #[error("game not found: {0}")]
    GameNotFound(GameId),

    /// The referenced note does not exist in the given game
    #[error("note not found: {0}")]
    NoteNotFound(NoteId),

    /// The referenced resource does not exist in the given game
    #[error("resource not found: {0}")]
    ResourceNotFound(ResourceId),

    /// Titles must be non-empty
    #[error("title must not be empty")]
    EmptyTitle,

    /// Resource URLs must be non-empty
    #[error("url must not be empty")]
    EmptyUrl,

    /// Underlying storage failure
    #[error(transparent)]
    Storage(#[from] StorageError),
}
