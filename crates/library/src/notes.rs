//! Note library service.

use crate::{LibraryError, tag_sync};
use questlog_core::{GameId, Note, NoteId, NoteQuery, Page};
use questlog_storage::Storage;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Fields supplied when creating or replacing a note.
#[derive(Debug, Clone, Default)]
pub struct NoteInput {
    /// Note title (non-empty)
    pub title: String,

    /// Serialized rich-text body
    pub content: String,

    /// Labels to attach; folded into the game's note-tag vocabulary
    pub tags: Vec<String>,
}

/// Notes service over a storage backend.
pub struct NoteLibrary<S: Storage> {
    storage: Arc<Mutex<S>>,
}

impl<S: Storage> NoteLibrary<S> {
    /// Create a new library.
    pub fn new(storage: S) -> Self {
        Self {
            storage: Arc::new(Mutex::new(storage)),
        }
    }

    /// Wrap an already shared storage handle.
    pub fn with_shared(storage: Arc<Mutex<S>>) -> Self {
        Self { storage }
    }

    /// Create a note and fold its tags into the game's vocabulary.
    pub async fn create_note(
        &self,
        game_id: GameId,
        input: NoteInput,
    ) -> Result<Note, LibraryError> {
        if input.title.trim().is_empty() {
            return Err(LibraryError::EmptyTitle);
        }

        let mut storage = self.storage.lock().await;
        storage
            .load_game(game_id)
            .await?
            .ok_or(LibraryError::GameNotFound(game_id))?;

        let note = Note::new(game_id, input.title, input.content, input.tags);
        storage.save_note(&note).await?;

        if !note.tags.is_empty() {
            tag_sync::apply(
                &mut *storage,
                game_id,
                tag_sync::TagScope::Notes,
                tag_sync::TagOp::Add,
                &note.tags,
            )
            .await?;
        }
        Ok(note)
    }

    /// Load a note, checking it belongs to the given game.
    pub async fn get_note(&self, game_id: GameId, note_id: NoteId) -> Result<Note, LibraryError> {
        let storage = self.storage.lock().await;
        storage
            .load_note(note_id)
            .await?
            .filter(|n| n.game_id == game_id)
            .ok_or(LibraryError::NoteNotFound(note_id))
    }

    /// Search notes with filtering, sorting and pagination.
    pub async fn search(&self, query: &NoteQuery) -> Result<Page<Note>, LibraryError> {
        Ok(self.storage.lock().await.search_notes(query).await?)
    }

    /// Replace a note's title, content and tags; newly used tags are folded
    /// into the vocabulary.
    pub async fn update_note(
        &self,
        game_id: GameId,
        note_id: NoteId,
        input: NoteInput,
    ) -> Result<Note, LibraryError> {
        if input.title.trim().is_empty() {
            return Err(LibraryError::EmptyTitle);
        }

        let mut storage = self.storage.lock().await;
        let mut note = storage
            .load_note(note_id)
            .await?
            .filter(|n| n.game_id == game_id)
            .ok_or(LibraryError::NoteNotFound(note_id))?;

        note.title = input.title;
        note.content = input.content;
        note.tags = input.tags;
        note.updated_at = chrono::Utc::now();
        storage.save_note(&note).await?;

        if !note.tags.is_empty() {
            tag_sync::apply(
                &mut *storage,
                game_id,
                tag_sync::TagScope::Notes,
                tag_sync::TagOp::Add,
                &note.tags,
            )
            .await?;
        }
        Ok(note)
    }

    /// Delete a note. The vocabulary keeps its tags; pruning is an explicit
    /// vocabulary edit.
    pub async fn delete_note(&self, game_id: GameId, note_id: NoteId) -> Result<(), LibraryError> {
        let mut storage = self.storage.lock().await;
        storage
            .load_note(note_id)
            .await?
            .filter(|n| n.game_id == game_id)
            .ok_or(LibraryError::NoteNotFound(note_id))?;
        storage.delete_note(note_id).await?;
        Ok(())
    }
}
