//! Game catalog service.

use crate::{LibraryError, tag_sync};
use questlog_core::{tags, Game, GameId};
use questlog_storage::Storage;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// CRUD over the game catalog, including the cascade delete that removes a
/// game's tasks, notes, resources and tag vocabulary with it.
pub struct GameCatalog<S: Storage> {
    storage: Arc<Mutex<S>>,
}

impl<S: Storage> GameCatalog<S> {
    /// Create a new catalog.
    pub fn new(storage: S) -> Self {
        Self {
            storage: Arc::new(Mutex::new(storage)),
        }
    }

    /// Wrap an already shared storage handle.
    pub fn with_shared(storage: Arc<Mutex<S>>) -> Self {
        Self { storage }
    }

    /// Add a game to the catalog.
    pub async fn create_game(&self, title: impl Into<String>) -> Result<Game, LibraryError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(LibraryError::EmptyTitle);
        }
        let game = Game::new(title);
        self.storage.lock().await.save_game(&game).await?;
        Ok(game)
    }

    /// Load a game.
    pub async fn get_game(&self, game_id: GameId) -> Result<Game, LibraryError> {
        self.storage
            .lock()
            .await
            .load_game(game_id)
            .await?
            .ok_or(LibraryError::GameNotFound(game_id))
    }

    /// List all games sorted by title.
    pub async fn list_games(&self) -> Result<Vec<Game>, LibraryError> {
        Ok(self.storage.lock().await.list_games().await?)
    }

    /// Rename a game.
    pub async fn rename_game(
        &self,
        game_id: GameId,
        title: impl Into<String>,
    ) -> Result<Game, LibraryError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(LibraryError::EmptyTitle);
        }
        let mut storage = self.storage.lock().await;
        let mut game = storage
            .load_game(game_id)
            .await?
            .ok_or(LibraryError::GameNotFound(game_id))?;
        game.title = title;
        game.updated_at = chrono::Utc::now();
        storage.save_game(&game).await?;
        Ok(game)
    }

    /// Replace the game's own tag list (deduped, case-insensitively sorted).
    pub async fn set_game_tags(
        &self,
        game_id: GameId,
        new_tags: &[String],
    ) -> Result<Game, LibraryError> {
        let mut storage = self.storage.lock().await;
        let mut game = storage
            .load_game(game_id)
            .await?
            .ok_or(LibraryError::GameNotFound(game_id))?;
        game.tags = tags::alphabetical_dedupe(new_tags);
        game.updated_at = chrono::Utc::now();
        storage.save_game(&game).await?;
        Ok(game)
    }

    /// Edit the game's note or resource tag vocabulary directly.
    pub async fn edit_vocabulary(
        &self,
        game_id: GameId,
        scope: tag_sync::TagScope,
        op: tag_sync::TagOp,
        changed: &[String],
    ) -> Result<questlog_core::TagSet, LibraryError> {
        let mut storage = self.storage.lock().await;
        storage
            .load_game(game_id)
            .await?
            .ok_or(LibraryError::GameNotFound(game_id))?;
        tag_sync::apply(&mut *storage, game_id, scope, op, changed).await
    }

    /// Load a game's tag vocabulary, creating it empty on first read.
    pub async fn vocabulary(&self, game_id: GameId) -> Result<questlog_core::TagSet, LibraryError> {
        let mut storage = self.storage.lock().await;
        storage
            .load_game(game_id)
            .await?
            .ok_or(LibraryError::GameNotFound(game_id))?;
        tag_sync::load_or_create(&mut *storage, game_id).await
    }

    /// Delete a game and everything attached to it.
    pub async fn delete_game(&self, game_id: GameId) -> Result<(), LibraryError> {
        let mut storage = self.storage.lock().await;
        storage
            .load_game(game_id)
            .await?
            .ok_or(LibraryError::GameNotFound(game_id))?;

        let tasks = storage.list_tasks(game_id).await?;
        for task in &tasks {
            storage.delete_task(task.id).await?;
        }
        let notes = storage.list_notes(game_id).await?;
        for note in &notes {
            storage.delete_note(note.id).await?;
        }
        let resources = storage.list_resources(game_id).await?;
        for resource in &resources {
            storage.delete_resource(resource.id).await?;
        }
        storage.delete_tag_set(game_id).await?;
        storage.delete_game(game_id).await?;

        info!(
            game = %game_id,
            tasks = tasks.len(),
            notes = notes.len(),
            resources = resources.len(),
            "deleted game and attachments"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NoteInput, NoteLibrary, ResourceInput, ResourceShelf};
    use questlog_core::{NoteQuery, TaskKind};
    use questlog_storage::JsonStorage;

    async fn shared_storage() -> (tempfile::TempDir, Arc<Mutex<JsonStorage>>) {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path()).await.unwrap();
        (dir, Arc::new(Mutex::new(storage)))
    }

    #[tokio::test]
    async fn create_and_list_sorted_by_title() {
        let (_dir, storage) = shared_storage().await;
        let catalog = GameCatalog::with_shared(storage);

        catalog.create_game("zomboid").await.unwrap();
        catalog.create_game("Baldur's Gate").await.unwrap();

        let titles: Vec<String> = catalog
            .list_games()
            .await
            .unwrap()
            .into_iter()
            .map(|g| g.title)
            .collect();
        assert_eq!(titles, vec!["Baldur's Gate", "zomboid"]);
    }

    #[tokio::test]
    async fn blank_title_rejected() {
        let (_dir, storage) = shared_storage().await;
        let catalog = GameCatalog::with_shared(storage);
        assert!(matches!(
            catalog.create_game("  ").await.unwrap_err(),
            LibraryError::EmptyTitle
        ));
    }

    #[tokio::test]
    async fn set_game_tags_normalizes() {
        let (_dir, storage) = shared_storage().await;
        let catalog = GameCatalog::with_shared(storage);
        let game = catalog.create_game("Stardew").await.unwrap();

        let game = catalog
            .set_game_tags(
                game.id,
                &["farming".to_string(), "Coop".to_string(), "farming".to_string()],
            )
            .await
            .unwrap();
        assert_eq!(game.tags, vec!["Coop".to_string(), "farming".to_string()]);
    }

    #[tokio::test]
    async fn delete_cascades_to_attachments() {
        let (_dir, storage) = shared_storage().await;
        let catalog = GameCatalog::with_shared(storage.clone());
        let notes = NoteLibrary::with_shared(storage.clone());
        let resources = ResourceShelf::with_shared(storage.clone());
        let board = questlog_board::TaskBoard::with_shared(storage.clone());

        let game = catalog.create_game("Rimworld").await.unwrap();
        board
            .create_task(game.id, "feed colonists", TaskKind::Daily)
            .await
            .unwrap();
        notes
            .create_note(
                game.id,
                NoteInput {
                    title: "mods".to_string(),
                    content: String::new(),
                    tags: vec!["modding".to_string()],
                },
            )
            .await
            .unwrap();
        resources
            .create_resource(
                game.id,
                ResourceInput {
                    title: "wiki".to_string(),
                    url: "https://rimworldwiki.com".to_string(),
                    description: String::new(),
                    tags: vec![],
                },
            )
            .await
            .unwrap();

        catalog.delete_game(game.id).await.unwrap();

        let storage = storage.lock().await;
        assert!(storage.load_game(game.id).await.unwrap().is_none());
        assert!(storage.list_tasks(game.id).await.unwrap().is_empty());
        assert_eq!(
            storage
                .search_notes(&NoteQuery::for_game(game.id))
                .await
                .unwrap()
                .total,
            0
        );
        assert!(storage.load_tag_set(game.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn vocabulary_requires_game() {
        let (_dir, storage) = shared_storage().await;
        let catalog = GameCatalog::with_shared(storage);
        assert!(matches!(
            catalog.vocabulary(GameId::new()).await.unwrap_err(),
            LibraryError::GameNotFound(_)
        ));
    }
}
