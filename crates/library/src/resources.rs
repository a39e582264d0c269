//! Resource shelf service.

use crate::{LibraryError, tag_sync};
use questlog_core::{GameId, Page, Resource, ResourceId, ResourceQuery};
use questlog_storage::Storage;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Fields supplied when creating or replacing a resource.
#[derive(Debug, Clone, Default)]
pub struct ResourceInput {
    /// Display title (non-empty)
    pub title: String,

    /// Target URL (non-empty)
    pub url: String,

    /// Free-form description
    pub description: String,

    /// Labels to attach; folded into the game's resource-tag vocabulary
    pub tags: Vec<String>,
}

/// Bookmarked-resource service over a storage backend.
pub struct ResourceShelf<S: Storage> {
    storage: Arc<Mutex<S>>,
}

impl<S: Storage> ResourceShelf<S> {
    /// Create a new shelf.
    pub fn new(storage: S) -> Self {
        Self {
            storage: Arc::new(Mutex::new(storage)),
        }
    }

    /// Wrap an already shared storage handle.
    pub fn with_shared(storage: Arc<Mutex<S>>) -> Self {
        Self { storage }
    }

    /// Create a resource and fold its tags into the game's vocabulary.
    pub async fn create_resource(
        &self,
        game_id: GameId,
        input: ResourceInput,
    ) -> Result<Resource, LibraryError> {
        if input.title.trim().is_empty() {
            return Err(LibraryError::EmptyTitle);
        }
        if input.url.trim().is_empty() {
            return Err(LibraryError::EmptyUrl);
        }

        let mut storage = self.storage.lock().await;
        storage
            .load_game(game_id)
            .await?
            .ok_or(LibraryError::GameNotFound(game_id))?;

        let resource = Resource::new(
            game_id,
            input.title,
            input.url,
            input.description,
            input.tags,
        );
        storage.save_resource(&resource).await?;

        if !resource.tags.is_empty() {
            tag_sync::apply(
                &mut *storage,
                game_id,
                tag_sync::TagScope::Resources,
                tag_sync::TagOp::Add,
                &resource.tags,
            )
            .await?;
        }
        Ok(resource)
    }

    /// Load a resource, checking it belongs to the given game.
    pub async fn get_resource(
        &self,
        game_id: GameId,
        resource_id: ResourceId,
    ) -> Result<Resource, LibraryError> {
        let storage = self.storage.lock().await;
        storage
            .load_resource(resource_id)
            .await?
            .filter(|r| r.game_id == game_id)
            .ok_or(LibraryError::ResourceNotFound(resource_id))
    }

    /// Search resources with filtering, sorting and pagination.
    pub async fn search(&self, query: &ResourceQuery) -> Result<Page<Resource>, LibraryError> {
        Ok(self.storage.lock().await.search_resources(query).await?)
    }

    /// Replace a resource; newly used tags are folded into the vocabulary.
    pub async fn update_resource(
        &self,
        game_id: GameId,
        resource_id: ResourceId,
        input: ResourceInput,
    ) -> Result<Resource, LibraryError> {
        if input.title.trim().is_empty() {
            return Err(LibraryError::EmptyTitle);
        }
        if input.url.trim().is_empty() {
            return Err(LibraryError::EmptyUrl);
        }

        let mut storage = self.storage.lock().await;
        let mut resource = storage
            .load_resource(resource_id)
            .await?
            .filter(|r| r.game_id == game_id)
            .ok_or(LibraryError::ResourceNotFound(resource_id))?;

        resource.title = input.title;
        resource.url = input.url;
        resource.description = input.description;
        resource.tags = input.tags;
        resource.updated_at = chrono::Utc::now();
        storage.save_resource(&resource).await?;

        if !resource.tags.is_empty() {
            tag_sync::apply(
                &mut *storage,
                game_id,
                tag_sync::TagScope::Resources,
                tag_sync::TagOp::Add,
                &resource.tags,
            )
            .await?;
        }
        Ok(resource)
    }

    /// Delete a resource. The vocabulary keeps its tags.
    pub async fn delete_resource(
        &self,
        game_id: GameId,
        resource_id: ResourceId,
    ) -> Result<(), LibraryError> {
        let mut storage = self.storage.lock().await;
        storage
            .load_resource(resource_id)
            .await?
            .filter(|r| r.game_id == game_id)
            .ok_or(LibraryError::ResourceNotFound(resource_id))?;
        storage.delete_resource(resource_id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use questlog_core::Game;
    use questlog_storage::JsonStorage;

    async fn shelf_with_game() -> (tempfile::TempDir, ResourceShelf<JsonStorage>, Game) {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path()).await.unwrap();
        let game = Game::new("Test Game");
        storage.save_game(&game).await.unwrap();
        (dir, ResourceShelf::new(storage), game)
    }

    fn input(title: &str, url: &str, tags: &[&str]) -> ResourceInput {
        ResourceInput {
            title: title.to_string(),
            url: url.to_string(),
            description: String::new(),
            tags: tags.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn create_folds_tags_into_resource_vocabulary() {
        let (_dir, shelf, game) = shelf_with_game().await;
        shelf
            .create_resource(game.id, input("wiki", "https://example.com", &["wiki"]))
            .await
            .unwrap();

        let storage = shelf.storage.lock().await;
        let tag_set = storage.load_tag_set(game.id).await.unwrap().unwrap();
        assert_eq!(tag_set.resource_tags, vec!["wiki".to_string()]);
        assert!(tag_set.note_tags.is_empty());
    }

    #[tokio::test]
    async fn create_requires_url() {
        let (_dir, shelf, game) = shelf_with_game().await;
        assert!(matches!(
            shelf
                .create_resource(game.id, input("wiki", "  ", &[]))
                .await
                .unwrap_err(),
            LibraryError::EmptyUrl
        ));
    }

    #[tokio::test]
    async fn update_replaces_fields_and_extends_vocabulary() {
        let (_dir, shelf, game) = shelf_with_game().await;
        let resource = shelf
            .create_resource(game.id, input("wiki", "https://example.com", &["wiki"]))
            .await
            .unwrap();

        let updated = shelf
            .update_resource(
                game.id,
                resource.id,
                input("interactive map", "https://map.example.com", &["maps"]),
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "interactive map");
        assert_eq!(updated.url, "https://map.example.com");

        let storage = shelf.storage.lock().await;
        let tag_set = storage.load_tag_set(game.id).await.unwrap().unwrap();
        assert_eq!(
            tag_set.resource_tags,
            vec!["maps".to_string(), "wiki".to_string()]
        );
    }

    #[tokio::test]
    async fn delete_checks_game_scope() {
        let (_dir, shelf, game) = shelf_with_game().await;
        let resource = shelf
            .create_resource(game.id, input("wiki", "https://example.com", &[]))
            .await
            .unwrap();

        let err = shelf
            .delete_resource(GameId::new(), resource.id)
            .await
            .unwrap_err();
        assert!(matches!(err, LibraryError::ResourceNotFound(_)));

        shelf.delete_resource(game.id, resource.id).await.unwrap();
        assert!(shelf.get_resource(game.id, resource.id).await.is_err());
    }
}
