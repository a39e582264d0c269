//! JSON file storage implementation.
//!
//! Stores one record per JSON file under per-entity directories inside the
//! questlog data directory. List and search operations load the relevant
//! directory and filter/sort/paginate in memory; the data set is one player's
//! games, so this stays well inside sensible bounds.

use super::{Result, Storage, StorageError};
use questlog_core::{
    Game, GameId, Note, NoteId, NoteQuery, NoteSortBy, Page, Preferences, Resource, ResourceId,
    ResourceQuery, ResourceSortBy, SortDir, TagSet, Task, TaskId,
};
use std::path::Path;
use tokio::fs;

/// File-based JSON storage backend.
pub struct JsonStorage {
    root: std::path::PathBuf,
}

impl JsonStorage {
    /// Create storage rooted at `root`, creating the entity directories if
    /// they do not exist yet.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        fs::create_dir_all(root.join("games")).await?;
        fs::create_dir_all(root.join("tasks")).await?;
        fs::create_dir_all(root.join("notes")).await?;
        fs::create_dir_all(root.join("resources")).await?;
        fs::create_dir_all(root.join("tag_sets")).await?;

        Ok(Self { root })
    }

    fn game_path(&self, id: GameId) -> std::path::PathBuf {
        self.root.join("games").join(format!("{}.json", id))
    }
    fn task_path(&self, id: TaskId) -> std::path::PathBuf {
        self.root.join("tasks").join(format!("{}.json", id))
    }
    fn note_path(&self, id: NoteId) -> std::path::PathBuf {
        self.root.join("notes").join(format!("{}.json", id))
    }
    fn resource_path(&self, id: ResourceId) -> std::path::PathBuf {
        self.root.join("resources").join(format!("{}.json", id))
    }
    // Tag sets are one-per-game, so they are keyed by the game's id.
    fn tag_set_path(&self, game_id: GameId) -> std::path::PathBuf {
        self.root.join("tag_sets").join(format!("{}.json", game_id))
    }
    fn prefs_path(&self) -> std::path::PathBuf {
        self.root.join("prefs.json")
    }

    async fn write_json<T: serde::Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        fs::write(path, json.as_bytes()).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl Storage for JsonStorage {
    async fn save_game(&mut self, game: &Game) -> Result<()> {
        self.write_json(&self.game_path(game.id), game).await
    }

    async fn load_game(&self, id: GameId) -> Result<Option<Game>> {
        read_json(&self.game_path(id)).await
    }

    async fn list_games(&self) -> Result<Vec<Game>> {
        let mut games: Vec<Game> = list_dir(&self.root.join("games")).await?;
        games.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
        Ok(games)
    }

    async fn delete_game(&mut self, id: GameId) -> Result<()> {
        remove_if_exists(&self.game_path(id)).await
    }

    async fn save_task(&mut self, task: &Task) -> Result<()> {
        self.write_json(&self.task_path(task.id), task).await
    }

    async fn load_task(&self, id: TaskId) -> Result<Option<Task>> {
        read_json(&self.task_path(id)).await
    }

    async fn list_tasks(&self, game_id: GameId) -> Result<Vec<Task>> {
        let all: Vec<Task> = list_dir(&self.root.join("tasks")).await?;
        let mut tasks: Vec<Task> = all.into_iter().filter(|t| t.game_id == game_id).collect();
        // Ascending position is the display order contract.
        tasks.sort_by(|a, b| a.position.total_cmp(&b.position));
        Ok(tasks)
    }

    async fn delete_task(&mut self, id: TaskId) -> Result<()> {
        remove_if_exists(&self.task_path(id)).await
    }

    async fn save_note(&mut self, note: &Note) -> Result<()> {
        self.write_json(&self.note_path(note.id), note).await
    }

    async fn load_note(&self, id: NoteId) -> Result<Option<Note>> {
        read_json(&self.note_path(id)).await
    }

    async fn list_notes(&self, game_id: GameId) -> Result<Vec<Note>> {
        let all: Vec<Note> = list_dir(&self.root.join("notes")).await?;
        Ok(all.into_iter().filter(|n| n.game_id == game_id).collect())
    }

    async fn search_notes(&self, query: &NoteQuery) -> Result<Page<Note>> {
        let all: Vec<Note> = list_dir(&self.root.join("notes")).await?;

        let title_needle = query.title.as_deref().map(str::to_lowercase);
        let mut matches: Vec<Note> = all
            .into_iter()
            .filter(|n| n.game_id == query.game_id)
            .filter(|n| match &title_needle {
                Some(needle) => n.title.to_lowercase().contains(needle),
                None => true,
            })
            .filter(|n| query.tags.iter().all(|t| n.tags.contains(t)))
            .collect();

        matches.sort_by(|a, b| {
            let ord = match query.sort_by {
                NoteSortBy::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
                NoteSortBy::Updated => a.updated_at.cmp(&b.updated_at),
            };
            match query.sort_dir {
                SortDir::Asc => ord,
                SortDir::Desc => ord.reverse(),
            }
        });

        Ok(paginate(matches, query.page, query.per_page))
    }

    async fn delete_note(&mut self, id: NoteId) -> Result<()> {
        remove_if_exists(&self.note_path(id)).await
    }

    async fn save_resource(&mut self, resource: &Resource) -> Result<()> {
        self.write_json(&self.resource_path(resource.id), resource)
            .await
    }

    async fn load_resource(&self, id: ResourceId) -> Result<Option<Resource>> {
        read_json(&self.resource_path(id)).await
    }

    async fn list_resources(&self, game_id: GameId) -> Result<Vec<Resource>> {
        let all: Vec<Resource> = list_dir(&self.root.join("resources")).await?;
        Ok(all.into_iter().filter(|r| r.game_id == game_id).collect())
    }

    async fn search_resources(&self, query: &ResourceQuery) -> Result<Page<Resource>> {
        let all: Vec<Resource> = list_dir(&self.root.join("resources")).await?;

        let needle = query.text.as_deref().map(str::to_lowercase);
        let mut matches: Vec<Resource> = all
            .into_iter()
            .filter(|r| r.game_id == query.game_id)
            .filter(|r| match &needle {
                Some(needle) => {
                    r.title.to_lowercase().contains(needle)
                        || r.url.to_lowercase().contains(needle)
                }
                None => true,
            })
            .filter(|r| query.tags.iter().all(|t| r.tags.contains(t)))
            .collect();

        matches.sort_by(|a, b| {
            let ord = match query.sort_by {
                ResourceSortBy::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
                ResourceSortBy::Created => a.created_at.cmp(&b.created_at),
            };
            match query.sort_dir {
                SortDir::Asc => ord,
                SortDir::Desc => ord.reverse(),
            }
        });

        Ok(paginate(matches, query.page, query.per_page))
    }

    async fn delete_resource(&mut self, id: ResourceId) -> Result<()> {
        remove_if_exists(&self.resource_path(id)).await
    }

    async fn save_tag_set(&mut self, tag_set: &TagSet) -> Result<()> {
        self.write_json(&self.tag_set_path(tag_set.game_id), tag_set)
            .await
    }

    async fn load_tag_set(&self, game_id: GameId) -> Result<Option<TagSet>> {
        read_json(&self.tag_set_path(game_id)).await
    }

    async fn delete_tag_set(&mut self, game_id: GameId) -> Result<()> {
        remove_if_exists(&self.tag_set_path(game_id)).await
    }

    async fn load_preferences(&self) -> Result<Preferences> {
        Ok(read_json(&self.prefs_path()).await?.unwrap_or_default())
    }

    async fn save_preferences(&mut self, prefs: &Preferences) -> Result<()> {
        self.write_json(&self.prefs_path(), prefs).await
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn list_dir<T: serde::de::DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
    let mut items = Vec::new();
    let mut rd = fs::read_dir(dir).await?;
    while let Some(entry) = rd.next_entry().await? {
        if entry.path().extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }
        if let Ok(Some(item)) = read_json(&entry.path()).await {
            items.push(item);
        }
    }
    Ok(items)
}

async fn remove_if_exists(path: &Path) -> Result<()> {
    fs::remove_file(path).await.or_else(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Ok(())
        } else {
            Err(StorageError::Io(e))
        }
    })
}

fn paginate<T>(matches: Vec<T>, page: usize, per_page: usize) -> Page<T> {
    // A zero-size page can hold nothing.
    if per_page == 0 {
        return Page::empty();
    }
    let total = matches.len();
    let total_pages = total.div_ceil(per_page);
    let start = page.saturating_sub(1) * per_page;
    let items = matches.into_iter().skip(start).take(per_page).collect();
    Page {
        items,
        total,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use questlog_core::{TaskKind, TaskStatus};

    async fn temp_storage() -> (tempfile::TempDir, JsonStorage) {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path()).await.unwrap();
        (dir, storage)
    }

    #[tokio::test]
    async fn game_round_trip() {
        let (_dir, mut storage) = temp_storage().await;
        let game = Game::new("Elden Ring");
        storage.save_game(&game).await.unwrap();

        let loaded = storage.load_game(game.id).await.unwrap().unwrap();
        assert_eq!(loaded.title, "Elden Ring");

        storage.delete_game(game.id).await.unwrap();
        assert!(storage.load_game(game.id).await.unwrap().is_none());
        // Deleting again is not an error.
        storage.delete_game(game.id).await.unwrap();
    }

    #[tokio::test]
    async fn tasks_list_sorted_by_position() {
        let (_dir, mut storage) = temp_storage().await;
        let game = Game::new("PoE");
        storage.save_game(&game).await.unwrap();

        for (text, pos) in [("maps", 3000.0), ("dailies", 1000.0), ("trade", 1500.0)] {
            let task = Task::new(game.id, text, TaskKind::Daily, pos);
            storage.save_task(&task).await.unwrap();
        }
        // A task from another game must not leak in.
        let other = Game::new("Other");
        storage
            .save_task(&Task::new(other.id, "noise", TaskKind::Daily, 1.0))
            .await
            .unwrap();

        let tasks = storage.list_tasks(game.id).await.unwrap();
        let texts: Vec<&str> = tasks.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["dailies", "trade", "maps"]);
        assert!(tasks.iter().all(|t| t.status == TaskStatus::Open));
    }

    #[tokio::test]
    async fn note_search_filters_and_paginates() {
        let (_dir, mut storage) = temp_storage().await;
        let game = Game::new("FFXIV");

        for i in 0..8 {
            let tags = if i % 2 == 0 {
                vec!["crafting".to_string()]
            } else {
                vec!["raids".to_string()]
            };
            let note = Note::new(game.id, format!("note {i}"), "body", tags);
            storage.save_note(&note).await.unwrap();
        }

        let mut query = NoteQuery::for_game(game.id);
        query.tags = vec!["crafting".to_string()];
        query.per_page = 3;
        query.sort_by = NoteSortBy::Title;
        query.sort_dir = SortDir::Asc;

        let page1 = storage.search_notes(&query).await.unwrap();
        assert_eq!(page1.total, 4);
        assert_eq!(page1.total_pages, 2);
        assert_eq!(page1.items.len(), 3);
        assert_eq!(page1.items[0].title, "note 0");

        query.page = 2;
        let page2 = storage.search_notes(&query).await.unwrap();
        assert_eq!(page2.items.len(), 1);
        assert_eq!(page2.items[0].title, "note 6");
    }

    #[tokio::test]
    async fn zero_page_size_yields_empty_page() {
        let (_dir, mut storage) = temp_storage().await;
        let game = Game::new("Terraria");
        storage
            .save_note(&Note::new(game.id, "bosses", "", vec![]))
            .await
            .unwrap();

        let mut query = NoteQuery::for_game(game.id);
        query.per_page = 0;
        let page = storage.search_notes(&query).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 0);
    }

    #[tokio::test]
    async fn note_title_search_is_case_insensitive() {
        let (_dir, mut storage) = temp_storage().await;
        let game = Game::new("WoW");
        storage
            .save_note(&Note::new(game.id, "Mythic Plus Routes", "", vec![]))
            .await
            .unwrap();

        let mut query = NoteQuery::for_game(game.id);
        query.title = Some("mythic".to_string());
        let page = storage.search_notes(&query).await.unwrap();
        assert_eq!(page.total, 1);

        query.title = Some("raid".to_string());
        let page = storage.search_notes(&query).await.unwrap();
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn resource_search_matches_title_or_url() {
        let (_dir, mut storage) = temp_storage().await;
        let game = Game::new("OSRS");
        storage
            .save_resource(&Resource::new(
                game.id,
                "Quest guide",
                "https://example.com/quests",
                "",
                vec![],
            ))
            .await
            .unwrap();
        storage
            .save_resource(&Resource::new(
                game.id,
                "DPS calc",
                "https://dps.example.com",
                "",
                vec![],
            ))
            .await
            .unwrap();

        let mut query = ResourceQuery::for_game(game.id);
        query.text = Some("quest".to_string());
        let page = storage.search_resources(&query).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].title, "Quest guide");

        query.text = Some("example.com".to_string());
        let page = storage.search_resources(&query).await.unwrap();
        assert_eq!(page.total, 2);
    }

    #[tokio::test]
    async fn tag_set_keyed_by_game() {
        let (_dir, mut storage) = temp_storage().await;
        let game = Game::new("GW2");

        assert!(storage.load_tag_set(game.id).await.unwrap().is_none());

        let mut tag_set = TagSet::empty(game.id);
        tag_set.note_tags = vec!["builds".to_string()];
        storage.save_tag_set(&tag_set).await.unwrap();

        let loaded = storage.load_tag_set(game.id).await.unwrap().unwrap();
        assert_eq!(loaded.note_tags, vec!["builds".to_string()]);
    }

    #[tokio::test]
    async fn preferences_default_when_missing() {
        let (_dir, mut storage) = temp_storage().await;
        let prefs = storage.load_preferences().await.unwrap();
        assert!(prefs.last_game_id.is_none());

        let game = Game::new("BG3");
        let prefs = Preferences {
            last_game_id: Some(game.id),
        };
        storage.save_preferences(&prefs).await.unwrap();
        let loaded = storage.load_preferences().await.unwrap();
        assert_eq!(loaded.last_game_id, Some(game.id));
    }
}
