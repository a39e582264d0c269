//! Search parameters and pagination for notes and resources.

use crate::id::GameId;
use serde::{Deserialize, Serialize};

/// Default page number (1-based).
pub const DEFAULT_PAGE: usize = 1;

/// Default page size.
pub const DEFAULT_PER_PAGE: usize = 6;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    /// Ascending
    Asc,
    /// Descending
    Desc,
}

/// Sort field for note searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteSortBy {
    /// By title
    Title,
    /// By last update
    Updated,
}

/// Sort field for resource searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceSortBy {
    /// By title
    Title,
    /// By creation time
    Created,
}

/// Parameters for a paginated note search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteQuery {
    /// Game to search within
    pub game_id: GameId,

    /// Optional case-insensitive title substring
    pub title: Option<String>,

    /// Tags that must *all* be present
    pub tags: Vec<String>,

    /// 1-based page number
    pub page: usize,

    /// Page size
    pub per_page: usize,

    /// Sort field
    pub sort_by: NoteSortBy,

    /// Sort direction
    pub sort_dir: SortDir,
}

impl NoteQuery {
    /// Query with default paging (newest first).
    pub fn for_game(game_id: GameId) -> Self {
        Self {
            game_id,
            title: None,
            tags: Vec::new(),
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
            sort_by: NoteSortBy::Updated,
            sort_dir: SortDir::Desc,
        }
    }
}

/// Parameters for a paginated resource search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceQuery {
    /// Game to search within
    pub game_id: GameId,

    /// Optional case-insensitive substring matched against title or URL
    pub text: Option<String>,

    /// Tags that must *all* be present
    pub tags: Vec<String>,

    /// 1-based page number
    pub page: usize,

    /// Page size
    pub per_page: usize,

    /// Sort field
    pub sort_by: ResourceSortBy,

    /// Sort direction
    pub sort_dir: SortDir,
}

impl ResourceQuery {
    /// Query with default paging (newest first).
    pub fn for_game(game_id: GameId) -> Self {
        Self {
            game_id,
            text: None,
            tags: Vec::new(),
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
            sort_by: ResourceSortBy::Created,
            sort_dir: SortDir::Desc,
        }
    }
}

/// One page of search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page
    pub items: Vec<T>,

    /// Total matching items across all pages
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// An empty result set.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            total_pages: 0,
        }
    }
}
