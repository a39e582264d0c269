//! questlog core data models.
//!
//! This crate defines the data structures shared by every questlog service:
//! games, their tasks, notes and resources, the per-game tag vocabulary, and
//! the fractional-position ordering engine used for task reordering.

#![warn(missing_docs)]

// Core identities
mod id;

// Domain entities
mod game;
mod task;
mod note;
mod resource;
mod tag_set;

// Search and pagination
mod query;

// Session preferences
mod prefs;

// Pure helpers
pub mod ordering;
pub mod tags;

// Re-exports
pub use id::*;

pub use game::Game;
pub use task::{Task, TaskKind, TaskStatus};
pub use note::Note;
pub use resource::Resource;
pub use tag_set::TagSet;

pub use query::{
    NoteQuery, NoteSortBy, Page, ResourceQuery, ResourceSortBy, SortDir,
    DEFAULT_PAGE, DEFAULT_PER_PAGE,
};
pub use prefs::Preferences;

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
