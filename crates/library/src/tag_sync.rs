//! Tag vocabulary synchronization.
//!
//! The per-game [`TagSet`] is a denormalized index of the tags in use across
//! notes and resources. It is maintained by a plain read-modify-write: load
//! the record (creating it empty on first touch), apply the change, write it
//! back. Per the scope's single-logical-writer discipline there is no
//! concurrency control here.

use crate::LibraryError;
use questlog_core::{tags, GameId, TagSet};
use questlog_storage::Storage;
use tracing::debug;

/// Which half of the vocabulary an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagScope {
    /// Tags used by notes
    Notes,
    /// Tags used by resources
    Resources,
}

/// Vocabulary mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagOp {
    /// Union the given tags into the vocabulary
    Add,
    /// Drop the given tags from the vocabulary
    Remove,
}

/// Load a game's tag set, creating an empty one on first read.
pub async fn load_or_create<S: Storage>(
    storage: &mut S,
    game_id: GameId,
) -> Result<TagSet, LibraryError> {
    if let Some(existing) = storage.load_tag_set(game_id).await? {
        return Ok(existing);
    }
    let created = TagSet::empty(game_id);
    storage.save_tag_set(&created).await?;
    Ok(created)
}

/// Apply a vocabulary change and persist the result.
///
/// `Add` unions the changed tags into the scope's list and re-sorts it
/// case-insensitively; `Remove` filters the named tags out without checking
/// whether records still use them - the vocabulary is a convenience index,
/// not an invariant.
pub async fn apply<S: Storage>(
    storage: &mut S,
    game_id: GameId,
    scope: TagScope,
    op: TagOp,
    changed: &[String],
) -> Result<TagSet, LibraryError> {
    let mut tag_set = load_or_create(storage, game_id).await?;

    let existing = match scope {
        TagScope::Notes => &tag_set.note_tags,
        TagScope::Resources => &tag_set.resource_tags,
    };

    let updated = match op {
        TagOp::Add => {
            let mut merged = existing.clone();
            merged.extend_from_slice(changed);
            tags::alphabetical_dedupe(&merged)
        }
        TagOp::Remove => existing
            .iter()
            .filter(|t| !changed.contains(t))
            .cloned()
            .collect(),
    };

    match scope {
        TagScope::Notes => tag_set.note_tags = updated,
        TagScope::Resources => tag_set.resource_tags = updated,
    }
    tag_set.updated_at = chrono::Utc::now();
    storage.save_tag_set(&tag_set).await?;
    debug!(game = %game_id, ?scope, ?op, changed = changed.len(), "tag vocabulary updated");
    Ok(tag_set)
}
