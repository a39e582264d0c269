//! Task board management service.

use questlog_core::ordering::{
    append_position, insert_position, is_spacing_exhausted, rebalance, BASE_POSITION,
};
use questlog_core::{GameId, Task, TaskId, TaskKind, TaskStatus};
use questlog_storage::{Storage, StorageError};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Errors from task board operations.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// The referenced game does not exist
    #[error("game not found: {0}")]
    GameNotFound(GameId),

    /// The referenced task does not exist in the given game
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// Task text must be non-empty
    #[error("task text must not be empty")]
    EmptyText,

    /// Target index outside `0..=siblings`
    #[error("invalid target index {index}, scope holds {scope_len} other tasks")]
    InvalidIndex {
        /// Requested index
        index: usize,
        /// Number of sibling tasks in the scope
        scope_len: usize,
    },

    /// Underlying storage failure
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Partial update for a task.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    /// New text, if changing
    pub text: Option<String>,

    /// New status, if changing
    pub status: Option<TaskStatus>,
}

/// Result of a drag-move.
#[derive(Debug, Clone, PartialEq)]
pub enum MoveOutcome {
    /// The common case: one record rewritten with a fresh position.
    Moved {
        /// Position assigned to the moved task
        position: f64,
    },

    /// Float spacing collapsed; the whole scope was renumbered.
    Rebalanced {
        /// Number of records whose position actually changed
        writes: usize,
    },
}

/// Task board service over a storage backend.
pub struct TaskBoard<S: Storage> {
    storage: Arc<Mutex<S>>,
}

impl<S: Storage> TaskBoard<S> {
    /// Create a new board.
    pub fn new(storage: S) -> Self {
        Self {
            storage: Arc::new(Mutex::new(storage)),
        }
    }

    /// Wrap an already shared storage handle.
    pub fn with_shared(storage: Arc<Mutex<S>>) -> Self {
        Self { storage }
    }

    /// Create a task at the end of its scope (append semantics).
    pub async fn create_task(
        &self,
        game_id: GameId,
        text: impl Into<String>,
        kind: TaskKind,
    ) -> Result<Task, BoardError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(BoardError::EmptyText);
        }

        let mut storage = self.storage.lock().await;
        storage
            .load_game(game_id)
            .await?
            .ok_or(BoardError::GameNotFound(game_id))?;

        let positions: Vec<f64> = storage
            .list_tasks(game_id)
            .await?
            .into_iter()
            .filter(|t| t.kind == kind)
            .map(|t| t.position)
            .collect();

        let task = Task::new(game_id, text, kind, append_position(&positions));
        storage.save_task(&task).await?;
        debug!(task = %task.id, position = task.position, "created task");
        Ok(task)
    }

    /// List a game's tasks in display order.
    pub async fn list_tasks(&self, game_id: GameId) -> Result<Vec<Task>, BoardError> {
        Ok(self.storage.lock().await.list_tasks(game_id).await?)
    }

    /// Apply a partial update to a task.
    pub async fn update_task(&self, task_id: TaskId, patch: TaskPatch) -> Result<Task, BoardError> {
        let mut storage = self.storage.lock().await;
        let mut task = storage
            .load_task(task_id)
            .await?
            .ok_or(BoardError::TaskNotFound(task_id))?;

        if let Some(text) = patch.text {
            if text.trim().is_empty() {
                return Err(BoardError::EmptyText);
            }
            task.text = text;
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        task.updated_at = chrono::Utc::now();
        storage.save_task(&task).await?;
        Ok(task)
    }

    /// Flip a task between open and done.
    pub async fn toggle_task(&self, task_id: TaskId) -> Result<Task, BoardError> {
        let mut storage = self.storage.lock().await;
        let mut task = storage
            .load_task(task_id)
            .await?
            .ok_or(BoardError::TaskNotFound(task_id))?;

        task.status = task.toggled();
        task.updated_at = chrono::Utc::now();
        storage.save_task(&task).await?;
        Ok(task)
    }

    /// Delete a task.
    pub async fn delete_task(&self, task_id: TaskId) -> Result<(), BoardError> {
        let mut storage = self.storage.lock().await;
        storage
            .load_task(task_id)
            .await?
            .ok_or(BoardError::TaskNotFound(task_id))?;
        storage.delete_task(task_id).await?;
        Ok(())
    }

    /// Move a task to `new_index` within its scope (same game, same kind).
    ///
    /// The scope is snapshotted, the ordering engine computes a candidate
    /// position, and either the moved task alone is rewritten or - when the
    /// gap between its would-be neighbors has collapsed - the whole scope is
    /// renumbered. Rebalance writes are sequential and best-effort: a failure
    /// part-way leaves earlier writes in place, which is order-safe because
    /// any later move can renumber the scope again.
    pub async fn move_task(
        &self,
        game_id: GameId,
        task_id: TaskId,
        new_index: usize,
    ) -> Result<MoveOutcome, BoardError> {
        let mut storage = self.storage.lock().await;

        // Snapshot the scope; list_tasks returns ascending position order.
        let tasks = storage.list_tasks(game_id).await?;
        let moving = tasks
            .iter()
            .find(|t| t.id == task_id)
            .cloned()
            .ok_or(BoardError::TaskNotFound(task_id))?;

        let siblings: Vec<Task> = tasks
            .into_iter()
            .filter(|t| t.kind == moving.kind && t.id != task_id)
            .collect();

        if new_index > siblings.len() {
            return Err(BoardError::InvalidIndex {
                index: new_index,
                scope_len: siblings.len(),
            });
        }

        // First task of its kind: nothing to order against.
        if siblings.is_empty() {
            let mut task = moving;
            task.position = BASE_POSITION;
            task.updated_at = chrono::Utc::now();
            storage.save_task(&task).await?;
            return Ok(MoveOutcome::Moved {
                position: BASE_POSITION,
            });
        }

        let positions: Vec<f64> = siblings.iter().map(|t| t.position).collect();
        let candidate = insert_position(&positions, new_index);

        let lower = if new_index == 0 {
            f64::NEG_INFINITY
        } else {
            positions[new_index - 1]
        };
        let upper = positions.get(new_index).copied().unwrap_or(f64::INFINITY);

        if is_spacing_exhausted(candidate, lower, upper) {
            // Build the final desired order with the moved task spliced in,
            // then renumber the whole scope with uniform spacing.
            let mut reordered = siblings;
            reordered.insert(new_index, moving);
            let fresh = rebalance(reordered.len(), None);

            let mut writes = 0;
            for (task, position) in reordered.iter_mut().zip(fresh) {
                if task.position == position {
                    continue;
                }
                task.position = position;
                task.updated_at = chrono::Utc::now();
                storage.save_task(task).await?;
                writes += 1;
            }
            info!(game = %game_id, writes, "position spacing exhausted, rebalanced scope");
            Ok(MoveOutcome::Rebalanced { writes })
        } else {
            let mut task = moving;
            task.position = candidate;
            task.updated_at = chrono::Utc::now();
            storage.save_task(&task).await?;
            Ok(MoveOutcome::Moved {
                position: candidate,
            })
        }
    }
}
