//! Task model - a single checkable item on a game's board.

use crate::id::{GameId, TaskId};
use crate::Time;
use serde::{Deserialize, Serialize};

/// A recurring or one-off task attached to a game.
///
/// Tasks of the same kind within one game form an ordering scope: their
/// `position` values, sorted ascending, define the display order. Positions
/// are assigned by the [`ordering`](crate::ordering) engine and carry no
/// meaning outside their scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,

    /// Owning game
    pub game_id: GameId,

    /// Task text (non-empty)
    pub text: String,

    /// Open or done
    pub status: TaskStatus,

    /// Cadence bucket; also the ordering scope within the game
    pub kind: TaskKind,

    /// Fractional sort key; only relative order within the scope matters
    pub position: f64,

    /// Creation timestamp
    pub created_at: Time,

    /// Last update timestamp
    pub updated_at: Time,
}

impl Task {
    /// Create a new open task at the given position.
    pub fn new(game_id: GameId, text: impl Into<String>, kind: TaskKind, position: f64) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: TaskId::new(),
            game_id,
            text: text.into(),
            status: TaskStatus::Open,
            kind,
            position,
            created_at: now,
            updated_at: now,
        }
    }

    /// Flip between open and done.
    pub fn toggled(&self) -> TaskStatus {
        match self.status {
            TaskStatus::Open => TaskStatus::Done,
            TaskStatus::Done => TaskStatus::Open,
        }
    }
}

/// Completion state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Not yet completed
    Open,
    /// Completed
    Done,
}

/// Cadence bucket a task belongs to.
///
/// Each kind is rendered as its own column and reordered independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    /// Resets daily
    Daily,
    /// Resets weekly
    Weekly,
    /// No reset cadence
    Other,
}

impl TaskKind {
    /// All kinds in display order.
    pub const ALL: [TaskKind; 3] = [TaskKind::Daily, TaskKind::Weekly, TaskKind::Other];
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskKind::Daily => write!(f, "daily"),
            TaskKind::Weekly => write!(f, "weekly"),
            TaskKind::Other => write!(f, "other"),
        }
    }
}

impl std::str::FromStr for TaskKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(TaskKind::Daily),
            "weekly" => Ok(TaskKind::Weekly),
            "other" => Ok(TaskKind::Other),
            other => Err(format!("unknown task kind: {other}")),
        }
    }
}
