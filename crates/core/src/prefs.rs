//! Session preferences.

use crate::id::GameId;
use serde::{Deserialize, Serialize};

/// Persisted user preferences.
///
/// Passed by reference to the components that need them rather than read from
/// a process-wide singleton.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    /// Game selected on the last run, used as the default scope
    pub last_game_id: Option<GameId>,
}
