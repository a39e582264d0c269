//! Task board service.
//!
//! Orchestrates task CRUD and reordering over a [`Storage`] backend. The
//! reorder path is snapshot -> compute -> write: it reads the current scope,
//! asks the ordering engine for a candidate position, and issues either a
//! single position write or a full-scope rebalance when the engine reports
//! that float spacing between the target's neighbors has collapsed.

mod manager;

pub use manager::{BoardError, MoveOutcome, TaskBoard, TaskPatch};
