//! Game library services: games, notes, resources and the tag vocabulary.
//!
//! Each service orchestrates read-then-compute-then-write cycles over a
//! [`Storage`](questlog_storage::Storage) backend. Tag-bearing writes also
//! fold the tags into the game's denormalized vocabulary via [`tag_sync`].

mod error;
mod games;
mod notes;
mod resources;
pub mod tag_sync;

pub use error::LibraryError;
pub use games::GameCatalog;
pub use notes::{NoteInput, NoteLibrary};
pub use resources::{ResourceInput, ResourceShelf};
pub use tag_sync::{TagOp, TagScope};
