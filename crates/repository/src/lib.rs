//! Local, store-synchronized project list.
//!
//! [`ProjectRepository`] owns the in-memory project list and is the only
//! writer to it. Every mutation goes to the remote store first and is
//! followed by a full refetch; reorder is the exception, applied locally
//! before any write and resynchronized from the store if a write fails.

pub mod repository;
pub mod state;

pub use repository::ProjectRepository;
pub use state::{LoadStatus, ProjectListState};
