//! Contracts for the remote collaborators the repository depends on.
//!
//! [`ProjectStore`] is the row-oriented `projects` collection and
//! [`BlobStore`] the companion object store. Concrete backends live in
//! their own crates; [`memory`] provides process-local ones.

use async_trait::async_trait;

use crate::project::Project;
use crate::types::ProjectId;

pub mod memory;

pub use memory::{MemoryBlobStore, MemoryProjectStore};

/// Errors reported by a remote store.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// No row matched the key.
    #[error("No project with id {0}")]
    NotFound(ProjectId),

    /// The store answered but refused the request.
    #[error("Store rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The store could not be reached or timed out.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A row could not be translated into the domain model.
    #[error("Malformed row: {0}")]
    Decode(String),
}

/// The hosted `projects` table.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Every row, ascending by display order then id.
    async fn select_all(&self) -> Result<Vec<Project>, StoreError>;

    /// Insert one row using the id and display order carried by `project`.
    async fn insert(&self, project: &Project) -> Result<(), StoreError>;

    /// Replace every field of the row keyed by `project.id`.
    async fn update(&self, project: &Project) -> Result<(), StoreError>;

    /// Write only the display order of one row.
    async fn update_display_order(&self, id: &str, display_order: i32)
        -> Result<(), StoreError>;

    /// Delete one row by id.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// Cheap reachability probe for health reporting.
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// The companion object store for thumbnails and documents.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `bytes` under `key` in `bucket`, returning the stored path.
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StoreError>;

    /// Publicly fetchable URL of a stored path.
    fn public_url(&self, bucket: &str, path: &str) -> String;
}
