use std::sync::Arc;

use folio_core::store::BlobStore;
use folio_events::NotificationBus;
use folio_repository::ProjectRepository;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Owner of the local project list.
    pub repository: Arc<ProjectRepository>,
    /// Bus the repository and upload handlers report to.
    pub notifications: Arc<NotificationBus>,
    /// Object store for uploads; `None` when storage is not configured.
    pub blob_store: Option<Arc<dyn BlobStore>>,
}
