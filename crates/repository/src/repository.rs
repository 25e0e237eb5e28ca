//! The project repository: CRUD plus optimistic reorder.
//!
//! All failures stop at this boundary. Mutating operations return `true` on
//! success and `false` otherwise, publishing an error notification on the
//! [`NotificationBus`]. Nothing is retried; each call is attempted once.

use std::sync::Arc;

use folio_core::error::CoreError;
use folio_core::ordering::{move_item, next_display_order, renumber, sort_canonical};
use folio_core::project::Project;
use folio_core::store::ProjectStore;
use folio_events::NotificationBus;
use tokio::sync::watch;

use crate::state::{LoadStatus, ProjectListState};

// ---------------------------------------------------------------------------
// Notification messages
// ---------------------------------------------------------------------------

pub const MSG_ADD_FAILED: &str = "Failed to add project";
pub const MSG_UPDATE_FAILED: &str = "Failed to update project";
pub const MSG_DELETE_FAILED: &str = "Failed to delete project";
pub const MSG_REORDER_FAILED: &str = "Failed to save project order";

// ---------------------------------------------------------------------------
// ProjectRepository
// ---------------------------------------------------------------------------

/// Single owner of the local project list.
///
/// Shared as `Arc<ProjectRepository>`; readers observe the list through
/// [`snapshot`](Self::snapshot) or [`subscribe`](Self::subscribe). Concurrent
/// mutations are not serialized: their store calls race and the last
/// refetch to complete decides the final list.
pub struct ProjectRepository {
    store: Arc<dyn ProjectStore>,
    notifications: Arc<NotificationBus>,
    state: watch::Sender<ProjectListState>,
}

impl ProjectRepository {
    /// Create an idle repository. Call [`list`](Self::list) to load.
    pub fn new(store: Arc<dyn ProjectStore>, notifications: Arc<NotificationBus>) -> Self {
        let (state, _) = watch::channel(ProjectListState::default());
        Self {
            store,
            notifications,
            state,
        }
    }

    /// Current state of the local list.
    pub fn snapshot(&self) -> ProjectListState {
        self.state.borrow().clone()
    }

    /// Current local list in canonical order.
    pub fn projects(&self) -> Arc<Vec<Project>> {
        Arc::clone(&self.state.borrow().projects)
    }

    /// Look up a project in the local list.
    pub fn find(&self, id: &str) -> Option<Project> {
        self.state.borrow().find(id).cloned()
    }

    /// Receive every state change from now on.
    pub fn subscribe(&self) -> watch::Receiver<ProjectListState> {
        self.state.subscribe()
    }

    /// Reachability of the underlying store.
    pub async fn store_healthy(&self) -> bool {
        self.store.health_check().await.is_ok()
    }

    // -- List ---------------------------------------------------------------

    /// Fetch the full list from the store and replace the local list.
    ///
    /// On failure the prior local list is kept, the status becomes
    /// `Errored`, and `None` is returned.
    pub async fn list(&self) -> Option<Arc<Vec<Project>>> {
        self.state.send_modify(|s| s.status = LoadStatus::Loading);

        match self.store.select_all().await {
            Ok(mut projects) => {
                sort_canonical(&mut projects);
                let projects = Arc::new(projects);
                tracing::debug!(count = projects.len(), "Project list loaded");
                self.state.send_modify(|s| {
                    s.projects = Arc::clone(&projects);
                    s.status = LoadStatus::Ready;
                    s.error = None;
                });
                Some(projects)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch projects");
                self.state.send_modify(|s| {
                    s.status = LoadStatus::Errored;
                    s.error = Some(e.to_string());
                });
                None
            }
        }
    }

    /// [`list`](Self::list), reporting only whether it succeeded.
    pub async fn refresh(&self) -> bool {
        self.list().await.is_some()
    }

    // -- CRUD ---------------------------------------------------------------

    /// Persist a new project appended after the current local maximum
    /// display order, then refetch.
    ///
    /// Any display order the caller set is overwritten.
    pub async fn add(&self, mut project: Project) -> bool {
        let Some(display_order) = next_display_order(&self.projects()) else {
            tracing::error!(project_id = %project.id, "No display order left after i32::MAX");
            self.notifications.error(MSG_ADD_FAILED);
            return false;
        };
        project.display_order = display_order;

        match self.store.insert(&project).await {
            Ok(()) => {
                tracing::info!(
                    project_id = %project.id,
                    display_order = project.display_order,
                    "Project added",
                );
                self.refresh().await;
                true
            }
            Err(e) => {
                tracing::error!(error = %e, project_id = %project.id, "Error adding project");
                self.notifications.error(MSG_ADD_FAILED);
                false
            }
        }
    }

    /// Replace every field of the stored project with `project.id`, then
    /// refetch.
    pub async fn update(&self, project: Project) -> bool {
        match self.store.update(&project).await {
            Ok(()) => {
                tracing::info!(project_id = %project.id, "Project updated");
                self.refresh().await;
                true
            }
            Err(e) => {
                tracing::error!(error = %e, project_id = %project.id, "Error updating project");
                self.notifications.error(MSG_UPDATE_FAILED);
                false
            }
        }
    }

    /// Remove a project from the store, then refetch.
    pub async fn delete(&self, project_id: &str) -> bool {
        match self.store.delete(project_id).await {
            Ok(()) => {
                tracing::info!(project_id, "Project deleted");
                self.refresh().await;
                true
            }
            Err(e) => {
                tracing::error!(error = %e, project_id, "Error deleting project");
                self.notifications.error(MSG_DELETE_FAILED);
                false
            }
        }
    }

    // -- Reorder ------------------------------------------------------------

    /// Apply a new order locally, then persist it.
    ///
    /// `new_order` must hold every project of the local list. A list of a
    /// different length is rejected before anything changes.
    ///
    /// 1. Each project's display order becomes its 1-based position and the
    ///    local list is replaced before any store call.
    /// 2. Display orders are written one project at a time, in list order.
    /// 3. The first failed write stops the loop and the local list is
    ///    resynchronized with a full refetch, which may show a partially
    ///    applied order.
    pub async fn reorder(&self, new_order: Vec<Project>) -> bool {
        let current_len = self.projects().len();
        if new_order.len() != current_len {
            tracing::warn!(
                expected = current_len,
                received = new_order.len(),
                "Reorder does not cover the local list",
            );
            self.notifications.error(MSG_REORDER_FAILED);
            return false;
        }

        let reordered = Arc::new(renumber(new_order));
        self.state
            .send_modify(|s| s.projects = Arc::clone(&reordered));

        for project in reordered.iter() {
            if let Err(e) = self
                .store
                .update_display_order(&project.id, project.display_order)
                .await
            {
                tracing::error!(
                    error = %e,
                    project_id = %project.id,
                    display_order = project.display_order,
                    "Error saving project order, resynchronizing",
                );
                self.notifications.error(MSG_REORDER_FAILED);
                self.refresh().await;
                return false;
            }
        }

        tracing::info!(count = reordered.len(), "Project order saved");
        true
    }

    /// Move the project at `from` to `to` in the local list and
    /// [`reorder`](Self::reorder).
    ///
    /// Out-of-range indexes are rejected before anything changes.
    pub async fn move_project(&self, from: usize, to: usize) -> Result<bool, CoreError> {
        let moved = move_item(self.projects().as_ref().clone(), from, to)?;
        Ok(self.reorder(moved).await)
    }
}
