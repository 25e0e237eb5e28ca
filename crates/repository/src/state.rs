//! Observable state of the local project list.

use std::sync::Arc;

use folio_core::project::Project;
use serde::Serialize;

/// Loading lifecycle: `Idle -> Loading -> {Ready | Errored}`.
///
/// Every refetch passes through `Loading` again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Errored,
}

/// A snapshot of the local list.
///
/// `projects` is replaced wholesale on every change, so a snapshot is never
/// observed half-updated.
#[derive(Debug, Clone, Default)]
pub struct ProjectListState {
    pub projects: Arc<Vec<Project>>,
    pub status: LoadStatus,
    /// Text of the last failed refetch; cleared by the next successful one.
    pub error: Option<String>,
}

impl ProjectListState {
    pub fn is_ready(&self) -> bool {
        self.status == LoadStatus::Ready
    }

    /// Look up a project in this snapshot.
    pub fn find(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }
}
