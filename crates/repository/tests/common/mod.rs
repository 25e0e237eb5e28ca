//! Test doubles for repository integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use folio_core::project::Project;
use folio_core::store::{MemoryProjectStore, ProjectStore, StoreError};
use folio_events::NotificationBus;
use folio_repository::ProjectRepository;
use tokio::sync::Semaphore;

/// A memory store with switchable failures and an optional gate in front of
/// display-order writes.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: MemoryProjectStore,
    pub fail_select: AtomicBool,
    pub fail_insert: AtomicBool,
    pub fail_update: AtomicBool,
    pub fail_delete: AtomicBool,
    /// Ids whose display-order write is rejected.
    pub fail_order_for: Mutex<HashSet<String>>,
    /// Ids whose display-order write was attempted, in call order.
    pub order_writes: Mutex<Vec<String>>,
    /// When set, each display-order write waits for one permit.
    pub order_gate: Option<Arc<Semaphore>>,
}

impl FlakyStore {
    pub fn with_projects(projects: Vec<Project>) -> Self {
        Self {
            inner: MemoryProjectStore::with_projects(projects),
            ..Self::default()
        }
    }

    pub fn gated(projects: Vec<Project>, gate: Arc<Semaphore>) -> Self {
        Self {
            order_gate: Some(gate),
            ..Self::with_projects(projects)
        }
    }

    pub fn fail_order_write(&self, id: &str) {
        self.fail_order_for.lock().unwrap().insert(id.to_string());
    }

    pub fn order_writes(&self) -> Vec<String> {
        self.order_writes.lock().unwrap().clone()
    }
}

fn rejected() -> StoreError {
    StoreError::Rejected {
        status: 500,
        message: "injected failure".to_string(),
    }
}

#[async_trait]
impl ProjectStore for FlakyStore {
    async fn select_all(&self) -> Result<Vec<Project>, StoreError> {
        if self.fail_select.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("injected outage".to_string()));
        }
        self.inner.select_all().await
    }

    async fn insert(&self, project: &Project) -> Result<(), StoreError> {
        if self.fail_insert.load(Ordering::SeqCst) {
            return Err(rejected());
        }
        self.inner.insert(project).await
    }

    async fn update(&self, project: &Project) -> Result<(), StoreError> {
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(rejected());
        }
        self.inner.update(project).await
    }

    async fn update_display_order(
        &self,
        id: &str,
        display_order: i32,
    ) -> Result<(), StoreError> {
        self.order_writes.lock().unwrap().push(id.to_string());
        if let Some(gate) = &self.order_gate {
            gate.acquire().await.expect("gate closed").forget();
        }
        if self.fail_order_for.lock().unwrap().contains(id) {
            return Err(rejected());
        }
        self.inner.update_display_order(id, display_order).await
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(rejected());
        }
        self.inner.delete(id).await
    }
}

pub fn project(id: &str, order: i32) -> Project {
    let mut p = Project::new_draft();
    p.id = id.to_string();
    p.title = format!("Project {id}");
    p.display_order = order;
    p
}

pub fn ids(projects: &[Project]) -> Vec<String> {
    projects.iter().map(|p| p.id.clone()).collect()
}

pub fn orders(projects: &[Project]) -> Vec<(String, i32)> {
    projects
        .iter()
        .map(|p| (p.id.clone(), p.display_order))
        .collect()
}

/// Repository over `store` plus the bus it reports to.
pub fn repository(store: Arc<FlakyStore>) -> (Arc<ProjectRepository>, Arc<NotificationBus>) {
    let bus = Arc::new(NotificationBus::default());
    let repo = Arc::new(ProjectRepository::new(store, Arc::clone(&bus)));
    (repo, bus)
}
