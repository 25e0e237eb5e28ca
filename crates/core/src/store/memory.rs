//! Process-local store implementations.
//!
//! Used when the server runs with `PROJECT_STORE=memory` and by tests that
//! need a store without a database.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{BlobStore, ProjectStore, StoreError};
use crate::ordering::sort_canonical;
use crate::project::Project;

const CONFLICT: u16 = 409;

/// In-memory `projects` table.
#[derive(Default)]
pub struct MemoryProjectStore {
    rows: RwLock<Vec<Project>>,
}

impl MemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given rows, stored as-is.
    pub fn with_projects(projects: Vec<Project>) -> Self {
        Self {
            rows: RwLock::new(projects),
        }
    }

    /// Number of stored rows.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl ProjectStore for MemoryProjectStore {
    async fn select_all(&self) -> Result<Vec<Project>, StoreError> {
        let mut rows = self.rows.read().await.clone();
        sort_canonical(&mut rows);
        Ok(rows)
    }

    async fn insert(&self, project: &Project) -> Result<(), StoreError> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|p| p.id == project.id) {
            return Err(StoreError::Rejected {
                status: CONFLICT,
                message: format!("duplicate key value: id {}", project.id),
            });
        }
        rows.push(project.clone());
        Ok(())
    }

    async fn update(&self, project: &Project) -> Result<(), StoreError> {
        let mut rows = self.rows.write().await;
        let row = rows
            .iter_mut()
            .find(|p| p.id == project.id)
            .ok_or_else(|| StoreError::NotFound(project.id.clone()))?;
        *row = project.clone();
        Ok(())
    }

    async fn update_display_order(
        &self,
        id: &str,
        display_order: i32,
    ) -> Result<(), StoreError> {
        let mut rows = self.rows.write().await;
        let row = rows
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        row.display_order = display_order;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|p| p.id != id);
        if rows.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

/// A stored object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// In-memory object store.
pub struct MemoryBlobStore {
    public_base: String,
    objects: RwLock<HashMap<(String, String), StoredObject>>,
}

impl MemoryBlobStore {
    /// `public_base` prefixes every public URL, e.g. `http://localhost:3000/files`.
    pub fn new(public_base: impl Into<String>) -> Self {
        Self {
            public_base: public_base.into().trim_end_matches('/').to_string(),
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Fetch a stored object.
    pub async fn get(&self, bucket: &str, path: &str) -> Option<StoredObject> {
        self.objects
            .read()
            .await
            .get(&(bucket.to_string(), path.to_string()))
            .cloned()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StoreError> {
        let mut objects = self.objects.write().await;
        let slot = (bucket.to_string(), key.to_string());
        if objects.contains_key(&slot) {
            return Err(StoreError::Rejected {
                status: CONFLICT,
                message: format!("object {bucket}/{key} already exists"),
            });
        }
        objects.insert(
            slot,
            StoredObject {
                content_type: content_type.to_string(),
                bytes,
            },
        );
        Ok(key.to_string())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/{bucket}/{path}", self.public_base)
    }
}
