//! [`ProjectStore`] implementation over a PostgreSQL pool.

use async_trait::async_trait;
use folio_core::project::Project;
use folio_core::store::{ProjectStore, StoreError};

use crate::repositories::ProjectRepo;
use crate::DbPool;

/// PostgreSQL unique constraint violation.
const UNIQUE_VIOLATION: &str = "23505";

/// Project store backed by the `projects` table.
#[derive(Clone)]
pub struct PgProjectStore {
    pool: DbPool,
}

impl PgProjectStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl ProjectStore for PgProjectStore {
    async fn select_all(&self) -> Result<Vec<Project>, StoreError> {
        let rows = ProjectRepo::list(&self.pool).await.map_err(store_error)?;
        rows.into_iter()
            .map(|row| row.into_project().map_err(StoreError::Decode))
            .collect()
    }

    async fn insert(&self, project: &Project) -> Result<(), StoreError> {
        ProjectRepo::create(&self.pool, project)
            .await
            .map_err(store_error)
    }

    async fn update(&self, project: &Project) -> Result<(), StoreError> {
        let found = ProjectRepo::replace(&self.pool, project)
            .await
            .map_err(store_error)?;
        if found {
            Ok(())
        } else {
            Err(StoreError::NotFound(project.id.clone()))
        }
    }

    async fn update_display_order(
        &self,
        id: &str,
        display_order: i32,
    ) -> Result<(), StoreError> {
        let found = ProjectRepo::set_display_order(&self.pool, id, display_order)
            .await
            .map_err(store_error)?;
        if found {
            Ok(())
        } else {
            Err(StoreError::NotFound(id.to_string()))
        }
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let found = ProjectRepo::hard_delete(&self.pool, id)
            .await
            .map_err(store_error)?;
        if found {
            Ok(())
        } else {
            Err(StoreError::NotFound(id.to_string()))
        }
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await.map_err(store_error)
    }
}

/// Classify a sqlx error into a [`StoreError`].
///
/// - Unique violations map to a 409 rejection.
/// - Other database-reported errors map to a 500 rejection.
/// - Connection-level failures map to `Unavailable`.
/// - Column decoding failures map to `Decode`.
pub fn store_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let status = if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                409
            } else {
                500
            };
            tracing::error!(error = %db_err, status, "Database rejected project query");
            StoreError::Rejected {
                status,
                message: db_err.message().to_string(),
            }
        }
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) | sqlx::Error::ColumnNotFound(_) => {
            StoreError::Decode(err.to_string())
        }
        other => {
            tracing::error!(error = %other, "Project store unavailable");
            StoreError::Unavailable(other.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn pool_failures_are_unavailable() {
        assert_matches!(store_error(sqlx::Error::PoolTimedOut), StoreError::Unavailable(_));
        assert_matches!(store_error(sqlx::Error::PoolClosed), StoreError::Unavailable(_));
    }

    #[test]
    fn missing_columns_are_decode_errors() {
        assert_matches!(
            store_error(sqlx::Error::ColumnNotFound("display_order".into())),
            StoreError::Decode(_)
        );
    }
}
