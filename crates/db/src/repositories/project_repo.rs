//! Repository for the `projects` table.

use folio_core::project::Project;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::project::ProjectRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, title_ko, description, description_ko, \
    website_url, editor_url, github_url, thumbnail_url, category, category_ko, \
    category_color, completion, documents, display_order, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// List all projects in canonical order: display order, then id.
    pub async fn list(pool: &PgPool) -> Result<Vec<ProjectRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY display_order ASC, id ASC");
        sqlx::query_as::<_, ProjectRow>(&query).fetch_all(pool).await
    }

    /// Insert a project with the id and display order it carries.
    pub async fn create(pool: &PgPool, project: &Project) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO projects (id, title, title_ko, description, description_ko, \
                website_url, editor_url, github_url, thumbnail_url, category, category_ko, \
                category_color, completion, documents, display_order) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)",
        )
        .bind(&project.id)
        .bind(&project.title)
        .bind(&project.title_ko)
        .bind(&project.description)
        .bind(&project.description_ko)
        .bind(&project.website_url)
        .bind(&project.editor_url)
        .bind(&project.github_url)
        .bind(&project.thumbnail_url)
        .bind(&project.category)
        .bind(&project.category_ko)
        .bind(project.category_color.name())
        .bind(project.completion)
        .bind(Json(&project.documents))
        .bind(project.display_order)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Overwrite every field of the row matching `project.id`.
    ///
    /// Returns `false` if no row with that id exists.
    pub async fn replace(pool: &PgPool, project: &Project) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE projects SET \
                title = $2, title_ko = $3, description = $4, description_ko = $5, \
                website_url = $6, editor_url = $7, github_url = $8, thumbnail_url = $9, \
                category = $10, category_ko = $11, category_color = $12, \
                completion = $13, documents = $14, display_order = $15 \
             WHERE id = $1",
        )
        .bind(&project.id)
        .bind(&project.title)
        .bind(&project.title_ko)
        .bind(&project.description)
        .bind(&project.description_ko)
        .bind(&project.website_url)
        .bind(&project.editor_url)
        .bind(&project.github_url)
        .bind(&project.thumbnail_url)
        .bind(&project.category)
        .bind(&project.category_ko)
        .bind(project.category_color.name())
        .bind(project.completion)
        .bind(Json(&project.documents))
        .bind(project.display_order)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Set only the display order of one project. Returns `false` if missing.
    pub async fn set_display_order(
        pool: &PgPool,
        id: &str,
        display_order: i32,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE projects SET display_order = $2 WHERE id = $1")
            .bind(id)
            .bind(display_order)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a project by id. Returns `true` if a row was removed.
    pub async fn hard_delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
