//! Project row model and its mapping to the domain entity.

use folio_core::project::{CategoryColor, Project, ProjectDocument};
use folio_core::types::{ProjectId, Timestamp};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `projects` table.
///
/// Each locale has its own column; `documents` is an opaque JSON array.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectRow {
    pub id: ProjectId,
    pub title: String,
    pub title_ko: String,
    pub description: String,
    pub description_ko: String,
    pub website_url: String,
    pub editor_url: String,
    pub github_url: String,
    pub thumbnail_url: String,
    pub category: String,
    pub category_ko: String,
    pub category_color: String,
    pub completion: i32,
    pub documents: Json<Vec<ProjectDocument>>,
    pub display_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProjectRow {
    /// Translate into the domain entity.
    ///
    /// Fails only on a `category_color` outside the known set.
    pub fn into_project(self) -> Result<Project, String> {
        let category_color = CategoryColor::from_name(&self.category_color)
            .map_err(|e| format!("project {}: {e}", self.id))?;

        Ok(Project {
            id: self.id,
            title: self.title,
            title_ko: self.title_ko,
            description: self.description,
            description_ko: self.description_ko,
            website_url: self.website_url,
            editor_url: self.editor_url,
            github_url: self.github_url,
            thumbnail_url: self.thumbnail_url,
            category: self.category,
            category_ko: self.category_ko,
            category_color,
            completion: self.completion,
            documents: self.documents.0,
            display_order: self.display_order,
        })
    }
}
