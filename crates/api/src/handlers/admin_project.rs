//! Admin handlers that edit the project list through the repository.
//!
//! The repository reports failures as `false` after publishing a
//! notification; these handlers turn that into a 502 carrying the same text.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::ordering::arrange_by_ids;
use folio_core::project::{
    validate_completion, CategoryColor, Project, ProjectDocument, DEFAULT_CATEGORY,
    DEFAULT_CATEGORY_KO,
};
use folio_core::types::{new_project_id, ProjectId};
use folio_repository::repository::{
    MSG_ADD_FAILED, MSG_DELETE_FAILED, MSG_REORDER_FAILED, MSG_UPDATE_FAILED,
};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Editable project fields as submitted by the edit form.
///
/// Omitted text fields are blank, matching a fresh draft.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    /// Ignored on update; generated on create when absent.
    #[serde(default)]
    pub id: Option<ProjectId>,
    pub title: String,
    #[serde(default)]
    pub title_ko: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub description_ko: String,
    #[serde(default)]
    pub website_url: String,
    #[serde(default)]
    pub editor_url: String,
    #[serde(default)]
    pub github_url: String,
    #[serde(default)]
    pub thumbnail_url: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_category_ko")]
    pub category_ko: String,
    #[serde(default)]
    pub category_color: CategoryColor,
    #[serde(default)]
    pub completion: i32,
    #[serde(default)]
    pub documents: Vec<ProjectDocument>,
    /// Ignored on create; kept from the current project on update when absent.
    #[serde(default)]
    pub display_order: Option<i32>,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_category_ko() -> String {
    DEFAULT_CATEGORY_KO.to_string()
}

impl ProjectInput {
    fn into_project(self, id: ProjectId, display_order: i32) -> Project {
        Project {
            id,
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
            category_color: self.category_color,
            completion: self.completion,
            documents: self.documents,
            display_order,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    /// Every project id, in the new order.
    pub ids: Vec<ProjectId>,
}

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub from: usize,
    pub to: usize,
}

fn not_found(id: ProjectId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Project",
        id,
    })
}

fn current_list(state: &AppState) -> Json<DataResponse<Vec<Project>>> {
    Json(DataResponse {
        data: state.repository.projects().as_ref().clone(),
    })
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/projects
///
/// Appends the project after the current last one.
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<ProjectInput>,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    validate_completion(input.completion)?;

    let id = input
        .id
        .clone()
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(new_project_id);
    let project = input.into_project(id.clone(), 0);

    if !state.repository.add(project.clone()).await {
        return Err(AppError::StoreFailed(MSG_ADD_FAILED.to_string()));
    }

    tracing::info!(project_id = %id, admin = %admin.subject, "Project created");
    let created = state.repository.find(&id).unwrap_or(project);
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// PUT /api/v1/admin/projects/{id}
///
/// Full replacement. The path id wins over any id in the body.
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<ProjectId>,
    Json(input): Json<ProjectInput>,
) -> AppResult<Json<DataResponse<Project>>> {
    let existing = state.repository.find(&id).ok_or_else(|| not_found(id.clone()))?;
    validate_completion(input.completion)?;

    let display_order = input.display_order.unwrap_or(existing.display_order);
    let project = input.into_project(id.clone(), display_order);

    if !state.repository.update(project.clone()).await {
        return Err(AppError::StoreFailed(MSG_UPDATE_FAILED.to_string()));
    }

    tracing::info!(project_id = %id, admin = %admin.subject, "Project updated");
    let updated = state.repository.find(&id).unwrap_or(project);
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/admin/projects/{id}
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<ProjectId>,
) -> AppResult<StatusCode> {
    if state.repository.find(&id).is_none() {
        return Err(not_found(id));
    }

    if !state.repository.delete(&id).await {
        return Err(AppError::StoreFailed(MSG_DELETE_FAILED.to_string()));
    }

    tracing::info!(project_id = %id, admin = %admin.subject, "Project deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// PUT /api/v1/admin/projects/order
///
/// `ids` must list every project exactly once.
pub async fn reorder(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let arranged = arrange_by_ids(&state.repository.projects(), &input.ids)?;

    if !state.repository.reorder(arranged).await {
        return Err(AppError::StoreFailed(MSG_REORDER_FAILED.to_string()));
    }
    Ok(current_list(&state))
}

/// POST /api/v1/admin/projects/move
///
/// Drag-and-drop: move the project at index `from` to index `to`.
pub async fn move_project(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<MoveRequest>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    if !state.repository.move_project(input.from, input.to).await? {
        return Err(AppError::StoreFailed(MSG_REORDER_FAILED.to_string()));
    }
    Ok(current_list(&state))
}

/// POST /api/v1/admin/projects/refresh
///
/// Reload the list from the store; the only way to retry after a failed load.
pub async fn refresh(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    if !state.repository.refresh().await {
        let reason = state
            .repository
            .snapshot()
            .error
            .unwrap_or_else(|| "Failed to load projects".to_string());
        return Err(AppError::ServiceUnavailable(reason));
    }
    Ok(current_list(&state))
}
