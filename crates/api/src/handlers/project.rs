//! Public read handlers over the local project list.

use axum::extract::{Path, Query, State};
use axum::Json;
use folio_core::error::CoreError;
use folio_core::locale::{Language, LocalizedProject, ProjectSummary};
use folio_core::project::Project;
use folio_core::types::ProjectId;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/projects
pub async fn list(State(state): State<AppState>) -> Json<DataResponse<Vec<Project>>> {
    let projects = state.repository.projects();
    Json(DataResponse {
        data: projects.as_ref().clone(),
    })
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<ProjectId>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = state
        .repository
        .find(&id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(DataResponse { data: project }))
}

#[derive(Debug, Deserialize)]
pub struct ShowcaseQuery {
    pub lang: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Showcase {
    pub language: Language,
    pub projects: Vec<LocalizedProject>,
    pub summary: ProjectSummary,
}

/// GET /api/v1/showcase?lang=en|ko
///
/// Project cards in the requested language plus landing-page figures.
pub async fn showcase(
    State(state): State<AppState>,
    Query(query): Query<ShowcaseQuery>,
) -> AppResult<Json<DataResponse<Showcase>>> {
    let language = match query.lang.as_deref() {
        Some(code) => Language::parse(code)?,
        None => Language::default(),
    };

    let projects = state.repository.projects();
    let showcase = Showcase {
        language,
        projects: projects
            .iter()
            .map(|p| LocalizedProject::new(p, language))
            .collect(),
        summary: ProjectSummary::from_projects(&projects),
    };
    Ok(Json(DataResponse { data: showcase }))
}
