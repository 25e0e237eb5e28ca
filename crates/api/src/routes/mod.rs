pub mod admin;
pub mod health;
pub mod project;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects                          list (public)
/// /projects/{id}                     get (public)
/// /showcase?lang=en|ko               localized cards + summary (public)
///
/// /admin/projects                    create (admin only)
/// /admin/projects/{id}               update, delete
/// /admin/projects/order              reorder by ids (PUT)
/// /admin/projects/move               move one project (POST)
/// /admin/projects/refresh            reload from the store (POST)
/// /admin/uploads/thumbnail           upload a thumbnail image (POST)
/// /admin/uploads/documents           upload a document (POST)
/// /admin/notifications               notification feed (WebSocket)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/projects", project::router())
        .route("/showcase", get(handlers::project::showcase))
        .nest("/admin", admin::router())
}
