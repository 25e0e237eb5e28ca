//! Route definitions for the admin editing surface, mounted at `/admin`.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;
use folio_core::upload::MAX_DOCUMENT_BYTES;

use crate::handlers::{admin_project, notifications, upload};
use crate::state::AppState;

/// Room for multipart framing around the largest accepted file.
const UPLOAD_BODY_LIMIT: usize = MAX_DOCUMENT_BYTES + 64 * 1024;

/// Routes mounted at `/admin`. Every handler requires the admin role.
///
/// ```text
/// POST   /projects              -> create
/// PUT    /projects/{id}         -> update
/// DELETE /projects/{id}         -> delete
/// PUT    /projects/order        -> reorder
/// POST   /projects/move         -> move_project
/// POST   /projects/refresh      -> refresh
/// POST   /uploads/thumbnail     -> upload_thumbnail
/// POST   /uploads/documents     -> upload_document
/// GET    /notifications         -> ws_handler
/// ```
pub fn router() -> Router<AppState> {
    let upload_routes = Router::new()
        .route("/thumbnail", post(upload::upload_thumbnail))
        .route("/documents", post(upload::upload_document))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT));

    Router::new()
        .route("/projects", post(admin_project::create))
        .route("/projects/order", put(admin_project::reorder))
        .route("/projects/move", post(admin_project::move_project))
        .route("/projects/refresh", post(admin_project::refresh))
        .route(
            "/projects/{id}",
            put(admin_project::update).delete(admin_project::delete),
        )
        .nest("/uploads", upload_routes)
        .route("/notifications", get(notifications::ws_handler))
}
