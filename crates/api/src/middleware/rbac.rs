//! Admin gate for the editing surface.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use folio_core::error::CoreError;
use folio_core::roles::ROLE_ADMIN;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Fails with `Forbidden` unless `user` carries the admin role.
pub fn ensure_admin(user: &AuthUser) -> Result<(), CoreError> {
    if user.role == ROLE_ADMIN {
        return Ok(());
    }
    tracing::warn!(subject = %user.subject, role = %user.role, "Non-admin edit attempt");
    Err(CoreError::Forbidden("Admin role required".into()))
}

/// An authenticated caller with the admin role. Missing or invalid tokens
/// answer 401, any other role 403.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        ensure_admin(&user)?;
        Ok(RequireAdmin(user))
    }
}
