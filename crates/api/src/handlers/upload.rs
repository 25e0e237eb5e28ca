//! Admin upload handlers for thumbnails and project documents.
//!
//! Files are validated before anything is sent to the object store and are
//! stored under a generated key; the response carries the public URL.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::project::ProjectDocument;
use folio_core::store::BlobStore;
use folio_core::upload::{
    display_name_from_file, document_kind_for, generate_object_key, UploadTarget,
};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

pub const MSG_IMAGE_UPLOADED: &str = "Image uploaded successfully";
pub const MSG_IMAGE_FAILED: &str = "Failed to upload image";
pub const MSG_DOCUMENT_UPLOADED: &str = "Document uploaded successfully";
pub const MSG_DOCUMENT_FAILED: &str = "Failed to upload document";

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A file received in a multipart form.
struct ReceivedFile {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

/// Read the required `file` field and the optional `name` field.
async fn read_form(mut multipart: Multipart) -> AppResult<(ReceivedFile, Option<String>)> {
    let mut file: Option<ReceivedFile> = None;
    let mut name: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or(DEFAULT_CONTENT_TYPE)
                    .to_string();
                let bytes = field.bytes().await?.to_vec();
                file = Some(ReceivedFile {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            "name" => {
                let text = field.text().await?;
                if !text.trim().is_empty() {
                    name = Some(text.trim().to_string());
                }
            }
            _ => {} // ignore unknown fields
        }
    }

    let file =
        file.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;
    Ok((file, name))
}

fn blob_store(state: &AppState) -> AppResult<Arc<dyn BlobStore>> {
    state
        .blob_store
        .clone()
        .ok_or_else(|| AppError::ServiceUnavailable("Object storage is not configured".into()))
}

/// Validate and store `file`, returning its public URL.
///
/// Publishes `failure_message` when the store rejects the upload.
async fn store_file(
    state: &AppState,
    target: UploadTarget,
    file: ReceivedFile,
    failure_message: &str,
) -> AppResult<String> {
    target.validate(&file.content_type, file.bytes.len())?;
    let blob_store = blob_store(state)?;

    let bucket = target.bucket();
    let key = generate_object_key(&file.file_name);
    let size = file.bytes.len();

    match blob_store
        .upload(bucket, &key, &file.content_type, file.bytes)
        .await
    {
        Ok(path) => {
            tracing::info!(bucket, path = %path, size, "File uploaded");
            Ok(blob_store.public_url(bucket, &path))
        }
        Err(e) => {
            tracing::error!(error = %e, bucket, key = %key, "Upload failed");
            state.notifications.error(failure_message);
            Err(AppError::Store(e))
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UploadedThumbnail {
    pub url: String,
}

/// POST /api/v1/admin/uploads/thumbnail
///
/// Multipart form with a required `file` image (5 MB max).
pub async fn upload_thumbnail(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<UploadedThumbnail>>)> {
    let (file, _) = read_form(multipart).await?;
    let url = store_file(&state, UploadTarget::Thumbnail, file, MSG_IMAGE_FAILED).await?;

    state.notifications.success(MSG_IMAGE_UPLOADED);
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UploadedThumbnail { url },
        }),
    ))
}

/// POST /api/v1/admin/uploads/documents
///
/// Multipart form with a required `file` (PDF or image, 10 MB max) and an
/// optional display `name`; without one the file name minus its extension
/// is used. The returned document is attached by saving the project.
pub async fn upload_document(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<ProjectDocument>>)> {
    let (file, name) = read_form(multipart).await?;
    let name = name.unwrap_or_else(|| display_name_from_file(&file.file_name));
    let kind = document_kind_for(&file.content_type);

    let url = store_file(&state, UploadTarget::Document, file, MSG_DOCUMENT_FAILED).await?;
    // Validation above guarantees a kind.
    let kind = kind.ok_or_else(|| AppError::InternalError("Unclassified document".into()))?;

    state.notifications.success(MSG_DOCUMENT_UPLOADED);
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ProjectDocument::new(name, url, kind),
        }),
    ))
}
