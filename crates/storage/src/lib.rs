//! HTTP client for the hosted object storage service.
//!
//! Speaks the storage REST dialect used by the hosted backend:
//! `POST /storage/v1/object/{bucket}/{key}` to upload and
//! `/storage/v1/object/public/{bucket}/{key}` as the public download path.

use async_trait::async_trait;
use folio_core::store::{BlobStore, StoreError};
use folio_core::upload::CACHE_CONTROL_SECS;
use serde::Deserialize;

/// Object store reached over HTTP with a service key.
pub struct HttpBlobStore {
    client: reqwest::Client,
    base_url: String,
    service_key: String,
}

/// Body returned by a successful upload.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    /// `{bucket}/{path}` of the stored object.
    #[serde(rename = "Key")]
    key: String,
}

impl HttpBlobStore {
    /// Create a client for the storage service at `base_url`
    /// (e.g. `https://xyz.example.co`).
    pub fn new(base_url: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, service_key)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        service_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            service_key: service_key.into(),
        }
    }

    fn object_url(&self, bucket: &str, key: &str) -> String {
        format!("{}/storage/v1/object/{bucket}/{key}", self.base_url)
    }

    /// Ensure the response has a success status code, otherwise turn the
    /// status and body text into a rejection.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl BlobStore for HttpBlobStore {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StoreError> {
        let size = bytes.len();
        let response = self
            .client
            .post(self.object_url(bucket, key))
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header(reqwest::header::CACHE_CONTROL, format!("max-age={CACHE_CONTROL_SECS}"))
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let response = Self::ensure_success(response).await?;
        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        let path = stored_path(bucket, &body.key);
        tracing::debug!(bucket, path = %path, size, "Object uploaded");
        Ok(path)
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/public/{bucket}/{path}", self.base_url)
    }
}

/// Strip the bucket prefix the service puts in front of stored keys.
fn stored_path(bucket: &str, key: &str) -> String {
    key.strip_prefix(bucket)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(key)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_url_uses_public_object_path() {
        let store = HttpBlobStore::new("https://files.example.co/", "key");
        assert_eq!(
            store.public_url("project-thumbnails", "1-abc.png"),
            "https://files.example.co/storage/v1/object/public/project-thumbnails/1-abc.png"
        );
    }

    #[test]
    fn upload_url_targets_bucket_and_key() {
        let store = HttpBlobStore::new("https://files.example.co", "key");
        assert_eq!(
            store.object_url("project-documents", "1-abc.pdf"),
            "https://files.example.co/storage/v1/object/project-documents/1-abc.pdf"
        );
    }

    #[test]
    fn stored_path_strips_bucket_prefix() {
        assert_eq!(stored_path("project-documents", "project-documents/1-a.pdf"), "1-a.pdf");
        assert_eq!(stored_path("project-documents", "1-a.pdf"), "1-a.pdf");
    }

    #[test]
    fn upload_response_reads_key_field() {
        let body: UploadResponse =
            serde_json::from_str(r#"{"Key":"project-documents/1-a.pdf","Id":"x"}"#).unwrap();
        assert_eq!(body.key, "project-documents/1-a.pdf");
    }

    #[tokio::test]
    async fn unreachable_service_reports_unavailable() {
        let store = HttpBlobStore::new("http://127.0.0.1:9", "key");
        let err = store
            .upload("project-documents", "1-a.pdf", "application/pdf", vec![1])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }
}
