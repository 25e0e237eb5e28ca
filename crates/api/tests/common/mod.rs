#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use folio_api::auth::jwt::{Claims, JwtConfig};
use folio_api::config::{ServerConfig, StoreBackend};
use folio_api::router::build_app_router;
use folio_api::state::AppState;
use folio_core::project::Project;
use folio_core::store::{BlobStore, MemoryBlobStore, MemoryProjectStore};
use folio_events::NotificationBus;
use folio_repository::ProjectRepository;
use http_body_util::BodyExt;
use tower::ServiceExt;

pub const PUBLIC_BASE: &str = "http://storage.test/public";
const BOUNDARY: &str = "folio-test-boundary";

/// Build a test `ServerConfig` with safe defaults and the in-memory store.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 1,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
        },
        store: StoreBackend::Memory,
        database_url: None,
        storage: None,
    }
}

/// Everything a test may want to inspect behind the router.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryProjectStore>,
    pub blobs: Arc<MemoryBlobStore>,
    pub repository: Arc<ProjectRepository>,
    pub notifications: Arc<NotificationBus>,
}

impl TestApp {
    /// A fresh router sharing this app's state, for one `oneshot` call.
    pub fn app(&self) -> Router {
        self.router.clone()
    }
}

/// Build the full application router over memory stores seeded with
/// `projects`, with the list already loaded.
pub async fn build_test_app(projects: Vec<Project>) -> TestApp {
    build_app(projects, true).await
}

/// Like [`build_test_app`] but with no object store configured.
pub async fn build_test_app_without_storage(projects: Vec<Project>) -> TestApp {
    build_app(projects, false).await
}

async fn build_app(projects: Vec<Project>, with_storage: bool) -> TestApp {
    let config = test_config();
    let store = Arc::new(MemoryProjectStore::with_projects(projects));
    let blobs = Arc::new(MemoryBlobStore::new(PUBLIC_BASE));
    let notifications = Arc::new(NotificationBus::default());
    let repository = Arc::new(ProjectRepository::new(
        store.clone(),
        Arc::clone(&notifications),
    ));
    repository.refresh().await;

    let blob_store: Option<Arc<dyn BlobStore>> = if with_storage {
        Some(blobs.clone() as Arc<dyn BlobStore>)
    } else {
        None
    };

    let state = AppState {
        config: Arc::new(config.clone()),
        repository: Arc::clone(&repository),
        notifications: Arc::clone(&notifications),
        blob_store,
    };

    TestApp {
        router: build_app_router(state, &config),
        store,
        blobs,
        repository,
        notifications,
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn project(id: &str, order: i32) -> Project {
    let mut p = Project::new_draft();
    p.id = id.to_string();
    p.title = format!("Project {id}");
    p.display_order = order;
    p
}

/// A token as the identity provider would issue it, valid for 15 minutes.
pub fn token_with_role(role: &str) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: "test-user".to_string(),
        role: role.to_string(),
        exp: now + 15 * 60,
        iat: now,
        jti: uuid::Uuid::new_v4().to_string(),
    };
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(test_config().jwt.secret.as_bytes()),
    )
    .expect("token generation")
}

pub fn admin_token() -> String {
    token_with_role("admin")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is JSON")
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should complete")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn json_auth(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    json_auth(app, Method::POST, uri, body, token).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    json_auth(app, Method::PUT, uri, body, token).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// One part of a multipart form: `(field, file name, content type, bytes)`.
/// Text fields pass `None` for file name and content type.
pub type Part<'a> = (&'a str, Option<&'a str>, Option<&'a str>, &'a [u8]);

pub async fn post_multipart_auth(
    app: Router,
    uri: &str,
    parts: &[Part<'_>],
    token: &str,
) -> Response<Body> {
    let mut body = Vec::new();
    for (field, file_name, content_type, bytes) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match file_name {
            Some(file_name) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n"
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{field}\"\r\n").as_bytes(),
            ),
        }
        if let Some(content_type) = content_type {
            body.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}
