use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use folio_api::config::{ServerConfig, StoreBackend};
use folio_api::router::build_app_router;
use folio_api::state::AppState;
use folio_core::store::{BlobStore, MemoryProjectStore, ProjectStore};
use folio_events::{NotificationBus, NotificationLog};
use folio_repository::ProjectRepository;
use folio_storage::HttpBlobStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        store = ?config.store,
        uploads = config.storage.is_some(),
        "Loaded server configuration",
    );

    // --- Project store ---
    let project_store: Arc<dyn ProjectStore> = match config.store {
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .expect("DATABASE_URL must be set");

            let pool = folio_db::create_pool(database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            folio_db::health_check(&pool)
                .await
                .expect("Database health check failed");
            tracing::info!("Database health check passed");

            folio_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            Arc::new(folio_db::PgProjectStore::new(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory project store; edits are lost on restart");
            Arc::new(MemoryProjectStore::new())
        }
    };

    // --- Object store ---
    let blob_store: Option<Arc<dyn BlobStore>> = config.storage.as_ref().map(|storage| {
        Arc::new(HttpBlobStore::new(&storage.url, &storage.service_key)) as Arc<dyn BlobStore>
    });
    if blob_store.is_none() {
        tracing::warn!("STORAGE_URL not set; uploads are disabled");
    }

    // --- Notification bus ---
    let notifications = Arc::new(NotificationBus::default());
    let log_handle = tokio::spawn(NotificationLog::run(notifications.subscribe()));

    // --- Repository ---
    let repository = Arc::new(ProjectRepository::new(
        project_store,
        Arc::clone(&notifications),
    ));
    match repository.list().await {
        Some(projects) => tracing::info!(count = projects.len(), "Initial project list loaded"),
        None => tracing::warn!("Initial project load failed; serving an empty list until refresh"),
    }

    // --- App state ---
    let shutdown_timeout = Duration::from_secs(config.shutdown_timeout_secs);
    let state = AppState {
        config: Arc::new(config.clone()),
        repository: Arc::clone(&repository),
        notifications: Arc::clone(&notifications),
        blob_store,
    };
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    // Dropping the last bus handles closes the channel and ends the log task.
    drop(repository);
    drop(notifications);
    match tokio::time::timeout(shutdown_timeout, log_handle).await {
        Ok(Ok(logged)) => tracing::info!(logged, "Notification log stopped"),
        _ => tracing::warn!("Notification log did not stop in time"),
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
