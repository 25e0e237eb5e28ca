use std::str::FromStr;

use crate::auth::jwt::JwtConfig;

/// Which [`ProjectStore`](folio_core::store::ProjectStore) backs the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// PostgreSQL through `folio-db`. Requires `DATABASE_URL`.
    Postgres,
    /// Process-local store; contents are lost on restart.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(format!(
                "Unknown project store '{other}'. Must be one of: postgres, memory"
            )),
        }
    }
}

/// Connection details for the hosted object store.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub url: String,
    pub service_key: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long background tasks get to drain after the server stops.
    pub shutdown_timeout_secs: u64,
    /// JWT verification settings for admin bearer tokens.
    pub jwt: JwtConfig,
    /// Project store backend (default: `postgres`).
    pub store: StoreBackend,
    /// Required when `store` is [`StoreBackend::Postgres`].
    pub database_url: Option<String>,
    /// Object storage for uploads; uploads answer 503 when absent.
    pub storage: Option<StorageConfig>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                    |
    /// |-------------------------|----------------------------|
    /// | `HOST`                  | `0.0.0.0`                  |
    /// | `PORT`                  | `3000`                     |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `5`                        |
    /// | `JWT_SECRET`            | -- (required)              |
    /// | `PROJECT_STORE`         | `postgres`                 |
    /// | `DATABASE_URL`          | -- (required for postgres) |
    /// | `STORAGE_URL`           | -- (uploads disabled)      |
    /// | `STORAGE_SERVICE_KEY`   | -- (required with URL)     |
    ///
    /// # Panics
    ///
    /// Panics on any malformed value, so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "5".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let store: StoreBackend = std::env::var("PROJECT_STORE")
            .unwrap_or_else(|_| "postgres".into())
            .parse()
            .unwrap_or_else(|e: String| panic!("{e}"));

        let database_url = std::env::var("DATABASE_URL").ok();
        if store == StoreBackend::Postgres {
            assert!(
                database_url.is_some(),
                "DATABASE_URL must be set when PROJECT_STORE=postgres"
            );
        }

        let storage = std::env::var("STORAGE_URL").ok().map(|url| StorageConfig {
            url,
            service_key: std::env::var("STORAGE_SERVICE_KEY")
                .expect("STORAGE_SERVICE_KEY must be set when STORAGE_URL is set"),
        });

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            jwt,
            store,
            database_url,
            storage,
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
