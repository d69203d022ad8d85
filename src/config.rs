use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::AppError;

/// Which document store backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Mongo,
    Memory,
}

/// Service configuration.
///
/// Loaded from built-in defaults, then an optional TOML file, then
/// `GEODOCS_*` environment variables (e.g. `GEODOCS_MONGODB_URI`).
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    pub store: StoreBackend,
    pub mongodb_uri: String,
    pub mongodb_database: String,
    pub collection: String,
    /// Upper bound on the store retrieval of a single search.
    pub search_timeout_secs: u64,
    /// Default tracing filter; `RUST_LOG` takes precedence.
    pub log_filter: String,
}

impl AppConfig {
    /// Load the configuration.
    ///
    /// With `path` set the file must exist; otherwise `geodocs.toml` in the
    /// working directory is read if present.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let file = match path {
            Some(p) => config::File::from(p).required(true),
            None => config::File::with_name("geodocs").required(false),
        };

        let settings = config::Config::builder()
            .set_default("bind_addr", "0.0.0.0:8000")
            .and_then(|b| b.set_default("store", "mongo"))
            .and_then(|b| b.set_default("mongodb_uri", "mongodb://localhost:27017"))
            .and_then(|b| b.set_default("mongodb_database", "document_service"))
            .and_then(|b| b.set_default("collection", "documents"))
            .and_then(|b| b.set_default("search_timeout_secs", 10_i64))
            .and_then(|b| b.set_default("log_filter", "geodocs=info,tower_http=info"))
            .map_err(config_error)?
            .add_source(file)
            .add_source(config::Environment::with_prefix("GEODOCS"))
            .build()
            .map_err(config_error)?;

        let config: AppConfig = settings.try_deserialize().map_err(config_error)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.search_timeout_secs == 0 {
            return Err(AppError::Internal(
                "search_timeout_secs must be greater than zero".into(),
            ));
        }
        if self.bind_addr.trim().is_empty() {
            return Err(AppError::Internal("bind_addr cannot be empty".into()));
        }
        Ok(())
    }

    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }
}

fn config_error(err: config::ConfigError) -> AppError {
    AppError::Internal(format!("Invalid configuration: {err}"))
}
