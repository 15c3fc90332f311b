use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Runtime configuration, resolved once at startup and injected into the
/// components that need it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Port the HTTP server binds to.
    pub port: u16,
    /// sqlx URL of the shared tenant registry database.
    pub registry_url: String,
    /// Directory holding the per-tenant database files (`<id>.db`).
    pub tenant_db_dir: PathBuf,
    /// Schema script applied to each newly provisioned tenant database.
    pub schema_path: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::defaults().with_env_overrides()
    }

    fn defaults() -> Self {
        Self {
            port: 3000,
            registry_url: "sqlite://registry.db".to_string(),
            tenant_db_dir: PathBuf::from("tenant_db"),
            schema_path: PathBuf::from("sql/tenant_schema.sql"),
        }
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("TENANTD_PORT").or_else(|_| env::var("PORT")) {
            self.port = v.parse().unwrap_or(self.port);
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            self.registry_url = v;
        }
        if let Ok(v) = env::var("TENANTD_DB_DIR") {
            self.tenant_db_dir = PathBuf::from(v);
        }
        if let Ok(v) = env::var("TENANTD_SCHEMA_PATH") {
            self.schema_path = PathBuf::from(v);
        }
        self
    }
}
