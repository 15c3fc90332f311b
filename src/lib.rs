pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod services;

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::services::tenant_service::TenantService;

/// Shared application state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub registry: SqlitePool,
    pub tenants: Arc<TenantService>,
}
