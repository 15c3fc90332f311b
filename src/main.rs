use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use tenantd::config::AppConfig;
use tenantd::database::manager;
use tenantd::database::provision::SchemaScriptProvisioner;
use tenantd::handlers;
use tenantd::services::tenant_service::TenantService;
use tenantd::AppState;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, TENANTD_DB_DIR, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();
    tracing::info!(
        registry = %config.registry_url,
        tenant_db_dir = %config.tenant_db_dir.display(),
        "starting tenantd"
    );

    std::fs::create_dir_all(&config.tenant_db_dir).unwrap_or_else(|e| {
        panic!(
            "failed to create tenant db dir {}: {}",
            config.tenant_db_dir.display(),
            e
        )
    });

    let registry = manager::connect_registry(&config.registry_url)
        .await
        .unwrap_or_else(|e| panic!("failed to open registry database: {}", e));

    let provisioner = Arc::new(SchemaScriptProvisioner::new(
        config.tenant_db_dir.clone(),
        config.schema_path.clone(),
    ));
    let tenants = Arc::new(TenantService::new(registry.clone(), provisioner));

    let app = app(AppState { registry, tenants });

    let bind_addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("tenantd listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Admin API
        .merge(admin_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn admin_routes() -> Router<AppState> {
    use handlers::admin;

    Router::new().route("/api/admin/tenant/add", post(admin::tenant_add))
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "tenantd",
        "version": version,
        "description": "Tenant registry and provisioning admin API",
        "endpoints": {
            "home": "/ (public)",
            "health": "/health (public)",
            "tenant_add": "POST /api/admin/tenant/add (admin)",
        }
    }))
}

async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let now = chrono::Utc::now();

    match manager::health_check(&state.registry).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "registry": "ok"
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "timestamp": now,
                "registry_error": e.to_string()
            })),
        ),
    }
}
