// handlers/admin/tenant_add.rs - POST /api/admin/tenant/add handler
use axum::{extract::State, response::Json, Form};
use serde::Deserialize;

use crate::database::models::tenant::TenantWithBilling;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AddTenantForm {
    pub name: String,
    pub display_name: String,
}

/// Create a new tenant and provision its database.
///
/// Responds 200 with `{id, name, display_name, billing_yen}` on success,
/// 400 with `"invalid tenant name"` or `"duplicate tenant"` on client errors.
pub async fn tenant_add(
    State(state): State<AppState>,
    Form(form): Form<AddTenantForm>,
) -> Result<Json<TenantWithBilling>, ApiError> {
    let created = state.tenants.add(&form.name, &form.display_name).await?;
    Ok(Json(created))
}
