use std::sync::Arc;

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{error, info};

use crate::database::models::tenant::{Tenant, TenantWithBilling};
use crate::database::provision::{ProvisionError, Provisioner};

#[derive(Debug, thiserror::Error)]
pub enum TenantError {
    #[error("invalid tenant name: {0}")]
    InvalidName(String),

    #[error("duplicate tenant: {0}")]
    Duplicate(String),

    #[error("registry error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("provisioning failed: {0}")]
    Provision(#[from] ProvisionError),
}

/// Validate a proposed tenant slug: lowercase letter first, lowercase
/// letter or digit last, lowercase/digit/hyphen in between, 2-63 chars.
pub fn is_valid_tenant_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    if bytes.len() < 2 || bytes.len() > 63 {
        return false;
    }
    if !bytes[0].is_ascii_lowercase() {
        return false;
    }
    let last = bytes[bytes.len() - 1];
    if !last.is_ascii_lowercase() && !last.is_ascii_digit() {
        return false;
    }
    bytes
        .iter()
        .all(|&b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// Creates tenants: registry row first, then the tenant's own database.
pub struct TenantService {
    registry: SqlitePool,
    provisioner: Arc<dyn Provisioner>,
}

impl TenantService {
    pub fn new(registry: SqlitePool, provisioner: Arc<dyn Provisioner>) -> Self {
        Self {
            registry,
            provisioner,
        }
    }

    /// Create a new tenant: insert the registry row, provision its database.
    ///
    /// The identifier comes from the insert itself, and a provisioning
    /// failure removes the row again so the registry never advertises a
    /// tenant without a database behind it.
    pub async fn add(&self, name: &str, display_name: &str) -> Result<TenantWithBilling, TenantError> {
        if !is_valid_tenant_name(name) {
            return Err(TenantError::InvalidName(name.to_string()));
        }

        let now = Utc::now().timestamp();
        let result = sqlx::query(
            "INSERT INTO tenant (name, display_name, created_at, updated_at) VALUES (?, ?, ?, ?)",
        )
        .bind(name)
        .bind(display_name)
        .bind(now)
        .bind(now)
        .execute(&self.registry)
        .await;

        let result = match result {
            Ok(result) => result,
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                return Err(TenantError::Duplicate(name.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        let id = result.last_insert_rowid();

        if let Err(provision_err) = self.provisioner.provision(id).await {
            error!(
                tenant_id = id,
                name,
                error = %provision_err,
                "provisioning failed, removing registry row"
            );
            if let Err(delete_err) = sqlx::query("DELETE FROM tenant WHERE id = ?")
                .bind(id)
                .execute(&self.registry)
                .await
            {
                error!(
                    tenant_id = id,
                    error = %delete_err,
                    "failed to remove registry row after provisioning failure"
                );
            }
            return Err(provision_err.into());
        }

        info!(tenant_id = id, name, "created tenant");

        Ok(TenantWithBilling {
            id,
            name: name.to_string(),
            display_name: display_name.to_string(),
            billing_yen: 0,
        })
    }

    /// Get tenant info by name
    pub async fn get_tenant(&self, name: &str) -> Result<Option<Tenant>, TenantError> {
        let row = sqlx::query_as::<_, Tenant>(
            "SELECT id, name, display_name, created_at, updated_at FROM tenant WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&self.registry)
        .await?;

        Ok(row)
    }

    /// List all tenants, newest first
    pub async fn list_tenants(&self) -> Result<Vec<Tenant>, TenantError> {
        let rows = sqlx::query_as::<_, Tenant>(
            "SELECT id, name, display_name, created_at, updated_at FROM tenant \
             ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.registry)
        .await?;

        Ok(rows)
    }
}
