use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Registry row for a tenant. Timestamps are seconds since epoch.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tenant {
    pub id: i64,
    pub name: String,
    pub display_name: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Response shape for tenant creation. Billing always starts at zero;
/// aggregation over the tenant's own database happens elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantWithBilling {
    pub id: i64,
    pub name: String,
    pub display_name: String,
    pub billing_yen: i64,
}
