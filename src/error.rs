// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse};

use crate::services::tenant_service::TenantError;

/// HTTP API error with appropriate status codes and client-friendly messages.
///
/// Responses carry plain-text bodies; the admin API contract expects
/// `"invalid tenant name"` / `"duplicate tenant"` verbatim on 400s.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
            ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

// Convert service errors to ApiError at the HTTP boundary
impl From<TenantError> for ApiError {
    fn from(err: TenantError) -> Self {
        match err {
            TenantError::InvalidName(_) => ApiError::bad_request("invalid tenant name"),
            TenantError::Duplicate(_) => ApiError::bad_request("duplicate tenant"),
            TenantError::Database(e) => {
                // Don't expose internal SQL errors to clients
                tracing::error!("registry error: {}", e);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
            TenantError::Provision(e) => {
                tracing::error!("tenant provisioning error: {}", e);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let body = self.message().to_string();
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::provision::ProvisionError;

    #[test]
    fn test_invalid_name_maps_to_contract_body() {
        let api: ApiError = TenantError::InvalidName("Bad".to_string()).into();
        assert_eq!(api.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(api.message(), "invalid tenant name");
    }

    #[test]
    fn test_duplicate_maps_to_contract_body() {
        let api: ApiError = TenantError::Duplicate("acme".to_string()).into();
        assert_eq!(api.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(api.message(), "duplicate tenant");
    }

    #[test]
    fn test_provision_failure_is_generic_500() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let api: ApiError = TenantError::Provision(ProvisionError::Io(io)).into();
        assert_eq!(api.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!api.message().contains("boom"));
    }
}
