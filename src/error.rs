// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::admin::AdminError;
use crate::cache::CacheError;
use crate::gateway::GatewayError;
use crate::models::ValidationError;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 404 Not Found
    NotFound(String),

    // 422 Unprocessable Entity (form input rejected before any remote call)
    UnprocessableEntity {
        message: String,
        field_errors: HashMap<String, String>,
    },

    // 500 Internal Server Error
    InternalServerError(String),

    // 502 Bad Gateway (hosted backend rejected or mangled the request)
    BadGateway(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::NotFound(_) => 404,
            ApiError::UnprocessableEntity { .. } => 422,
            ApiError::InternalServerError(_) => 500,
            ApiError::BadGateway(_) => 502,
            ApiError::ServiceUnavailable(_) => 503,
        }
    }

    /// Get client-safe error message, shown inline by the admin views
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::UnprocessableEntity { message, .. } => message,
            ApiError::InternalServerError(msg) => msg,
            ApiError::BadGateway(msg) => msg,
            ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::UnprocessableEntity { message, field_errors } => {
                json!({
                    "error": true,
                    "message": message,
                    "code": "UNPROCESSABLE_ENTITY",
                    "field_errors": field_errors
                })
            }
            _ => {
                json!({
                    "error": true,
                    "message": self.message(),
                    "code": self.error_code()
                })
            }
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::UnprocessableEntity { .. } => "UNPROCESSABLE_ENTITY",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
            ApiError::BadGateway(_) => "BAD_GATEWAY",
            ApiError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn unprocessable_entity(message: impl Into<String>, field_errors: HashMap<String, String>) -> Self {
        ApiError::UnprocessableEntity {
            message: message.into(),
            field_errors,
        }
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        ApiError::BadGateway(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

// Convert other error types to ApiError
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::unprocessable_entity(err.message, err.field_errors)
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::NotFound(msg) => ApiError::not_found(msg),
            GatewayError::Auth(msg) => ApiError::unauthorized(msg),
            GatewayError::InvalidQuery(msg) => ApiError::bad_request(msg),
            GatewayError::Remote { status: 401 | 403, message } => ApiError::unauthorized(message),
            GatewayError::Remote { status, message } => {
                tracing::error!("Remote error {}: {}", status, message);
                ApiError::bad_gateway("The data service rejected the request")
            }
            GatewayError::Storage(msg) => {
                tracing::error!("Storage error: {}", msg);
                ApiError::bad_gateway("File storage rejected the upload")
            }
            GatewayError::Transport(e) => {
                tracing::error!("Gateway transport error: {}", e);
                ApiError::service_unavailable("Data service temporarily unavailable")
            }
            GatewayError::Url(e) => {
                tracing::error!("Gateway URL error: {}", e);
                ApiError::internal_server_error("Data service is misconfigured")
            }
            GatewayError::Json(e) => {
                tracing::error!("Malformed gateway payload: {}", e);
                ApiError::bad_gateway("Malformed response from the data service")
            }
        }
    }
}

impl From<CacheError> for ApiError {
    fn from(err: CacheError) -> Self {
        tracing::error!("Cache error: {}", err);
        ApiError::internal_server_error("Content cache unavailable")
    }
}

impl From<AdminError> for ApiError {
    fn from(err: AdminError) -> Self {
        match err {
            AdminError::Validation(e) => e.into(),
            AdminError::Unconfirmed => ApiError::bad_request("Deletion must be confirmed with confirm=true"),
            AdminError::Missing(id) => ApiError::not_found(format!("Nothing with id {} is loaded", id)),
            AdminError::Remote { message, source } => match source {
                GatewayError::Auth(_) | GatewayError::Remote { status: 401 | 403, .. } => {
                    ApiError::unauthorized(message)
                }
                GatewayError::NotFound(_) => ApiError::not_found(message),
                _ => ApiError::bad_gateway(message),
            },
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
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_422_with_fields() {
        let err: ApiError = ValidationError::new("Not all fields are filled in")
            .field("title", "This field is required")
            .into();
        assert_eq!(err.status_code(), 422);
        assert_eq!(err.to_json()["field_errors"]["title"], "This field is required");
    }

    #[test]
    fn admin_remote_failure_keeps_inline_message() {
        let err: ApiError = AdminError::Remote {
            message: "Failed to delete case".into(),
            source: GatewayError::Remote {
                status: 500,
                message: "boom".into(),
            },
        }
        .into();
        assert_eq!(err.status_code(), 502);
        assert_eq!(err.message(), "Failed to delete case");
    }

    #[test]
    fn gateway_not_found_is_404() {
        let err: ApiError = GatewayError::NotFound("cases".into()).into();
        assert_eq!(err.error_code(), "NOT_FOUND");
    }
}
