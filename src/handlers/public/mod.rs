pub mod auth;
pub mod pages;

use axum::extract::State;
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /health - liveness plus the content cache state
pub async fn health(State(state): State<AppState>) -> ApiResult<Value> {
    let cache = state.site.cache().status().map_err(ApiError::from)?;
    Ok(ApiResponse::success(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now(),
        "cache": cache,
    })))
}
