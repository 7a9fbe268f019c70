use axum::extract::{Extension, Json, Path, Query};
use serde_json::{json, Value};

use super::DeleteQuery;
use crate::middleware::{AdminSession, ApiResponse, ApiResult};
use crate::models::{Service, ServiceDraft};
use crate::types::RowId;

/// GET /admin/api/services
pub async fn list(Extension(session): Extension<AdminSession>) -> ApiResult<Vec<Service>> {
    let mut workspace = session.workspace.lock().await;
    let services = workspace.load_services().await?.to_vec();
    Ok(ApiResponse::success(services))
}

/// POST /admin/api/services - appended to the end of the list
pub async fn create(
    Extension(session): Extension<AdminSession>,
    Json(draft): Json<ServiceDraft>,
) -> ApiResult<Service> {
    let service = session.workspace.lock().await.save_service(None, draft).await?;
    Ok(ApiResponse::created(service))
}

/// PUT /admin/api/services/:id
pub async fn update(
    Path(id): Path<String>,
    Extension(session): Extension<AdminSession>,
    Json(draft): Json<ServiceDraft>,
) -> ApiResult<Service> {
    let id = RowId::parse(&id);
    let service = session.workspace.lock().await.save_service(Some(id), draft).await?;
    Ok(ApiResponse::success(service))
}

/// DELETE /admin/api/services/:id?confirm=true
pub async fn delete(
    Path(id): Path<String>,
    Query(query): Query<DeleteQuery>,
    Extension(session): Extension<AdminSession>,
) -> ApiResult<Value> {
    let id = RowId::parse(&id);
    session.workspace.lock().await.delete_service(&id, query.confirmed()).await?;
    Ok(ApiResponse::success(json!({ "deleted": id })))
}
