use axum::extract::{Extension, Json, Path};

use crate::middleware::{AdminSession, ApiResponse, ApiResult};
use crate::models::{BlockEdit, ContactInfo, ContentBlock};
use crate::types::RowId;

/// GET /admin/api/content-blocks
pub async fn list_blocks(Extension(session): Extension<AdminSession>) -> ApiResult<Vec<ContentBlock>> {
    let mut workspace = session.workspace.lock().await;
    let blocks = workspace.load_blocks().await?.to_vec();
    Ok(ApiResponse::success(blocks))
}

/// PUT /admin/api/content-blocks/:id - title and description only
pub async fn update_block(
    Path(id): Path<String>,
    Extension(session): Extension<AdminSession>,
    Json(edit): Json<BlockEdit>,
) -> ApiResult<ContentBlock> {
    let block = session.workspace.lock().await.save_block(&RowId::parse(&id), edit).await?;
    Ok(ApiResponse::success(block))
}

/// GET /admin/api/contact-info
pub async fn contact_info(Extension(session): Extension<AdminSession>) -> ApiResult<ContactInfo> {
    let mut workspace = session.workspace.lock().await;
    let info = workspace.load_contact_info().await?.clone();
    Ok(ApiResponse::success(info))
}

/// PUT /admin/api/contact-info - upsert the singleton row
pub async fn save_contact_info(
    Extension(session): Extension<AdminSession>,
    Json(info): Json<ContactInfo>,
) -> ApiResult<ContactInfo> {
    let saved = session.workspace.lock().await.save_contact_info(info).await?;
    Ok(ApiResponse::success(saved))
}
