use axum::extract::{Json, Query};
use serde::{Deserialize, Serialize};

use crate::admin::{ImagePayload, ImageUpload};
use crate::icons::Icon;
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Default, Deserialize)]
pub struct IconQuery {
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct IconOption {
    pub name: Icon,
    pub component: String,
}

/// GET /admin/api/icons?q= - icon picker, filtered by substring
pub async fn icons(Query(query): Query<IconQuery>) -> ApiResult<Vec<IconOption>> {
    let options = Icon::search(query.q.as_deref().unwrap_or(""))
        .into_iter()
        .map(|icon| IconOption {
            name: icon,
            component: icon.component(),
        })
        .collect();
    Ok(ApiResponse::success(options))
}

#[derive(Debug, Serialize)]
pub struct ImagePreview {
    pub file_name: String,
    pub content_type: String,
    pub size: usize,
    pub preview: String,
}

/// POST /admin/api/images/preview - decode a picked file without uploading it
pub async fn image_preview(Json(payload): Json<ImagePayload>) -> ApiResult<ImagePreview> {
    let image = ImageUpload::try_from(&payload)?;
    Ok(ApiResponse::success(ImagePreview {
        size: image.bytes.len(),
        preview: image.to_data_url(),
        file_name: image.file_name,
        content_type: image.content_type,
    }))
}
