use axum::extract::{Extension, Json, Path, Query};
use serde::Deserialize;
use serde_json::{json, Value};

use super::DeleteQuery;
use crate::admin::cases::CaseImages;
use crate::admin::{ImagePayload, ImageUpload};
use crate::error::ApiError;
use crate::middleware::{AdminSession, ApiResponse, ApiResult};
use crate::models::{Case, CaseDraft};
use crate::types::RowId;

/// Case form body: the draft, the raw "process" input and any newly picked files
#[derive(Debug, Deserialize)]
pub struct CaseRequest {
    #[serde(flatten)]
    pub draft: CaseDraft,
    /// Comma separated steps as typed; replaces `process` when present
    pub process_text: Option<String>,
    pub before_upload: Option<ImagePayload>,
    pub after_upload: Option<ImagePayload>,
}

impl CaseRequest {
    fn into_parts(self) -> Result<(CaseDraft, CaseImages), ApiError> {
        let mut draft = self.draft;
        if let Some(text) = &self.process_text {
            draft.process = CaseDraft::parse_process(text);
        }
        let images = CaseImages {
            before: self.before_upload.as_ref().map(ImageUpload::try_from).transpose()?,
            after: self.after_upload.as_ref().map(ImageUpload::try_from).transpose()?,
        };
        Ok((draft, images))
    }
}

/// GET /admin/api/cases - reload the case list, newest first
pub async fn list(Extension(session): Extension<AdminSession>) -> ApiResult<Vec<Case>> {
    let mut workspace = session.workspace.lock().await;
    let cases = workspace.load_cases().await?.to_vec();
    Ok(ApiResponse::success(cases))
}

/// POST /admin/api/cases - create a case; it goes to the top of the list
pub async fn create(
    Extension(session): Extension<AdminSession>,
    Json(payload): Json<CaseRequest>,
) -> ApiResult<Case> {
    let (draft, images) = payload.into_parts()?;
    let case = session.workspace.lock().await.save_case(None, draft, images).await?;
    Ok(ApiResponse::created(case))
}

/// PUT /admin/api/cases/:id - rewrite a case in place
pub async fn update(
    Path(id): Path<String>,
    Extension(session): Extension<AdminSession>,
    Json(payload): Json<CaseRequest>,
) -> ApiResult<Case> {
    let (draft, images) = payload.into_parts()?;
    let id = RowId::parse(&id);
    let case = session.workspace.lock().await.save_case(Some(id), draft, images).await?;
    Ok(ApiResponse::success(case))
}

/// DELETE /admin/api/cases/:id?confirm=true
pub async fn delete(
    Path(id): Path<String>,
    Query(query): Query<DeleteQuery>,
    Extension(session): Extension<AdminSession>,
) -> ApiResult<Value> {
    let id = RowId::parse(&id);
    session.workspace.lock().await.delete_case(&id, query.confirmed()).await?;
    Ok(ApiResponse::success(json!({ "deleted": id })))
}
