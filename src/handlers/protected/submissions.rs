use axum::extract::{Extension, Json, Path, Query};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::DeleteQuery;
use crate::admin::SubmissionTab;
use crate::gateway::User;
use crate::middleware::{AdminSession, ApiResponse, ApiResult};
use crate::models::{Submission, SubmissionEdit, SubmissionStatus};
use crate::types::RowId;

#[derive(Debug, Default, Deserialize)]
pub struct TabQuery {
    pub status: Option<SubmissionStatus>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StatusChange {
    /// Absent means flip the current status
    pub status: Option<SubmissionStatus>,
}

#[derive(Debug, Serialize)]
pub struct SubmissionsPage {
    pub user: User,
    pub tabs: [SubmissionStatus; 2],
    #[serde(flatten)]
    pub tab: SubmissionTab,
}

/// GET /admin/form?status=new|processed - the requests page
pub async fn tab(
    Query(query): Query<TabQuery>,
    Extension(session): Extension<AdminSession>,
) -> ApiResult<SubmissionsPage> {
    let mut workspace = session.workspace.lock().await;
    let tab = workspace.load_submissions(query.status.unwrap_or_default()).await?.clone();
    Ok(ApiResponse::success(SubmissionsPage {
        user: session.user.clone(),
        tabs: [SubmissionStatus::New, SubmissionStatus::Processed],
        tab,
    }))
}

/// GET /admin/api/submissions?status=new|processed
pub async fn list(
    Query(query): Query<TabQuery>,
    Extension(session): Extension<AdminSession>,
) -> ApiResult<SubmissionTab> {
    let mut workspace = session.workspace.lock().await;
    let tab = workspace.load_submissions(query.status.unwrap_or_default()).await?.clone();
    Ok(ApiResponse::success(tab))
}

/// PUT /admin/api/submissions/:id - correct name, email, phone or message
pub async fn update(
    Path(id): Path<String>,
    Extension(session): Extension<AdminSession>,
    Json(edit): Json<SubmissionEdit>,
) -> ApiResult<Submission> {
    let updated = session
        .workspace
        .lock()
        .await
        .update_submission(&RowId::parse(&id), edit)
        .await?;
    Ok(ApiResponse::success(updated))
}

/// PUT /admin/api/submissions/:id/status - set or toggle new/processed
pub async fn set_status(
    Path(id): Path<String>,
    Extension(session): Extension<AdminSession>,
    Json(change): Json<StatusChange>,
) -> ApiResult<Value> {
    let id = RowId::parse(&id);
    let mut workspace = session.workspace.lock().await;
    let status = match change.status {
        Some(status) => {
            workspace.set_submission_status(&id, status).await?;
            status
        }
        None => workspace.toggle_submission(&id).await?,
    };
    Ok(ApiResponse::success(json!({
        "id": id,
        "status": status,
        "tab": workspace.submissions.status,
        "remaining": workspace.submissions.items.len(),
    })))
}

/// DELETE /admin/api/submissions/:id?confirm=true
pub async fn delete(
    Path(id): Path<String>,
    Query(query): Query<DeleteQuery>,
    Extension(session): Extension<AdminSession>,
) -> ApiResult<Value> {
    let id = RowId::parse(&id);
    session
        .workspace
        .lock()
        .await
        .delete_submission(&id, query.confirmed())
        .await?;
    Ok(ApiResponse::success(json!({ "deleted": id })))
}
