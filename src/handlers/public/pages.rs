use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::ContactForm;
use crate::site::Rendered;
use crate::types::RowId;
use crate::views::{CaseDetail, ContactSection, FormState, HomePage, PortfolioPage, SubmitOutcome};

/// GET / - home page
pub async fn home(State(state): State<AppState>) -> ApiResult<Rendered<HomePage>> {
    Ok(ApiResponse::success(state.site.home().await))
}

/// GET /portfolio - every case, newest first
pub async fn portfolio(State(state): State<AppState>) -> ApiResult<Rendered<PortfolioPage>> {
    Ok(ApiResponse::success(state.site.portfolio().await))
}

/// GET /cases/:id - case opened from a card
pub async fn case_detail(Path(id): Path<String>, State(state): State<AppState>) -> ApiResult<CaseDetail> {
    let detail = state.site.case_detail(&RowId::parse(&id)).await?;
    Ok(ApiResponse::success(detail))
}

/// GET /contact - contact section labels and details
pub async fn contact_section(State(state): State<AppState>) -> ApiResult<ContactSection> {
    Ok(ApiResponse::success(state.site.contact_section().await))
}

#[derive(Debug, Serialize)]
pub struct ContactReply {
    #[serde(flatten)]
    pub outcome: SubmitOutcome,
    pub form: FormState,
}

/// POST /contact - submit the contact form
///
/// The reply carries the form as it should now be shown: unchanged with an
/// inline error when blocked or failed, cleared with the success overlay
/// when sent.
pub async fn submit_contact(State(state): State<AppState>, Json(form): Json<ContactForm>) -> ApiResponse<ContactReply> {
    let outcome = state.site.submit_contact(&form).await;
    let status = match &outcome {
        SubmitOutcome::Sent => StatusCode::CREATED,
        SubmitOutcome::Blocked { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        SubmitOutcome::Failed { .. } => StatusCode::BAD_GATEWAY,
    };
    let form = FormState::new(form).apply(&outcome);
    ApiResponse::with_status(ContactReply { outcome, form }, status)
}
