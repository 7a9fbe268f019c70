use axum::extract::Extension;
use serde::Serialize;

use crate::admin::Dashboard;
use crate::gateway::User;
use crate::middleware::{AdminSession, ApiResponse, ApiResult};

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub user: User,
    #[serde(flatten)]
    pub dashboard: Dashboard,
}

/// GET /admin - cases, content blocks, services and contact details in one load
pub async fn dashboard(Extension(session): Extension<AdminSession>) -> ApiResult<DashboardView> {
    let dashboard = session.workspace.lock().await.load_dashboard().await;
    if !dashboard.messages.is_empty() {
        tracing::warn!("Dashboard loaded with {} failed section(s)", dashboard.messages.len());
    }
    Ok(ApiResponse::success(DashboardView {
        user: session.user,
        dashboard,
    }))
}
