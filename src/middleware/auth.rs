use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::admin::AdminWorkspace;
use crate::app::AppState;
use crate::gateway::User;

pub const LOGIN_PATH: &str = "/admin/login";

/// Signed-in admin, attached to every request that passed the guard
#[derive(Clone)]
pub struct AdminSession {
    pub access_token: String,
    pub user: User,
    pub workspace: Arc<Mutex<AdminWorkspace>>,
}

/// Session guard for admin routes.
///
/// Asks the gateway who owns the presented token; no user means an immediate
/// redirect to the login page and drops any list state held for the token.
/// Nothing is retried or refreshed.
pub async fn session_guard(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let jar = CookieJar::from_headers(request.headers());
    let Some(token) = extract_access_token(request.headers(), &jar, &state.config.security.session_cookie) else {
        tracing::debug!("No session for {}, redirecting to login", request.uri().path());
        return Redirect::to(LOGIN_PATH).into_response();
    };

    let user = match state.gateway.get_user(&token).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::debug!("Session expired or unknown, redirecting to login");
            state.sessions.end(&token);
            return Redirect::to(LOGIN_PATH).into_response();
        }
        Err(e) => {
            tracing::warn!("Session check failed: {}", e);
            state.sessions.end(&token);
            return Redirect::to(LOGIN_PATH).into_response();
        }
    };

    let workspace = state.sessions.workspace(&token, || {
        AdminWorkspace::new(state.gateway.with_access_token(&token), state.config.gateway.bucket.clone())
    });
    request.extensions_mut().insert(AdminSession {
        access_token: token,
        user,
        workspace,
    });

    next.run(request).await
}

/// Access token from `Authorization: Bearer`, else from the session cookie.
pub fn extract_access_token(headers: &HeaderMap, jar: &CookieJar, cookie_name: &str) -> Option<String> {
    let bearer = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    jar.get(cookie_name)
        .map(|cookie| cookie.value().trim().to_string())
        .filter(|token| !token.is_empty())
}
