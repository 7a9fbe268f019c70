use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::app::AppState;
use crate::error::ApiError;
use crate::gateway::{GatewayError, User};
use crate::middleware::auth::extract_access_token;
use crate::middleware::{ApiResponse, LOGIN_PATH};

pub const ADMIN_HOME: &str = "/admin";
pub const LOGIN_FAILED: &str = "Invalid email or password";

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginReply {
    pub user: User,
    pub access_token: String,
    pub expires_in: Option<i64>,
    pub redirect: &'static str,
}

/// GET /admin/login - login form, or straight to the dashboard when a
/// session is already active
pub async fn login_page(State(state): State<AppState>, headers: HeaderMap, jar: CookieJar) -> Response {
    if let Some(token) = extract_access_token(&headers, &jar, &state.config.security.session_cookie) {
        if let Ok(Some(_)) = state.gateway.get_user(&token).await {
            return Redirect::to(ADMIN_HOME).into_response();
        }
    }
    ApiResponse::success(json!({
        "title": "Admin sign in",
        "action": LOGIN_PATH,
        "fields": ["email", "password"],
    }))
    .into_response()
}

/// POST /admin/login - password sign-in; sets the session cookie
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, ApiResponse<LoginReply>), ApiError> {
    let session = state
        .gateway
        .sign_in_with_password(payload.email.trim(), &payload.password)
        .await
        .map_err(|e| {
            match &e {
                GatewayError::Auth(_) => tracing::info!("Rejected sign-in for {}", payload.email),
                other => tracing::warn!("Sign-in failed: {}", other),
            }
            ApiError::unauthorized(LOGIN_FAILED)
        })?;

    let security = &state.config.security;
    let mut cookie = Cookie::new(security.session_cookie.clone(), session.access_token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_secure(security.secure_cookie);

    tracing::info!("Admin {} signed in", session.user.email.as_deref().unwrap_or(&session.user.id));
    Ok((
        jar.add(cookie),
        ApiResponse::success(LoginReply {
            user: session.user,
            access_token: session.access_token,
            expires_in: session.expires_in,
            redirect: ADMIN_HOME,
        }),
    ))
}

/// POST /admin/logout - remote sign-out, drop list state, clear cookie
pub async fn logout(State(state): State<AppState>, headers: HeaderMap, jar: CookieJar) -> (CookieJar, Redirect) {
    let cookie_name = state.config.security.session_cookie.clone();
    if let Some(token) = extract_access_token(&headers, &jar, &cookie_name) {
        if let Err(e) = state.gateway.sign_out(&token).await {
            tracing::warn!("Remote sign-out failed: {}", e);
        }
        state.sessions.end(&token);
    }
    let mut removal = Cookie::from(cookie_name);
    removal.set_path("/");
    (jar.remove(removal), Redirect::to(LOGIN_PATH))
}
