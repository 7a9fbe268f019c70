#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use restoro_site::cache::{ContentCache, ManualClock, MemoryStore};
use restoro_site::config::AppConfig;
use restoro_site::gateway::demo::{seed_demo, DEMO_ADMIN_EMAIL, DEMO_ADMIN_PASSWORD};
use restoro_site::gateway::MemoryGateway;
use restoro_site::{app, AppState};

/// Fixed starting point for the manual clock
pub const START_MS: i64 = 1_700_000_000_000;

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    pub fn location(&self) -> Option<&str> {
        self.headers.get(header::LOCATION).and_then(|v| v.to_str().ok())
    }
}

/// Router over a demo-seeded in-memory gateway and a cache on a manual clock
pub struct TestApp {
    pub gateway: MemoryGateway,
    pub clock: ManualClock,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        let gateway = MemoryGateway::new();
        seed_demo(&gateway, DEMO_ADMIN_EMAIL, DEMO_ADMIN_PASSWORD);
        Self::with_gateway(gateway)
    }

    pub fn with_gateway(gateway: MemoryGateway) -> Self {
        let mut config = AppConfig::development();
        config.server.enable_request_logging = false;

        let clock = ManualClock::at(START_MS);
        let cache = ContentCache::new(
            Arc::new(MemoryStore::new()),
            Arc::new(clock.clone()),
            config.cache.ttl_ms,
        );
        let state = AppState::new(config, Arc::new(gateway.clone()), cache);
        Self { gateway, clock, state }
    }

    pub fn ttl_ms(&self) -> i64 {
        self.state.config.cache.ttl_ms
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>, token: Option<&str>) -> Result<TestResponse> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            None => builder.body(Body::empty())?,
        };
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> Result<TestResponse> {
        let response = app(self.state.clone())
            .oneshot(request)
            .await
            .context("router failed")?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).context("response body is not JSON")?
        };
        Ok(TestResponse { status, headers, body })
    }

    pub async fn get(&self, uri: &str) -> Result<TestResponse> {
        self.request(Method::GET, uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> Result<TestResponse> {
        self.request(Method::POST, uri, Some(body), None).await
    }

    /// Sign in as the demo admin and return the access token.
    pub async fn login(&self) -> Result<String> {
        let res = self
            .post(
                "/admin/login",
                json!({ "email": DEMO_ADMIN_EMAIL, "password": DEMO_ADMIN_PASSWORD }),
            )
            .await?;
        anyhow::ensure!(res.status == StatusCode::OK, "login failed: {}", res.body);
        res.data()["access_token"]
            .as_str()
            .map(str::to_string)
            .context("no access token in login reply")
    }

    pub async fn admin(&self, method: Method, uri: &str, body: Option<Value>, token: &str) -> Result<TestResponse> {
        self.request(method, uri, body, Some(token)).await
    }
}

/// `data:` URL for a tiny fake image
pub fn image_payload(file_name: &str, bytes: &[u8]) -> Value {
    use base64::Engine as _;
    json!({
        "file_name": file_name,
        "data_url": format!("data:image/jpeg;base64,{}", base64::engine::general_purpose::STANDARD.encode(bytes)),
    })
}
