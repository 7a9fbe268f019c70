//! Application wiring: shared state, backend selection and the HTTP router.

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::admin::AdminSessions;
use crate::cache::{CacheError, ContentCache, FileStore, KeyValueStore, MemoryStore, SystemClock};
use crate::config::{AppConfig, CacheConfig, GatewayMode, SecurityConfig};
use crate::gateway::{demo, Gateway, GatewayError, MemoryGateway, RestGateway};
use crate::handlers::{protected, public};
use crate::middleware::session_guard;
use crate::site::{Notifier, SiteService};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub gateway: Arc<dyn Gateway>,
    pub site: Arc<SiteService>,
    pub sessions: AdminSessions,
}

impl AppState {
    pub fn new(config: AppConfig, gateway: Arc<dyn Gateway>, cache: ContentCache) -> Self {
        let notifier = Notifier::from_config(&config.notify);
        if notifier.is_none() {
            tracing::info!("Contact form notifications disabled");
        }
        let site = SiteService::new(gateway.clone(), Arc::new(cache)).with_notifier(notifier);
        Self {
            config: Arc::new(config),
            gateway,
            site: Arc::new(site),
            sessions: AdminSessions::new(),
        }
    }

    /// State built from configuration: chosen gateway, configured cache.
    pub fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let gateway = gateway_from_config(&config)?;
        let cache = cache_from_config(&config.cache)?;
        Ok(Self::new(config, gateway, cache))
    }
}

/// REST client for the hosted backend, or a seeded in-memory stand-in.
pub fn gateway_from_config(config: &AppConfig) -> Result<Arc<dyn Gateway>, GatewayError> {
    match config.gateway.mode {
        GatewayMode::Rest => {
            tracing::info!("Using hosted backend at {}", config.gateway.url);
            Ok(Arc::new(RestGateway::new(&config.gateway)?))
        }
        GatewayMode::Memory => {
            let email = std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| demo::DEMO_ADMIN_EMAIL.to_string());
            let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| demo::DEMO_ADMIN_PASSWORD.to_string());
            tracing::warn!("Using in-memory backend with demo content (admin: {})", email);
            let gw = MemoryGateway::new();
            demo::seed_demo(&gw, &email, &password);
            Ok(Arc::new(gw))
        }
    }
}

pub fn cache_from_config(config: &CacheConfig) -> Result<ContentCache, CacheError> {
    let store: Arc<dyn KeyValueStore> = match &config.file {
        Some(path) => Arc::new(FileStore::open(path)?),
        None => Arc::new(MemoryStore::new()),
    };
    Ok(ContentCache::new(store, Arc::new(SystemClock), config.ttl_ms))
}

pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        // Public
        .route("/health", get(public::health))
        .merge(page_routes())
        // Login and logout stay outside the guard
        .merge(auth_routes())
        // Admin, behind the session guard
        .merge(admin_routes(state.clone()));

    if let Some(cors) = cors_layer(&state.config.security) {
        router = router.layer(cors);
    }
    if state.config.server.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router.with_state(state)
}

fn page_routes() -> Router<AppState> {
    use public::pages;

    Router::new()
        .route("/", get(pages::home))
        .route("/portfolio", get(pages::portfolio))
        .route("/cases/:id", get(pages::case_detail))
        .route("/contact", get(pages::contact_section).post(pages::submit_contact))
}

fn auth_routes() -> Router<AppState> {
    use public::auth;

    Router::new()
        .route("/admin/login", get(auth::login_page).post(auth::login))
        .route("/admin/logout", post(auth::logout))
}

fn admin_routes(state: AppState) -> Router<AppState> {
    use protected::{cases, content, dashboard, services, submissions, tools};

    Router::new()
        .route("/admin", get(dashboard::dashboard))
        .route("/admin/form", get(submissions::tab))
        .route("/admin/api/cases", get(cases::list).post(cases::create))
        .route("/admin/api/cases/:id", put(cases::update).delete(cases::delete))
        .route("/admin/api/services", get(services::list).post(services::create))
        .route("/admin/api/services/:id", put(services::update).delete(services::delete))
        .route("/admin/api/content-blocks", get(content::list_blocks))
        .route("/admin/api/content-blocks/:id", put(content::update_block))
        .route("/admin/api/contact-info", get(content::contact_info).put(content::save_contact_info))
        .route("/admin/api/submissions", get(submissions::list))
        .route(
            "/admin/api/submissions/:id",
            put(submissions::update).delete(submissions::delete),
        )
        .route("/admin/api/submissions/:id/status", put(submissions::set_status))
        .route("/admin/api/icons", get(tools::icons))
        .route("/admin/api/images/preview", post(tools::image_preview))
        .route_layer(from_fn_with_state(state.clone(), session_guard))
        .layer(DefaultBodyLimit::max(state.config.server.max_upload_bytes))
}

fn cors_layer(security: &SecurityConfig) -> Option<CorsLayer> {
    if !security.enable_cors {
        return None;
    }
    if security.cors_origins.iter().any(|o| o == "*") {
        return Some(CorsLayer::permissive());
    }
    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();
    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers(Any),
    )
}
