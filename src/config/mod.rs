use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub gateway: GatewayConfig,
    pub cache: CacheConfig,
    pub notify: NotifyConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub enable_request_logging: bool,
    /// Request body limit for admin routes; case images arrive inline as data URLs
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayMode {
    Rest,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub url: String,
    pub anon_key: String,
    pub bucket: String,
    pub mode: GatewayMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Staleness window shared by every cached list
    pub ttl_ms: i64,
    /// Persist cache entries to this JSON file; in memory only when unset
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    pub enabled: bool,
    pub api_base: String,
    pub bot_token: String,
    pub chat_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
    pub session_cookie: String,
    pub secure_cookie: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Some(v) = env::var("SITE_PORT").ok().or_else(|| env::var("PORT").ok()) {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("SERVER_ENABLE_REQUEST_LOGGING") {
            self.server.enable_request_logging = v.parse().unwrap_or(self.server.enable_request_logging);
        }
        if let Ok(v) = env::var("SERVER_MAX_UPLOAD_BYTES") {
            self.server.max_upload_bytes = v.parse().unwrap_or(self.server.max_upload_bytes);
        }

        // Gateway overrides
        if let Ok(v) = env::var("GATEWAY_URL") {
            self.gateway.url = v;
        }
        if let Ok(v) = env::var("GATEWAY_ANON_KEY") {
            self.gateway.anon_key = v;
        }
        if let Ok(v) = env::var("GATEWAY_BUCKET") {
            self.gateway.bucket = v;
        }
        match env::var("GATEWAY_MODE").as_deref() {
            Ok("memory") => self.gateway.mode = GatewayMode::Memory,
            Ok("rest") => self.gateway.mode = GatewayMode::Rest,
            _ => {}
        }

        // Cache overrides
        if let Ok(v) = env::var("CACHE_TTL_MS") {
            self.cache.ttl_ms = v.parse().unwrap_or(self.cache.ttl_ms);
        }
        if let Ok(v) = env::var("CACHE_FILE") {
            self.cache.file = if v.trim().is_empty() { None } else { Some(PathBuf::from(v)) };
        }

        // Notification overrides
        if let Ok(v) = env::var("NOTIFY_API_BASE") {
            self.notify.api_base = v;
        }
        if let Ok(v) = env::var("NOTIFY_BOT_TOKEN") {
            self.notify.bot_token = v;
        }
        if let Ok(v) = env::var("NOTIFY_CHAT_ID") {
            self.notify.chat_id = v;
        }
        if let Ok(v) = env::var("NOTIFY_ENABLED") {
            self.notify.enabled = v.parse().unwrap_or(self.notify.enabled);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }
        if let Ok(v) = env::var("SECURITY_SESSION_COOKIE") {
            self.security.session_cookie = v;
        }
        if let Ok(v) = env::var("SECURITY_SECURE_COOKIE") {
            self.security.secure_cookie = v.parse().unwrap_or(self.security.secure_cookie);
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                port: 3000,
                enable_request_logging: true,
                max_upload_bytes: 32 * 1024 * 1024,
            },
            gateway: GatewayConfig {
                url: "http://localhost:54321".to_string(),
                anon_key: String::new(),
                bucket: "images".to_string(),
                mode: GatewayMode::Memory,
            },
            cache: CacheConfig {
                ttl_ms: 5 * 60 * 1000,
                file: None,
            },
            notify: NotifyConfig {
                enabled: false,
                api_base: "https://api.telegram.org".to_string(),
                bot_token: String::new(),
                chat_id: String::new(),
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["http://localhost:3000".to_string(), "http://localhost:5173".to_string()],
                session_cookie: "restoro_session".to_string(),
                secure_cookie: false,
            },
        }
    }

    fn staging() -> Self {
        let mut config = Self::development();
        config.environment = Environment::Staging;
        config.gateway.mode = GatewayMode::Rest;
        config.notify.enabled = true;
        config.security.cors_origins = vec!["https://staging.example.com".to_string()];
        config.security.secure_cookie = true;
        config
    }

    fn production() -> Self {
        let mut config = Self::development();
        config.environment = Environment::Production;
        config.server.enable_request_logging = false;
        config.gateway.mode = GatewayMode::Rest;
        config.notify.enabled = true;
        config.security.cors_origins = vec!["https://app.example.com".to_string()];
        config.security.secure_cookie = true;
        config
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[macro_export]
macro_rules! is_development {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Development)
    };
}
