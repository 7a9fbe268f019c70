//! Remote data gateway: the hosted backend (tables, object storage, auth) as
//! seen from the site. Everything here is an opaque request/response service.

pub mod demo;
pub mod error;
pub mod memory;
pub mod query;
pub mod rest;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

pub use error::GatewayError;
pub use memory::MemoryGateway;
pub use query::{Query, SortDirection};
pub use rest::RestGateway;

/// Backend table names
pub mod tables {
    pub const CONTENT_BLOCKS: &str = "content_blocks";
    pub const CASES: &str = "cases";
    pub const SERVICES: &str = "services";
    pub const CONTACT_INFO: &str = "contact_info";
    pub const CONTACT_FORMS: &str = "contact_forms";
}

/// Authenticated backend user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Session issued by a password sign-in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    pub user: User,
}

pub type GatewayResult<T> = Result<T, GatewayError>;

#[async_trait]
pub trait Gateway: Send + Sync {
    /// Read rows matching the query.
    async fn select(&self, table: &str, query: &Query) -> GatewayResult<Vec<Value>>;

    /// Read exactly one row. Zero matches is `GatewayError::NotFound`.
    async fn select_single(&self, table: &str, query: &Query) -> GatewayResult<Value>;

    /// Insert one row and return it as stored (with generated id and defaults).
    async fn insert(&self, table: &str, row: Value) -> GatewayResult<Value>;

    /// Apply a partial update to matching rows, returning the updated rows.
    async fn update(&self, table: &str, query: &Query, patch: Value) -> GatewayResult<Vec<Value>>;

    /// Insert or merge by primary key.
    async fn upsert(&self, table: &str, row: Value) -> GatewayResult<Value>;

    async fn delete(&self, table: &str, query: &Query) -> GatewayResult<()>;

    /// Store an object. Existing paths are never overwritten.
    async fn upload(&self, bucket: &str, path: &str, bytes: Vec<u8>, content_type: &str) -> GatewayResult<()>;

    fn public_url(&self, bucket: &str, path: &str) -> String;

    async fn sign_in_with_password(&self, email: &str, password: &str) -> GatewayResult<Session>;

    async fn sign_out(&self, access_token: &str) -> GatewayResult<()>;

    /// Resolve the user behind an access token; `None` when the session is absent or expired.
    async fn get_user(&self, access_token: &str) -> GatewayResult<Option<User>>;

    /// Gateway handle whose table calls run as the given session.
    fn with_access_token(&self, access_token: &str) -> Arc<dyn Gateway>;
}

/// Decode rows into a typed model. One malformed row fails the whole read.
pub fn decode_rows<T: serde::de::DeserializeOwned>(rows: Vec<Value>) -> GatewayResult<Vec<T>> {
    rows.into_iter()
        .map(|r| serde_json::from_value(r).map_err(GatewayError::from))
        .collect()
}
