use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder, Response, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use url::Url;

use super::error::GatewayError;
use super::query::Query;
use super::{Gateway, GatewayResult, Session, User};
use crate::config::GatewayConfig;

const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// REST client for the hosted backend.
///
/// Tables are served under `/rest/v1/<table>`, objects under
/// `/storage/v1/object/<bucket>/<path>` and auth under `/auth/v1`.
#[derive(Clone)]
pub struct RestGateway {
    client: Client,
    base_url: String,
    anon_key: String,
    access_token: Option<String>,
}

impl RestGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        // Validate once up front so later joins cannot fail on the base.
        Url::parse(&config.url)?;
        Ok(Self {
            client: Client::new(),
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
            access_token: None,
        })
    }

    fn url(&self, path: &str, params: &[(String, String)]) -> GatewayResult<Url> {
        let raw = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        if params.is_empty() {
            return Ok(Url::parse(&raw)?);
        }
        Ok(Url::parse_with_params(&raw, params)?)
    }

    fn bearer(&self) -> &str {
        self.access_token.as_deref().unwrap_or(&self.anon_key)
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.anon_key)
            .bearer_auth(self.bearer())
    }

    async fn check(response: Response) -> GatewayResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        tracing::debug!("Gateway request failed with {}: {}", status, message);
        Err(GatewayError::Remote {
            status: status.as_u16(),
            message,
        })
    }

    async fn write_rows(&self, builder: RequestBuilder, body: Value, prefer: &str) -> GatewayResult<Vec<Value>> {
        let response = self
            .authed(builder)
            .header("Prefer", prefer)
            .json(&body)
            .send()
            .await?;
        let rows: Value = Self::check(response).await?.json().await?;
        Ok(match rows {
            Value::Array(items) => items,
            Value::Null => vec![],
            other => vec![other],
        })
    }
}

#[async_trait]
impl Gateway for RestGateway {
    async fn select(&self, table: &str, query: &Query) -> GatewayResult<Vec<Value>> {
        let url = self.url(&format!("rest/v1/{}", table), &query.to_params())?;
        let response = self.authed(self.client.get(url)).send().await?;
        let rows: Vec<Value> = Self::check(response).await?.json().await?;
        tracing::debug!("Selected {} rows from {}", rows.len(), table);
        Ok(rows)
    }

    async fn select_single(&self, table: &str, query: &Query) -> GatewayResult<Value> {
        let url = self.url(&format!("rest/v1/{}", table), &query.to_params())?;
        let response = self
            .authed(self.client.get(url))
            .header(header::ACCEPT, SINGLE_OBJECT)
            .send()
            .await?;
        // The backend answers 406 when the result is not exactly one row.
        if response.status() == StatusCode::NOT_ACCEPTABLE {
            return Err(GatewayError::NotFound(format!("no single row in {}", table)));
        }
        Ok(Self::check(response).await?.json().await?)
    }

    async fn insert(&self, table: &str, row: Value) -> GatewayResult<Value> {
        let url = self.url(&format!("rest/v1/{}", table), &[("select".into(), "*".into())])?;
        let rows = self
            .write_rows(self.client.post(url), json!([row]), "return=representation")
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| GatewayError::NotFound(format!("insert into {} returned no row", table)))
    }

    async fn update(&self, table: &str, query: &Query, patch: Value) -> GatewayResult<Vec<Value>> {
        if !query.has_filters() {
            return Err(GatewayError::InvalidQuery("update requires a filter".to_string()));
        }
        let url = self.url(&format!("rest/v1/{}", table), &query.filter_params())?;
        self.write_rows(self.client.patch(url), patch, "return=representation")
            .await
    }

    async fn upsert(&self, table: &str, row: Value) -> GatewayResult<Value> {
        let url = self.url(&format!("rest/v1/{}", table), &[])?;
        let rows = self
            .write_rows(
                self.client.post(url),
                json!([row]),
                "resolution=merge-duplicates,return=representation",
            )
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| GatewayError::NotFound(format!("upsert into {} returned no row", table)))
    }

    async fn delete(&self, table: &str, query: &Query) -> GatewayResult<()> {
        if !query.has_filters() {
            return Err(GatewayError::InvalidQuery("delete requires a filter".to_string()));
        }
        let url = self.url(&format!("rest/v1/{}", table), &query.filter_params())?;
        let response = self.authed(self.client.delete(url)).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn upload(&self, bucket: &str, path: &str, bytes: Vec<u8>, content_type: &str) -> GatewayResult<()> {
        let url = self.url(&format!("storage/v1/object/{}/{}", bucket, path), &[])?;
        let response = self
            .authed(self.client.post(url))
            .header(header::CONTENT_TYPE, content_type)
            .header(header::CACHE_CONTROL, "max-age=3600")
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await?;
        Self::check(response)
            .await
            .map_err(|e| GatewayError::Storage(e.to_string()))?;
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/public/{}/{}", self.base_url, bucket, path)
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> GatewayResult<Session> {
        let url = self.url("auth/v1/token", &[("grant_type".into(), "password".into())])?;
        let response = self
            .client
            .post(url)
            .header("apikey", &self.anon_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        if response.status().is_client_error() {
            return Err(GatewayError::Auth("invalid login credentials".to_string()));
        }
        Ok(Self::check(response).await?.json().await?)
    }

    async fn sign_out(&self, access_token: &str) -> GatewayResult<()> {
        let url = self.url("auth/v1/logout", &[])?;
        let response = self
            .client
            .post(url)
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> GatewayResult<Option<User>> {
        let url = self.url("auth/v1/user", &[])?;
        let response = self
            .client
            .get(url)
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;
        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(None),
            _ => Ok(Some(Self::check(response).await?.json().await?)),
        }
    }

    fn with_access_token(&self, access_token: &str) -> Arc<dyn Gateway> {
        let mut scoped = self.clone();
        scoped.access_token = Some(access_token.to_string());
        Arc::new(scoped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> RestGateway {
        RestGateway::new(&GatewayConfig {
            url: "https://backend.example.com/".to_string(),
            anon_key: "anon".to_string(),
            bucket: "images".to_string(),
            mode: crate::config::GatewayMode::Rest,
        })
        .unwrap()
    }

    #[test]
    fn builds_table_urls_with_query() {
        let gw = gateway();
        let q = Query::new()
            .eq("status", "new")
            .order_by("created_at", crate::gateway::SortDirection::Desc);
        let url = gw.url("rest/v1/contact_forms", &q.to_params()).unwrap();
        assert_eq!(
            url.as_str(),
            "https://backend.example.com/rest/v1/contact_forms?select=*&status=eq.new&order=created_at.desc"
        );
    }

    #[test]
    fn public_url_points_at_public_bucket() {
        assert_eq!(
            gateway().public_url("images", "cases/before/1_a.jpg"),
            "https://backend.example.com/storage/v1/object/public/images/cases/before/1_a.jpg"
        );
    }

    #[test]
    fn rejects_malformed_base_url() {
        let config = GatewayConfig {
            url: "not a url".to_string(),
            anon_key: String::new(),
            bucket: "images".to_string(),
            mode: crate::config::GatewayMode::Rest,
        };
        assert!(RestGateway::new(&config).is_err());
    }
}
