//! Public site service.
//!
//! Page loads go through the [`ContentCache`]: when every key a page needs is
//! present and fresh the page renders without touching the gateway; otherwise
//! all of those keys are re-read, rendered and written back. A failed read is
//! rendered as empty and never cached. The contact section is its own read
//! and is always live.

pub mod contact;
pub mod notify;

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

pub use notify::{Notifier, NotifyError};

use crate::cache::{CacheKey, ContentCache};
use crate::gateway::{decode_rows, tables, Gateway, GatewayResult, Query, SortDirection};
use crate::models::{Case, ContactInfo, ContentBlock, Service};
use crate::types::RowId;
use crate::views::{CaseDetail, ContactSection, ContentMap, HomePage, PortfolioPage};

pub const HOME_KEYS: [CacheKey; 3] = [CacheKey::ContentBlocks, CacheKey::Cases, CacheKey::Services];
pub const PORTFOLIO_KEYS: [CacheKey; 2] = [CacheKey::ContentBlocks, CacheKey::Cases];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    Cache,
    Gateway,
}

/// A rendered page and where its list data came from
#[derive(Debug, Clone, Serialize)]
pub struct Rendered<T: Serialize> {
    pub source: ContentSource,
    pub page: T,
}

#[derive(Debug, Clone, Default)]
pub struct SiteContent {
    pub blocks: Vec<ContentBlock>,
    pub cases: Vec<Case>,
    pub services: Vec<Service>,
}

impl SiteContent {
    fn fill(&mut self, key: CacheKey, rows: Vec<Value>) -> GatewayResult<()> {
        match key {
            CacheKey::ContentBlocks => self.blocks = decode_rows(rows)?,
            CacheKey::Cases => self.cases = decode_rows(rows)?,
            CacheKey::Services => self.services = decode_rows(rows)?,
        }
        Ok(())
    }
}

pub struct SiteService {
    gateway: Arc<dyn Gateway>,
    cache: Arc<ContentCache>,
    notifier: Option<Notifier>,
}

impl SiteService {
    pub fn new(gateway: Arc<dyn Gateway>, cache: Arc<ContentCache>) -> Self {
        Self {
            gateway,
            cache,
            notifier: None,
        }
    }

    pub fn with_notifier(mut self, notifier: Option<Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn gateway(&self) -> &Arc<dyn Gateway> {
        &self.gateway
    }

    pub fn cache(&self) -> &ContentCache {
        &self.cache
    }

    pub async fn home(&self) -> Rendered<HomePage> {
        let (content, source) = self.load_content(&HOME_KEYS).await;
        let map = ContentMap::from_blocks(&content.blocks);
        Rendered {
            source,
            page: HomePage::build(&map, &content.cases, &content.services),
        }
    }

    pub async fn portfolio(&self) -> Rendered<PortfolioPage> {
        let (content, source) = self.load_content(&PORTFOLIO_KEYS).await;
        let map = ContentMap::from_blocks(&content.blocks);
        Rendered {
            source,
            page: PortfolioPage::build(&map, &content.cases),
        }
    }

    pub async fn case_detail(&self, id: &RowId) -> GatewayResult<CaseDetail> {
        let row = self
            .gateway
            .select_single(tables::CASES, &Query::new().id(id))
            .await?;
        let case: Case = serde_json::from_value(row)?;
        Ok(CaseDetail::from(&case))
    }

    /// Cached lists when all `keys` are fresh, else one gateway read per key.
    pub async fn load_content(&self, keys: &[CacheKey]) -> (SiteContent, ContentSource) {
        if let Some(content) = self.cached(keys) {
            tracing::debug!("Serving {:?} from cache", keys);
            return (content, ContentSource::Cache);
        }

        let mut content = SiteContent::default();
        for &key in keys {
            let rows = match self.fetch(key).await {
                Ok(rows) => rows,
                Err(e) => {
                    tracing::warn!("Failed to load {}: {}", key.as_str(), e);
                    continue;
                }
            };
            if let Err(e) = content.fill(key, rows.clone()) {
                tracing::warn!("Discarding malformed {} rows: {}", key.as_str(), e);
                continue;
            }
            if let Err(e) = self.cache.write(key, &rows) {
                tracing::warn!("Failed to cache {}: {}", key.as_str(), e);
            }
        }
        (content, ContentSource::Gateway)
    }

    fn cached(&self, keys: &[CacheKey]) -> Option<SiteContent> {
        let mut content = SiteContent::default();
        for &key in keys {
            let rows: Vec<Value> = match self.cache.get(key) {
                Ok(Some(rows)) => rows,
                Ok(None) => return None,
                Err(e) => {
                    tracing::warn!("Cache read for {} failed: {}", key.as_str(), e);
                    return None;
                }
            };
            content.fill(key, rows).ok()?;
        }
        Some(content)
    }

    async fn fetch(&self, key: CacheKey) -> GatewayResult<Vec<Value>> {
        match key {
            CacheKey::ContentBlocks => self.gateway.select(tables::CONTENT_BLOCKS, &Query::new()).await,
            CacheKey::Cases => {
                let query = Query::new().order_by("created_at", SortDirection::Desc);
                self.gateway.select(tables::CASES, &query).await
            }
            CacheKey::Services => self.gateway.select(tables::SERVICES, &Query::new()).await,
        }
    }

    /// Contact section data; an absent or unreadable row renders with fallbacks.
    pub async fn contact_info(&self) -> ContactInfo {
        let row = match self.gateway.select_single(tables::CONTACT_INFO, &Query::new()).await {
            Ok(row) => row,
            Err(e) => {
                tracing::warn!("Failed to load contact info: {}", e);
                return ContactInfo::default();
            }
        };
        serde_json::from_value(row).unwrap_or_else(|e| {
            tracing::warn!("Malformed contact info row: {}", e);
            ContactInfo::default()
        })
    }

    pub async fn contact_section(&self) -> ContactSection {
        ContactSection::from(&self.contact_info().await)
    }
}
