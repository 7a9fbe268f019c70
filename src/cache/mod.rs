//! Local content cache.
//!
//! Payloads are stored as JSON strings under their key (`contentBlocks`,
//! `cases`, `services`) with a companion `<key>Timestamp` entry holding the
//! epoch-millis of the gateway read that produced them. Staleness is checked
//! only when a caller asks; nothing refreshes in the background.

pub mod clock;
pub mod store;

use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use thiserror::Error;

pub use clock::{Clock, ManualClock, SystemClock};
pub use store::{FileStore, KeyValueStore, MemoryStore};

pub const DEFAULT_TTL_MS: i64 = 5 * 60 * 1000;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cache serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cache lock poisoned")]
    Poisoned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    ContentBlocks,
    Cases,
    Services,
}

impl CacheKey {
    pub const ALL: [CacheKey; 3] = [CacheKey::ContentBlocks, CacheKey::Cases, CacheKey::Services];

    pub fn as_str(&self) -> &'static str {
        match self {
            CacheKey::ContentBlocks => "contentBlocks",
            CacheKey::Cases => "cases",
            CacheKey::Services => "services",
        }
    }

    pub fn timestamp_key(&self) -> &'static str {
        match self {
            CacheKey::ContentBlocks => "contentBlocksTimestamp",
            CacheKey::Cases => "casesTimestamp",
            CacheKey::Services => "servicesTimestamp",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == raw)
    }
}

/// Snapshot of one key, for status reporting
#[derive(Debug, Clone, Serialize)]
pub struct EntryStatus {
    pub key: &'static str,
    pub present: bool,
    pub timestamp: Option<i64>,
    pub age_ms: Option<i64>,
    pub stale: bool,
}

pub struct ContentCache {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    ttl_ms: i64,
}

impl ContentCache {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>, ttl_ms: i64) -> Self {
        Self { store, clock, ttl_ms }
    }

    /// In-memory cache on the system clock with the default window.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), Arc::new(SystemClock), DEFAULT_TTL_MS)
    }

    pub fn ttl_ms(&self) -> i64 {
        self.ttl_ms
    }

    /// Raw payload for the key, whatever its age.
    pub fn read<T: DeserializeOwned>(&self, key: CacheKey) -> Result<Option<T>, CacheError> {
        match self.store.get(key.as_str())? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Overwrite the payload and stamp it with the current time.
    pub fn write<T: Serialize>(&self, key: CacheKey, payload: &T) -> Result<(), CacheError> {
        let raw = serde_json::to_string(payload)?;
        self.store.set(key.as_str(), raw)?;
        self.store
            .set(key.timestamp_key(), self.clock.now_ms().to_string())?;
        Ok(())
    }

    pub fn timestamp(&self, key: CacheKey) -> Result<Option<i64>, CacheError> {
        Ok(self
            .store
            .get(key.timestamp_key())?
            .and_then(|raw| raw.trim().parse::<i64>().ok()))
    }

    /// True when no timestamp exists or the entry is older than the window.
    /// An entry exactly `ttl_ms` old is still fresh.
    pub fn is_stale(&self, key: CacheKey) -> Result<bool, CacheError> {
        Ok(match self.timestamp(key)? {
            None => true,
            Some(ts) => self.clock.now_ms() - ts > self.ttl_ms,
        })
    }

    /// Payload only if present and fresh.
    pub fn get<T: DeserializeOwned>(&self, key: CacheKey) -> Result<Option<T>, CacheError> {
        if self.is_stale(key)? {
            return Ok(None);
        }
        self.read(key)
    }

    pub fn set<T: Serialize>(&self, key: CacheKey, payload: &T) -> Result<(), CacheError> {
        self.write(key, payload)
    }

    pub fn invalidate(&self, key: CacheKey) -> Result<(), CacheError> {
        self.store.remove(key.as_str())?;
        self.store.remove(key.timestamp_key())?;
        Ok(())
    }

    pub fn clear(&self) -> Result<(), CacheError> {
        for key in CacheKey::ALL {
            self.invalidate(key)?;
        }
        Ok(())
    }

    pub fn status(&self) -> Result<Vec<EntryStatus>, CacheError> {
        let now = self.clock.now_ms();
        CacheKey::ALL
            .into_iter()
            .map(|key| {
                let timestamp = self.timestamp(key)?;
                Ok(EntryStatus {
                    key: key.as_str(),
                    present: self.store.get(key.as_str())?.is_some(),
                    timestamp,
                    age_ms: timestamp.map(|ts| now - ts),
                    stale: self.is_stale(key)?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn cache_at(now: i64) -> (ContentCache, ManualClock) {
        let clock = ManualClock::at(now);
        let cache = ContentCache::new(Arc::new(MemoryStore::new()), Arc::new(clock.clone()), DEFAULT_TTL_MS);
        (cache, clock)
    }

    #[test]
    fn missing_timestamp_is_stale() {
        let (cache, _) = cache_at(1_000);
        for key in CacheKey::ALL {
            assert!(cache.is_stale(key).unwrap());
        }
    }

    #[test]
    fn staleness_boundary_is_strict() {
        let (cache, clock) = cache_at(1_000_000);
        cache.write(CacheKey::Cases, &json!([])).unwrap();

        clock.advance(DEFAULT_TTL_MS);
        assert!(!cache.is_stale(CacheKey::Cases).unwrap());

        clock.advance(1);
        assert!(cache.is_stale(CacheKey::Cases).unwrap());
    }

    #[test]
    fn get_hides_stale_payload_but_read_does_not() {
        let (cache, clock) = cache_at(0);
        cache.set(CacheKey::Services, &json!([{"id": 1}])).unwrap();
        assert!(cache.get::<Value>(CacheKey::Services).unwrap().is_some());

        clock.advance(DEFAULT_TTL_MS + 1);
        assert!(cache.get::<Value>(CacheKey::Services).unwrap().is_none());
        assert!(cache.read::<Value>(CacheKey::Services).unwrap().is_some());
    }

    #[test]
    fn timestamps_are_per_key() {
        let (cache, clock) = cache_at(0);
        cache.write(CacheKey::ContentBlocks, &json!({})).unwrap();
        clock.advance(DEFAULT_TTL_MS);
        cache.write(CacheKey::Cases, &json!([])).unwrap();
        clock.advance(1);

        assert!(cache.is_stale(CacheKey::ContentBlocks).unwrap());
        assert!(!cache.is_stale(CacheKey::Cases).unwrap());
    }

    #[test]
    fn invalidate_drops_payload_and_timestamp() {
        let (cache, _) = cache_at(0);
        cache.write(CacheKey::Cases, &json!([])).unwrap();
        cache.invalidate(CacheKey::Cases).unwrap();
        assert!(cache.read::<Value>(CacheKey::Cases).unwrap().is_none());
        assert!(cache.timestamp(CacheKey::Cases).unwrap().is_none());
    }

    #[test]
    fn unparseable_timestamp_counts_as_absent() {
        let store = Arc::new(MemoryStore::new());
        store.set("casesTimestamp", "yesterday".to_string()).unwrap();
        let cache = ContentCache::new(store, Arc::new(ManualClock::at(0)), DEFAULT_TTL_MS);
        assert!(cache.is_stale(CacheKey::Cases).unwrap());
    }
}
