use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use crate::client::storage::{KeyValueStorage, StorageError};
use crate::models::Article;

pub const CACHE_DURATION: Duration = Duration::from_secs(15 * 60);

/// One cached query result; `timestamp` is epoch milliseconds.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CacheEntry {
    pub articles: Vec<Article>,
    pub timestamp: i64,
}

/// Key identifying one query context: user, topics, sources and filter text.
pub fn cache_key(username: Option<&str>, topics: &[String], sources: &str, filter: &str) -> String {
    format!(
        "articles_{}_{}_{}_{}",
        username.unwrap_or("guest"),
        topics.join(","),
        sources,
        filter
    )
}

pub struct ArticleCache {
    storage: Arc<dyn KeyValueStorage>,
}

impl ArticleCache {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Articles cached under `key` if they are younger than `CACHE_DURATION`.
    pub fn load(&self, key: &str, now: DateTime<Utc>) -> Option<Vec<Article>> {
        let raw = self.storage.get(key)?;
        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Ignoring unreadable cache entry {}: {}", key, e);
                return None;
            }
        };

        let age = now.timestamp_millis() - entry.timestamp;
        (age < CACHE_DURATION.as_millis() as i64).then_some(entry.articles)
    }

    pub fn store(&self, key: &str, articles: &[Article], now: DateTime<Utc>) -> Result<(), StorageError> {
        let entry = CacheEntry {
            articles: articles.to_vec(),
            timestamp: now.timestamp_millis(),
        };
        self.storage.set(key, &serde_json::to_string(&entry)?)
    }
}
