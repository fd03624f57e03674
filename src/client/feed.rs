use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;
use crate::client::api::{ArticleSource, ClientError, FeedQuery};
use crate::client::cache::{cache_key, ArticleCache};
use crate::client::debounce::Debounced;
use crate::client::filter::{filter_articles, paginate, total_pages, FilterCriteria};
use crate::client::session::ClientSession;
use crate::client::storage::KeyValueStorage;
use crate::models::Article;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Failed to load articles: {0}")]
    Fetch(#[from] ClientError),
}

impl FeedError {
    /// Text shown in place of the article grid.
    pub fn inline_message(&self) -> &'static str {
        "Failed to load articles"
    }
}

/// One rendered page of the feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedView {
    pub articles: Vec<Article>,
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
    pub from_cache: bool,
}

/// Article list with the inputs that drive it. Filter and sources text are
/// debounced; topic selection applies immediately.
pub struct ArticleFeed {
    source: Arc<dyn ArticleSource>,
    cache: ArticleCache,
    topics: Vec<String>,
    filter: Debounced<String>,
    sources: Debounced<String>,
    page: usize,
    articles: Vec<Article>,
    from_cache: bool,
}

impl ArticleFeed {
    pub fn new(source: Arc<dyn ArticleSource>, storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            source,
            cache: ArticleCache::new(storage),
            topics: Vec::new(),
            filter: Debounced::new(String::new()),
            sources: Debounced::new(String::new()),
            page: 1,
            articles: Vec::new(),
            from_cache: false,
        }
    }

    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.filter.set(text.into());
        self.page = 1;
    }

    pub fn set_sources(&mut self, text: impl Into<String>) {
        self.sources.set(text.into());
        self.page = 1;
    }

    pub fn toggle_topic(&mut self, topic: &str) {
        match self.topics.iter().position(|t| t == topic) {
            Some(index) => {
                self.topics.remove(index);
            }
            None => self.topics.push(topic.to_string()),
        }
        self.page = 1;
    }

    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn page(&self) -> usize {
        self.page
    }

    fn criteria(&mut self) -> FilterCriteria {
        FilterCriteria {
            topics: self.topics.clone(),
            filter: self.filter.settled().clone(),
            sources: self.sources.settled().clone(),
        }
    }

    /// Wait for pending filter input to settle, then refresh.
    pub async fn settle_and_refresh(&mut self, session: &ClientSession) -> Result<FeedView, FeedError> {
        self.filter.wait().await;
        self.sources.wait().await;
        self.refresh(session).await
    }

    pub async fn refresh(&mut self, session: &ClientSession) -> Result<FeedView, FeedError> {
        self.refresh_at(session, Utc::now()).await
    }

    /// Serve the settled query from cache when fresh, otherwise fetch it.
    ///
    /// The cache key is taken before the request goes out and the response is
    /// stored under that key only, so a slow response for an older query
    /// cannot replace the entry of a newer one.
    pub async fn refresh_at(
        &mut self,
        session: &ClientSession,
        now: DateTime<Utc>,
    ) -> Result<FeedView, FeedError> {
        let criteria = self.criteria();
        let username = session.username();
        let key = cache_key(
            username.as_deref(),
            &criteria.topics,
            &criteria.sources,
            &criteria.filter,
        );

        if let Some(articles) = self.cache.load(&key, now) {
            tracing::debug!("Serving {} articles from cache {}", articles.len(), key);
            self.articles = articles;
            self.from_cache = true;
            return Ok(self.view());
        }

        let query = FeedQuery {
            topics: criteria.topics,
            sources: criteria.sources,
            filter: criteria.filter,
        };
        let token = session.token();
        let articles = self
            .source
            .fetch_articles(&query, token.as_deref())
            .await
            .map_err(|e| {
                tracing::warn!("Article fetch failed for {}: {}", key, e);
                FeedError::from(e)
            })?;

        if let Err(e) = self.cache.store(&key, &articles, now) {
            tracing::warn!("Failed to cache articles under {}: {}", key, e);
        }
        self.articles = articles;
        self.from_cache = false;
        Ok(self.view())
    }

    /// Current page of the last loaded articles after local filtering.
    pub fn view(&mut self) -> FeedView {
        let criteria = self.criteria();
        let filtered = filter_articles(&self.articles, &criteria);
        FeedView {
            articles: paginate(&filtered, self.page).to_vec(),
            total: filtered.len(),
            page: self.page,
            total_pages: total_pages(filtered.len()),
            from_cache: self.from_cache,
        }
    }
}
