use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use crate::config::ProviderConfig;
use crate::errors::ProviderError;
use crate::models::{Article, ProviderQuery};

/// Source of articles for `GET /api/articles`.
#[async_trait]
pub trait ArticleProvider: Send + Sync {
    async fn everything(&self, query: &ProviderQuery) -> Result<Vec<Article>, ProviderError>;
}

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: Option<String>,
}

/// NewsAPI-compatible client for the `everything` endpoint.
#[derive(Clone)]
pub struct NewsApiProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl NewsApiProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProviderError::Failure(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn endpoint(&self) -> String {
        if self.base_url.ends_with('/') {
            format!("{}everything", self.base_url)
        } else {
            format!("{}/everything", self.base_url)
        }
    }
}

#[async_trait]
impl ArticleProvider for NewsApiProvider {
    async fn everything(&self, query: &ProviderQuery) -> Result<Vec<Article>, ProviderError> {
        let mut params: Vec<(&str, &str)> = Vec::with_capacity(3);
        if !query.q.is_empty() {
            params.push(("q", query.q.as_str()));
        }
        if let Some(sources) = &query.sources {
            params.push(("sources", sources.as_str()));
        }
        params.push(("apiKey", self.api_key.as_str()));

        tracing::debug!("Requesting articles: q={:?} sources={:?}", query.q, query.sources);

        let response = self
            .client
            .get(self.endpoint())
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Article provider request failed: {}", e);
                ProviderError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ProviderErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("Upstream error")
                        .to_string()
                });
            tracing::warn!("Article provider responded with {}: {}", status, message);
            return Err(ProviderError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let body: EverythingResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to decode provider response: {}", e);
            ProviderError::Failure(e.to_string())
        })?;

        tracing::info!("Article provider returned {} articles", body.articles.len());
        Ok(body.articles)
    }
}
