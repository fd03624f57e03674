#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use newshub::{
    config::{AuthConfig, Config, ProviderConfig, ServerConfig, StoreBackend, StoreConfig},
    errors::ProviderError,
    models::{Article, ProviderQuery, Source, REMOVED_MARKER},
    services::{ArticleProvider, MemoryUserStore},
    AppState,
};

pub fn config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            max_body_size: 64 * 1024,
            allowed_origin: "http://localhost:5173".into(),
        },
        store: StoreConfig {
            backend: StoreBackend::Memory,
            url: String::new(),
        },
        provider: ProviderConfig {
            base_url: "http://127.0.0.1:9/v2/".into(),
            api_key: "test-key".into(),
            timeout_secs: 1,
        },
        auth: AuthConfig {
            jwt_secret: "integration-secret".into(),
            token_ttl_days: 30,
            bcrypt_cost: 4,
        },
    }
}

pub fn article(title: &str, description: &str, source: &str) -> Article {
    Article {
        source: Source { id: Some(source.to_lowercase()), name: Some(source.into()) },
        author: Some("Reporter".into()),
        title: Some(title.into()),
        description: Some(description.into()),
        url: Some(format!("https://news.example.com/{}", title.to_lowercase().replace(' ', "-"))),
        url_to_image: None,
        published_at: Some("2024-07-01T10:00:00Z".into()),
        content: Some("Full text".into()),
    }
}

pub fn climate_articles() -> Vec<Article> {
    vec![
        article("Climate summit opens", "Leaders gather", "BBC News"),
        article("Climate bill passes", REMOVED_MARKER, "CNN"),
        article("Heatwave and climate", "Record temperatures", "Reuters"),
    ]
}

/// Provider double that records queries and answers from a fixed result.
pub struct StubProvider {
    pub result: Mutex<Result<Vec<Article>, ProviderError>>,
    pub queries: Mutex<Vec<ProviderQuery>>,
}

impl StubProvider {
    pub fn with_articles(articles: Vec<Article>) -> Self {
        Self {
            result: Mutex::new(Ok(articles)),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: ProviderError) -> Self {
        Self {
            result: Mutex::new(Err(error)),
            queries: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ArticleProvider for StubProvider {
    async fn everything(&self, query: &ProviderQuery) -> Result<Vec<Article>, ProviderError> {
        self.queries.lock().unwrap().push(query.clone());
        match &*self.result.lock().unwrap() {
            Ok(articles) => Ok(articles.clone()),
            Err(ProviderError::Upstream { status, message }) => Err(ProviderError::Upstream {
                status: *status,
                message: message.clone(),
            }),
            Err(ProviderError::NoResponse(m)) => Err(ProviderError::NoResponse(m.clone())),
            Err(ProviderError::Failure(m)) => Err(ProviderError::Failure(m.clone())),
        }
    }
}

pub fn state_with(provider: Arc<StubProvider>) -> AppState {
    AppState::new(Arc::new(MemoryUserStore::new()), provider, config())
}
