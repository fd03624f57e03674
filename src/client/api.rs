use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;
use crate::client::storage::StorageError;
use crate::models::Article;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error {status} ({code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Failed to persist session: {0}")]
    Storage(#[from] StorageError),
}

/// Query parameters for one article request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedQuery {
    pub topics: Vec<String>,
    pub sources: String,
    pub filter: String,
}

/// Where the feed gets articles when the cache misses.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    async fn fetch_articles(
        &self,
        query: &FeedQuery,
        token: Option<&str>,
    ) -> Result<Vec<Article>, ClientError>;
}

#[derive(Debug, Deserialize)]
struct SuccessEnvelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    messages: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct RegisterData {
    id: Uuid,
}

#[derive(Debug, Deserialize)]
struct LoginData {
    token: String,
}

/// HTTP client for the backend API.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<Uuid, ClientError> {
        let response = self
            .client
            .post(self.url("/api/users"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?;
        let data: RegisterData = read_envelope(response).await?;
        Ok(data.id)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<String, ClientError> {
        let response = self
            .client
            .post(self.url("/api/users/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?;
        let data: LoginData = read_envelope(response).await?;
        Ok(data.token)
    }
}

#[async_trait]
impl ArticleSource for ApiClient {
    async fn fetch_articles(
        &self,
        query: &FeedQuery,
        token: Option<&str>,
    ) -> Result<Vec<Article>, ClientError> {
        let topics = query.topics.join(",");
        let mut params: Vec<(&str, &str)> = Vec::new();
        if !topics.is_empty() {
            params.push(("topics", topics.as_str()));
        }
        if !query.sources.is_empty() {
            params.push(("sources", query.sources.as_str()));
        }
        if !query.filter.is_empty() {
            params.push(("q", query.filter.as_str()));
        }

        let mut request = self.client.get(self.url("/api/articles")).query(&params);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        read_envelope(request.send().await?).await
    }
}

async fn read_envelope<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.bytes().await?;

    if status.is_success() {
        let envelope: SuccessEnvelope<T> =
            serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))?;
        return Ok(envelope.data);
    }

    let first = serde_json::from_slice::<ErrorEnvelope>(&body)
        .ok()
        .and_then(|envelope| envelope.messages.into_iter().next());
    let (code, message) = match first {
        Some(entry) => (
            entry.code.unwrap_or_else(|| "UNKNOWN".to_string()),
            entry.message.unwrap_or_default(),
        ),
        None => (
            "UNKNOWN".to_string(),
            String::from_utf8_lossy(&body).into_owned(),
        ),
    };

    Err(ClientError::Api {
        status: status.as_u16(),
        code,
        message,
    })
}
