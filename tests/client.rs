mod common;

use std::sync::Arc;
use newshub::{
    build_router,
    client::{
        ApiClient, ArticleFeed, ClientError, ClientSession, KeyValueStorage, MemoryStorage,
        StorageError,
    },
};
use common::{climate_articles, state_with, StubProvider};

/// Serve the router on an ephemeral port and return its base URL.
async fn spawn_server(provider: Arc<StubProvider>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = build_router(state_with(provider));
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service()).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn signed_in_user_sees_filtered_climate_feed() {
    let provider = Arc::new(StubProvider::with_articles(climate_articles()));
    let base_url = spawn_server(provider.clone()).await;

    let api = ApiClient::new(base_url);
    let storage: Arc<dyn KeyValueStorage> = Arc::new(MemoryStorage::new());
    let session = ClientSession::new(storage.clone());

    session.register(&api, "alice", "password123").await.unwrap();
    assert_eq!(session.username().as_deref(), Some("alice"));
    assert!(session.token().is_some());

    let mut feed = ArticleFeed::new(Arc::new(api.clone()), storage.clone());
    feed.set_filter("climate");
    let view = feed.settle_and_refresh(&session).await.unwrap();

    // The CNN story has a removed description
    assert_eq!(view.total, 2);
    let titles: Vec<_> = view.articles.iter().filter_map(|a| a.title.clone()).collect();
    assert_eq!(titles, vec!["Climate summit opens", "Heatwave and climate"]);
    assert!(storage.get("articles_alice___climate").is_some());

    // Second load is served from the cache
    let again = feed.refresh(&session).await.unwrap();
    assert!(again.from_cache);
    assert_eq!(provider.queries.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn wrong_password_is_reported_by_the_api() {
    let base_url = spawn_server(Arc::new(StubProvider::with_articles(vec![]))).await;
    let api = ApiClient::new(base_url);
    let session = ClientSession::new(Arc::new(MemoryStorage::new()));

    api.register("alice", "password123").await.unwrap();
    match session.login(&api, "alice", "wrongpass").await {
        Err(ClientError::Api { status, code, .. }) => {
            assert_eq!(status, 401);
            assert_eq!(code, "AUTHENTICATION_ERROR");
        }
        other => panic!("expected API error, got {:?}", other),
    }
    assert!(!session.is_signed_in());
}

#[tokio::test]
async fn duplicate_registration_is_a_conflict() {
    let base_url = spawn_server(Arc::new(StubProvider::with_articles(vec![]))).await;
    let api = ApiClient::new(base_url);

    api.register("alice", "password123").await.unwrap();
    match api.register("alice", "password123").await {
        Err(ClientError::Api { status, code, .. }) => {
            assert_eq!(status, 409);
            assert_eq!(code, "CONFLICT_ERROR");
        }
        other => panic!("expected conflict, got {:?}", other),
    }
}

/// Storage whose writes always fail, like a full or locked-down local store.
struct FullStorage;

impl KeyValueStorage for FullStorage {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk full")))
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Ok(())
    }
}

#[tokio::test]
async fn login_fails_when_session_cannot_be_saved() {
    let base_url = spawn_server(Arc::new(StubProvider::with_articles(vec![]))).await;
    let api = ApiClient::new(base_url);
    let session = ClientSession::new(Arc::new(FullStorage));

    api.register("alice", "password123").await.unwrap();
    let result = session.login(&api, "alice", "password123").await;
    assert!(matches!(result, Err(ClientError::Storage(StorageError::Io(_)))), "{:?}", result);
    assert!(!session.is_signed_in());
}
