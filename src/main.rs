use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use newshub::{
    build_router,
    config::{Config, StoreBackend},
    services::{ArticleProvider, MemoryUserStore, NewsApiProvider, RedisUserStore, UserStore},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    if config.provider.api_key.is_empty() {
        tracing::warn!("No provider API key configured, article requests will fail");
    }

    // Initialize user store
    let store: Arc<dyn UserStore> = match config.store.backend {
        StoreBackend::Redis => Arc::new(
            RedisUserStore::connect(&config.store.url)
                .await
                .context("Failed to connect to Redis")?,
        ),
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory user store, users are lost on restart");
            Arc::new(MemoryUserStore::new())
        }
    };

    let provider: Arc<dyn ArticleProvider> = Arc::new(
        NewsApiProvider::new(&config.provider).context("Failed to build article provider")?,
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = build_router(AppState::new(store, provider, config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .context("Failed to start server")?;

    Ok(())
}
