use std::sync::Arc;
use crate::config::Config;
use crate::middleware::PublicRoute;
use crate::services::{ArticleProvider, UserStore};

/// Application state shared between the gate and the handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub provider: Arc<dyn ArticleProvider>,
    pub config: Arc<Config>,
    pub public_routes: Arc<Vec<PublicRoute>>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn UserStore>,
        provider: Arc<dyn ArticleProvider>,
        config: Config,
    ) -> Self {
        Self {
            store,
            provider,
            config: Arc::new(config),
            public_routes: Arc::new(crate::middleware::default_public_routes()),
        }
    }
}

#[cfg(test)]
pub(crate) fn test_state() -> AppState {
    use async_trait::async_trait;
    use crate::errors::ProviderError;
    use crate::models::{Article, ProviderQuery};
    use crate::services::MemoryUserStore;

    struct OfflineProvider;

    #[async_trait]
    impl ArticleProvider for OfflineProvider {
        async fn everything(&self, _query: &ProviderQuery) -> Result<Vec<Article>, ProviderError> {
            Err(ProviderError::NoResponse("offline".into()))
        }
    }

    AppState::new(
        Arc::new(MemoryUserStore::new()),
        Arc::new(OfflineProvider),
        crate::config::test_config(),
    )
}
