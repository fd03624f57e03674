use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use crate::errors::{success, AppResult};
use crate::extractors::ValidatedQuery;
use crate::models::ArticleQuery;
use crate::state::AppState;

/// Proxy to the provider's `everything` endpoint. Articles are relayed as-is.
pub async fn get_articles(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ArticleQuery>,
) -> AppResult<Response> {
    let provider_query = query.to_provider_query();
    tracing::info!(
        "Fetching articles: q={:?} sources={:?}",
        provider_query.q,
        provider_query.sources
    );

    let articles = state.provider.everything(&provider_query).await?;

    Ok(success("Articles found", articles).into_response())
}
