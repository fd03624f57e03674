use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use crate::{handlers, middleware, state::AppState};

/// Create router with all routes. The gate runs in front of every route,
/// including the fallback, so unknown `/api` paths are denied rather than 404.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.allowed_origin);
    let max_body_size = state.config.server.max_body_size;

    Router::new()
        // User routes
        .route("/api/users", post(handlers::handle_register).get(handlers::list_users))
        .route("/api/users/login", post(handlers::handle_login))
        .route("/api/users/:id/preferences", get(handlers::get_user_preferences))

        // Article routes
        .route("/api/articles", get(handlers::get_articles))

        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)

        // Add middleware
        .layer(from_fn_with_state(state.clone(), middleware::require_auth))
        .layer(RequestBodyLimitLayer::new(max_body_size))
        .layer(TraceLayer::new_for_http())
        .layer(cors)

        // Add state
        .with_state(state)
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    match HeaderValue::from_str(origin) {
        Ok(origin) => layer.allow_origin(origin),
        Err(_) => {
            tracing::warn!("Invalid allowed origin {:?}, CORS disabled", origin);
            layer
        }
    }
}
