use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use uuid::Uuid;
use crate::auth::{check_expiry, verify_token};
use crate::errors::{AppError, AppResult};
use crate::middleware::find_route;
use crate::models::Preferences;
use crate::state::AppState;

const API_PREFIX: &str = "/api";

/// Identity resolved by the gate, handed to handlers explicitly.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub username: String,
    pub preferences: Preferences,
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| AppError::Auth("Unauthorized access to this route".into()))
    }
}

/// Decide whether a request may reach its handler.
///
/// `Ok(None)` lets a public request through, `Ok(Some(user))` carries the
/// identity of an authenticated one.
pub async fn authorize(
    state: &AppState,
    method: &Method,
    path: &str,
    headers: &HeaderMap,
) -> AppResult<Option<CurrentUser>> {
    if !path.starts_with(API_PREFIX) {
        return Ok(None);
    }

    let route = find_route(&state.public_routes, path)
        .ok_or_else(|| AppError::Auth("Unauthorized access to this route".into()))?;

    if route.allows(method) {
        return Ok(None);
    }

    let authorization = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AppError::Auth("No token provided".into()))?
        .to_str()
        .map_err(|_| AppError::Auth("Token malformatted".into()))?;

    let token = match authorization.split_once(' ') {
        Some(("Bearer", token)) if !token.is_empty() => token,
        _ => return Err(AppError::Auth("Token malformatted".into())),
    };

    let payload = verify_token(token, &state.config.auth.jwt_secret).map_err(|e| {
        tracing::debug!("Rejected token: {}", e);
        AppError::Auth("Token invalid".into())
    })?;

    let expiry = check_expiry(payload, Utc::now());
    if expiry.expired {
        return Err(AppError::Auth("Token expired".into()));
    }

    let user = state
        .store
        .find_by_id(expiry.payload.id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to resolve token user {}: {}", expiry.payload.id, e);
            AppError::Auth("Unauthorized access to this route".into())
        })?
        .ok_or_else(|| AppError::Auth("User not found".into()))?;

    Ok(Some(CurrentUser {
        id: user.id,
        username: user.username,
        preferences: user.preferences,
    }))
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let decision = authorize(&state, req.method(), req.uri().path(), req.headers()).await;

    match decision {
        Ok(Some(user)) => {
            tracing::debug!("Authenticated {} for {}", user.username, req.uri().path());
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Ok(None) => next.run(req).await,
        Err(e) => {
            tracing::info!("Denied {} {}: {}", req.method(), req.uri().path(), e);
            e.into_response()
        }
    }
}
