use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use chrono::{Duration, Utc};
use serde_json::json;
use uuid::Uuid;
use crate::auth::{create_token, hash_password, verify_password};
use crate::errors::{success, AppError, AppResult, StoreError};
use crate::extractors::ValidatedJson;
use crate::middleware::CurrentUser;
use crate::models::{LoginForm, PublicUser, RegisterForm, User};
use crate::state::AppState;

const LOGIN_SUBJECT: &str = "Login";
const BAD_CREDENTIALS: &str = "Invalid username or password";

pub async fn handle_register(
    State(state): State<AppState>,
    ValidatedJson(form): ValidatedJson<RegisterForm>,
) -> AppResult<Response> {
    let creds = form.validate()?;
    tracing::info!("Registration attempt for user: {}", creds.username);

    // Check if user exists
    let existing = state
        .store
        .find_by_username(&creds.username)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up user {}: {}", creds.username, e);
            AppError::Internal("Failed to look up user".into())
        })?;
    if existing.is_some() {
        return Err(AppError::Conflict("A user with that username already exists".into()));
    }

    let password_hash = hash_password(&creds.password, state.config.auth.bcrypt_cost).await?;
    let user = User::new(creds.username, password_hash);

    // The store enforces uniqueness too, for registrations racing past the check above
    state.store.insert(&user).await.map_err(|e| match e {
        StoreError::Duplicate(_) => {
            AppError::Conflict("A user with that username already exists".into())
        }
        other => {
            tracing::error!("Failed to save user {}: {}", user.username, other);
            AppError::Internal("Failed to create user".into())
        }
    })?;

    tracing::info!("Registered user {} with id {}", user.username, user.id);
    Ok(success("User created successfully", json!({ "id": user.id })).into_response())
}

#[axum::debug_handler]
pub async fn handle_login(
    State(state): State<AppState>,
    ValidatedJson(form): ValidatedJson<LoginForm>,
) -> AppResult<Response> {
    let creds = form.validate()?;
    tracing::info!("Login attempt for user: {}", creds.username);

    let user = state
        .store
        .find_by_username(&creds.username)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up user {}: {}", creds.username, e);
            AppError::Internal("Failed to log in".into())
        })?;

    // Unknown user and wrong password look the same to the caller
    let user = match user {
        Some(user) => user,
        None => {
            tracing::info!("User not found: {}", creds.username);
            return Err(AppError::Auth(BAD_CREDENTIALS.into()));
        }
    };

    if !verify_password(&creds.password, &user.password_hash).await? {
        tracing::info!("Invalid password for user: {}", creds.username);
        return Err(AppError::Auth(BAD_CREDENTIALS.into()));
    }

    let token = create_token(
        user.id,
        &user.username,
        LOGIN_SUBJECT,
        Duration::days(state.config.auth.token_ttl_days),
        Utc::now(),
        &state.config.auth.jwt_secret,
    )
    .map_err(|e| {
        tracing::error!("Failed to issue token for {}: {}", user.username, e);
        AppError::Internal("Failed to log in".into())
    })?;

    tracing::info!("Password verified for user: {}", user.username);
    Ok(success("Login successful", json!({ "token": token })).into_response())
}

pub async fn list_users(
    State(state): State<AppState>,
    current: CurrentUser,
) -> AppResult<Response> {
    tracing::debug!("User list requested by {}", current.username);

    let users: Vec<PublicUser> = state
        .store
        .list()
        .await
        .map_err(|e| {
            tracing::error!("Failed to list users: {}", e);
            AppError::Internal("Failed to retrieve users".into())
        })?
        .into_iter()
        .map(PublicUser::from)
        .collect();

    Ok(success("Users found", json!({ "users": users })).into_response())
}

pub async fn get_user_preferences(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(user_id): Path<String>,
) -> AppResult<Response> {
    tracing::debug!("Preferences of {} requested by {}", user_id, current.username);

    let id = Uuid::parse_str(&user_id)
        .map_err(|_| AppError::Internal("Failed to fetch user preferences".into()))?;

    let preferences = state
        .store
        .find_by_id(id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch preferences for {}: {}", id, e);
            AppError::Internal("Failed to fetch user preferences".into())
        })?
        .map(|user| user.preferences);

    Ok(success("User preferences", preferences).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_state;

    fn register_form(username: &str, password: &str) -> ValidatedJson<RegisterForm> {
        ValidatedJson(RegisterForm {
            username: Some(username.into()),
            password: Some(password.into()),
        })
    }

    fn login_form(username: &str, password: &str) -> ValidatedJson<LoginForm> {
        ValidatedJson(LoginForm {
            username: Some(username.into()),
            password: Some(password.into()),
        })
    }

    #[tokio::test]
    async fn short_username_persists_nothing() {
        let state = test_state();
        let result = handle_register(State(state.clone()), register_form("al", "password123")).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(state.store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn second_registration_conflicts() {
        let state = test_state();
        handle_register(State(state.clone()), register_form("alice", "password123"))
            .await
            .unwrap();

        let again = handle_register(State(state.clone()), register_form("ALICE", "password456")).await;
        assert!(matches!(again, Err(AppError::Conflict(_))));
        assert_eq!(state.store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn login_failures_are_indistinguishable() {
        let state = test_state();
        handle_register(State(state.clone()), register_form("alice", "password123"))
            .await
            .unwrap();

        let wrong_password = handle_login(State(state.clone()), login_form("alice", "wrongpass")).await;
        let unknown_user = handle_login(State(state.clone()), login_form("bob", "password123")).await;

        for result in [wrong_password, unknown_user] {
            match result {
                Err(AppError::Auth(message)) => assert_eq!(message, BAD_CREDENTIALS),
                other => panic!("expected authentication error, got {:?}", other.map(|r| r.status())),
            }
        }
    }

    #[tokio::test]
    async fn stored_password_is_hashed() {
        let state = test_state();
        handle_register(State(state.clone()), register_form("alice", "password123"))
            .await
            .unwrap();

        let user = state.store.find_by_username("alice").await.unwrap().unwrap();
        assert_ne!(user.password_hash, "password123");
        assert!(user.password_hash.starts_with("$2"));
    }
}
