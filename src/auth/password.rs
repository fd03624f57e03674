use crate::errors::{AppError, AppResult};

/// Salted bcrypt hash. Runs on the blocking pool since bcrypt is CPU bound.
pub async fn hash_password(password: &str, cost: u32) -> AppResult<String> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::hash(password.as_bytes(), cost))
        .await
        .map_err(|e| AppError::Hash(format!("Hashing task failed: {}", e)))?
        .map_err(|e| {
            tracing::error!("Failed to hash password: {}", e);
            AppError::Hash("Failed to hash password".into())
        })
}

pub async fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let password = password.to_owned();
    let password_hash = password_hash.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::verify(password.as_bytes(), &password_hash))
        .await
        .map_err(|e| AppError::Hash(format!("Verification task failed: {}", e)))?
        .map_err(|e| {
            tracing::error!("Failed to verify password: {}", e);
            AppError::Hash("Failed to verify password".into())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_COST: u32 = 4;

    #[tokio::test]
    async fn hash_then_verify() {
        let hash = hash_password("password123", TEST_COST).await.unwrap();
        assert_ne!(hash, "password123");
        assert!(verify_password("password123", &hash).await.unwrap());
        assert!(!verify_password("wrongpass", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn hashes_are_salted() {
        let a = hash_password("password123", TEST_COST).await.unwrap();
        let b = hash_password("password123", TEST_COST).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn invalid_cost_is_a_hash_error() {
        let result = hash_password("password123", 99).await;
        assert!(matches!(result, Err(AppError::Hash(_))));
    }

    #[tokio::test]
    async fn malformed_stored_hash_is_a_hash_error() {
        let result = verify_password("password123", "not-a-bcrypt-hash").await;
        assert!(matches!(result, Err(AppError::Hash(_))));
    }
}
