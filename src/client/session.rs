use std::sync::Arc;
use crate::client::api::{ApiClient, ClientError};
use crate::client::storage::{KeyValueStorage, StorageError};

const USERNAME_KEY: &str = "username";
const TOKEN_KEY: &str = "token";
const DARK_MODE_KEY: &str = "darkMode";

/// Login state persisted in client storage.
#[derive(Clone)]
pub struct ClientSession {
    storage: Arc<dyn KeyValueStorage>,
}

impl ClientSession {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    pub fn username(&self) -> Option<String> {
        self.storage.get(USERNAME_KEY)
    }

    pub fn token(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY)
    }

    pub fn is_signed_in(&self) -> bool {
        self.username().is_some()
    }

    pub async fn login(&self, api: &ApiClient, username: &str, password: &str) -> Result<(), ClientError> {
        let token = api.login(username, password).await?;
        self.remember(username, &token)?;
        tracing::info!("Signed in as {}", username);
        Ok(())
    }

    /// Create the account, then sign in with it.
    pub async fn register(&self, api: &ApiClient, username: &str, password: &str) -> Result<(), ClientError> {
        api.register(username, password).await?;
        self.login(api, username, password).await
    }

    pub fn sign_out(&self) -> Result<(), StorageError> {
        self.storage.remove(USERNAME_KEY)?;
        self.storage.remove(TOKEN_KEY)
    }

    pub fn dark_mode(&self) -> bool {
        self.storage.get(DARK_MODE_KEY).as_deref() == Some("true")
    }

    pub fn toggle_dark_mode(&self) -> Result<bool, StorageError> {
        let enabled = !self.dark_mode();
        self.storage.set(DARK_MODE_KEY, if enabled { "true" } else { "false" })?;
        Ok(enabled)
    }

    // Username goes last: it is what marks the session as signed in
    fn remember(&self, username: &str, token: &str) -> Result<(), StorageError> {
        self.storage.set(TOKEN_KEY, token)?;
        self.storage.set(USERNAME_KEY, username).map_err(|e| {
            tracing::warn!("Failed to persist session for {}: {}", username, e);
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::storage::MemoryStorage;

    #[test]
    fn sign_out_forgets_user_and_token() {
        let storage = Arc::new(MemoryStorage::new());
        let session = ClientSession::new(storage.clone());
        session.remember("alice", "tok").unwrap();
        assert!(session.is_signed_in());
        assert_eq!(session.token().as_deref(), Some("tok"));

        session.sign_out().unwrap();
        assert!(!session.is_signed_in());
        assert_eq!(session.token(), None);
    }

    struct ReadOnlyStorage;

    impl KeyValueStorage for ReadOnlyStorage {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Poisoned)
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn remember_reports_storage_failure() {
        let session = ClientSession::new(Arc::new(ReadOnlyStorage));
        assert!(matches!(session.remember("alice", "tok"), Err(StorageError::Poisoned)));
        assert!(!session.is_signed_in());
    }

    #[test]
    fn dark_mode_toggles_and_persists() {
        let storage = Arc::new(MemoryStorage::new());
        let session = ClientSession::new(storage.clone());
        assert!(!session.dark_mode());

        assert!(session.toggle_dark_mode().unwrap());
        assert_eq!(storage.get(DARK_MODE_KEY).as_deref(), Some("true"));
        assert!(ClientSession::new(storage).dark_mode());

        assert!(!session.toggle_dark_mode().unwrap());
    }
}
