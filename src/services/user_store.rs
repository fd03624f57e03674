use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client};
use std::collections::HashMap;
use std::fmt::Display;
use tokio::sync::RwLock;
use uuid::Uuid;
use crate::errors::{StoreError, StoreResult};
use crate::models::User;

const USERS_SET: &str = "users";

/// Persistence for user records. Usernames are unique.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    /// Fails with `StoreError::Duplicate` when the username is taken.
    async fn insert(&self, user: &User) -> StoreResult<()>;

    async fn list(&self) -> StoreResult<Vec<User>>;
}

// User documents live under `user:{id}`, `username:{name}` indexes them by name
// and the `users` set lists every id.
#[derive(Clone)]
pub struct RedisUserStore {
    conn: ConnectionManager,
}

impl RedisUserStore {
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let client = Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }

    fn user_key(id: impl Display) -> String {
        format!("user:{}", id)
    }

    fn username_key(username: &str) -> String {
        format!("username:{}", username)
    }

    /// Drop a username claim whose user document never got written.
    async fn release_username(&self, username: &str) {
        let mut conn = self.conn.clone();
        let released: redis::RedisResult<()> = conn.del(Self::username_key(username)).await;
        if let Err(e) = released {
            tracing::error!("Username {} stays claimed without a user record: {}", username, e);
        }
    }
}

#[async_trait]
impl UserStore for RedisUserStore {
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let mut conn = self.conn.clone();
        let user_data: Option<String> = conn.get(Self::user_key(id)).await?;
        user_data
            .map(|data| serde_json::from_str(&data).map_err(StoreError::from))
            .transpose()
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let mut conn = self.conn.clone();
        let id: Option<String> = conn.get(Self::username_key(username)).await?;
        match id {
            Some(id) => {
                let id = Uuid::parse_str(&id)
                    .map_err(|_| StoreError::Corrupt(Self::username_key(username)))?;
                self.find_by_id(id).await
            }
            None => Ok(None),
        }
    }

    async fn insert(&self, user: &User) -> StoreResult<()> {
        let mut conn = self.conn.clone();

        // Claim the username first so concurrent registrations cannot both win
        let claimed: bool = conn
            .set_nx(Self::username_key(&user.username), user.id.to_string())
            .await?;
        if !claimed {
            return Err(StoreError::Duplicate(user.username.clone()));
        }

        let document = serde_json::to_string(user)?;
        let saved: redis::RedisResult<()> = redis::pipe()
            .atomic()
            .set(Self::user_key(user.id), document)
            .ignore()
            .sadd(USERS_SET, user.id.to_string())
            .ignore()
            .query_async(&mut conn)
            .await;

        if let Err(e) = saved {
            tracing::error!("Failed to save user {}, releasing username: {}", user.username, e);
            self.release_username(&user.username).await;
            return Err(e.into());
        }
        Ok(())
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        let mut conn = self.conn.clone();
        let ids: Vec<String> = conn.smembers(USERS_SET).await?;

        let mut users = Vec::with_capacity(ids.len());
        for id in ids {
            let data: Option<String> = conn.get(Self::user_key(&id)).await?;
            match data {
                Some(data) => users.push(serde_json::from_str::<User>(&data)?),
                None => tracing::warn!("User {} listed but has no document", id),
            }
        }
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }
}

/// Process-local store for development and tests.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn insert(&self, user: &User) -> StoreResult<()> {
        let mut users = self.users.write().await;
        if users.values().any(|existing| existing.username == user.username) {
            return Err(StoreError::Duplicate(user.username.clone()));
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }
}
