use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub sources: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,       // unique, stored lower-cased
    pub password_hash: String,  // bcrypt hash, never the plain password
    #[serde(default)]
    pub preferences: Preferences,
}

impl User {
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            password_hash,
            preferences: Preferences::default(),
        }
    }
}

/// What the API exposes about a user.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub preferences: Preferences,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            preferences: user.preferences,
        }
    }
}
