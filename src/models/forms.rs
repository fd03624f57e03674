use serde::{Deserialize, Serialize};
use crate::errors::{AppError, AppResult};

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 10;

// Fields are optional so a missing field becomes a validation message
// instead of a deserialization failure.
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct LoginForm {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Username and password that passed validation. The username is lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl RegisterForm {
    pub fn validate(self) -> AppResult<Credentials> {
        let mut errors = Vec::new();

        let username = normalize_username(self.username);
        match &username {
            None => errors.push("username is required".to_string()),
            Some(name) if name.chars().count() < MIN_USERNAME_LEN => errors.push(format!(
                "username must be at least {} characters",
                MIN_USERNAME_LEN
            )),
            Some(_) => {}
        }

        match &self.password {
            None => errors.push("password is required".to_string()),
            Some(password) if password.chars().count() < MIN_PASSWORD_LEN => errors.push(format!(
                "password must be at least {} characters",
                MIN_PASSWORD_LEN
            )),
            Some(_) => {}
        }

        match (username, self.password) {
            (Some(username), Some(password)) if errors.is_empty() => {
                Ok(Credentials { username, password })
            }
            _ => Err(AppError::Validation(errors)),
        }
    }
}

impl LoginForm {
    // Length rules are not applied here; a short password is just a wrong one.
    pub fn validate(self) -> AppResult<Credentials> {
        let mut errors = Vec::new();

        let username = normalize_username(self.username).filter(|name| !name.is_empty());
        if username.is_none() {
            errors.push("username is required".to_string());
        }

        let password = self.password.filter(|password| !password.is_empty());
        if password.is_none() {
            errors.push("password is required".to_string());
        }

        match (username, password) {
            (Some(username), Some(password)) => Ok(Credentials { username, password }),
            _ => Err(AppError::Validation(errors)),
        }
    }
}

fn normalize_username(username: Option<String>) -> Option<String> {
    username.map(|name| name.trim().to_lowercase())
}
