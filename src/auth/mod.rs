pub mod jwt;
pub mod password;

pub use jwt::{check_expiry, create_token, verify_token, Expiry, TokenError, TokenPayload};
pub use password::{hash_password, verify_password};
