mod articles;
mod health;
mod users;

pub use articles::get_articles;
pub use health::{health, not_found};
pub use users::{get_user_preferences, handle_login, handle_register, list_users};
