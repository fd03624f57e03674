mod article;
mod forms;
mod user;

pub use article::{Article, ArticleQuery, ProviderQuery, Source, REMOVED_MARKER};
pub use forms::{Credentials, LoginForm, RegisterForm, MIN_PASSWORD_LEN, MIN_USERNAME_LEN};
pub use user::{Preferences, PublicUser, User};
