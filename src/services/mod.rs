pub mod news_provider;
pub mod user_store;

pub use news_provider::{ArticleProvider, NewsApiProvider};
pub use user_store::{MemoryUserStore, RedisUserStore, UserStore};
