//! Client data layer: what a browser frontend does between the user's
//! inputs and the API. Inputs are debounced, responses cached per query for
//! 15 minutes, and articles filtered and paginated locally.

pub mod api;
pub mod cache;
pub mod debounce;
pub mod feed;
pub mod filter;
pub mod session;
pub mod storage;

pub use api::{ApiClient, ArticleSource, ClientError, FeedQuery};
pub use cache::{cache_key, ArticleCache, CacheEntry, CACHE_DURATION};
pub use debounce::{Debounced, DEBOUNCE_DELAY};
pub use feed::{ArticleFeed, FeedError, FeedView};
pub use filter::{filter_articles, is_displayable, paginate, total_pages, FilterCriteria, ARTICLES_PER_PAGE};
pub use session::ClientSession;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
