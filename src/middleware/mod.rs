mod auth;
mod public_routes;

pub use auth::{authorize, require_auth, CurrentUser};
pub use public_routes::{default_public_routes, find_route, Methods, PublicRoute};
