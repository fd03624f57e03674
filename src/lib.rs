//! Backend and client data layer for a small news aggregator.
//!
//! The server side proxies a NewsAPI-compatible provider behind a bearer-token
//! session gate; the `client` module holds the fetch, cache and filter logic
//! a frontend runs against it.

pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
