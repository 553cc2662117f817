//! snaplink - a URL shortener with click analytics.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod services;
pub mod state;
pub mod storage;
pub mod util;
