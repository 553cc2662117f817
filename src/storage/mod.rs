//! URL and click storage.
//!
//! Handlers only see the [`Storage`] trait; the server wires in a
//! [`MemoryStorage`] at startup.

mod memory;

pub use memory::MemoryStorage;

use crate::error::AppResult;
use crate::models::{Click, NewUrl, Url};
use async_trait::async_trait;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Storage: Send + Sync {
    /// Create a new URL, generating a code when none is given.
    ///
    /// Fails with `ShortCodeExists` when the code is held by any stored URL,
    /// expired ones included.
    async fn create_url(&self, new_url: NewUrl) -> AppResult<Url>;

    /// Get a URL by code; expired URLs are reported as missing
    async fn get_url_by_code(&self, code: &str) -> AppResult<Option<Url>>;

    /// All non-expired URLs, newest first
    async fn get_all_urls(&self) -> AppResult<Vec<Url>>;

    /// Delete a non-expired URL and every click recorded for it
    async fn delete_url(&self, code: &str) -> AppResult<bool>;

    /// Increment the click counter of a non-expired URL (no-op when missing)
    async fn increment_clicks(&self, code: &str) -> AppResult<()>;

    /// Record a click for the given URL id
    async fn record_click(&self, url_id: Uuid) -> AppResult<()>;

    /// Clicks recorded for a URL, newest first
    async fn get_clicks_by_url_id(&self, url_id: Uuid) -> AppResult<Vec<Click>>;

    /// Number of stored URLs, expired ones included
    async fn total_urls(&self) -> AppResult<u64>;

    /// Number of recorded clicks
    async fn total_clicks(&self) -> AppResult<u64>;

    /// Number of URLs that have not expired
    async fn active_urls(&self) -> AppResult<u64>;
}
