use crate::models::ExpiryToken;
use crate::storage::Storage;
use std::path::PathBuf;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// This struct is wrapped in `Arc` and shared across all request handlers
/// via Axum's State extraction.
#[derive(Clone)]
pub struct AppState {
    /// URL and click storage
    pub storage: Arc<dyn Storage>,

    /// Base URL for short links when a public domain is configured
    /// (e.g., "https://sho.rt"); otherwise it is derived per request
    pub public_base_url: Option<String>,

    /// Expiry used when a create request does not pick one
    pub default_expiry: ExpiryToken,

    /// Whether strict URL validation is enabled (requires http:// or https://)
    pub strict_url_validation: bool,

    /// Directory the single-page UI is served from
    pub static_dir: PathBuf,
}

impl AppState {
    /// State with default settings around the given storage
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            public_base_url: None,
            default_expiry: ExpiryToken::default(),
            strict_url_validation: true,
            static_dir: PathBuf::from("dist/public"),
        }
    }
}
