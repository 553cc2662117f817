use super::Storage;
use crate::error::{AppError, AppResult};
use crate::models::{Click, NewUrl, Url};
use crate::services::short_code::ShortCodeService;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;
use uuid::Uuid;

/// Default length of generated codes
pub const DEFAULT_CODE_LENGTH: usize = 8;

/// Default number of tries before code generation gives up
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

#[derive(Debug)]
struct StoredUrl {
    /// Insertion order, breaks `created_at` ties when listing
    seq: u64,
    url: Url,
}

#[derive(Debug, Default)]
struct Inner {
    urls: HashMap<String, StoredUrl>,
    clicks: Vec<Click>,
    next_seq: u64,
}

impl Inner {
    fn insert(&mut self, url: Url) -> AppResult<Url> {
        if self.urls.contains_key(&url.code) {
            return Err(AppError::ShortCodeExists(url.code));
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.urls.insert(
            url.code.clone(),
            StoredUrl {
                seq,
                url: url.clone(),
            },
        );

        Ok(url)
    }

    fn live(&self, code: &str) -> Option<&Url> {
        let now = Utc::now();
        self.urls
            .get(code)
            .map(|stored| &stored.url)
            .filter(|url| !url.is_expired_at(now))
    }
}

/// In-process storage for URLs and clicks.
///
/// Every operation takes the lock exactly once, so the uniqueness check and
/// the insert (or the lookup and the increment) cannot interleave with other
/// requests.
#[derive(Debug)]
pub struct MemoryStorage {
    inner: RwLock<Inner>,
    short_code_length: usize,
    short_code_max_attempts: u32,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH, DEFAULT_MAX_ATTEMPTS)
    }
}

impl MemoryStorage {
    /// Create an empty store with the given code generation settings
    pub fn new(short_code_length: usize, short_code_max_attempts: u32) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            short_code_length,
            short_code_max_attempts,
        }
    }

    /// Store a fully formed URL record as-is.
    ///
    /// The code must not be held by another stored URL.
    pub fn insert(&self, url: Url) -> AppResult<Url> {
        self.write()?.insert(url)
    }

    fn read(&self) -> AppResult<RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|e| AppError::Internal(format!("Storage lock poisoned: {}", e)))
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|e| AppError::Internal(format!("Storage lock poisoned: {}", e)))
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn create_url(&self, new_url: NewUrl) -> AppResult<Url> {
        let mut inner = self.write()?;

        let code = match new_url.code {
            Some(code) => code,
            None => ShortCodeService::generate_unique(
                self.short_code_length,
                self.short_code_max_attempts,
                |candidate| inner.urls.contains_key(candidate),
            )?,
        };

        let now = Utc::now();
        let url = Url {
            id: Uuid::new_v4(),
            code,
            original_url: new_url.original_url,
            clicks: 0,
            created_at: now,
            expires_at: new_url.expires_in.expires_at(now),
        };

        inner.insert(url)
    }

    async fn get_url_by_code(&self, code: &str) -> AppResult<Option<Url>> {
        Ok(self.read()?.live(code).cloned())
    }

    async fn get_all_urls(&self) -> AppResult<Vec<Url>> {
        let inner = self.read()?;
        let now = Utc::now();

        let mut live: Vec<&StoredUrl> = inner
            .urls
            .values()
            .filter(|stored| !stored.url.is_expired_at(now))
            .collect();
        live.sort_by(|a, b| {
            b.url
                .created_at
                .cmp(&a.url.created_at)
                .then_with(|| b.seq.cmp(&a.seq))
        });

        Ok(live.into_iter().map(|stored| stored.url.clone()).collect())
    }

    async fn delete_url(&self, code: &str) -> AppResult<bool> {
        let mut inner = self.write()?;

        let Some(url_id) = inner.live(code).map(|url| url.id) else {
            return Ok(false);
        };

        inner.clicks.retain(|click| click.url_id != url_id);
        inner.urls.remove(code);

        debug!(code = %code, "Deleted URL and its clicks");
        Ok(true)
    }

    async fn increment_clicks(&self, code: &str) -> AppResult<()> {
        let mut inner = self.write()?;
        let now = Utc::now();

        if let Some(stored) = inner.urls.get_mut(code) {
            if !stored.url.is_expired_at(now) {
                stored.url.clicks += 1;
            }
        }

        Ok(())
    }

    async fn record_click(&self, url_id: Uuid) -> AppResult<()> {
        let mut inner = self.write()?;
        inner.clicks.push(Click {
            id: Uuid::new_v4(),
            url_id,
            timestamp: Utc::now(),
        });
        Ok(())
    }

    async fn get_clicks_by_url_id(&self, url_id: Uuid) -> AppResult<Vec<Click>> {
        let inner = self.read()?;
        let mut clicks: Vec<Click> = inner
            .clicks
            .iter()
            .rev()
            .filter(|click| click.url_id == url_id)
            .cloned()
            .collect();

        // The wall clock may step back; equal timestamps keep newest-recorded first
        clicks.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(clicks)
    }

    async fn total_urls(&self) -> AppResult<u64> {
        Ok(self.read()?.urls.len() as u64)
    }

    async fn total_clicks(&self) -> AppResult<u64> {
        Ok(self.read()?.clicks.len() as u64)
    }

    async fn active_urls(&self) -> AppResult<u64> {
        let inner = self.read()?;
        let now = Utc::now();
        Ok(inner
            .urls
            .values()
            .filter(|stored| !stored.url.is_expired_at(now))
            .count() as u64)
    }
}
