use crate::error::AppError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Shortened URL record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Url {
    pub id: Uuid,
    pub code: String,
    pub original_url: String,
    pub clicks: u64,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Url {
    /// A URL is expired once `now` is strictly past its expiry
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| now > expires_at)
    }
}

/// One recorded visit to a shortened URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Click {
    pub id: Uuid,
    pub url_id: Uuid,
    pub timestamp: DateTime<Utc>,
}

/// Lifetime requested for a new short URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpiryToken {
    Never,
    OneHour,
    OneDay,
    SevenDays,
    #[default]
    ThirtyDays,
    OneYear,
}

impl ExpiryToken {
    pub const ALL: [ExpiryToken; 6] = [
        ExpiryToken::Never,
        ExpiryToken::OneHour,
        ExpiryToken::OneDay,
        ExpiryToken::SevenDays,
        ExpiryToken::ThirtyDays,
        ExpiryToken::OneYear,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpiryToken::Never => "never",
            ExpiryToken::OneHour => "1h",
            ExpiryToken::OneDay => "24h",
            ExpiryToken::SevenDays => "7d",
            ExpiryToken::ThirtyDays => "30d",
            ExpiryToken::OneYear => "1y",
        }
    }

    /// Duration until expiry, `None` for links that never expire
    pub fn duration(&self) -> Option<Duration> {
        match self {
            ExpiryToken::Never => None,
            ExpiryToken::OneHour => Some(Duration::hours(1)),
            ExpiryToken::OneDay => Some(Duration::hours(24)),
            ExpiryToken::SevenDays => Some(Duration::days(7)),
            ExpiryToken::ThirtyDays => Some(Duration::days(30)),
            ExpiryToken::OneYear => Some(Duration::days(365)),
        }
    }

    /// Resolve the token into a concrete expiry relative to `from`
    pub fn expires_at(&self, from: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.duration().map(|d| from + d)
    }
}

impl fmt::Display for ExpiryToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpiryToken {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|token| token.as_str() == s)
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "expiresAt must be one of never, 1h, 24h, 7d, 30d, 1y (got '{}')",
                    s
                ))
            })
    }
}

/// Input for creating a URL in storage
#[derive(Debug, Clone)]
pub struct NewUrl {
    pub original_url: String,
    pub code: Option<String>,
    pub expires_in: ExpiryToken,
}

/// Request to create a short URL
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUrlRequest {
    /// Destination URL
    #[validate(url(message = "Invalid URL format"))]
    #[schema(example = "https://example.com/long-url")]
    pub original_url: String,

    /// Custom short code (5-10 alphanumeric characters)
    #[validate(length(min = 5, max = 10, message = "Code must be 5-10 alphanumeric characters"))]
    #[schema(example = "mylink")]
    pub code: Option<String>,

    /// One of never, 1h, 24h, 7d, 30d, 1y
    #[schema(example = "30d")]
    pub expires_at: Option<String>,
}

/// Response after creating a short URL
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateUrlResponse {
    pub original_url: String,
    pub short_url: String,
    pub code: String,
    pub created_at: DateTime<Utc>,
}

/// Entry in the URL listing
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UrlListItem {
    pub code: String,
    pub original_url: String,
    pub short_url: String,
    pub clicks: u64,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl UrlListItem {
    pub fn new(url: Url, base_url: &str) -> Self {
        UrlListItem {
            short_url: format!("{}/{}", base_url, url.code),
            code: url.code,
            original_url: url.original_url,
            clicks: url.clicks,
            created_at: url.created_at,
            expires_at: url.expires_at,
        }
    }
}

/// Click as exposed by the stats endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct RecentClick {
    pub timestamp: DateTime<Utc>,
}

/// Per-URL statistics
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UrlStatsResponse {
    pub code: String,
    pub original_url: String,
    pub total_clicks: u64,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub recent_clicks: Vec<RecentClick>,
}

/// Response after deleting a short URL
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteUrlResponse {
    pub message: String,
    pub code: String,
}

/// Global statistics summary
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_urls: u64,
    pub total_clicks: u64,
    pub active_urls: u64,
    /// Clicks per URL, one decimal place
    #[schema(example = "2.5")]
    pub avg_click_rate: String,
}
