use crate::models::ExpiryToken;
use crate::services::short_code::{MAX_CODE_LENGTH, MIN_CODE_LENGTH};

/// URL shortening configuration
#[derive(Debug, Clone)]
pub struct UrlConfig {
    /// Length of randomly generated short codes
    pub short_code_length: usize,

    /// Maximum number of attempts to generate a unique short code
    pub short_code_max_attempts: u32,

    /// Public domains the service is reachable under; the first one builds short URLs
    pub public_domains: Vec<String>,

    /// Expiry applied when a request does not choose one
    pub default_expiry: ExpiryToken,

    /// Whether strict URL validation is enabled (requires http:// or https://)
    pub strict_url_validation: bool,
}

impl UrlConfig {
    /// Base URL taken from the configured public domain, if any
    pub fn public_base_url(&self) -> Option<String> {
        self.public_domains
            .first()
            .map(|domain| format!("https://{}", domain))
    }

    /// Validate URL configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.short_code_length < MIN_CODE_LENGTH || self.short_code_length > MAX_CODE_LENGTH {
            return Err(format!(
                "SHORT_CODE_LENGTH must be between {} and {}",
                MIN_CODE_LENGTH, MAX_CODE_LENGTH
            ));
        }

        if self.short_code_max_attempts < 1 || self.short_code_max_attempts > 100 {
            return Err("SHORT_CODE_MAX_ATTEMPTS must be between 1 and 100".to_string());
        }

        Ok(())
    }
}
