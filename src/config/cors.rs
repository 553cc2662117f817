/// CORS configuration
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// List of allowed origins for CORS (use ["*"] for all origins)
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    /// Parse a comma separated origin list; "*" allows every origin
    pub fn parse_origins(raw: &str) -> Vec<String> {
        if raw.trim() == "*" {
            return vec!["*".to_string()];
        }

        raw.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn allows_any(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}
