use orgpulse_core::{Error, Result};
use orgpulse_similarity::DEFAULT_LIMIT;

/// Runtime settings for the HTTP surface
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    /// Results returned by the similar-members endpoint when a request sets no limit
    pub default_similar_limit: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            default_similar_limit: DEFAULT_LIMIT,
        }
    }
}

impl ApiConfig {
    pub fn validate(&self) -> Result<()> {
        if self.default_similar_limit == 0 {
            return Err(Error::InvalidConfig(
                "default_similar_limit must be at least 1".to_string(),
            ));
        }
        if self.host.trim().is_empty() {
            return Err(Error::InvalidConfig("host must not be empty".to_string()));
        }
        Ok(())
    }
}
