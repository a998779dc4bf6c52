//! Configuration for the Countries MCP Server
//!
//! The server has no flags or environment variables beyond the variant
//! selection; the upstream base URL is fixed in production and overridden
//! only by tests.

/// Configuration for the Countries MCP Server
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the REST Countries API
    pub base_url: String,
}

impl Config {
    /// Create a configuration pointing at the production API
    pub fn new() -> Self {
        Self {
            base_url: restcountries::API_BASE_URL.to_string(),
        }
    }

    /// Create a configuration with a custom upstream base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

/// REST Countries API constants
pub mod restcountries {
    /// Base URL for the REST Countries API
    pub const API_BASE_URL: &str = "https://restcountries.com";

    /// Field set requested when fetching the full country list
    pub const ALL_FIELDS: &[&str] = &[
        "name",
        "capital",
        "region",
        "population",
        "area",
        "flags",
        "languages",
        "currencies",
    ];

    /// Reduced field set used for region filtering
    pub const REGION_FIELDS: &[&str] = &["name", "region"];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        let config = Config::default();
        assert_eq!(config.base_url, "https://restcountries.com");
    }

    #[test]
    fn test_base_url_override() {
        let config = Config::with_base_url("http://127.0.0.1:8080");
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
    }

    #[test]
    fn test_all_fields_cover_summary() {
        assert!(restcountries::ALL_FIELDS.contains(&"name"));
        assert!(restcountries::ALL_FIELDS.contains(&"capital"));
        assert!(restcountries::ALL_FIELDS.contains(&"region"));
    }
}
