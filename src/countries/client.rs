//! REST Countries API client
//!
//! High-level client for REST Countries lookups. Each method performs at
//! most one unauthenticated GET against the configured base URL.

use serde_json::Value;

use crate::config::{restcountries, Config};
use crate::countries::types::RegionRow;
use crate::error::{CountriesApiError, CountriesMcpError, Result};

/// REST Countries API client
pub struct CountriesClient {
    /// HTTP client
    http_client: reqwest::Client,

    /// Upstream base URL, without a trailing slash
    base_url: String,
}

impl CountriesClient {
    /// Create a new client from configuration
    pub fn new(config: &Config) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// URL for the full-list endpoint with a field selection
    fn all_url(&self, fields: &[&str]) -> String {
        format!("{}/v3.1/all?fields={}", self.base_url, fields.join(","))
    }

    /// URL for the by-name endpoint
    fn name_url(&self, country_name: &str) -> String {
        format!("{}/v3.1/name/{}", self.base_url, country_name)
    }

    /// Fetch every country with the full field set, as parsed JSON
    pub async fn fetch_all(&self) -> Result<Value> {
        let url = self.all_url(restcountries::ALL_FIELDS);
        let response = self.http_client.get(&url).send().await?;

        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            Err(CountriesMcpError::Api(CountriesApiError::RequestFailed {
                message: format!("Failed to fetch countries ({}): {}", status, text),
            }))
        }
    }

    /// Fetch a single country by name, returning the raw response body
    pub async fn fetch_by_name(&self, country_name: &str) -> Result<String> {
        let url = self.name_url(country_name);
        let response = self.http_client.get(&url).send().await?;

        if response.status().is_success() {
            Ok(response.text().await?)
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            Err(CountriesMcpError::Api(CountriesApiError::RequestFailed {
                message: format!(
                    "Failed to fetch country '{}' ({}): {}",
                    country_name, status, text
                ),
            }))
        }
    }

    /// Fetch the reduced name/region rows used for region filtering
    pub async fn fetch_region_rows(&self) -> Result<Vec<RegionRow>> {
        let url = self.all_url(restcountries::REGION_FIELDS);
        let response = self.http_client.get(&url).send().await?;

        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            Err(CountriesMcpError::Api(CountriesApiError::RequestFailed {
                message: format!("Failed to fetch region rows ({}): {}", status, text),
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> CountriesClient {
        CountriesClient::new(&Config::with_base_url("https://restcountries.com/"))
    }

    #[test]
    fn test_all_url_joins_fields() {
        let client = test_client();
        assert_eq!(
            client.all_url(&["name", "region"]),
            "https://restcountries.com/v3.1/all?fields=name,region"
        );
    }

    #[test]
    fn test_name_url() {
        let client = test_client();
        assert_eq!(
            client.name_url("france"),
            "https://restcountries.com/v3.1/name/france"
        );
    }

    #[test]
    fn test_trailing_slash_stripped() {
        let client = CountriesClient::new(&Config::with_base_url("http://localhost:8080///"));
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_an_error() {
        // Port 9 (discard) is not listening; the connection fails fast
        let client = CountriesClient::new(&Config::with_base_url("http://127.0.0.1:9"));
        let result = client.fetch_all().await;
        assert!(result.is_err());
    }
}
