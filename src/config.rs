use anyhow::{Context, Result};
use reqwest::Url;

/// Listings endpoint used when `PROPERTY_API_URL` is not set
pub const DEFAULT_RESOURCE_URL: &str =
    "https://68b826bcb715405043274639.mockapi.io/api/properties/PropertyListing";

/// Where the listings live
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    resource_url: Url,
}

impl ApiConfig {
    pub fn new(resource_url: &str) -> Result<Self> {
        let resource_url = Url::parse(resource_url)
            .with_context(|| format!("Invalid listings URL: {resource_url}"))?;

        if resource_url.cannot_be_a_base() {
            anyhow::bail!("Listings URL cannot carry a path: {resource_url}");
        }

        Ok(Self { resource_url })
    }

    pub fn resource_url(&self) -> &Url {
        &self.resource_url
    }

    /// Read `PROPERTY_API_URL`, falling back to the public demo endpoint
    pub fn from_env() -> Result<Self> {
        let url = std::env::var("PROPERTY_API_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_RESOURCE_URL.to_string());

        Self::new(url.trim())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            resource_url: Url::parse(DEFAULT_RESOURCE_URL)
                .expect("default listings URL is valid"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_urls() {
        let config = ApiConfig::new("http://127.0.0.1:8080/api/listings").unwrap();
        assert_eq!(config.resource_url().path(), "/api/listings");
    }

    #[test]
    fn rejects_garbage() {
        assert!(ApiConfig::new("not a url").is_err());
        assert!(ApiConfig::new("mailto:someone@example.com").is_err());
    }

    #[test]
    fn default_points_at_demo_endpoint() {
        assert_eq!(ApiConfig::default().resource_url().as_str(), DEFAULT_RESOURCE_URL);
    }
}
