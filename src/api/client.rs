use crate::api::fallback::{fallback_properties, find_fallback};
use crate::api::traits::PropertySource;
use crate::config::ApiConfig;
use crate::error::FetchError;
use crate::models::Property;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the listings endpoint.
///
/// Every call goes to the network; nothing is cached between calls and
/// failed requests are not retried.
#[derive(Debug, Clone)]
pub struct PropertyApi {
    client: Client,
    config: ApiConfig,
}

impl PropertyApi {
    /// Create a client for the endpoint named by the environment
    pub fn new() -> Result<Self> {
        Self::with_config(ApiConfig::from_env()?)
    }

    /// Create a client for a specific endpoint
    pub fn with_config(config: ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    pub fn resource_url(&self) -> &Url {
        self.config.resource_url()
    }

    fn item_url(&self, id: &str) -> Result<Url, FetchError> {
        let mut url = self.resource_url().clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::BadUrl {
                url: self.resource_url().to_string(),
                id: id.to_string(),
            })?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        debug!("Fetching URL: {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status(),
            });
        }

        response.json::<T>().await.map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }

    async fn fetch_listings(&self) -> Result<Vec<Property>, FetchError> {
        let records = self
            .fetch_json::<Vec<Value>>(self.resource_url().clone())
            .await?;
        Ok(decode_listings(records))
    }

    async fn fetch_property(&self, id: &str) -> Result<Property, FetchError> {
        let url = self.item_url(id)?;
        self.fetch_json(url).await
    }
}

/// Decode each record on its own so one malformed listing does not cost
/// the rest of the page.
fn decode_listings(records: Vec<Value>) -> Vec<Property> {
    let total = records.len();
    let properties: Vec<Property> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value::<Property>(record) {
            Ok(property) => Some(property),
            Err(e) => {
                warn!("Skipping listing #{}: {}", index, e);
                None
            }
        })
        .collect();

    if properties.len() < total {
        debug!("Decoded {} of {} listings", properties.len(), total);
    }
    properties
}

#[async_trait]
impl PropertySource for PropertyApi {
    async fn fetch_all(&self) -> Vec<Property> {
        match self.fetch_listings().await {
            Ok(properties) => {
                info!("Fetched {} properties from {}", properties.len(), self.source_name());
                properties
            }
            Err(e) => {
                warn!("Error fetching properties: {}", e);
                info!("Using fallback listings instead");
                fallback_properties()
            }
        }
    }

    async fn fetch_one(&self, id: &str) -> Option<Property> {
        match self.fetch_property(id).await {
            Ok(property) => Some(property),
            Err(e) => {
                warn!("Error fetching property {}: {}", id, e);
                find_fallback(id)
            }
        }
    }

    fn source_name(&self) -> &'static str {
        "listings API"
    }
}
