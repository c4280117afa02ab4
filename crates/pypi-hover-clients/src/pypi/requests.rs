use async_trait::async_trait;
use tracing::debug;

use crate::shared::{RequestError, RequestResult};

use super::consts::{BASE_URL_REGISTRY, REQUEST_TIMEOUT};
use super::models::RegistryMetadata;

/**
    A remote source of raw package metadata.

    One call maps to one remote request - no caching,
    no retries, no rate limiting at this layer.
*/
#[async_trait]
pub trait MetadataSource: std::fmt::Debug + Send + Sync {
    async fn fetch(&self, name: &str) -> RequestResult<RegistryMetadata>;
}

/// Metadata source backed by the `PyPI` JSON registry over HTTP.
#[derive(Debug, Clone)]
pub struct HttpMetadataSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpMetadataSource {
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL_REGISTRY)
    }

    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("pypi-hover/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

impl Default for HttpMetadataSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MetadataSource for HttpMetadataSource {
    async fn fetch(&self, name: &str) -> RequestResult<RegistryMetadata> {
        let url = format!("{}/{name}/json", self.base_url);

        debug!("Fetching PyPI registry metadata for '{name}'");

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RequestError::Status { status, url });
        }

        let text = response.text().await?;

        Ok(RegistryMetadata::try_from_json(&text)?)
    }
}
