use futures::Stream;
use futures::TryStreamExt;
use reqwest::{Client, Response};
use thiserror::Error;
use tracing::{debug, warn};

use super::models::{ApiConfig, Manifest, SiteInfo};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("siteInfo not found")]
    SiteInfoNotFound,
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Clone)]
pub struct ApiClient {
    config: ApiConfig,
    client: Client,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { config, client })
    }

    pub fn cache_url(&self, site: &SiteInfo) -> String {
        format!("{}://{}/cache/{}", self.config.scheme, site.host, site.uid)
    }

    pub fn access_url(&self, site: &SiteInfo, key: &str) -> String {
        format!(
            "{}://{}/access/{}/{}",
            self.config.scheme, site.host, site.uid, key
        )
    }

    async fn get(&self, url: &str) -> Result<Response> {
        debug!(url, "GET");
        let response = self.client.get(url).send().await?;

        // Status is not an error here; callers get whatever body came back
        if !response.status().is_success() {
            warn!(url, status = %response.status(), "non-success response");
        }

        Ok(response)
    }

    /// Fetch `url` and return the whole body as text, whatever the status code.
    pub async fn fetch_page(&self, url: &str) -> Result<String> {
        let body = self.get(url).await?.text().await?;
        Ok(body)
    }

    /// Fetch and decode the file manifest for `site`.
    pub async fn fetch_manifest(&self, site: &SiteInfo) -> Result<Manifest> {
        let url = self.cache_url(site);
        let body = self.get(&url).await?.bytes().await?;

        serde_json::from_slice(&body)
            .map_err(|e| ApiError::InvalidResponse(format!("JSON decode error: {}", e)))
    }

    /// Open the body of `key` as a stream of chunks.
    pub async fn download_file_stream(
        &self,
        site: &SiteInfo,
        key: &str,
    ) -> Result<(Option<u64>, impl Stream<Item = Result<bytes::Bytes>>)> {
        let url = self.access_url(site, key);
        let response = self.get(&url).await?;

        let total_size = response.content_length();
        let stream = response.bytes_stream().map_err(ApiError::RequestError);

        Ok((total_size, stream))
    }
}
