use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::error::UpstreamError;
use crate::offer::OneWayResponse;

/// Fetches raw one-way offers for an origin/destination/date.
///
/// One network round trip per call, no pagination. The search core never
/// retries; retry policy, if any, lives behind the implementation.
#[async_trait]
pub trait OfferProvider: Send + Sync + 'static {
    async fn fetch_one_way(
        &self,
        origin: &str,
        destination: &str,
        date: &str,
    ) -> Result<OneWayResponse, UpstreamError>;
}

// Connection settings for the offer provider API. Passed in explicitly at
// construction instead of being read from ambient process state.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: String,
    pub username: String,
    pub password: String,
    pub timeout: Duration,
}

/// HTTP implementation of [`OfferProvider`] against the Mock Airlines API.
pub struct HttpOfferProvider {
    client: reqwest::Client,
    config: ProviderConfig,
}

impl HttpOfferProvider {
    pub fn new(config: ProviderConfig) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    fn endpoint(&self, origin: &str, destination: &str, date: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.api_key,
            origin,
            destination,
            date
        )
    }

    async fn request(&self, url: &str) -> Result<OneWayResponse, UpstreamError> {
        let response = self
            .client
            .get(url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status.as_u16()));
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl OfferProvider for HttpOfferProvider {
    async fn fetch_one_way(
        &self,
        origin: &str,
        destination: &str,
        date: &str,
    ) -> Result<OneWayResponse, UpstreamError> {
        let url = self.endpoint(origin, destination, date);
        let result = self.request(&url).await;
        if let Err(ref err) = result {
            warn!(%url, error = %err, "error fetching offers from provider");
        }
        result
    }
}
