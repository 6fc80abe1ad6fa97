use crate::config::ClientConfig;
use crate::core::client::ShipperClient;
use crate::domain::model::AccountTier;
use crate::domain::ports::{HttpMethod, RawResponse, RequestParams, Transport};
use crate::utils::error::{Result, ShipperError};
use crate::utils::validation::Validate;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://sandbox-api.shipper.id/";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
const CLIENT_USER_AGENT: &str = "Shipper/";

/// reqwest 實作的傳輸層，負責 URL、API key 與逾時
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    api_key: String,
    tier: AccountTier,
}

impl HttpTransport {
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        tier: AccountTier,
        timeout: Duration,
    ) -> Result<Self> {
        // Url::join 會取代最後一段路徑，所以補上結尾斜線
        let base_url = if base_url.ends_with('/') {
            Url::parse(base_url)?
        } else {
            Url::parse(&format!("{}/", base_url))?
        };

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
            tier,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(
            &config.base_url,
            config.api_key.clone(),
            config.account_tier()?,
            Duration::from_secs(config.timeout_seconds),
        )
    }

    pub fn path_prefix(tier: AccountTier) -> &'static str {
        match tier {
            AccountTier::Starter | AccountTier::Pro => "public/v1/",
            AccountTier::Basic => "basic/",
        }
    }

    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self
            .base_url
            .join(&format!("{}{}", Self::path_prefix(self.tier), path))?)
    }
}

impl ShipperClient<HttpTransport> {
    /// Builds a client over HTTP. An invalid config (unknown account type,
    /// empty key, zero timeout) fails here.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let tier = config.account_tier()?;
        Ok(ShipperClient::new(tier, HttpTransport::from_config(config)?))
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        path: &str,
        params: &RequestParams,
        method: HttpMethod,
    ) -> Result<RawResponse> {
        let url = self.endpoint(path)?;

        let mut query: Vec<(&str, &str)> = params.iter().collect();
        query.push(("apiKey", self.api_key.as_str()));

        let request = match method {
            HttpMethod::Get => self.client.get(url.clone()),
            HttpMethod::Post => self.client.post(url.clone()),
        };

        tracing::debug!("Making {} request to: {}", method, url);
        let response = request
            .query(&query)
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        let text = response.text().await?;
        if !status.is_success() {
            tracing::warn!("{} {} failed with HTTP {}", method, path, status.as_u16());
            return Err(ShipperError::HttpStatus {
                status: status.as_u16(),
                body: text,
            });
        }

        let body: serde_json::Value = serde_json::from_str(&text)?;
        Ok(RawResponse::new(status.as_u16(), body))
    }
}
