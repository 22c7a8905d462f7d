use std::time::Duration;

use basket_logging::basket_debug;
use futures_util::StreamExt;
use url::Url;

use crate::{FailureKind, GatewayError, ItemPrice};

#[derive(Debug, Clone)]
pub struct GatewaySettings {
    /// Scheme, host and port of the price API, e.g. `http://localhost:8000`.
    pub base_url: String,
    /// Absolute path of the search endpoint; the term goes in the `term` query parameter.
    pub search_path: String,
    pub compare_path: String,
    pub connect_timeout: Duration,
    /// Overall per-request deadline. `None` lets a request run until the server answers.
    pub request_timeout: Option<Duration>,
    pub max_bytes: u64,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            search_path: "/item-prices/".to_string(),
            compare_path: "/item-prices/".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

impl GatewaySettings {
    pub fn search_url(&self, term: &str) -> Result<Url, GatewayError> {
        let mut url = self.endpoint(&self.search_path)?;
        url.query_pairs_mut().append_pair("term", term);
        Ok(url)
    }

    pub fn compare_url(&self) -> Result<Url, GatewayError> {
        self.endpoint(&self.compare_path)
    }

    fn endpoint(&self, path: &str) -> Result<Url, GatewayError> {
        Url::parse(&self.base_url)
            .and_then(|base| base.join(path))
            .map_err(|err| GatewayError::new(FailureKind::InvalidUrl, err.to_string()))
    }
}

/// Read side of the remote price API.
#[async_trait::async_trait]
pub trait PriceGateway: Send + Sync {
    async fn search(&self, term: &str) -> Result<Vec<ItemPrice>, GatewayError>;

    async fn comparison(&self) -> Result<Vec<ItemPrice>, GatewayError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestGateway {
    settings: GatewaySettings,
    client: reqwest::Client,
}

impl ReqwestGateway {
    pub fn new(settings: GatewaySettings) -> Result<Self, GatewayError> {
        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| GatewayError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    async fn get_items(&self, url: Url) -> Result<Vec<ItemPrice>, GatewayError> {
        basket_debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            body.extend_from_slice(&chunk);
        }

        serde_json::from_slice(&body)
            .map_err(|err| GatewayError::new(FailureKind::Decode, err.to_string()))
    }
}

#[async_trait::async_trait]
impl PriceGateway for ReqwestGateway {
    async fn search(&self, term: &str) -> Result<Vec<ItemPrice>, GatewayError> {
        let url = self.settings.search_url(term)?;
        self.get_items(url).await
    }

    async fn comparison(&self) -> Result<Vec<ItemPrice>, GatewayError> {
        let url = self.settings.compare_url()?;
        self.get_items(url).await
    }
}

fn too_large(max_bytes: u64, actual: u64) -> GatewayError {
    GatewayError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        return GatewayError::new(FailureKind::Timeout, err.to_string());
    }
    GatewayError::new(FailureKind::Network, err.to_string())
}
