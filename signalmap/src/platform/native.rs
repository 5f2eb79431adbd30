//! Platform specific stuff for native targets.

use async_trait::async_trait;
use bytes::Bytes;
use log::info;

use crate::error::SignalMapError;
use crate::platform::PlatformService;

/// Platform service for native targets, loading data with `reqwest`.
#[derive(Debug, Clone)]
pub struct NativePlatformService {
    http_client: reqwest::Client,
}

#[async_trait]
impl PlatformService for NativePlatformService {
    fn new() -> Self {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("signalmap/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|err| {
                log::warn!("Failed to configure HTTP client, using defaults: {err}");
                reqwest::Client::new()
            });

        Self { http_client }
    }

    async fn load_bytes_from_url(&self, url: &str) -> Result<Bytes, SignalMapError> {
        let response = self.http_client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            info!("Failed to load {url}: {status}");
            return Err(SignalMapError::HttpStatus(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        info!("Loaded {} bytes from {url}", bytes.len());

        Ok(bytes)
    }
}
