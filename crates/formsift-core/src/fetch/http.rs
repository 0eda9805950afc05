//! HTTP(S) sources.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;
use url::Url;

use super::{Result, check_size};
use crate::error::FetchError;
use crate::models::config::FetchConfig;

/// Downloads documents over HTTP(S).
pub struct HttpFetcher {
    client: Client,
    max_bytes: usize,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.timeout_secs));

        let user_agent = config
            .user_agent
            .clone()
            .unwrap_or_else(|| format!("formsift/{}", env!("CARGO_PKG_VERSION")));
        builder = builder.user_agent(user_agent);

        Ok(Self {
            client: builder.build()?,
            max_bytes: config.max_bytes,
        })
    }

    pub async fn get(&self, url: Url) -> Result<Vec<u8>> {
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        if let Some(length) = response.content_length() {
            check_size(length as usize, self.max_bytes)?;
        }

        let bytes = response.bytes().await?;
        check_size(bytes.len(), self.max_bytes)?;

        debug!("Downloaded {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }
}
