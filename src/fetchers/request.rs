use crate::config::EnrichmentConfig;
use crate::error::GuideError;
use log::{debug, warn};
use reqwest::header::HeaderMap;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::time::sleep;

/// HTTP client shared by the image search and downloads.
///
/// A 429 answer is retried once after `rate_limit_wait`.
pub struct RequestFetcher {
    client: Client,
    rate_limit_wait: Duration,
}

impl RequestFetcher {
    pub fn new(config: &EnrichmentConfig) -> Result<Self, GuideError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            rate_limit_wait: Duration::from_secs(config.rate_limit_wait_secs),
        })
    }

    async fn get(
        &self,
        url: &str,
        query: &[(&str, &str)],
        headers: &HeaderMap,
    ) -> Result<Response, GuideError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            debug!("GET {} (attempt {})", url, attempt);

            let response = self
                .client
                .get(url)
                .query(query)
                .headers(headers.clone())
                .send()
                .await?;

            let status = response.status();
            if status == StatusCode::TOO_MANY_REQUESTS {
                if attempt > 1 {
                    return Err(GuideError::RateLimited(url.to_string()));
                }
                warn!(
                    "Rate limited by {}, waiting {:?} before retrying",
                    url, self.rate_limit_wait
                );
                sleep(self.rate_limit_wait).await;
                continue;
            }

            if !status.is_success() {
                return Err(GuideError::HttpStatus {
                    status: status.as_u16(),
                    url: url.to_string(),
                });
            }

            return Ok(response);
        }
    }

    /// GET a JSON document
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, GuideError> {
        let response = self.get(url, query, &HeaderMap::new()).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// GET a binary body
    pub async fn get_bytes(&self, url: &str, headers: &HeaderMap) -> Result<Vec<u8>, GuideError> {
        let response = self.get(url, &[], headers).await?;
        Ok(response.bytes().await?.to_vec())
    }
}
