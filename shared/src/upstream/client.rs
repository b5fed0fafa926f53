//! HTTP client for the public pharmacy duty-roster API.
//!
//! Wraps `reqwest` with the upstream's query conventions: the service key and
//! the three lookup parameters are sent as query parameters next to fixed
//! pagination (`pageNo=1`, `numOfRows=<configured>`).

use async_trait::async_trait;
use log::{debug, info};
use reqwest::{Client, Url};

use crate::config::{ServiceKey, UpstreamConfig};
use crate::error::UpstreamError;
use crate::models::LookupRequest;
use crate::upstream::PharmacySource;

const SERVICE_KEY_PARAM: &str = "serviceKey";
const FIRST_PAGE: &str = "1";

/// Client for the upstream pharmacy API.
///
/// Holds a shared `reqwest::Client`, so cloning is cheap and connections are
/// reused across requests served by the same process.
#[derive(Debug, Clone)]
pub struct PharmacyApiClient {
    client: Client,
    base_url: Url,
    num_of_rows: u32,
}

impl PharmacyApiClient {
    pub fn new(config: &UpstreamConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &UpstreamConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            num_of_rows: config.num_of_rows,
        }
    }

    /// Builds the outbound URL with percent-encoded query parameters.
    pub fn build_url(&self, service_key: &ServiceKey, request: &LookupRequest) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair(SERVICE_KEY_PARAM, service_key.expose());
            pairs.append_pair("Q0", &request.region);
            pairs.append_pair("Q1", &request.sub_region);
            pairs.append_pair("DG", &request.weekday);
            pairs.append_pair("pageNo", FIRST_PAGE);
            pairs.append_pair("numOfRows", &self.num_of_rows.to_string());
        }
        url
    }
}

/// Renders `url` for logs with the service key replaced by its placeholder.
pub fn masked_url(url: &Url, service_key: &ServiceKey) -> String {
    let mut masked = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(name, value)| {
            if name == SERVICE_KEY_PARAM {
                (name.into_owned(), service_key.to_string())
            } else {
                (name.into_owned(), value.into_owned())
            }
        })
        .collect();
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}

#[async_trait]
impl PharmacySource for PharmacyApiClient {
    async fn fetch(
        &self,
        service_key: &ServiceKey,
        request: &LookupRequest,
    ) -> Result<String, UpstreamError> {
        let url = self.build_url(service_key, request);
        info!("Calling upstream: {}", masked_url(&url, service_key));

        let response = self.client.get(url).send().await?;
        let status = response.status();
        info!("Upstream responded: status={}", status);

        let body = response.text().await?;
        debug!("Upstream body size: {} bytes", body.len());

        if status.is_success() {
            Ok(body)
        } else {
            Err(UpstreamError::Status {
                status: status.as_u16(),
                body: if body.trim().is_empty() { None } else { Some(body) },
            })
        }
    }
}
