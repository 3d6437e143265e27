use crate::cache::RawPayload;
use crate::error::{MarketError, MarketResult};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("b1t-wallet/", env!("CARGO_PKG_VERSION"));

/// GET a JSON document from a fixed endpoint
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get_json(&self, endpoint: &str) -> MarketResult<RawPayload>;
}

/// reqwest-backed transport. No auth, no request body.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// `timeout` of `None` keeps reqwest's defaults (no overall timeout)
    pub fn new(timeout: Option<Duration>) -> MarketResult<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(MarketError::Client)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get_json(&self, endpoint: &str) -> MarketResult<RawPayload> {
        debug!("🌐 GET {}", endpoint);

        let response = self
            .client
            .get(endpoint)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| MarketError::Request {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| MarketError::Request {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let value = serde_json::from_slice(&body).map_err(|source| MarketError::Parse {
            endpoint: endpoint.to_string(),
            source,
        })?;

        Ok(RawPayload::new(value))
    }
}
