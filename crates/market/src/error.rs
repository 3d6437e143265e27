use thiserror::Error;

/// Failures inside a market source. These never leave the adapter boundary:
/// `fetch` logs them and reports `FetchOutcome::Retained` instead.
#[derive(Debug, Error)]
pub enum MarketError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned error status {status}")]
    Status { endpoint: String, status: u16 },

    #[error("failed to parse response from {endpoint}: {source}")]
    Parse {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{endpoint} returned an empty document")]
    EmptyPayload { endpoint: String },

    #[error("transport error: {0}")]
    Transport(String),
}

pub type MarketResult<T> = std::result::Result<T, MarketError>;
