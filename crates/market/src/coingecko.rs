use crate::cache::CacheEntry;
use crate::source::{price_or_zero, FetchOutcome, PriceSource, SourceCore};
use crate::transport::HttpTransport;
use async_trait::async_trait;
use b1t_common::config::COINGECKO_ENDPOINT;
use b1t_common::Currency;
use std::sync::Arc;

pub const COINGECKO_NAME: &str = "CoinGecko";

/// `{ "market_data": { "current_price": { "<currency>": <price>, ... } } }`
const PRICE_MAP: [&str; 2] = ["market_data", "current_price"];

/// CoinGecko coin endpoint: a multi-currency aggregator.
///
/// Prices are keyed by CoinGecko's own currency codes (lowercase), and lookups
/// pass the caller's code through unchanged. The supported currency list is
/// whatever the last response contained.
#[derive(Debug)]
pub struct CoinGeckoSource {
    core: SourceCore,
}

impl CoinGeckoSource {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self::with_endpoint(COINGECKO_ENDPOINT, transport)
    }

    pub fn with_endpoint(endpoint: impl Into<String>, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            core: SourceCore::new(COINGECKO_NAME, endpoint, transport),
        }
    }
}

#[async_trait]
impl PriceSource for CoinGeckoSource {
    fn name(&self) -> &str {
        self.core.name()
    }

    fn endpoint(&self) -> &str {
        self.core.endpoint()
    }

    async fn ensure_cache_exists(&self) {
        self.core.ensure_cache_exists().await
    }

    async fn fetch(&self) -> FetchOutcome {
        self.core.fetch().await
    }

    async fn get_price(&self, currency: &Currency) -> f64 {
        let price = self.core.payload().await.and_then(|payload| {
            payload.field_f64(&[PRICE_MAP[0], PRICE_MAP[1], currency.as_str()])
        });
        price_or_zero(price)
    }

    async fn get_currencies(&self) -> Vec<Currency> {
        self.core
            .payload()
            .await
            .map(|payload| {
                payload
                    .keys_at(&PRICE_MAP)
                    .into_iter()
                    .map(Currency::from)
                    .collect()
            })
            .unwrap_or_default()
    }

    async fn cached(&self) -> Option<CacheEntry> {
        self.core.cache().snapshot().await
    }
}
