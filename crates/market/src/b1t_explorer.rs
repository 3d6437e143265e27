use crate::cache::CacheEntry;
use crate::source::{price_or_zero, FetchOutcome, PriceSource, SourceCore};
use crate::transport::HttpTransport;
use async_trait::async_trait;
use b1t_common::config::B1T_EXPLORER_ENDPOINT;
use b1t_common::Currency;
use std::sync::Arc;

pub const B1T_EXPLORER_NAME: &str = "B1T Explorer";

/// Currency code and the payload fields that may carry its price, in
/// priority order. Older explorer builds only report `lastPriceNumber`.
const PRICE_FIELDS: &[(&str, &[&str])] = &[
    ("USD", &["last_price_usd", "lastPriceNumber"]),
    ("USDT", &["last_price_usdt"]),
];

/// B1T Explorer price ticker: one flat object for a single trading pair,
/// answering for a fixed set of currencies matched case-insensitively.
#[derive(Debug)]
pub struct B1tExplorerSource {
    core: SourceCore,
}

impl B1tExplorerSource {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self::with_endpoint(B1T_EXPLORER_ENDPOINT, transport)
    }

    pub fn with_endpoint(endpoint: impl Into<String>, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            core: SourceCore::new(B1T_EXPLORER_NAME, endpoint, transport),
        }
    }

    fn fields_for(currency: &Currency) -> Option<&'static [&'static str]> {
        PRICE_FIELDS
            .iter()
            .find(|(code, _)| currency.eq_ignore_case(code))
            .map(|(_, fields)| *fields)
    }
}

#[async_trait]
impl PriceSource for B1tExplorerSource {
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
        let payload = self.core.payload().await;
        let price = payload.zip(Self::fields_for(currency)).and_then(|(payload, fields)| {
            fields.iter().find_map(|field| payload.field_f64(&[*field]))
        });
        price_or_zero(price)
    }

    async fn get_currencies(&self) -> Vec<Currency> {
        PRICE_FIELDS
            .iter()
            .map(|(code, _)| Currency::new(*code))
            .collect()
    }

    async fn cached(&self) -> Option<CacheEntry> {
        self.core.cache().snapshot().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::RawPayload;
    use crate::transport::MockHttpTransport;
    use serde_json::json;

    fn source_returning(body: serde_json::Value) -> B1tExplorerSource {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_get_json()
            .times(1)
            .returning(move |_| Ok(RawPayload::new(body.clone())));
        B1tExplorerSource::new(Arc::new(transport))
    }

    #[tokio::test]
    async fn test_last_price_number() {
        let source = source_returning(json!({ "lastPriceNumber": 4.5 }));

        assert_eq!(source.get_price(&Currency::new("USD")).await, 4.5);
        assert_eq!(source.get_price(&Currency::new("usd")).await, 4.5);
        assert_eq!(source.get_price(&Currency::new("eur")).await, 0.0);
    }

    #[tokio::test]
    async fn test_usd_and_usdt_fields() {
        let source = source_returning(json!({
            "last_price_usd": "0.0151",
            "last_price_usdt": 0.0149,
            "lastPriceNumber": 9.0
        }));

        assert_eq!(source.get_price(&Currency::new("Usd")).await, 0.0151);
        assert_eq!(source.get_price(&Currency::new("usdt")).await, 0.0149);
    }

    #[tokio::test]
    async fn test_missing_usdt_field_is_zero() {
        let source = source_returning(json!({ "last_price_usd": 0.02 }));

        assert_eq!(source.get_price(&Currency::new("USDT")).await, 0.0);
    }

    #[tokio::test]
    async fn test_currencies_are_static() {
        // No expectations: listing currencies must not hit the network
        let source = B1tExplorerSource::new(Arc::new(MockHttpTransport::new()));

        assert_eq!(
            source.get_currencies().await,
            vec![Currency::new("USD"), Currency::new("USDT")]
        );
        assert!(source.cached().await.is_none());
    }
}
