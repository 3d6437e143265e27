use crate::cache::{CacheEntry, PriceCache, RawPayload};
use crate::error::{MarketError, MarketResult};
use crate::transport::HttpTransport;
use async_trait::async_trait;
use b1t_common::Currency;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of one fetch attempt
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The endpoint answered and the payload replaced the cache
    Updated(RawPayload),
    /// The fetch failed; whatever was cached before is still there
    Retained,
}

impl FetchOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, FetchOutcome::Updated(_))
    }

    pub fn payload(&self) -> Option<&RawPayload> {
        match self {
            FetchOutcome::Updated(payload) => Some(payload),
            FetchOutcome::Retained => None,
        }
    }
}

/// Price query contract shared by every market data provider.
///
/// None of these calls fail. A missing price is `0.0`, a missing currency
/// list is empty, and a failed fetch is `FetchOutcome::Retained`.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Display name of the provider
    fn name(&self) -> &str;

    fn endpoint(&self) -> &str;

    /// Fetch once if nothing is cached yet, otherwise do nothing.
    ///
    /// Concurrent callers are not coalesced: two callers that both see an
    /// empty cache both fetch, and the later write wins.
    async fn ensure_cache_exists(&self);

    /// Fetch from the endpoint and replace the cache on success
    async fn fetch(&self) -> FetchOutcome;

    /// Price of one coin in `currency`, `0.0` when unknown
    async fn get_price(&self, currency: &Currency) -> f64;

    /// Currencies this provider can price
    async fn get_currencies(&self) -> Vec<Currency>;

    /// Current cache entry, without triggering a fetch
    async fn cached(&self) -> Option<CacheEntry>;
}

/// Endpoint, cache and transport handling common to all providers
pub struct SourceCore {
    name: String,
    endpoint: String,
    cache: PriceCache,
    transport: Arc<dyn HttpTransport>,
}

impl SourceCore {
    pub fn new(
        name: impl Into<String>,
        endpoint: impl Into<String>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
            cache: PriceCache::new(),
            transport,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn cache(&self) -> &PriceCache {
        &self.cache
    }

    pub async fn ensure_cache_exists(&self) {
        if self.cache.is_empty().await {
            debug!("{}: no cached market data, fetching", self.name);
            self.fetch().await;
        }
    }

    pub async fn fetch(&self) -> FetchOutcome {
        match self.try_fetch().await {
            Ok(payload) => {
                self.cache.store(payload.clone()).await;
                info!("✅ {}: market data refreshed", self.name);
                FetchOutcome::Updated(payload)
            }
            Err(e) => {
                warn!("❌ {}: failed to fetch prices, keeping previous data: {}", self.name, e);
                FetchOutcome::Retained
            }
        }
    }

    /// Cached payload after making sure a fetch was at least attempted
    pub async fn payload(&self) -> Option<RawPayload> {
        self.ensure_cache_exists().await;
        self.cache.payload().await
    }

    async fn try_fetch(&self) -> MarketResult<RawPayload> {
        let payload = self.transport.get_json(&self.endpoint).await?;
        if payload.is_empty() {
            return Err(MarketError::EmptyPayload {
                endpoint: self.endpoint.clone(),
            });
        }
        Ok(payload)
    }
}

impl std::fmt::Debug for SourceCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceCore")
            .field("name", &self.name)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

/// Zero stands in for any price that is missing or unusable
pub(crate) fn price_or_zero(price: Option<f64>) -> f64 {
    price.filter(|p| p.is_finite()).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockHttpTransport;
    use mockall::predicate::eq;
    use serde_json::json;

    const ENDPOINT: &str = "https://prices.example/ticker";

    fn core_with(transport: MockHttpTransport) -> SourceCore {
        SourceCore::new("Test", ENDPOINT, Arc::new(transport))
    }

    #[tokio::test]
    async fn test_fetch_success_replaces_cache() {
        // Given
        let mut transport = MockHttpTransport::new();
        transport
            .expect_get_json()
            .with(eq(ENDPOINT))
            .times(1)
            .returning(|_| Ok(RawPayload::new(json!({ "price": 1.5 }))));
        let core = core_with(transport);

        // When
        let outcome = core.fetch().await;

        // Then
        assert!(outcome.is_updated());
        assert_eq!(
            core.cache().payload().await.unwrap().as_value(),
            &json!({ "price": 1.5 })
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_previous_cache() {
        // Given
        let mut transport = MockHttpTransport::new();
        let mut calls = 0;
        transport.expect_get_json().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Ok(RawPayload::new(json!({ "price": 2.0 })))
            } else {
                Err(MarketError::Transport("connection reset".to_string()))
            }
        });
        let core = core_with(transport);
        core.fetch().await;
        let before = core.cache().snapshot().await;

        // When
        let outcome = core.fetch().await;

        // Then
        assert_eq!(outcome, FetchOutcome::Retained);
        assert_eq!(core.cache().snapshot().await, before);
    }

    #[tokio::test]
    async fn test_empty_document_is_a_failure() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_get_json()
            .times(1)
            .returning(|_| Ok(RawPayload::new(json!({}))));
        let core = core_with(transport);

        assert_eq!(core.fetch().await, FetchOutcome::Retained);
        assert!(core.cache().is_empty().await);
    }

    #[tokio::test]
    async fn test_ensure_cache_exists_fetches_once() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_get_json()
            .times(1)
            .returning(|_| Ok(RawPayload::new(json!({ "price": 3.0 }))));
        let core = core_with(transport);

        core.ensure_cache_exists().await;
        core.ensure_cache_exists().await;

        assert!(!core.cache().is_empty().await);
    }

    #[tokio::test]
    async fn test_ensure_cache_exists_retries_after_failure() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_get_json()
            .times(2)
            .returning(|_| Err(MarketError::Transport("offline".to_string())));
        let core = core_with(transport);

        core.ensure_cache_exists().await;
        core.ensure_cache_exists().await;

        assert!(core.cache().is_empty().await);
    }

    #[test]
    fn test_price_or_zero() {
        assert_eq!(price_or_zero(Some(4.5)), 4.5);
        assert_eq!(price_or_zero(None), 0.0);
        assert_eq!(price_or_zero(Some(f64::NAN)), 0.0);
    }
}
