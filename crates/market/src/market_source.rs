use crate::b1t_explorer::B1tExplorerSource;
use crate::cache::CacheEntry;
use crate::coingecko::CoinGeckoSource;
use crate::source::{FetchOutcome, PriceSource};
use crate::transport::HttpTransport;
use async_trait::async_trait;
use b1t_common::{Currency, MarketConfig, MarketSourceKind};
use std::sync::Arc;

/// The closed set of market data providers the wallet can read from
#[derive(Debug)]
pub enum MarketSource {
    CoinGecko(CoinGeckoSource),
    B1tExplorer(B1tExplorerSource),
}

impl MarketSource {
    /// Build the provider of `kind` against the configured endpoint
    pub fn from_config(
        kind: MarketSourceKind,
        config: &MarketConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let endpoint = config.endpoint_for(kind).to_string();
        match kind {
            MarketSourceKind::Coingecko => {
                MarketSource::CoinGecko(CoinGeckoSource::with_endpoint(endpoint, transport))
            }
            MarketSourceKind::B1tExplorer => {
                MarketSource::B1tExplorer(B1tExplorerSource::with_endpoint(endpoint, transport))
            }
        }
    }

    pub fn kind(&self) -> MarketSourceKind {
        match self {
            MarketSource::CoinGecko(_) => MarketSourceKind::Coingecko,
            MarketSource::B1tExplorer(_) => MarketSourceKind::B1tExplorer,
        }
    }

    fn inner(&self) -> &dyn PriceSource {
        match self {
            MarketSource::CoinGecko(source) => source,
            MarketSource::B1tExplorer(source) => source,
        }
    }
}

impl From<CoinGeckoSource> for MarketSource {
    fn from(source: CoinGeckoSource) -> Self {
        MarketSource::CoinGecko(source)
    }
}

impl From<B1tExplorerSource> for MarketSource {
    fn from(source: B1tExplorerSource) -> Self {
        MarketSource::B1tExplorer(source)
    }
}

#[async_trait]
impl PriceSource for MarketSource {
    fn name(&self) -> &str {
        self.inner().name()
    }

    fn endpoint(&self) -> &str {
        self.inner().endpoint()
    }

    async fn ensure_cache_exists(&self) {
        self.inner().ensure_cache_exists().await
    }

    async fn fetch(&self) -> FetchOutcome {
        self.inner().fetch().await
    }

    async fn get_price(&self, currency: &Currency) -> f64 {
        self.inner().get_price(currency).await
    }

    async fn get_currencies(&self) -> Vec<Currency> {
        self.inner().get_currencies().await
    }

    async fn cached(&self) -> Option<CacheEntry> {
        self.inner().cached().await
    }
}
