use crate::market_source::MarketSource;
use b1t_common::MarketSourceKind;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

/// The one market source the wallet currently reads prices from
#[derive(Debug)]
pub struct MarketSelection {
    current: RwLock<Arc<MarketSource>>,
}

impl MarketSelection {
    pub fn new(source: MarketSource) -> Self {
        Self {
            current: RwLock::new(Arc::new(source)),
        }
    }

    pub fn current(&self) -> Arc<MarketSource> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn kind(&self) -> MarketSourceKind {
        self.current().kind()
    }

    /// Make `source` the active provider and hand back the previous one.
    /// In-flight calls on the old provider finish against it.
    pub fn select(&self, source: MarketSource) -> Arc<MarketSource> {
        let next = Arc::new(source);
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        info!("Market source switched: {} -> {}", current.kind(), next.kind());
        std::mem::replace(&mut *current, next)
    }
}
