//! Market price sources for the B1T wallet.
//!
//! Each provider adapter turns one external price API into the
//! [`PriceSource`] contract. Adapters cache the last good response and never
//! fail their callers: network and parse errors are logged and surface only
//! as [`FetchOutcome::Retained`], zero prices and empty currency lists.

pub mod b1t_explorer;
pub mod cache;
pub mod coingecko;
pub mod display;
pub mod error;
pub mod market_source;
pub mod selection;
pub mod source;
pub mod transport;

pub use b1t_explorer::B1tExplorerSource;
pub use cache::{CacheEntry, PriceCache, RawPayload};
pub use coingecko::CoinGeckoSource;
pub use error::{MarketError, MarketResult};
pub use market_source::MarketSource;
pub use selection::MarketSelection;
pub use source::{FetchOutcome, PriceSource, SourceCore};
pub use transport::{HttpTransport, ReqwestTransport};
