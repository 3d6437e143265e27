//! Common types and configuration shared across the B1T wallet market components

pub mod chain_params;
pub mod config;
pub mod error;
pub mod types;

pub use chain_params::{ChainParams, Network, NetworkEndpoint};
pub use config::{AppConfig, DisplayConfig, MarketConfig};
pub use error::*;
pub use types::*;
