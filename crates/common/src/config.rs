use crate::chain_params::Network;
use crate::error::{ConfigError, ConfigResult};
use crate::types::{Currency, MarketSourceKind};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// CoinGecko's endpoint for B1T data, trimmed for bandwidth
/// (no localisation, tickers, community data, developer data or sparklines)
pub const COINGECKO_ENDPOINT: &str = "https://api.coingecko.com/api/v3/coins/ai-power-grid?localization=false&tickers=false&market_data=true&community_data=false&developer_data=false&sparkline=false";

/// B1T Explorer's price endpoint
pub const B1T_EXPLORER_ENDPOINT: &str = "https://b1texplorer.com/ext/getprice";

const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 60;
const MAX_DISPLAY_DECIMALS: u32 = 8;

/// Top-level application configuration, read from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub network: Network,
    pub market: MarketConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    pub source: MarketSourceKind,
    pub coingecko_endpoint: String,
    pub b1t_explorer_endpoint: String,
    pub refresh_interval_secs: u64,
    /// Unset leaves the HTTP client's own defaults in place
    pub request_timeout_secs: Option<u64>,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            source: MarketSourceKind::default(),
            coingecko_endpoint: COINGECKO_ENDPOINT.to_string(),
            b1t_explorer_endpoint: B1T_EXPLORER_ENDPOINT.to_string(),
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            request_timeout_secs: None,
        }
    }
}

impl MarketConfig {
    pub fn endpoint_for(&self, kind: MarketSourceKind) -> &str {
        match kind {
            MarketSourceKind::Coingecko => &self.coingecko_endpoint,
            MarketSourceKind::B1tExplorer => &self.b1t_explorer_endpoint,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub currency: Currency,
    pub decimals: u32,
    pub advanced_mode: bool,
    pub auto_lock_wallet: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: Currency::new("usd"),
            decimals: 2,
            advanced_mode: false,
            auto_lock_wallet: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> ConfigResult<Self> {
        let config: AppConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.market.refresh_interval_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "market.refresh_interval_secs",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.market.request_timeout_secs == Some(0) {
            return Err(ConfigError::Invalid {
                field: "market.request_timeout_secs",
                reason: "must be greater than zero when set".to_string(),
            });
        }
        if self.display.decimals > MAX_DISPLAY_DECIMALS {
            return Err(ConfigError::Invalid {
                field: "display.decimals",
                reason: format!("at most {} decimals are supported", MAX_DISPLAY_DECIMALS),
            });
        }
        for (field, endpoint) in [
            ("market.coingecko_endpoint", &self.market.coingecko_endpoint),
            ("market.b1t_explorer_endpoint", &self.market.b1t_explorer_endpoint),
        ] {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("not an http(s) URL: {}", endpoint),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.network, Network::Mainnet);
        assert_eq!(config.market.source, MarketSourceKind::Coingecko);
        assert_eq!(config.market.coingecko_endpoint, COINGECKO_ENDPOINT);
        assert_eq!(config.market.request_timeout_secs, None);
        assert_eq!(config.display.currency, Currency::new("usd"));
    }

    #[test]
    fn test_partial_config_overrides() {
        let raw = r#"
            network = "testnet"

            [market]
            source = "b1t-explorer"
            refresh_interval_secs = 15

            [display]
            currency = "USDT"
            decimals = 4
        "#;
        let config = AppConfig::from_toml_str(raw).unwrap();
        assert_eq!(config.network, Network::Testnet);
        assert_eq!(config.market.source, MarketSourceKind::B1tExplorer);
        assert_eq!(config.market.refresh_interval_secs, 15);
        assert_eq!(config.market.endpoint_for(MarketSourceKind::B1tExplorer), B1T_EXPLORER_ENDPOINT);
        assert_eq!(config.display.currency, Currency::new("USDT"));
        assert_eq!(config.display.decimals, 4);
        assert!(!config.display.advanced_mode);
    }

    #[test]
    fn test_rejects_zero_interval() {
        let err = AppConfig::from_toml_str("[market]\nrefresh_interval_secs = 0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { field: "market.refresh_interval_secs", .. }
        ));
    }

    #[test]
    fn test_rejects_non_http_endpoint() {
        let err = AppConfig::from_toml_str("[market]\ncoingecko_endpoint = \"ftp://x\"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = AppConfig::from_toml_str("network = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
