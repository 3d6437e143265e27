use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of decimal places of one coin
pub const COIN_DECIMALS: u32 = 8;
/// Satoshis per coin
pub const COIN: u64 = 100_000_000;
/// `<network_byte> <32 byte payload> <0x01> <4 byte checksum>`
pub const PRIVKEY_BYTE_LENGTH: usize = 38;
/// Largest run of unused derived addresses before an account search stops
pub const MAX_ACCOUNT_GAP: u32 = 20;
/// Minimum length of a new encryption password
pub const MIN_PASS_LENGTH: usize = 6;
/// BIP21 URI scheme
pub const BIP21_PREFIX: &str = "b1t";

/// A display currency code, such as `usd` or `USDT`.
///
/// The original spelling is kept: provider-keyed lookups are case-sensitive,
/// while fixed-set providers compare with [`Currency::eq_ignore_case`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn eq_ignore_case(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }

    pub fn to_lowercase(&self) -> Currency {
        Currency(self.0.to_ascii_lowercase())
    }

    pub fn to_uppercase(&self) -> Currency {
        Currency(self.0.to_ascii_uppercase())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Currency {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s.trim()))
    }
}

impl From<&str> for Currency {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for Currency {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl AsRef<str> for Currency {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Which market data provider the wallet reads prices from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarketSourceKind {
    #[default]
    #[serde(alias = "coin-gecko")]
    Coingecko,
    #[serde(alias = "b1texplorer")]
    B1tExplorer,
}

impl MarketSourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketSourceKind::Coingecko => "coingecko",
            MarketSourceKind::B1tExplorer => "b1t-explorer",
        }
    }
}

impl fmt::Display for MarketSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarketSourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "coingecko" | "coin-gecko" => Ok(MarketSourceKind::Coingecko),
            "b1t-explorer" | "b1texplorer" | "explorer" => Ok(MarketSourceKind::B1tExplorer),
            other => Err(format!("unknown market source: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_keeps_original_spelling() {
        let currency = Currency::new("Usd");
        assert_eq!(currency.as_str(), "Usd");
        assert_ne!(currency, Currency::new("usd"));
        assert!(currency.eq_ignore_case("USD"));
        assert_eq!(currency.to_lowercase(), Currency::new("usd"));
    }

    #[test]
    fn test_market_source_kind_parsing() {
        assert_eq!("CoinGecko".parse(), Ok(MarketSourceKind::Coingecko));
        assert_eq!("b1t-explorer".parse(), Ok(MarketSourceKind::B1tExplorer));
        assert!("kraken".parse::<MarketSourceKind>().is_err());
    }

    #[test]
    fn test_coin_matches_decimals() {
        assert_eq!(COIN, 10u64.pow(COIN_DECIMALS));
    }
}
