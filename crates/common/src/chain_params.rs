//! Per-network consensus and endpoint parameters.
//!
//! Field names follow `chainparams.cpp` of BTC-derived coins so values can be
//! cross-checked against the node sources.

use crate::types::COIN;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named HTTP endpoint (explorer or node)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkEndpoint {
    pub name: &'static str,
    pub url: &'static str,
}

/// Network upgrade activation heights. `None` means not scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsensusUpgrades {
    pub upgrade_v6_0: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    #[serde(alias = "main")]
    Mainnet,
    #[serde(alias = "test")]
    Testnet,
}

impl Network {
    pub fn params(&self) -> &'static ChainParams {
        ChainParams::for_network(*self)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.params().name)
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" | "main" => Ok(Network::Mainnet),
            "testnet" | "test" => Ok(Network::Testnet),
            other => Err(format!("unknown network: {}", other)),
        }
    }
}

/// Immutable chain configuration for one network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainParams {
    pub name: &'static str,
    pub collateral_in_sats: u64,
    pub is_testnet: bool,
    pub ticker: &'static str,
    pub pubkey_prefix: &'static [&'static str],
    pub staking_prefix: &'static str,
    pub pubkey_address: u8,
    pub staking_address: u8,
    pub secret_key: u8,
    pub bip44_type: u32,
    pub bip44_type_ledger: u32,
    pub protocol_version: u32,
    pub masternode_port: u16,
    /// Trusted Blockbook-compatible explorers
    pub explorers: &'static [NetworkEndpoint],
    pub nodes: &'static [NetworkEndpoint],
    pub consensus: ConsensusUpgrades,
    pub coinbase_maturity: u32,
    pub budget_cycle_blocks: u32,
    pub proposal_fee: u64,
    pub proposal_fee_confirm_requirement: u32,
    pub max_payment_cycles: u32,
    pub max_payment: u64,
    pub default_cold_staking_address: &'static str,
}

pub static MAINNET: ChainParams = ChainParams {
    name: "mainnet",
    collateral_in_sats: 10_000 * COIN,
    is_testnet: false,
    ticker: "B1T",
    pubkey_prefix: &["B"],
    staking_prefix: "B",
    pubkey_address: 25,
    staking_address: 25,
    secret_key: 158,
    bip44_type: 3141,
    bip44_type_ledger: 77,
    protocol_version: 70016,
    masternode_port: 33317,
    explorers: &[NetworkEndpoint {
        name: "B1T BlockBook",
        url: "https://blockbook.b1tcore.org",
    }],
    nodes: &[
        NetworkEndpoint {
            name: "B1T 1",
            url: "https://seed1.followthebit.org",
        },
        NetworkEndpoint {
            name: "B1T 2",
            url: "https://seed1.followthebit.org",
        },
    ],
    consensus: ConsensusUpgrades { upgrade_v6_0: None },
    coinbase_maturity: 100,
    budget_cycle_blocks: 43_200,
    proposal_fee: 50 * COIN,
    proposal_fee_confirm_requirement: 6,
    max_payment_cycles: 6,
    // 43200 blocks of 10 B1T
    max_payment: 10 * 43_200 * COIN,
    // Labs Cold Pool
    default_cold_staking_address: "BdgQDpS8jDRJDX8yK8m9KnTMarsE84zdsy",
};

pub static TESTNET: ChainParams = ChainParams {
    name: "testnet",
    collateral_in_sats: 10_000 * COIN,
    is_testnet: true,
    ticker: "tB1T",
    pubkey_prefix: &["b", "b"],
    staking_prefix: "b",
    pubkey_address: 65,
    staking_address: 65,
    secret_key: 196,
    bip44_type: 1,
    bip44_type_ledger: 1,
    protocol_version: 70016,
    masternode_port: 44417,
    explorers: &[NetworkEndpoint {
        name: "B1T Blockbook",
        url: "https://blockbook.b1tcore.org",
    }],
    nodes: &[
        NetworkEndpoint {
            name: "B1T Test1",
            url: "https://seed1.followthebit.org",
        },
        NetworkEndpoint {
            name: "B1T Test2",
            url: "https://seed2.followthebit.org",
        },
    ],
    consensus: ConsensusUpgrades { upgrade_v6_0: None },
    coinbase_maturity: 15,
    budget_cycle_blocks: 144,
    proposal_fee: 50 * COIN,
    proposal_fee_confirm_requirement: 3,
    max_payment_cycles: 20,
    // 144 blocks of 10 tB1T
    max_payment: 10 * 144 * COIN,
    default_cold_staking_address: "bmNziUEPyhnUkiVdfsiNX93H6rSJnios44",
};

impl ChainParams {
    pub fn for_network(network: Network) -> &'static ChainParams {
        match network {
            Network::Mainnet => &MAINNET,
            Network::Testnet => &TESTNET,
        }
    }

    /// Whether an address string carries one of this network's public key prefixes
    pub fn has_pubkey_prefix(&self, address: &str) -> bool {
        self.pubkey_prefix
            .iter()
            .any(|prefix| address.starts_with(prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_selects_matching_params() {
        assert_eq!(Network::Mainnet.params().ticker, "B1T");
        assert_eq!(Network::Testnet.params().ticker, "tB1T");
        assert!(!MAINNET.is_testnet);
        assert!(TESTNET.is_testnet);
    }

    #[test]
    fn test_budget_constants() {
        assert_eq!(MAINNET.max_payment, 10 * MAINNET.budget_cycle_blocks as u64 * COIN);
        assert_eq!(TESTNET.max_payment, 10 * TESTNET.budget_cycle_blocks as u64 * COIN);
        assert_eq!(MAINNET.proposal_fee, 50 * COIN);
    }

    #[test]
    fn test_default_cold_staking_address_matches_prefix() {
        assert!(MAINNET.has_pubkey_prefix(MAINNET.default_cold_staking_address));
        assert!(TESTNET.has_pubkey_prefix(TESTNET.default_cold_staking_address));
    }

    #[test]
    fn test_network_parsing() {
        assert_eq!("main".parse(), Ok(Network::Mainnet));
        assert_eq!("TESTNET".parse(), Ok(Network::Testnet));
        assert!("regtest".parse::<Network>().is_err());
        assert_eq!(Network::Testnet.to_string(), "testnet");
    }
}
