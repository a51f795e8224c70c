use std::{fmt, str::FromStr};

use alloy::primitives::{address, Address};
use eyre::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::constants::{CHAIN_ID_MAINNET, CHAIN_ID_MORDEN, CHAIN_ID_ROPSTEN};

/// A chain the dice contract can be queried on.
///
/// Every per-chain decision (contract deployment, chain id, display name) is an exhaustive
/// `match` on this enum, so adding a chain is a compile error until each of them is handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    /// Ethereum mainnet
    #[default]
    Mainnet,
    /// Morden testnet
    Morden,
    /// Ropsten testnet
    Ropsten,
}

impl Chain {
    /// Returns the EIP-155 chain id.
    ///
    /// ```
    /// use etheroll_common::ether::chain::Chain;
    ///
    /// assert_eq!(Chain::Ropsten.id(), 3);
    /// ```
    pub fn id(&self) -> u64 {
        match self {
            Chain::Mainnet => CHAIN_ID_MAINNET,
            Chain::Morden => CHAIN_ID_MORDEN,
            Chain::Ropsten => CHAIN_ID_ROPSTEN,
        }
    }

    /// Looks up a chain by its EIP-155 chain id.
    pub fn from_id(id: u64) -> Result<Self> {
        match id {
            CHAIN_ID_MAINNET => Ok(Chain::Mainnet),
            CHAIN_ID_MORDEN => Ok(Chain::Morden),
            CHAIN_ID_ROPSTEN => Ok(Chain::Ropsten),
            _ => bail!("unsupported chain id: {}", id),
        }
    }

    /// The lowercase name of the chain, as used in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            Chain::Mainnet => "mainnet",
            Chain::Morden => "morden",
            Chain::Ropsten => "ropsten",
        }
    }

    /// The address the dice contract is deployed at on this chain, if any.
    pub fn default_contract_address(&self) -> Option<Address> {
        match self {
            Chain::Mainnet => Some(address!("048717Ea892F23Fb0126F00640e2b18072efd9D2")),
            Chain::Ropsten => Some(address!("e12c6dEb59f37011d2D9FdeC77A6f1A8f3B8B1e8")),
            Chain::Morden => None,
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Chain {
    type Err = eyre::Report;

    /// Parses either a chain name (`mainnet`) or a chain id (`1`).
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "mainnet" | "ethereum" => Ok(Chain::Mainnet),
            "morden" => Ok(Chain::Morden),
            "ropsten" => Ok(Chain::Ropsten),
            other => match other.parse::<u64>() {
                Ok(id) => Chain::from_id(id),
                Err(_) => bail!("unknown chain: '{}'", other),
            },
        }
    }
}
