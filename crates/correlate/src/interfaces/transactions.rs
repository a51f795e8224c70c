use std::fmt::{self, Display};

use alloy::primitives::{B256, U256};
use chrono::{DateTime, Utc};
use etheroll_common::{ether::units::wei_to_ether, utils::time::format_datetime};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A transaction as returned by the block explorer's `txlist` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    /// The transaction hash.
    pub hash: String,
    /// The sender.
    #[serde(default)]
    pub from: String,
    /// The recipient, empty for contract creations.
    #[serde(default)]
    pub to: String,
    /// The calldata.
    #[serde(default)]
    pub input: String,
    /// The amount sent, in wei.
    #[serde(default)]
    pub value: String,
    /// The block timestamp, decimal or `0x` hex.
    #[serde(default)]
    pub time_stamp: String,
    /// The block number.
    #[serde(default)]
    pub block_number: String,
}

/// A `playerRollDice` transaction sent to the dice contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BetTransaction {
    /// The transaction hash.
    pub transaction_hash: B256,
    /// The block the transaction was mined in.
    pub block_number: u64,
    /// The block timestamp.
    pub timestamp: DateTime<Utc>,
    /// The amount wagered, in wei.
    pub bet_value: U256,
    /// The bet wins if the dice rolls under this number.
    pub roll_under: u64,
}

impl BetTransaction {
    /// The amount wagered, in ether rounded to two digits.
    pub fn bet_value_ether(&self) -> eyre::Result<f64> {
        wei_to_ether(self.bet_value)
    }

    /// Serializes the transaction. The amount is given in wei, as a decimal string.
    pub fn to_json(&self) -> Value {
        json!({
            "transaction_hash": self.transaction_hash.to_string(),
            "block_number": self.block_number,
            "timestamp": self.timestamp.timestamp(),
            "datetime": format_datetime(&self.timestamp),
            "bet_value": self.bet_value.to_string(),
            "roll_under": self.roll_under,
        })
    }
}

impl Display for BetTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bet = self
            .bet_value_ether()
            .map(|ether| format!("{ether:.2} ETH"))
            .unwrap_or_else(|_| format!("{} wei", self.bet_value));

        write!(
            f,
            "{}  {}  block {}, bet {}, roll under {}",
            format_datetime(&self.timestamp),
            self.transaction_hash,
            self.block_number,
            bet,
            self.roll_under
        )
    }
}

/// An inclusive block range to query logs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRange {
    /// The first block.
    pub from_block: u64,
    /// The last block.
    pub to_block: u64,
}

impl BlockRange {
    /// Serializes the range as `{ from_block, to_block }`.
    pub fn to_json(&self) -> Value {
        json!({ "from_block": self.from_block, "to_block": self.to_block })
    }
}
