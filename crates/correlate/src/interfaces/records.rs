use std::fmt::{self, Display};

use alloy::primitives::{Address, B256, U256};
use chrono::{DateTime, Utc};
use etheroll_common::{ether::units::wei_to_ether, utils::time::format_datetime};
use serde_json::{json, Value};

/// A placed bet, read from a `LogBet` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BetRecord {
    /// The bet identifier, shared with its `LogResult`.
    pub bet_id: B256,
    /// The player who placed the bet.
    pub player: Address,
    /// The amount wagered, in wei.
    pub bet_value: U256,
    /// The amount paid out on a win, in wei.
    pub reward_value: U256,
    /// The profit on a win, in wei.
    pub profit_value: U256,
    /// The bet wins if the dice rolls under this number.
    pub roll_under: u64,
    /// The time of the block the bet was placed in.
    pub timestamp: DateTime<Utc>,
    /// The transaction that placed the bet.
    pub transaction_hash: B256,
}

impl BetRecord {
    /// The amount wagered, in ether rounded to two digits.
    pub fn bet_value_ether(&self) -> eyre::Result<f64> {
        wei_to_ether(self.bet_value)
    }

    /// The amount paid out on a win, in ether rounded to two digits.
    pub fn reward_value_ether(&self) -> eyre::Result<f64> {
        wei_to_ether(self.reward_value)
    }

    /// The profit on a win, in ether rounded to two digits.
    pub fn profit_value_ether(&self) -> eyre::Result<f64> {
        wei_to_ether(self.profit_value)
    }

    /// Serializes the record. Amounts are given in wei, as decimal strings.
    pub fn to_json(&self) -> Value {
        json!({
            "bet_id": self.bet_id.to_string(),
            "player": self.player.to_checksum(None),
            "bet_value": self.bet_value.to_string(),
            "reward_value": self.reward_value.to_string(),
            "profit_value": self.profit_value.to_string(),
            "roll_under": self.roll_under,
            "timestamp": self.timestamp.timestamp(),
            "datetime": format_datetime(&self.timestamp),
            "transaction_hash": self.transaction_hash.to_string(),
        })
    }
}

/// A resolved bet, read from a `LogResult` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    /// The identifier of the resolved bet.
    pub bet_id: B256,
    /// The player who placed the bet.
    pub player: Address,
    /// The number the dice had to roll under.
    pub roll_under: u64,
    /// The rolled number.
    pub dice_result: u64,
    /// The amount wagered, in wei.
    pub bet_value: U256,
    /// The time of the block the bet was resolved in.
    pub timestamp: DateTime<Utc>,
    /// The transaction that resolved the bet.
    pub transaction_hash: B256,
}

impl ResultRecord {
    /// The amount wagered, in ether rounded to two digits.
    pub fn bet_value_ether(&self) -> eyre::Result<f64> {
        wei_to_ether(self.bet_value)
    }

    /// Whether the roll won.
    pub fn won(&self) -> bool {
        self.dice_result < self.roll_under
    }

    /// Serializes the record. Amounts are given in wei, as decimal strings.
    pub fn to_json(&self) -> Value {
        json!({
            "bet_id": self.bet_id.to_string(),
            "player": self.player.to_checksum(None),
            "roll_under": self.roll_under,
            "dice_result": self.dice_result,
            "bet_value": self.bet_value.to_string(),
            "timestamp": self.timestamp.timestamp(),
            "datetime": format_datetime(&self.timestamp),
            "transaction_hash": self.transaction_hash.to_string(),
        })
    }
}

/// A bet and its result, if it was resolved yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedRecord {
    /// The placed bet.
    pub bet: BetRecord,
    /// The matching result, `None` while the bet is pending.
    pub result: Option<ResultRecord>,
}

impl MergedRecord {
    /// Serializes the pair as `{ bet_log, bet_result }`.
    pub fn to_json(&self) -> Value {
        json!({
            "bet_log": self.bet.to_json(),
            "bet_result": self.result.as_ref().map(ResultRecord::to_json),
        })
    }
}

impl Display for MergedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bet = self
            .bet
            .bet_value_ether()
            .map(|ether| format!("{ether:.2} ETH"))
            .unwrap_or_else(|_| format!("{} wei", self.bet.bet_value));

        write!(
            f,
            "{}  {}  bet {}, roll under {}",
            format_datetime(&self.bet.timestamp),
            self.bet.bet_id,
            bet,
            self.bet.roll_under
        )?;

        match &self.result {
            Some(result) => write!(
                f,
                ": rolled {} ({})",
                result.dice_result,
                if result.won() { "won" } else { "lost" }
            ),
            None => write!(f, ": pending"),
        }
    }
}
