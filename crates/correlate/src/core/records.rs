use alloy::primitives::{Address, B256, U256};
use alloy_dyn_abi::DynSolValue;
use chrono::{DateTime, Utc};
use etheroll_common::utils::time::parse_timestamp;
use etheroll_decoder::{decode_raw_log, error::Error as DecodeError, Catalog, DecodedEvent, RawLog};
use tracing::{debug, trace};

use crate::{
    error::Error,
    interfaces::{BetRecord, ResultRecord},
};

const LOG_BET: &str = "LogBet";
const LOG_RESULT: &str = "LogResult";

fn field<'a>(event: &'a DecodedEvent, name: &str) -> Result<&'a DynSolValue, Error> {
    event
        .get(name)
        .ok_or_else(|| Error::MissingField(format!("{} has no '{}' parameter", event.name, name)))
}

fn unexpected(event: &DecodedEvent, name: &str, expected: &str, value: &DynSolValue) -> Error {
    Error::UnexpectedType(format!(
        "{}.{}: expected {}, got {:?}",
        event.name, name, expected, value
    ))
}

fn word_field(event: &DecodedEvent, name: &str) -> Result<B256, Error> {
    match field(event, name)? {
        DynSolValue::FixedBytes(word, 32) => Ok(*word),
        value => Err(unexpected(event, name, "bytes32", value)),
    }
}

fn address_field(event: &DecodedEvent, name: &str) -> Result<Address, Error> {
    match field(event, name)? {
        DynSolValue::Address(address) => Ok(*address),
        value => Err(unexpected(event, name, "address", value)),
    }
}

fn uint_field(event: &DecodedEvent, name: &str) -> Result<U256, Error> {
    match field(event, name)? {
        DynSolValue::Uint(value, _) => Ok(*value),
        value => Err(unexpected(event, name, "uint", value)),
    }
}

fn small_uint_field(event: &DecodedEvent, name: &str) -> Result<u64, Error> {
    let value = uint_field(event, name)?;
    u64::try_from(value).map_err(|_| {
        Error::UnexpectedType(format!("{}.{}: {} does not fit in 64 bits", event.name, name, value))
    })
}

fn timestamp(log: &RawLog) -> Result<DateTime<Utc>, Error> {
    parse_timestamp(&log.time_stamp).map_err(|e| Error::InvalidTimestamp(e.to_string()))
}

impl BetRecord {
    /// Reads a bet from a decoded `LogBet` event and the log it was decoded from.
    pub fn from_event(event: &DecodedEvent, log: &RawLog) -> Result<Self, Error> {
        Ok(Self {
            bet_id: word_field(event, "BetID")?,
            player: address_field(event, "PlayerAddress")?,
            bet_value: uint_field(event, "BetValue")?,
            reward_value: uint_field(event, "RewardValue")?,
            profit_value: uint_field(event, "ProfitValue")?,
            roll_under: small_uint_field(event, "PlayerNumber")?,
            timestamp: timestamp(log)?,
            transaction_hash: log.transaction_hash()?,
        })
    }
}

impl ResultRecord {
    /// Reads a result from a decoded `LogResult` event and the log it was decoded from.
    pub fn from_event(event: &DecodedEvent, log: &RawLog) -> Result<Self, Error> {
        Ok(Self {
            bet_id: word_field(event, "BetID")?,
            player: address_field(event, "PlayerAddress")?,
            roll_under: small_uint_field(event, "PlayerNumber")?,
            dice_result: small_uint_field(event, "DiceResult")?,
            bet_value: uint_field(event, "Value")?,
            timestamp: timestamp(log)?,
            transaction_hash: log.transaction_hash()?,
        })
    }
}

/// Decodes `logs` and keeps the events called `name`. Logs of other or unknown events are
/// skipped, any other failure is returned.
fn decode_named<'a>(
    catalog: &Catalog,
    logs: &'a [RawLog],
    name: &str,
) -> Result<Vec<(DecodedEvent, &'a RawLog)>, Error> {
    let mut events = Vec::with_capacity(logs.len());

    for log in logs {
        match decode_raw_log(catalog, log) {
            Ok(event) if event.name == name => events.push((event, log)),
            Ok(event) => {
                debug!("skipping {} log of transaction {}", event.name, log.transaction_hash);
            }
            Err(DecodeError::UnknownSelector(selector)) => {
                debug!("skipping unknown event {} of transaction {}", selector, log.transaction_hash);
            }
            Err(e) => return Err(e.into()),
        }
    }

    trace!("kept {} of {} logs as {}", events.len(), logs.len(), name);
    Ok(events)
}

/// Decodes the `LogBet` events of `logs` into bets, in input order.
pub fn bet_logs(catalog: &Catalog, logs: &[RawLog]) -> Result<Vec<BetRecord>, Error> {
    decode_named(catalog, logs, LOG_BET)?
        .iter()
        .map(|(event, log)| BetRecord::from_event(event, log))
        .collect()
}

/// Decodes the `LogResult` events of `logs` into results, in input order.
pub fn result_logs(catalog: &Catalog, logs: &[RawLog]) -> Result<Vec<ResultRecord>, Error> {
    decode_named(catalog, logs, LOG_RESULT)?
        .iter()
        .map(|(event, log)| ResultRecord::from_event(event, log))
        .collect()
}
