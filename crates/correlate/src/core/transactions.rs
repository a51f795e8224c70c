use alloy::primitives::{Address, B256};
use etheroll_common::{
    constants::{BET_RESOLUTION_BLOCKS, PLAYER_ROLL_DICE_SIGNATURE},
    utils::{
        integers::{parse_quantity, parse_wei},
        strings::decode_hex,
        time::parse_timestamp,
    },
};
use etheroll_decoder::{decode_call, error::Error as DecodeError, Catalog, TypedValue};
use tracing::{debug, trace};

use crate::{
    error::Error,
    interfaces::{BetTransaction, BlockRange, RawTransaction},
};

fn parse_hash(hash: &str) -> Result<B256, Error> {
    let bytes = decode_hex(hash).map_err(|e| Error::InvalidNumber(format!("'{hash}': {e}")))?;
    if bytes.len() != 32 {
        return Err(Error::InvalidNumber(format!("'{hash}' is not a 32 byte hash")));
    }
    Ok(B256::from_slice(&bytes))
}

/// Keeps the transactions of `transactions` that place a bet: sent to `contract`, with an
/// input decoding as `playerRollDice`. Input order is preserved.
pub fn last_bets_transactions(
    catalog: &Catalog,
    contract: Address,
    transactions: &[RawTransaction],
) -> Result<Vec<BetTransaction>, Error> {
    let mut bets = Vec::new();

    for transaction in transactions {
        match transaction.to.parse::<Address>() {
            Ok(to) if to == contract => {}
            _ => {
                trace!("skipping transaction {} sent to {}", transaction.hash, transaction.to);
                continue;
            }
        }

        let call = match decode_call(catalog, &transaction.input) {
            Ok(call) if call.signature == PLAYER_ROLL_DICE_SIGNATURE => call,
            Ok(call) => {
                debug!("skipping {} call in transaction {}", call.name, transaction.hash);
                continue;
            }
            Err(DecodeError::UnknownSelector(_)) | Err(DecodeError::MalformedEncoding(_)) => {
                debug!("skipping transaction {}: not a bet", transaction.hash);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let roll_under = match call.get("rollUnder") {
            Some(TypedValue::Uint(value, _)) => u64::try_from(*value).map_err(|_| {
                Error::UnexpectedType(format!("rollUnder {value} does not fit in 64 bits"))
            })?,
            Some(value) => {
                return Err(Error::UnexpectedType(format!("rollUnder: expected uint, got {value:?}")))
            }
            None => return Err(Error::MissingField("playerRollDice has no 'rollUnder'".into())),
        };

        bets.push(BetTransaction {
            transaction_hash: parse_hash(&transaction.hash)?,
            block_number: parse_quantity(&transaction.block_number)
                .map_err(|e| Error::InvalidNumber(e.to_string()))?,
            timestamp: parse_timestamp(&transaction.time_stamp)
                .map_err(|e| Error::InvalidTimestamp(e.to_string()))?,
            bet_value: parse_wei(&transaction.value)
                .map_err(|e| Error::InvalidNumber(e.to_string()))?,
            roll_under,
        });
    }

    debug!("found {} bets in {} transactions", bets.len(), transactions.len());
    Ok(bets)
}

/// The block range in which the results of `bets` are logged: from the block before the
/// earliest bet to [`BET_RESOLUTION_BLOCKS`] blocks after the latest one. `None` when there
/// are no bets.
pub fn last_bets_blocks(bets: &[BetTransaction]) -> Option<BlockRange> {
    let from_block = bets.iter().map(|bet| bet.block_number).min()?;
    let to_block = bets.iter().map(|bet| bet.block_number).max()?;

    Some(BlockRange {
        from_block: from_block.saturating_sub(1),
        to_block: to_block.saturating_add(BET_RESOLUTION_BLOCKS),
    })
}
