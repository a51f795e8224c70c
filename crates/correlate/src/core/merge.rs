use alloy::primitives::B256;
use etheroll_decoder::{Catalog, RawLog};
use hashbrown::HashMap;
use tracing::debug;

use crate::{
    core::records::{bet_logs, result_logs},
    error::Error,
    interfaces::{BetRecord, MergedRecord, ResultRecord},
};

/// Pairs every bet with the result sharing its bet id.
///
/// The output follows the order of `bets`. Bets without a result get `None`, results
/// without a bet are dropped. If several results share a bet id, the last one wins.
pub fn merge(bets: &[BetRecord], results: &[ResultRecord]) -> Vec<MergedRecord> {
    let by_bet_id: HashMap<B256, &ResultRecord> =
        results.iter().map(|result| (result.bet_id, result)).collect();

    let merged: Vec<MergedRecord> = bets
        .iter()
        .map(|bet| MergedRecord {
            bet: bet.clone(),
            result: by_bet_id.get(&bet.bet_id).map(|result| (*result).clone()),
        })
        .collect();

    debug!(
        "merged {} bets with {} results, {} pending",
        bets.len(),
        results.len(),
        merged.iter().filter(|record| record.result.is_none()).count()
    );
    merged
}

/// Decodes both log lists and merges them, see [`merge`].
pub fn merged_logs(
    catalog: &Catalog,
    bet_raw: &[RawLog],
    result_raw: &[RawLog],
) -> Result<Vec<MergedRecord>, Error> {
    let bets = bet_logs(catalog, bet_raw)?;
    let results = result_logs(catalog, result_raw)?;

    Ok(merge(&bets, &results))
}
