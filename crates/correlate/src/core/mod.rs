pub(crate) mod merge;
pub(crate) mod records;
pub(crate) mod transactions;

use std::time::Instant;

use etheroll_decoder::DecodeService;
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    error::Error,
    interfaces::{BetTransaction, BetsArgs, BlockRange, MergeArgs, MergedRecord},
};

/// The result of the merge command.
#[derive(Debug, Clone)]
pub struct MergeResult {
    /// Every bet, in input order, with its result if any.
    pub records: Vec<MergedRecord>,
}

impl MergeResult {
    /// Prints one line per bet.
    pub fn display(&self) {
        for record in &self.records {
            println!("{record}");
        }
    }

    /// The merged records as a JSON array of `{ bet_log, bet_result }`.
    pub fn to_json(&self) -> Value {
        Value::Array(self.records.iter().map(MergedRecord::to_json).collect())
    }

    /// The number of bets without a result.
    pub fn pending(&self) -> usize {
        self.records.iter().filter(|record| record.result.is_none()).count()
    }
}

/// The result of the bets command.
#[derive(Debug, Clone)]
pub struct BetsResult {
    /// The bets found in the transaction list, in input order.
    pub bets: Vec<BetTransaction>,
    /// The blocks the results of these bets are logged in, `None` without bets.
    pub blocks: Option<BlockRange>,
}

impl BetsResult {
    /// Prints one line per bet, then the block range.
    pub fn display(&self) {
        for bet in &self.bets {
            println!("{bet}");
        }
        if let Some(blocks) = &self.blocks {
            println!("\nresults expected between blocks {} and {}", blocks.from_block, blocks.to_block);
        }
    }

    /// The bets and block range as `{ bets, blocks }`.
    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "bets": self.bets.iter().map(BetTransaction::to_json).collect::<Vec<_>>(),
            "blocks": self.blocks.as_ref().map(BlockRange::to_json),
        })
    }
}

/// Decodes the bet and result logs given in `args` and pairs them by bet id.
pub fn merge_logs(args: MergeArgs) -> Result<MergeResult, Error> {
    merge_logs_with(&DecodeService::default(), args)
}

/// Pairs the bet and result logs given in `args`, decoded with the catalog `service` holds
/// for the contract.
pub fn merge_logs_with(service: &DecodeService, args: MergeArgs) -> Result<MergeResult, Error> {
    let start_time = Instant::now();

    let catalog = service.catalog_from_file(args.get_contract()?, args.abi.as_deref())?;
    let (bet_raw, result_raw) = args.get_logs()?;
    debug!(
        "loading {} bet logs and {} result logs took {:?}",
        bet_raw.len(),
        result_raw.len(),
        start_time.elapsed()
    );

    let records = merge::merged_logs(&catalog, &bet_raw, &result_raw)?;
    let result = MergeResult { records };

    info!("merged {} bets, {} pending", result.records.len(), result.pending());
    debug!("merging took {:?}", start_time.elapsed());
    Ok(result)
}

/// Finds the bets sent to the contract in the transaction list given in `args`.
pub fn bets(args: BetsArgs) -> Result<BetsResult, Error> {
    bets_with(&DecodeService::default(), args)
}

/// Finds the bets sent to the contract in the transaction list given in `args`, decoded with
/// the catalog `service` holds for that contract.
pub fn bets_with(service: &DecodeService, args: BetsArgs) -> Result<BetsResult, Error> {
    let start_time = Instant::now();

    let contract = args.get_contract()?;
    let catalog = service.catalog_from_file(Some(contract), args.abi.as_deref())?;
    let raw = args.get_transactions()?;
    debug!("loading {} transactions took {:?}", raw.len(), start_time.elapsed());

    let bets = transactions::last_bets_transactions(&catalog, contract, &raw)?;
    let blocks = transactions::last_bets_blocks(&bets);

    info!("found {} bets sent to {}", bets.len(), contract);
    debug!("filtering took {:?}", start_time.elapsed());
    Ok(BetsResult { bets, blocks })
}
