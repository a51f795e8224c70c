//! Pairs Etheroll dice bets with their results.
//!
//! `LogBet` and `LogResult` logs are decoded with [`etheroll_decoder`] into [`BetRecord`]s
//! and [`ResultRecord`]s, then joined on their bet id by [`merge`]. The bets of a player can
//! also be read from their transaction list ([`last_bets_transactions`]), together with the
//! block range their results are logged in ([`last_bets_blocks`]).

pub mod error;

mod core;
mod interfaces;

// re-export the public interface
pub use core::{
    bets, bets_with,
    merge::{merge, merged_logs},
    merge_logs, merge_logs_with,
    records::{bet_logs, result_logs},
    transactions::{last_bets_blocks, last_bets_transactions},
    BetsResult, MergeResult,
};
pub use interfaces::{
    BetRecord, BetTransaction, BetsArgs, BetsArgsBuilder, BlockRange, LogFilter, MergeArgs,
    MergeArgsBuilder, MergedRecord, RawTransaction, ResultRecord, TopicOperator,
};
