use clap::Parser;
use derive_builder::Builder;
use alloy::primitives::Address;
use etheroll_common::utils::io::file::read_file;
use etheroll_decoder::{parse_contract, read_logs, RawLog};
use eyre::{eyre, Result};

use crate::interfaces::RawTransaction;

#[derive(Debug, Clone, Parser, Builder)]
#[clap(
    about = "Pairs every bet with its result, if it was resolved yet",
    override_usage = "etheroll merge --bets <FILE> --results <FILE> [OPTIONS]"
)]
/// Arguments for the merge operation
pub struct MergeArgs {
    /// Path to a JSON array of `LogBet` logs, in the block explorer's `getLogs` format.
    #[clap(long, short, required = true)]
    pub bets: String,

    /// Path to a JSON array of `LogResult` logs, in the block explorer's `getLogs` format.
    #[clap(long, short, required = true)]
    pub results: String,

    /// The dice contract that emitted the logs. Defaults to the configured contract.
    #[clap(long, short, default_value = "", hide_default_value = true)]
    pub contract: String,

    /// Path to the contract's JSON ABI. Defaults to the configured `abi_path`.
    #[clap(long, short, default_value = None, hide_default_value = true)]
    pub abi: Option<String>,

    /// Either 'print' to print to the console or 'json' to print JSON.
    #[clap(long = "output", short = 'o', default_value = "print", hide_default_value = true)]
    pub output: String,
}

impl MergeArgs {
    /// Parses the contract address, `None` if none was given.
    pub fn get_contract(&self) -> Result<Option<Address>> {
        parse_contract(&self.contract)
    }

    /// Reads and parses both log lists.
    pub fn get_logs(&self) -> Result<(Vec<RawLog>, Vec<RawLog>)> {
        Ok((read_logs(&self.bets)?, read_logs(&self.results)?))
    }
}

impl MergeArgsBuilder {
    /// Creates a new MergeArgsBuilder with default values
    pub fn new() -> Self {
        Self {
            bets: Some(String::new()),
            results: Some(String::new()),
            contract: Some(String::new()),
            abi: Some(None),
            output: Some(String::from("print")),
        }
    }
}

#[derive(Debug, Clone, Parser, Builder)]
#[clap(
    about = "Lists the bets placed in a transaction list and the blocks their results land in",
    override_usage = "etheroll bets --transactions <FILE> [OPTIONS]"
)]
/// Arguments for the bets operation
pub struct BetsArgs {
    /// Path to a JSON array of transactions, in the block explorer's `txlist` format.
    #[clap(long, short, required = true)]
    pub transactions: String,

    /// The dice contract address. Defaults to the configured contract.
    #[clap(long, short, default_value = "", hide_default_value = true)]
    pub contract: String,

    /// Path to the contract's JSON ABI. Defaults to the configured `abi_path`.
    #[clap(long, short, default_value = None, hide_default_value = true)]
    pub abi: Option<String>,

    /// Either 'print' to print to the console or 'json' to print JSON.
    #[clap(long = "output", short = 'o', default_value = "print", hide_default_value = true)]
    pub output: String,
}

impl BetsArgs {
    /// Reads and parses the transaction list.
    pub fn get_transactions(&self) -> Result<Vec<RawTransaction>> {
        let contents = read_file(&self.transactions)?;

        serde_json::from_str(&contents)
            .map_err(|e| eyre!("failed to parse transactions '{}': {}", self.transactions, e))
    }

    /// Parses the contract address. Unlike the other commands, bets needs one to filter on.
    pub fn get_contract(&self) -> Result<Address> {
        parse_contract(&self.contract)?
            .ok_or_else(|| eyre!("no contract provided, pass --contract or set `contract_address`"))
    }
}

impl BetsArgsBuilder {
    /// Creates a new BetsArgsBuilder with default values
    pub fn new() -> Self {
        Self {
            transactions: Some(String::new()),
            contract: Some(String::new()),
            abi: Some(None),
            output: Some(String::from("print")),
        }
    }
}
