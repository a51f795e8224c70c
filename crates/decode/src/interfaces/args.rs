use alloy::primitives::Address;
use clap::Parser;
use derive_builder::Builder;
use eyre::{eyre, Result};
use etheroll_common::utils::io::file::read_file;

use crate::{catalog::InterfaceDescription, interfaces::RawLog};

#[derive(Debug, Clone, Parser, Builder)]
#[clap(
    about = "Decodes dice contract calldata into named, typed arguments",
    override_usage = "etheroll decode <CALLDATA> [OPTIONS]"
)]
/// Arguments for the decode operation
pub struct DecodeArgs {
    /// The calldata to decode, as a hex string with or without `0x`.
    #[clap(required = true)]
    pub target: String,

    /// The dice contract the calldata was sent to. Defaults to the configured contract.
    #[clap(long, short, default_value = "", hide_default_value = true)]
    pub contract: String,

    /// Path to the contract's JSON ABI. Defaults to the configured `abi_path`.
    #[clap(long, short, default_value = None, hide_default_value = true)]
    pub abi: Option<String>,

    /// Either 'print' to print to the console or 'json' to print JSON.
    #[clap(long = "output", short = 'o', default_value = "print", hide_default_value = true)]
    pub output: String,
}

impl DecodeArgs {
    /// Parses the contract address, `None` if none was given.
    pub fn get_contract(&self) -> Result<Option<Address>> {
        parse_contract(&self.contract)
    }
}

impl DecodeArgsBuilder {
    /// Creates a new DecodeArgsBuilder with default values
    pub fn new() -> Self {
        Self {
            target: Some(String::new()),
            contract: Some(String::new()),
            abi: Some(None),
            output: Some(String::from("print")),
        }
    }
}

#[derive(Debug, Clone, Parser, Builder)]
#[clap(
    about = "Decodes every log of a block explorer log list",
    override_usage = "etheroll log --logs <FILE> [OPTIONS]"
)]
/// Arguments for the log decoding operation
pub struct EventArgs {
    /// Path to a JSON array of logs, in the block explorer's `getLogs` format.
    #[clap(long, short, required = true)]
    pub logs: String,

    /// The dice contract that emitted the logs. Defaults to the configured contract.
    #[clap(long, short, default_value = "", hide_default_value = true)]
    pub contract: String,

    /// Path to the contract's JSON ABI. Defaults to the configured `abi_path`.
    #[clap(long, short, default_value = None, hide_default_value = true)]
    pub abi: Option<String>,

    /// Skip logs emitted by events missing from the ABI instead of failing.
    #[clap(long = "skip-unknown")]
    pub skip_unknown: bool,

    /// Either 'print' to print to the console or 'json' to print JSON.
    #[clap(long = "output", short = 'o', default_value = "print", hide_default_value = true)]
    pub output: String,
}

impl EventArgs {
    /// Parses the contract address, `None` if none was given.
    pub fn get_contract(&self) -> Result<Option<Address>> {
        parse_contract(&self.contract)
    }

    /// Reads and parses the log list.
    pub fn get_logs(&self) -> Result<Vec<RawLog>> {
        read_logs(&self.logs)
    }
}

impl EventArgsBuilder {
    /// Creates a new EventArgsBuilder with default values
    pub fn new() -> Self {
        Self {
            logs: Some(String::new()),
            contract: Some(String::new()),
            abi: Some(None),
            skip_unknown: Some(false),
            output: Some(String::from("print")),
        }
    }
}

/// Parses a contract address argument. An empty argument means no contract was given.
pub fn parse_contract(contract: &str) -> Result<Option<Address>> {
    if contract.is_empty() {
        return Ok(None);
    }

    contract.parse::<Address>().map(Some).map_err(|e| eyre!("invalid contract '{}': {}", contract, e))
}

/// Reads a JSON ABI from `path`.
pub fn read_description(path: Option<&str>) -> Result<InterfaceDescription> {
    let path = path
        .filter(|path| !path.is_empty())
        .ok_or_else(|| eyre!("no ABI provided, pass --abi or set `abi_path` in the config"))?;
    let contents = read_file(path)?;

    InterfaceDescription::from_json(&contents)
        .map_err(|e| eyre!("failed to parse ABI '{}': {}", path, e))
}

/// Reads a JSON array of explorer logs from `path`.
pub fn read_logs(path: &str) -> Result<Vec<RawLog>> {
    let contents = read_file(path)?;

    serde_json::from_str(&contents).map_err(|e| eyre!("failed to parse logs '{}': {}", path, e))
}
