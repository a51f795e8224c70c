//! The `etheroll` binary.

pub(crate) mod args;
pub(crate) mod error;
pub(crate) mod log_args;
pub(crate) mod output;

use args::{Arguments, Subcommands};
use clap::Parser;
use error::Error;
use output::{emit, print_summary};
use tracing::debug;

use etheroll_config::{config, Configuration};
use etheroll_correlator::{bets_with, merge_logs_with};
use etheroll_decoder::{decode_events_with, decode_with, DecodeService};

/// Falls back to the configured ABI when none was passed.
fn default_abi(abi: &mut Option<String>, configuration: &Configuration) {
    if abi.is_none() && !configuration.abi_path.is_empty() {
        debug!("using configured abi_path '{}'", configuration.abi_path);
        *abi = Some(configuration.abi_path.clone());
    }
}

/// Falls back to the configured contract when none was passed. A configuration without a
/// contract on a chain without a default deployment leaves it empty.
fn default_contract(contract: &mut String, configuration: &Configuration) {
    if contract.is_empty() {
        if let Ok(address) = configuration.contract_address() {
            debug!("using configured contract {address}");
            *contract = address.to_string();
        }
    }
}

fn main() -> Result<(), Error> {
    let args = Arguments::parse();

    // setup logging
    let _guard = args
        .logs
        .init_tracing()
        .map_err(|e| Error::Generic(format!("failed to initialize tracing: {e}")))?;

    let configuration = Configuration::load()
        .map_err(|e| Error::Generic(format!("failed to load configuration: {e}")))?;
    let service = DecodeService::new(configuration.chain);

    match args.sub {
        Subcommands::Decode(mut cmd) => {
            default_abi(&mut cmd.abi, &configuration);
            default_contract(&mut cmd.contract, &configuration);

            let result = decode_with(&service, cmd.clone())
                .map_err(|e| Error::Generic(format!("failed to decode calldata: {e}")))?;

            emit(&cmd.output, &result.to_json(), || result.display())?;
        }

        Subcommands::Log(mut cmd) => {
            default_abi(&mut cmd.abi, &configuration);
            default_contract(&mut cmd.contract, &configuration);

            let result = decode_events_with(&service, cmd.clone())
                .map_err(|e| Error::Generic(format!("failed to decode logs: {e}")))?;

            emit(&cmd.output, &result.to_json(), || {
                result.display();
                print_summary(&format!(
                    "{} logs decoded, {} skipped",
                    result.events.len(),
                    result.skipped
                ));
            })?;
        }

        Subcommands::Merge(mut cmd) => {
            default_abi(&mut cmd.abi, &configuration);
            default_contract(&mut cmd.contract, &configuration);

            let result = merge_logs_with(&service, cmd.clone())
                .map_err(|e| Error::Generic(format!("failed to merge logs: {e}")))?;

            emit(&cmd.output, &result.to_json(), || {
                result.display();
                print_summary(&format!(
                    "{} bets, {} pending",
                    result.records.len(),
                    result.pending()
                ));
            })?;
        }

        Subcommands::Bets(mut cmd) => {
            default_abi(&mut cmd.abi, &configuration);

            // if the user has not specified a contract, use the configured one
            if cmd.contract.is_empty() {
                cmd.contract = configuration
                    .contract_address()
                    .map_err(|e| Error::Generic(format!("failed to resolve contract: {e}")))?
                    .to_string();
            }

            let result = bets_with(&service, cmd.clone())
                .map_err(|e| Error::Generic(format!("failed to read bets: {e}")))?;

            emit(&cmd.output, &result.to_json(), || result.display())?;
        }

        Subcommands::Config(cmd) => {
            config(cmd).map_err(|e| Error::Generic(format!("failed to configure: {e}")))?;
        }
    }

    Ok(())
}
