use clap::{Parser, Subcommand};

use etheroll_config::ConfigArgs;
use etheroll_correlator::{BetsArgs, MergeArgs};
use etheroll_decoder::{DecodeArgs, EventArgs};

use crate::log_args::LogArgs;

#[derive(Debug, Parser)]
#[clap(name = "etheroll", version)]
pub(crate) struct Arguments {
    #[clap(subcommand)]
    pub(crate) sub: Subcommands,

    #[clap(flatten)]
    pub(crate) logs: LogArgs,
}

#[derive(Debug, Subcommand)]
#[clap(
    about = "etheroll decodes calls and logs of the Etheroll dice contract and pairs bets with their results."
)]
pub(crate) enum Subcommands {
    #[clap(name = "decode", about = "Decode calldata into named, typed arguments")]
    Decode(DecodeArgs),

    #[clap(name = "log", about = "Decode every log of a block explorer log list")]
    Log(EventArgs),

    #[clap(name = "merge", about = "Pair every bet with its result, if it was resolved yet")]
    Merge(MergeArgs),

    #[clap(
        name = "bets",
        about = "List the bets of a transaction list and the blocks their results land in"
    )]
    Bets(BetsArgs),

    #[clap(name = "config", about = "Display and edit the current configuration")]
    Config(ConfigArgs),
}
