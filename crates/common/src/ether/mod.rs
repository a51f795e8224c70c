/// Supported chains and their dice contract deployments.
pub mod chain;

/// Wei/ether conversion and payout helpers.
pub mod units;
