use alloy::primitives::{utils::format_units, U256};
use eyre::{eyre, Result};

use crate::constants::{HOUSE_EDGE_PERCENT, ROUND_DIGITS};

/// Rounds `value` to `digits` decimal places.
///
/// ```
/// use etheroll_common::ether::units::round_to;
///
/// assert_eq!(round_to(0.19118, 2), 0.19);
/// ```
pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}

/// Converts an amount of wei into ether, rounded to [`ROUND_DIGITS`] decimal places.
///
/// ```
/// use alloy::primitives::U256;
/// use etheroll_common::ether::units::wei_to_ether;
///
/// let wei = U256::from(450_000_000_000_000_000u64);
/// assert_eq!(wei_to_ether(wei).expect("valid amount"), 0.45);
/// ```
pub fn wei_to_ether(wei: U256) -> Result<f64> {
    let formatted =
        format_units(wei, "ether").map_err(|e| eyre!("failed to format {} wei: {}", wei, e))?;
    let ether = formatted
        .parse::<f64>()
        .map_err(|e| eyre!("failed to parse ether amount '{}': {}", formatted, e))?;

    Ok(round_to(ether, ROUND_DIGITS))
}

/// Computes the profit of a winning bet of `bet_size` with a `chances_win` percent chance of
/// winning, once the house edge is taken. Returns `None` when `chances_win` is not strictly
/// between 0 and 100.
///
/// ```
/// use etheroll_common::ether::units::compute_profit;
///
/// assert_eq!(compute_profit(0.10, 34), Some(0.19));
/// assert_eq!(compute_profit(0.10, 100), None);
/// ```
pub fn compute_profit(bet_size: f64, chances_win: u64) -> Option<f64> {
    if chances_win == 0 || chances_win >= 100 {
        return None;
    }

    let chances_win = chances_win as f64;
    let chances_loss = 100.0 - chances_win;
    let payout = ((chances_loss / chances_win) * bet_size + bet_size) *
        (1.0 - HOUSE_EDGE_PERCENT / 100.0);

    Some(round_to(payout - bet_size, ROUND_DIGITS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wei_to_ether_rounds() {
        // 44.55 ether
        let wei = U256::from(0x26a4164f6c7a70000u128);
        assert_eq!(wei_to_ether(wei).expect("valid amount"), 44.55);

        // 3.8076... ether rounds up
        let wei = U256::from(0x34d7a3fad5fcc4ebu128);
        assert_eq!(wei_to_ether(wei).expect("valid amount"), 3.81);

        assert_eq!(wei_to_ether(U256::ZERO).expect("valid amount"), 0.0);
    }

    #[test]
    fn test_compute_profit() {
        assert_eq!(compute_profit(0.10, 34), Some(0.19));
        assert_eq!(compute_profit(0.10, 0), None);
        assert_eq!(compute_profit(0.10, 100), None);
        assert_eq!(compute_profit(1.0, 50), Some(0.98));
    }
}
