use alloy::primitives::U256;
use eyre::{eyre, Result};

use super::strings::strip_hex_prefix;

fn is_hex(s: &str) -> bool {
    s.starts_with("0x") || s.starts_with("0X")
}

/// Parses a block explorer quantity (block number, log index, ...), given in base 10 or as
/// `0x`-prefixed base 16.
///
/// ```
/// use etheroll_common::utils::integers::parse_quantity;
///
/// assert_eq!(parse_quantity("5394094").expect("decimal"), 5394094);
/// assert_eq!(parse_quantity("0x524e94").expect("hexadecimal"), 5394068);
/// ```
pub fn parse_quantity(s: &str) -> Result<u64> {
    let trimmed = s.trim();
    if is_hex(trimmed) {
        u64::from_str_radix(strip_hex_prefix(trimmed), 16)
    } else {
        trimmed.parse::<u64>()
    }
    .map_err(|e| eyre!("invalid quantity '{}': {}", s, e))
}

/// Parses an amount of wei, given in base 10 or as `0x`-prefixed base 16.
///
/// ```
/// use alloy::primitives::U256;
/// use etheroll_common::utils::integers::parse_wei;
///
/// assert_eq!(parse_wei("500000000000000000").expect("decimal"), U256::from(500_000_000_000_000_000u64));
/// assert_eq!(parse_wei("0x6f05b59d3b20000").expect("hexadecimal"), U256::from(500_000_000_000_000_000u64));
/// ```
pub fn parse_wei(s: &str) -> Result<U256> {
    let trimmed = s.trim();
    if strip_hex_prefix(trimmed).is_empty() {
        return Err(eyre!("invalid amount '{}': empty", s));
    }

    if is_hex(trimmed) {
        U256::from_str_radix(strip_hex_prefix(trimmed), 16)
    } else {
        U256::from_str_radix(trimmed, 10)
    }
    .map_err(|e| eyre!("invalid amount '{}': {}", s, e))
}
