use eyre::{bail, eyre, Result};
use std::fmt::Write;

/// Strips surrounding whitespace and an optional `0x`/`0X` prefix from a hex string.
///
/// ```
/// use etheroll_common::utils::strings::strip_hex_prefix;
///
/// assert_eq!(strip_hex_prefix(" 0xdeadBEEF "), "deadBEEF");
/// assert_eq!(strip_hex_prefix("deadbeef"), "deadbeef");
/// ```
pub fn strip_hex_prefix(s: &str) -> &str {
    let s = s.trim();
    s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s)
}

/// Decodes a hex string into a vector of bytes. The `0x` prefix is optional and the
/// string is case-insensitive.
///
/// ```
/// use etheroll_common::utils::strings::decode_hex;
///
/// let hex = "48656c6c6f20576f726c64"; // "Hello World" in hex
/// let result = decode_hex(hex).expect("should decode hex");
/// assert_eq!(result, vec![72, 101, 108, 108, 111, 32, 87, 111, 114, 108, 100]);
/// assert_eq!(decode_hex("0xDC6D").expect("should decode hex"), vec![0xdc, 0x6d]);
/// ```
pub fn decode_hex(s: &str) -> Result<Vec<u8>> {
    let s = strip_hex_prefix(s);

    if s.is_empty() {
        return Ok(vec![]);
    }
    if s.len() % 2 != 0 {
        bail!("invalid hex string: odd length {}", s.len());
    }

    (0..s.len())
        .step_by(2)
        .map(|i| s.get(i..i + 2).and_then(|byte| u8::from_str_radix(byte, 16).ok()))
        .collect::<Option<Vec<u8>>>()
        .ok_or_else(|| eyre!("invalid hex string: {}", s))
}

/// Encodes a slice of bytes into a lowercase hex string, without prefix.
///
/// ```
/// use etheroll_common::utils::strings::encode_hex;
///
/// let bytes = vec![72, 101, 108, 108, 111, 32, 87, 111, 114, 108, 100];
/// let result = encode_hex(&bytes);
/// assert_eq!(result, "48656c6c6f20576f726c64");
/// ```
pub fn encode_hex(s: &[u8]) -> String {
    s.iter().fold(String::with_capacity(s.len() * 2), |mut acc, b| {
        let _ = write!(acc, "{b:02x}");
        acc
    })
}
