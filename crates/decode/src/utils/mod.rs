pub(crate) mod abi;
pub(crate) mod selector;

use etheroll_common::utils::strings::decode_hex;

use crate::error::Error;

/// Decodes a hex string, ignoring surrounding whitespace, an optional `0x` prefix and the
/// case of the digits.
pub(crate) fn parse_hex(s: &str) -> Result<Vec<u8>, Error> {
    decode_hex(s.trim()).map_err(|e| Error::InvalidHex(format!("'{s}': {e}")))
}
