use alloy::primitives::FixedBytes;
use etheroll_common::utils::strings::encode_hex;
use tracing::{debug, trace};

use crate::{
    catalog::Catalog,
    error::Error,
    interfaces::DecodedCall,
    utils::{abi, parse_hex},
};

/// Decodes a hex calldata payload, with or without `0x`, in any case.
///
/// Fails with [`Error::InvalidHex`] if the payload is not hex, [`Error::MalformedEncoding`]
/// if it is shorter than a selector or its arguments do not decode, and
/// [`Error::UnknownSelector`] if no cataloged function matches its first 4 bytes.
pub fn decode_call(catalog: &Catalog, payload: &str) -> Result<DecodedCall, Error> {
    let calldata = parse_hex(payload)?;
    decode_call_bytes(catalog, &calldata)
}

/// Decodes raw calldata, see [`decode_call`].
pub fn decode_call_bytes(catalog: &Catalog, calldata: &[u8]) -> Result<DecodedCall, Error> {
    if calldata.len() < 4 {
        return Err(Error::MalformedEncoding(format!(
            "calldata of {} bytes has no selector",
            calldata.len()
        )));
    }

    let selector = FixedBytes::<4>::from_slice(&calldata[..4]);
    let entry = catalog.function(selector).ok_or_else(|| {
        debug!("no function matches selector 0x{}", encode_hex(selector.as_slice()));
        Error::UnknownSelector(format!("0x{}", encode_hex(selector.as_slice())))
    })?;
    trace!("decoding call to {}", entry.signature);

    let values = abi::decode(&entry.decode_types, &calldata[4..])?;
    Ok(DecodedCall::new(entry, values))
}
