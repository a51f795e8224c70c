use alloy::primitives::Selector as AbiSelector;
use alloy_dyn_abi::{DynSolCall, DynSolReturns, DynSolType, DynSolValue};
use tracing::trace;

use crate::{
    catalog::Parameter,
    error::Error,
    utils::selector::canonical_type,
};

/// A decoded value, tagged with the type it was decoded as.
pub type TypedValue = DynSolValue;

/// How the declared parameter types are turned into decoding types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeMode {
    /// Types are used as declared.
    Call,
    /// Every top-level `bytes` parameter is read as `bytes32`. Event buffers are the indexed
    /// topics followed by the log data, so a dynamic `bytes` offset would point into the
    /// wrong region; the offset word is returned as-is instead.
    Event,
}

/// Parses a canonical type tag such as `uint256`, `bytes32[3]` or `(uint256,address)[]`.
pub fn parse_type(tag: &str) -> Result<DynSolType, Error> {
    DynSolType::parse(tag).map_err(|e| Error::MalformedMember(format!("invalid type '{tag}': {e}")))
}

/// Parses the declared types of `params`.
pub fn parse_types(params: &[Parameter], mode: TypeMode) -> Result<Vec<DynSolType>, Error> {
    params
        .iter()
        .map(|param| {
            let ty = parse_type(&canonical_type(param))?;
            Ok(match (mode, ty) {
                (TypeMode::Event, DynSolType::Bytes) => DynSolType::FixedBytes(32),
                (_, ty) => ty,
            })
        })
        .collect()
}

/// The number of 32-byte head words a value of `ty` occupies, `None` if it overflows.
fn head_words(ty: &DynSolType) -> Option<usize> {
    if ty.is_dynamic() {
        return Some(1);
    }

    match ty {
        DynSolType::FixedArray(inner, len) => head_words(inner)?.checked_mul(*len),
        DynSolType::Tuple(types) => head_size_words(types),
        _ => Some(1),
    }
}

fn head_size_words(types: &[DynSolType]) -> Option<usize> {
    types.iter().try_fold(0usize, |total, ty| total.checked_add(head_words(ty)?))
}

/// Decodes `buffer` as the ABI encoding of a sequence of values of `types`.
///
/// Static values are read from their head word, dynamic values follow their head offset.
/// Bytes past the last value are ignored. Fails with [`Error::MalformedEncoding`] when the
/// buffer is shorter than the head region or an offset or length points outside of it.
///
/// ```
/// use alloy::primitives::U256;
/// use alloy_dyn_abi::{DynSolType, DynSolValue};
/// use etheroll_decoder::decode_values;
///
/// let mut buffer = [0u8; 32];
/// buffer[31] = 14;
///
/// let values = decode_values(&[DynSolType::Uint(256)], &buffer).expect("valid encoding");
/// assert_eq!(values, vec![DynSolValue::Uint(U256::from(14), 256)]);
/// ```
pub fn decode(types: &[DynSolType], buffer: &[u8]) -> Result<Vec<TypedValue>, Error> {
    trace!("decode: types={:?}, buffer.len()={}", types, buffer.len());

    let type_list = || types.iter().map(|ty| ty.to_string()).collect::<Vec<_>>().join(",");
    let head_size = head_size_words(types)
        .and_then(|words| words.checked_mul(32))
        .ok_or_else(|| {
            Error::MalformedEncoding(format!("the head of ({}) is too large to decode", type_list()))
        })?;
    if buffer.len() < head_size {
        return Err(Error::MalformedEncoding(format!(
            "buffer of {} bytes is shorter than the {} byte head of ({})",
            buffer.len(),
            head_size,
            type_list()
        )));
    }

    let call =
        DynSolCall::new(AbiSelector::default(), types.to_vec(), None, DynSolReturns::new(Vec::new()));

    call.abi_decode_input(buffer).map_err(|e| Error::MalformedEncoding(e.to_string()))
}
