use std::fmt::{self, Display};

use alloy::primitives::{keccak256, FixedBytes, B256};
use etheroll_common::utils::strings::encode_hex;

use crate::catalog::Parameter;

/// The identifier a call or a log is routed by: the first 4 bytes of a function signature's
/// keccak256 hash, or the full 32-byte hash of an event signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selector {
    /// A function selector, the leading 4 bytes of calldata.
    Function(FixedBytes<4>),
    /// An event selector, a log's first topic.
    Event(B256),
}

impl Selector {
    /// The raw selector bytes.
    pub fn as_slice(&self) -> &[u8] {
        match self {
            Selector::Function(selector) => selector.as_slice(),
            Selector::Event(selector) => selector.as_slice(),
        }
    }
}

impl Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", encode_hex(self.as_slice()))
    }
}

/// Returns the canonical type tag of a parameter. Tuples are expanded into their components,
/// e.g. `tuple[]` with `(uint256, address)` components becomes `(uint256,address)[]`.
///
/// ```
/// use etheroll_decoder::{canonical_type, Parameter};
///
/// let param = Parameter::new("rollUnder", "uint256", false);
/// assert_eq!(canonical_type(&param), "uint256");
/// ```
pub fn canonical_type(param: &Parameter) -> String {
    match param.ty.strip_prefix("tuple") {
        Some(suffix) => format!(
            "({}){}",
            param.components.iter().map(canonical_type).collect::<Vec<_>>().join(","),
            suffix
        ),
        None => param.ty.clone(),
    }
}

/// Returns the canonical signature `name(type1,type2,...)`, with no spaces and no parameter
/// names.
///
/// ```
/// use etheroll_decoder::{canonical_signature, Parameter};
///
/// let inputs = vec![Parameter::new("rollUnder", "uint256", false)];
/// assert_eq!(canonical_signature("playerRollDice", &inputs), "playerRollDice(uint256)");
/// ```
pub fn canonical_signature(name: &str, inputs: &[Parameter]) -> String {
    format!("{}({})", name, inputs.iter().map(canonical_type).collect::<Vec<_>>().join(","))
}

/// Returns the 4-byte selector of a function signature.
///
/// ```
/// use etheroll_decoder::function_selector;
///
/// assert_eq!(function_selector("playerRollDice(uint256)").to_string(), "0xdc6dd152");
/// ```
pub fn function_selector(signature: &str) -> FixedBytes<4> {
    FixedBytes::<4>::from_slice(&keccak256(signature.as_bytes())[..4])
}

/// Returns the 32-byte selector (topic 0) of an event signature.
pub fn event_selector(signature: &str) -> B256 {
    keccak256(signature.as_bytes())
}
