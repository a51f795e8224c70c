use std::fmt::{self, Display};

use alloy::primitives::B256;
use alloy_dyn_abi::{DynSolType, DynSolValue};
use etheroll_common::utils::strings::encode_hex;
use serde_json::{json, Value};

use crate::{catalog::CatalogEntry, utils::abi::TypedValue};

/// A single named, typed value.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedParam {
    /// The parameter name as declared, possibly empty.
    pub name: String,
    /// The type the value was decoded as.
    pub ty: DynSolType,
    /// The decoded value.
    pub value: TypedValue,
}

impl DecodedParam {
    /// Serializes the parameter as `{ name, type, value }`.
    pub fn to_json(&self) -> Value {
        json!({
            "name": self.name,
            "type": self.ty.to_string(),
            "value": value_to_json(&self.value),
        })
    }
}

/// Decoded parameters, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedParams(Vec<DecodedParam>);

impl DecodedParams {
    fn new(entry: &CatalogEntry, values: Vec<TypedValue>) -> Self {
        Self(
            entry
                .inputs()
                .iter()
                .zip(entry.decode_types.iter())
                .zip(values)
                .map(|((param, ty), value)| DecodedParam {
                    name: param.name.clone(),
                    ty: ty.clone(),
                    value,
                })
                .collect(),
        )
    }

    /// Returns the value of the first parameter called `name`.
    pub fn get(&self, name: &str) -> Option<&TypedValue> {
        self.0.iter().find(|param| param.name == name).map(|param| &param.value)
    }

    /// Iterates over the parameters in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, DecodedParam> {
        self.0.iter()
    }

    /// The number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn to_json(&self) -> Value {
        Value::Array(self.0.iter().map(DecodedParam::to_json).collect())
    }

    fn fmt_lines(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, param) in self.0.iter().enumerate() {
            let name = if param.name.is_empty() { format!("arg{i}") } else { param.name.clone() };
            write!(f, "\n  {} ({}): {}", name, param.ty, format_value(&param.value))?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a DecodedParams {
    type Item = &'a DecodedParam;
    type IntoIter = std::slice::Iter<'a, DecodedParam>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A decoded function call.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedCall {
    /// The function name.
    pub name: String,
    /// The canonical signature.
    pub signature: String,
    /// The decoded arguments.
    pub params: DecodedParams,
}

impl DecodedCall {
    pub(crate) fn new(entry: &CatalogEntry, values: Vec<TypedValue>) -> Self {
        Self {
            name: entry.name().to_string(),
            signature: entry.signature.clone(),
            params: DecodedParams::new(entry, values),
        }
    }

    /// Returns the value of the argument called `name`.
    pub fn get(&self, name: &str) -> Option<&TypedValue> {
        self.params.get(name)
    }

    /// Serializes the call as `{ name, signature, params }`.
    pub fn to_json(&self) -> Value {
        json!({
            "name": self.name,
            "signature": self.signature,
            "params": self.params.to_json(),
        })
    }
}

impl Display for DecodedCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.signature)?;
        self.params.fmt_lines(f)
    }
}

/// A decoded event log.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedEvent {
    /// The event name.
    pub name: String,
    /// The canonical signature.
    pub signature: String,
    /// The log's first topic.
    pub selector: B256,
    /// The decoded parameters, indexed ones included.
    pub params: DecodedParams,
}

impl DecodedEvent {
    pub(crate) fn new(entry: &CatalogEntry, selector: B256, values: Vec<TypedValue>) -> Self {
        Self {
            name: entry.name().to_string(),
            signature: entry.signature.clone(),
            selector,
            params: DecodedParams::new(entry, values),
        }
    }

    /// Returns the value of the parameter called `name`.
    pub fn get(&self, name: &str) -> Option<&TypedValue> {
        self.params.get(name)
    }

    /// Serializes the event as `{ name, signature, selector, params }`.
    pub fn to_json(&self) -> Value {
        json!({
            "name": self.name,
            "signature": self.signature,
            "selector": self.selector.to_string(),
            "params": self.params.to_json(),
        })
    }
}

impl Display for DecodedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.signature)?;
        self.params.fmt_lines(f)
    }
}

/// Formats a value for display. Integers are printed in decimal, byte strings in hex.
pub(crate) fn format_value(value: &DynSolValue) -> String {
    match value {
        DynSolValue::Bool(b) => b.to_string(),
        DynSolValue::Int(i, _) => i.to_string(),
        DynSolValue::Uint(u, _) => u.to_string(),
        DynSolValue::FixedBytes(word, size) => format!("0x{}", encode_hex(&word[..*size])),
        DynSolValue::Address(address) => address.to_checksum(None),
        DynSolValue::Function(function) => function.to_string(),
        DynSolValue::Bytes(bytes) => format!("0x{}", encode_hex(bytes)),
        DynSolValue::String(s) => format!("\"{s}\""),
        DynSolValue::Array(values) | DynSolValue::FixedArray(values) => {
            format!("[{}]", values.iter().map(format_value).collect::<Vec<_>>().join(", "))
        }
        DynSolValue::Tuple(values) => {
            format!("({})", values.iter().map(format_value).collect::<Vec<_>>().join(", "))
        }
        #[allow(unreachable_patterns)]
        _ => format!("{value:?}"),
    }
}

/// Converts a value into JSON. Integers become decimal strings so no precision is lost.
pub(crate) fn value_to_json(value: &DynSolValue) -> Value {
    match value {
        DynSolValue::Bool(b) => Value::Bool(*b),
        DynSolValue::String(s) => Value::String(s.clone()),
        DynSolValue::Array(values) | DynSolValue::FixedArray(values) | DynSolValue::Tuple(values) => {
            Value::Array(values.iter().map(value_to_json).collect())
        }
        _ => Value::String(format_value(value)),
    }
}
