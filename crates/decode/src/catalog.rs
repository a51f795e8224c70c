use alloy::primitives::{FixedBytes, B256};
use alloy_dyn_abi::DynSolType;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::{
    error::Error,
    utils::{
        abi::{parse_types, TypeMode},
        selector::{canonical_signature, event_selector, function_selector, Selector},
    },
};

/// The kind of an interface member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    /// A callable function. Members without a `type` are functions.
    #[default]
    Function,
    /// A log emitted by the contract.
    Event,
    /// The contract constructor.
    Constructor,
    /// The fallback function.
    Fallback,
    /// The plain ether receive function.
    Receive,
    /// A custom error.
    Error,
    /// Anything else, ignored when cataloging.
    #[serde(other)]
    Unknown,
}

/// A single function or event input.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Parameter {
    /// The parameter name, possibly empty.
    #[serde(default)]
    pub name: String,
    /// The declared type tag, e.g. `uint256`, `bytes32[]` or `tuple`.
    #[serde(rename = "type", default)]
    pub ty: String,
    /// Whether an event parameter is stored in a topic rather than in the log data.
    #[serde(default)]
    pub indexed: bool,
    /// The members of a `tuple` parameter.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Parameter>,
}

impl Parameter {
    /// Creates a parameter without components.
    pub fn new(name: impl Into<String>, ty: impl Into<String>, indexed: bool) -> Self {
        Self { name: name.into(), ty: ty.into(), indexed, components: Vec::new() }
    }
}

/// One member of a contract's JSON ABI.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MemberDescriptor {
    /// The member kind.
    #[serde(rename = "type", default)]
    pub kind: MemberKind,
    /// The member name. Functions and events must have one.
    #[serde(default)]
    pub name: Option<String>,
    /// The ordered inputs.
    #[serde(default)]
    pub inputs: Vec<Parameter>,
    /// Anonymous events have no selector topic.
    #[serde(default)]
    pub anonymous: bool,
}

impl MemberDescriptor {
    /// Creates a function descriptor.
    pub fn function(name: impl Into<String>, inputs: Vec<Parameter>) -> Self {
        Self { kind: MemberKind::Function, name: Some(name.into()), inputs, anonymous: false }
    }

    /// Creates an event descriptor.
    pub fn event(name: impl Into<String>, inputs: Vec<Parameter>) -> Self {
        Self { kind: MemberKind::Event, name: Some(name.into()), inputs, anonymous: false }
    }
}

/// A contract's interface description: the list of members of its JSON ABI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct InterfaceDescription(pub Vec<MemberDescriptor>);

impl InterfaceDescription {
    /// Parses a JSON ABI document.
    ///
    /// ```
    /// use etheroll_decoder::InterfaceDescription;
    ///
    /// let description = InterfaceDescription::from_json(
    ///     r#"[{"type":"function","name":"playerRollDice","inputs":[{"name":"rollUnder","type":"uint256"}]}]"#,
    /// ).expect("valid abi");
    /// assert_eq!(description.members().len(), 1);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|e| Error::InvalidDescription(e.to_string()))
    }

    /// The members, in declaration order.
    pub fn members(&self) -> &[MemberDescriptor] {
        &self.0
    }
}

impl From<Vec<MemberDescriptor>> for InterfaceDescription {
    fn from(members: Vec<MemberDescriptor>) -> Self {
        Self(members)
    }
}

/// A cataloged function or event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// The selector the member is routed by.
    pub selector: Selector,
    /// The canonical signature, e.g. `playerRollDice(uint256)`.
    pub signature: String,
    /// The member as described in the interface.
    pub member: MemberDescriptor,
    /// The declared input types.
    pub types: Vec<DynSolType>,
    /// The types used to decode the member's buffer. For events every top-level `bytes`
    /// input is read as `bytes32`, see [`TypeMode::Event`].
    pub decode_types: Vec<DynSolType>,
}

impl CatalogEntry {
    /// The member name.
    pub fn name(&self) -> &str {
        self.member.name.as_deref().unwrap_or_default()
    }

    /// The input parameters.
    pub fn inputs(&self) -> &[Parameter] {
        &self.member.inputs
    }
}

/// An immutable index of a contract's functions and events, keyed by selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: HashMap<Selector, CatalogEntry>,
}

impl Catalog {
    /// Indexes every function and (non anonymous) event of `description`.
    ///
    /// Fails with [`Error::MalformedMember`] if a function or event has no name or an input
    /// type cannot be parsed. Other member kinds are skipped. When two members share a
    /// selector the later one wins.
    pub fn build(description: &InterfaceDescription) -> Result<Self, Error> {
        let mut entries = HashMap::new();

        for member in description.members() {
            let is_event = match member.kind {
                MemberKind::Function => false,
                MemberKind::Event if member.anonymous => {
                    debug!("skipping anonymous event {:?}", member.name);
                    continue;
                }
                MemberKind::Event => true,
                kind => {
                    trace!("skipping {:?} member", kind);
                    continue;
                }
            };

            let name = member.name.as_deref().filter(|name| !name.is_empty()).ok_or_else(|| {
                Error::MalformedMember(format!("{:?} member has no name", member.kind))
            })?;
            let signature = canonical_signature(name, &member.inputs);
            let types = parse_types(&member.inputs, TypeMode::Call)
                .map_err(|e| Error::MalformedMember(format!("{signature}: {e}")))?;
            let (selector, decode_types) = if is_event {
                let decode_types = parse_types(&member.inputs, TypeMode::Event)
                    .map_err(|e| Error::MalformedMember(format!("{signature}: {e}")))?;
                (Selector::Event(event_selector(&signature)), decode_types)
            } else {
                (Selector::Function(function_selector(&signature)), types.clone())
            };

            trace!("cataloged {} as {}", signature, selector);
            let entry =
                CatalogEntry { selector, signature, member: member.clone(), types, decode_types };
            if let Some(previous) = entries.insert(selector, entry) {
                warn!(
                    "selector {} of '{}' collides with a previous member, keeping the later one",
                    selector, previous.signature
                );
            }
        }

        debug!("built catalog with {} entries", entries.len());
        Ok(Self { entries })
    }

    /// Looks up a member by selector.
    pub fn lookup(&self, selector: &Selector) -> Option<&CatalogEntry> {
        self.entries.get(selector)
    }

    /// Looks up a function by its 4-byte selector.
    pub fn function(&self, selector: FixedBytes<4>) -> Option<&CatalogEntry> {
        self.lookup(&Selector::Function(selector))
    }

    /// Looks up an event by its topic-0 selector.
    pub fn event(&self, selector: B256) -> Option<&CatalogEntry> {
        self.lookup(&Selector::Event(selector))
    }

    /// Iterates over every cataloged member, in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    /// Iterates over the cataloged functions.
    pub fn functions(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries().filter(|entry| matches!(entry.selector, Selector::Function(_)))
    }

    /// Iterates over the cataloged events.
    pub fn events(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries().filter(|entry| matches!(entry.selector, Selector::Event(_)))
    }

    /// The number of cataloged members.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roll_dice() -> MemberDescriptor {
        MemberDescriptor::function(
            "playerRollDice",
            vec![Parameter::new("rollUnder", "uint256", false)],
        )
    }

    #[test]
    fn test_build_skips_other_member_kinds() {
        let description = InterfaceDescription::from_json(
            r#"[
                {"type": "constructor", "inputs": []},
                {"type": "fallback"},
                {"type": "function", "name": "totalBets", "inputs": [], "outputs": []},
                {"type": "event", "name": "Anon", "anonymous": true, "inputs": []}
            ]"#,
        )
        .expect("valid abi");

        let catalog = Catalog::build(&description).expect("failed to build catalog");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.entries().next().map(|e| e.signature.as_str()), Some("totalBets()"));
    }

    #[test]
    fn test_member_without_type_is_a_function() {
        let description = InterfaceDescription::from_json(
            r#"[{"name": "playerRollDice", "inputs": [{"name": "rollUnder", "type": "uint256"}]}]"#,
        )
        .expect("valid abi");
        let catalog = Catalog::build(&description).expect("failed to build catalog");

        assert!(catalog.function(function_selector("playerRollDice(uint256)")).is_some());
    }

    #[test]
    fn test_member_without_name_is_malformed() {
        let description = InterfaceDescription::from_json(
            r#"[{"type": "event", "inputs": [{"name": "x", "type": "uint256"}]}]"#,
        )
        .expect("valid abi");

        assert!(matches!(Catalog::build(&description), Err(Error::MalformedMember(_))));
    }

    #[test]
    fn test_unparseable_type_is_malformed() {
        let description: InterfaceDescription = vec![MemberDescriptor::function(
            "roll",
            vec![Parameter::new("x", "uint257", false)],
        )]
        .into();

        assert!(matches!(Catalog::build(&description), Err(Error::MalformedMember(_))));
    }

    #[test]
    fn test_duplicate_selector_keeps_later_member() {
        let mut renamed = roll_dice();
        renamed.inputs[0].name = "chances".to_string();
        let description: InterfaceDescription = vec![roll_dice(), renamed].into();

        let catalog = Catalog::build(&description).expect("failed to build catalog");
        let entry =
            catalog.function(function_selector("playerRollDice(uint256)")).expect("cataloged");

        assert_eq!(catalog.len(), 1);
        assert_eq!(entry.inputs()[0].name, "chances");
    }

    #[test]
    fn test_event_decode_types_read_bytes_as_bytes32() {
        let description: InterfaceDescription = vec![MemberDescriptor::event(
            "LogProof",
            vec![Parameter::new("id", "uint256", true), Parameter::new("proof", "bytes", false)],
        )]
        .into();
        let catalog = Catalog::build(&description).expect("failed to build catalog");
        let entry = catalog.event(event_selector("LogProof(uint256,bytes)")).expect("cataloged");

        assert_eq!(entry.types, vec![DynSolType::Uint(256), DynSolType::Bytes]);
        assert_eq!(entry.decode_types, vec![DynSolType::Uint(256), DynSolType::FixedBytes(32)]);
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        assert!(matches!(
            InterfaceDescription::from_json("{\"abi\": 1"),
            Err(Error::InvalidDescription(_))
        ));
    }
}
