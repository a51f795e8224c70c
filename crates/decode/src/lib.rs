//! Decodes calldata and event logs of the Etheroll dice contract.
//!
//! An [`InterfaceDescription`] (the contract's JSON ABI) is indexed once into a [`Catalog`]
//! keyed by selector. Calls are routed by their 4-byte prefix ([`decode_call`]), logs by
//! their first topic ([`decode_event`]). [`DecodeService`] memoizes catalogs per contract
//! for the chain it is pointed at.

pub mod error;

mod catalog;
mod core;
mod interfaces;
mod utils;

// re-export the public interface
pub use catalog::{Catalog, CatalogEntry, InterfaceDescription, MemberDescriptor, MemberKind, Parameter};
pub use core::{
    call::{decode_call, decode_call_bytes},
    decode, decode_events, decode_events_with, decode_with,
    event::{decode_event, decode_raw_log},
    service::DecodeService,
    DecodeResult, EventsResult,
};
pub use interfaces::{
    parse_contract, read_description, read_logs, DecodeArgs, DecodeArgsBuilder, DecodedCall,
    DecodedEvent, DecodedParam, DecodedParams, EventArgs, EventArgsBuilder, RawLog,
};
pub use utils::{
    abi::{decode as decode_values, parse_type, parse_types, TypeMode, TypedValue},
    selector::{canonical_signature, canonical_type, event_selector, function_selector, Selector},
};
