pub(crate) mod call;
pub(crate) mod event;
pub(crate) mod service;

use std::time::Instant;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    error::Error,
    interfaces::{DecodeArgs, DecodedCall, DecodedEvent, EventArgs},
};

use self::service::DecodeService;

/// The result of the decode command.
#[derive(Debug, Clone)]
pub struct DecodeResult {
    /// The decoded call.
    pub decoded: DecodedCall,
}

impl DecodeResult {
    /// Prints the decoded call.
    pub fn display(&self) {
        println!("{}", self.decoded);
    }

    /// The decoded call as JSON.
    pub fn to_json(&self) -> Value {
        self.decoded.to_json()
    }
}

/// The result of the log command.
#[derive(Debug, Clone)]
pub struct EventsResult {
    /// The decoded logs, in input order.
    pub events: Vec<DecodedEvent>,
    /// The number of logs skipped because their event is not in the ABI.
    pub skipped: usize,
}

impl EventsResult {
    /// Prints every decoded log.
    pub fn display(&self) {
        for event in &self.events {
            println!("{event}\n");
        }
    }

    /// The decoded logs as a JSON array.
    pub fn to_json(&self) -> Value {
        Value::Array(self.events.iter().map(DecodedEvent::to_json).collect())
    }
}

/// Decodes the calldata given in `args` with the contract ABI.
pub fn decode(args: DecodeArgs) -> Result<DecodeResult, Error> {
    decode_with(&DecodeService::default(), args)
}

/// Decodes the calldata given in `args`, with the catalog `service` holds for the contract.
pub fn decode_with(service: &DecodeService, args: DecodeArgs) -> Result<DecodeResult, Error> {
    let start_time = Instant::now();

    let catalog = service.catalog_from_file(args.get_contract()?, args.abi.as_deref())?;
    debug!("loading catalog took {:?}", start_time.elapsed());

    let decoded = call::decode_call(&catalog, &args.target)?;

    info!("decoded call to {}", decoded.signature);
    debug!("decoding took {:?}", start_time.elapsed());
    Ok(DecodeResult { decoded })
}

/// Decodes every log of the list given in `args`.
///
/// A log whose first topic matches no event fails the whole run, unless
/// [`EventArgs::skip_unknown`] is set, in which case it is skipped.
pub fn decode_events(args: EventArgs) -> Result<EventsResult, Error> {
    decode_events_with(&DecodeService::default(), args)
}

/// Decodes every log of the list given in `args`, with the catalog `service` holds for the
/// contract. See [`decode_events`].
pub fn decode_events_with(service: &DecodeService, args: EventArgs) -> Result<EventsResult, Error> {
    let start_time = Instant::now();

    let catalog = service.catalog_from_file(args.get_contract()?, args.abi.as_deref())?;
    let logs = args.get_logs()?;
    debug!("loading {} logs took {:?}", logs.len(), start_time.elapsed());

    let mut events = Vec::with_capacity(logs.len());
    let mut skipped = 0;
    for log in &logs {
        match event::decode_raw_log(&catalog, log) {
            Ok(event) => events.push(event),
            Err(Error::UnknownSelector(selector)) if args.skip_unknown => {
                warn!("skipping log of transaction {}: unknown event {}", log.transaction_hash, selector);
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    info!("decoded {} logs, skipped {}", events.len(), skipped);
    debug!("decoding took {:?}", start_time.elapsed());
    Ok(EventsResult { events, skipped })
}
