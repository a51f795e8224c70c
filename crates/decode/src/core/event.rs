use alloy::primitives::B256;
use tracing::{debug, trace};

use crate::{
    catalog::Catalog,
    error::Error,
    interfaces::{DecodedEvent, RawLog},
    utils::abi,
};

/// Decodes a log from its topics and data.
///
/// The first topic selects the event. The decoded buffer is the remaining topics followed by
/// `data`, so indexed and non-indexed parameters are read in declaration order, see
/// [`crate::TypeMode::Event`]. Fails with [`Error::UnknownSelector`] when there is no topic
/// or it matches no cataloged event.
pub fn decode_event(catalog: &Catalog, topics: &[B256], data: &[u8]) -> Result<DecodedEvent, Error> {
    let (selector, indexed) = topics
        .split_first()
        .ok_or_else(|| Error::UnknownSelector("log has no topics".to_string()))?;
    let entry = catalog.event(*selector).ok_or_else(|| {
        debug!("no event matches topic {}", selector);
        Error::UnknownSelector(selector.to_string())
    })?;

    let mut buffer = Vec::with_capacity(indexed.len() * 32 + data.len());
    for topic in indexed {
        buffer.extend_from_slice(topic.as_slice());
    }
    buffer.extend_from_slice(data);
    trace!("decoding {} from a {} byte buffer", entry.signature, buffer.len());

    let values = abi::decode(&entry.decode_types, &buffer)?;
    Ok(DecodedEvent::new(entry, *selector, values))
}

/// Decodes an explorer log, see [`decode_event`].
pub fn decode_raw_log(catalog: &Catalog, log: &RawLog) -> Result<DecodedEvent, Error> {
    decode_event(catalog, &log.topics()?, &log.data()?)
}
