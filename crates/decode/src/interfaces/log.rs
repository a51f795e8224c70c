use alloy::primitives::B256;
use serde::{Deserialize, Serialize};

use crate::{error::Error, utils::parse_hex};

/// A log entry as returned by the block explorer's `getLogs` endpoint. Every field is kept
/// as the hex (or decimal) string the explorer sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLog {
    /// The emitting contract.
    #[serde(default)]
    pub address: String,
    /// The topics, with or without a `0x` prefix.
    pub topics: Vec<String>,
    /// The non-indexed log data.
    #[serde(default)]
    pub data: String,
    /// The hash of the transaction that emitted the log.
    #[serde(default)]
    pub transaction_hash: String,
    /// The block timestamp, decimal or `0x` hex.
    #[serde(default)]
    pub time_stamp: String,
    /// The block number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<String>,
    /// The log index within the block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_index: Option<String>,
}

impl RawLog {
    /// Parses the topics into 32-byte words.
    pub fn topics(&self) -> Result<Vec<B256>, Error> {
        self.topics.iter().map(|topic| parse_word(topic)).collect()
    }

    /// Parses the log data.
    pub fn data(&self) -> Result<Vec<u8>, Error> {
        parse_hex(&self.data)
    }

    /// Parses the transaction hash.
    pub fn transaction_hash(&self) -> Result<B256, Error> {
        parse_word(&self.transaction_hash)
    }
}

fn parse_word(s: &str) -> Result<B256, Error> {
    let bytes = parse_hex(s)?;
    if bytes.len() != 32 {
        return Err(Error::MalformedEncoding(format!(
            "expected a 32 byte word, got {} bytes: '{}'",
            bytes.len(),
            s
        )));
    }
    Ok(B256::from_slice(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_explorer_log() {
        let log: RawLog = serde_json::from_str(
            r#"{
                "address": "0x048717ea892f23fb0126f00640e2b18072efd9d2",
                "topics": ["0x8dd0b145385d04711e29558ceab40b456976a2b9a7d648cc1bcd416161bf97b9"],
                "data": "0x",
                "blockNumber": "0x524e8e",
                "timeStamp": "0x5ac80e33",
                "gasPrice": "0x2540be400",
                "logIndex": "0x2a",
                "transactionHash": "0x3505de688dc20748eb5f6b3efd6e6d366ea7f0737b4ab17035c6b60ab4329f2a"
            }"#,
        )
        .expect("valid log");

        assert_eq!(log.time_stamp, "0x5ac80e33");
        assert_eq!(log.log_index.as_deref(), Some("0x2a"));
        assert_eq!(log.topics().expect("valid topics").len(), 1);
        assert!(log.data().expect("valid data").is_empty());
        assert_eq!(
            log.transaction_hash().expect("valid hash").to_string(),
            "0x3505de688dc20748eb5f6b3efd6e6d366ea7f0737b4ab17035c6b60ab4329f2a"
        );
    }

    #[test]
    fn test_topics_without_prefix_and_mixed_case() {
        let log = RawLog {
            topics: vec![
                "8DD0B145385D04711E29558CEAB40B456976A2B9A7D648CC1BCD416161BF97B9".to_string()
            ],
            ..Default::default()
        };

        assert_eq!(
            log.topics().expect("valid topics")[0].to_string(),
            "0x8dd0b145385d04711e29558ceab40b456976a2b9a7d648cc1bcd416161bf97b9"
        );
    }

    #[test]
    fn test_short_topic_is_rejected() {
        let log = RawLog { topics: vec!["0x1234".to_string()], ..Default::default() };
        assert!(matches!(log.topics(), Err(Error::MalformedEncoding(_))));

        let log = RawLog { topics: vec!["0xzz".to_string()], ..Default::default() };
        assert!(matches!(log.topics(), Err(Error::InvalidHex(_))));
    }
}
