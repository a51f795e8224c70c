use std::fmt::{self, Display};

use alloy::primitives::{Address, B256};
use etheroll_common::constants::{LOG_BET_SIGNATURE, LOG_RESULT_SIGNATURE};
use etheroll_decoder::event_selector;

/// How two topic constraints of a [`LogFilter`] combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicOperator {
    /// Both topics must match.
    And,
    /// Either topic must match.
    Or,
}

impl Display for TopicOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopicOperator::And => write!(f, "and"),
            TopicOperator::Or => write!(f, "or"),
        }
    }
}

/// A topic filter for the block explorer's `getLogs` endpoint.
///
/// ```
/// use alloy::primitives::address;
/// use etheroll_correlator::LogFilter;
///
/// let filter = LogFilter::bets_of(address!("46044beaa1e985c67767e04de58181de5daaa00f"));
/// let pairs = filter.pairs();
///
/// assert_eq!(pairs[0].0, "topic0");
/// assert_eq!(pairs[1].0, "topic2");
/// assert_eq!(pairs[2], ("topic0_2_opr".to_string(), "and".to_string()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFilter {
    topics: [Option<B256>; 4],
    operators: Vec<(usize, usize, TopicOperator)>,
}

impl LogFilter {
    /// A filter matching no particular topic.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires topic `index` (0 to 3) to equal `value`. Out of range indexes are ignored.
    pub fn topic(mut self, index: usize, value: B256) -> Self {
        if let Some(topic) = self.topics.get_mut(index) {
            *topic = Some(value);
        }
        self
    }

    /// Sets how the constraints on topics `a` and `b` combine.
    pub fn operator(mut self, a: usize, b: usize, operator: TopicOperator) -> Self {
        self.operators.push((a.min(b), a.max(b), operator));
        self
    }

    /// The `LogBet` events of `player`, whose address is the second indexed parameter.
    pub fn bets_of(player: Address) -> Self {
        Self::new()
            .topic(0, event_selector(LOG_BET_SIGNATURE))
            .topic(2, player.into_word())
            .operator(0, 2, TopicOperator::And)
    }

    /// The `LogResult` events of `player`, whose address is the third indexed parameter.
    pub fn results_of(player: Address) -> Self {
        Self::new()
            .topic(0, event_selector(LOG_RESULT_SIGNATURE))
            .topic(3, player.into_word())
            .operator(0, 3, TopicOperator::And)
    }

    /// The constrained topics, by index.
    pub fn topics(&self) -> &[Option<B256>; 4] {
        &self.topics
    }

    /// The query parameters: `topicN` for every set topic, in index order, then the
    /// `topicA_B_opr` operators in the order they were added.
    pub fn pairs(&self) -> Vec<(String, String)> {
        self.topics
            .iter()
            .enumerate()
            .filter_map(|(i, topic)| topic.map(|topic| (format!("topic{i}"), topic.to_string())))
            .chain(
                self.operators
                    .iter()
                    .map(|(a, b, operator)| (format!("topic{a}_{b}_opr"), operator.to_string())),
            )
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;

    const PLAYER: Address = address!("46044beaa1e985c67767e04de58181de5daaa00f");

    fn pair(key: &str, value: &str) -> (String, String) {
        (key.to_string(), value.to_string())
    }

    #[test]
    fn test_bets_of() {
        assert_eq!(
            LogFilter::bets_of(PLAYER).pairs(),
            vec![
                pair("topic0", "0x56b3f1a6cd856076d6f8adbf8170c43a0b0f532fc5696a2699a0e0cabc704163"),
                pair("topic2", "0x00000000000000000000000046044beaa1e985c67767e04de58181de5daaa00f"),
                pair("topic0_2_opr", "and"),
            ]
        );
    }

    #[test]
    fn test_results_of() {
        assert_eq!(
            LogFilter::results_of(PLAYER).pairs(),
            vec![
                pair("topic0", "0x8dd0b145385d04711e29558ceab40b456976a2b9a7d648cc1bcd416161bf97b9"),
                pair("topic3", "0x00000000000000000000000046044beaa1e985c67767e04de58181de5daaa00f"),
                pair("topic0_3_opr", "and"),
            ]
        );
    }

    #[test]
    fn test_custom_filter() {
        let filter = LogFilter::new()
            .topic(1, B256::repeat_byte(1))
            .topic(7, B256::repeat_byte(7))
            .operator(2, 1, TopicOperator::Or);

        assert_eq!(filter.topics().iter().filter(|t| t.is_some()).count(), 1);
        assert_eq!(filter.pairs()[1], pair("topic1_2_opr", "or"));
    }
}
