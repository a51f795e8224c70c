//! Integration tests for pairing bets with results.

mod integration_tests {
    use std::sync::Arc;

    use alloy::primitives::{address, b256, Address, B256, U256};
    use etheroll_common::{ether::chain::Chain, utils::time::format_datetime};
    use etheroll_correlator::{
        bet_logs, bets as bets_command, bets_with, error::Error, last_bets_blocks,
        last_bets_transactions, merge, merge_logs, merge_logs_with, merged_logs, result_logs,
        BetRecord, BetsArgsBuilder, BlockRange, MergeArgsBuilder, RawTransaction, ResultRecord,
    };
    use etheroll_decoder::{Catalog, DecodeService, InterfaceDescription, RawLog};

    const ABI: &str = include_str!("../../decode/tests/fixtures/etheroll_abi.json");
    const BET_LOGS: &str = include_str!("../../decode/tests/fixtures/bet_logs.json");
    const RESULT_LOGS: &str = include_str!("../../decode/tests/fixtures/result_logs.json");
    const ORPHAN_RESULT_LOGS: &str =
        include_str!("../../decode/tests/fixtures/orphan_result_logs.json");
    const TRANSACTIONS: &str = include_str!("../../decode/tests/fixtures/transactions.json");

    const PLAYER: Address = address!("46044beaa1e985c67767e04de58181de5daaa00f");
    const CONTRACT: Address = address!("048717Ea892F23Fb0126F00640e2b18072efd9D2");

    const B1: B256 = b256!("15e007148ec621d996c886de0f2b88a03af083aa819e851a51133dc17b6e0e5b");
    const B2: B256 = b256!("14bae6b4711bdc5e3db19983307a92081e2e7c1d45161117bdf7b8b509d1abbe");
    const B3: B256 = b256!("c2997a1bad35841b2c30ca95eea9cb08c7b101bc14d5aa8b1b8a0facea793e05");

    fn fixture(name: &str) -> String {
        format!("{}/../decode/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
    }

    fn catalog() -> Catalog {
        let description = InterfaceDescription::from_json(ABI).expect("valid abi");
        Catalog::build(&description).expect("failed to build catalog")
    }

    fn logs(json: &str) -> Vec<RawLog> {
        serde_json::from_str(json).expect("valid logs")
    }

    fn bets() -> Vec<BetRecord> {
        bet_logs(&catalog(), &logs(BET_LOGS)).expect("failed to read bets")
    }

    fn results() -> Vec<ResultRecord> {
        result_logs(&catalog(), &logs(RESULT_LOGS)).expect("failed to read results")
    }

    fn transactions() -> Vec<RawTransaction> {
        serde_json::from_str(TRANSACTIONS).expect("valid transactions")
    }

    #[test]
    fn test_bet_logs() {
        let bets = bets();
        assert_eq!(bets.len(), 3);

        let first = &bets[0];
        assert_eq!(first.bet_id, B1);
        assert_eq!(first.player, PLAYER);
        assert_eq!(first.roll_under, 2);
        assert_eq!(first.bet_value_ether().expect("valid amount"), 0.45);
        assert_eq!(first.reward_value_ether().expect("valid amount"), 44.55);
        assert_eq!(first.profit_value_ether().expect("valid amount"), 44.1);
        assert_eq!(format_datetime(&first.timestamp), "2018-04-07 00:17:06");
        assert_eq!(
            first.transaction_hash,
            b256!("f363906a9278c4dd300c50a3c9a27900bb85df60596c49f7833c232f2944d1cb")
        );

        let last = &bets[2];
        assert_eq!(last.bet_id, B3);
        assert_eq!(last.roll_under, 14);
        assert_eq!(last.bet_value, U256::from(500_000_000_000_000_000u64));
        assert_eq!(last.bet_value_ether().expect("valid amount"), 0.5);
        assert_eq!(last.reward_value_ether().expect("valid amount"), 3.81);
        assert_eq!(last.profit_value_ether().expect("valid amount"), 3.31);
        assert_eq!(format_datetime(&last.timestamp), "2018-04-07 00:23:46");
    }

    #[test]
    fn test_result_logs() {
        let results = results();
        assert_eq!(results.len(), 2);

        let first = &results[0];
        assert_eq!(first.bet_id, B1);
        assert_eq!(first.player, PLAYER);
        assert_eq!(first.roll_under, 2);
        assert_eq!(first.dice_result, 86);
        assert_eq!(first.bet_value_ether().expect("valid amount"), 0.45);
        assert!(!first.won());
        assert_eq!(format_datetime(&first.timestamp), "2018-04-07 00:17:55");

        assert_eq!(results[1].bet_id, B2);
        assert_eq!(results[1].dice_result, 51);
    }

    #[test]
    fn test_record_logs_skip_other_events() {
        let catalog = catalog();
        let mut mixed = logs(BET_LOGS);
        mixed.extend(logs(RESULT_LOGS));

        assert_eq!(bet_logs(&catalog, &mixed).expect("failed to read bets").len(), 3);
        assert_eq!(result_logs(&catalog, &mixed).expect("failed to read results").len(), 2);
    }

    #[test]
    fn test_record_logs_reject_bad_timestamp() {
        let mut logs = logs(BET_LOGS);
        logs[1].time_stamp = "yesterday".to_string();

        assert!(matches!(bet_logs(&catalog(), &logs), Err(Error::InvalidTimestamp(_))));
    }

    #[test]
    fn test_merge_pairs_by_bet_id() {
        let merged = merge(&bets(), &results());

        let pairs: Vec<(B256, Option<B256>)> = merged
            .iter()
            .map(|record| (record.bet.bet_id, record.result.as_ref().map(|result| result.bet_id)))
            .collect();
        assert_eq!(pairs, vec![(B1, Some(B1)), (B2, Some(B2)), (B3, None)]);

        assert_eq!(merged[0].result.as_ref().map(|result| result.dice_result), Some(86));
        assert_eq!(merged[1].result.as_ref().map(|result| result.dice_result), Some(51));
    }

    #[test]
    fn test_merge_result_order_does_not_matter() {
        let mut results = results();
        results.reverse();

        assert_eq!(merge(&bets(), &results), merge(&bets(), &self::results()));
    }

    #[test]
    fn test_merge_without_results() {
        let merged = merge(&bets(), &[]);

        assert_eq!(merged.len(), 3);
        assert!(merged.iter().all(|record| record.result.is_none()));
    }

    #[test]
    fn test_merge_without_bets() {
        assert!(merge(&[], &results()).is_empty());
    }

    #[test]
    fn test_merge_is_idempotent() {
        let first = merge(&bets(), &results());
        let merged_bets: Vec<BetRecord> = first.iter().map(|record| record.bet.clone()).collect();

        assert_eq!(merge(&merged_bets, &results()), first);
    }

    #[test]
    fn test_merge_last_duplicate_result_wins() {
        let mut results = results();
        let mut duplicate = results[0].clone();
        duplicate.dice_result = 1;
        results.push(duplicate);

        let merged = merge(&bets(), &results);
        let result = merged[0].result.as_ref().expect("bet is resolved");
        assert_eq!(result.dice_result, 1);
        assert!(result.won());
    }

    #[test]
    fn test_merge_drops_orphan_results() {
        let catalog = catalog();
        let mut result_raw = logs(RESULT_LOGS);
        result_raw.extend(logs(ORPHAN_RESULT_LOGS));

        let merged = merged_logs(&catalog, &logs(BET_LOGS), &result_raw).expect("failed to merge");
        assert_eq!(merged.len(), 3);
        assert!(merged.iter().all(|record| {
            record.result.as_ref().map_or(true, |result| result.bet_id == record.bet.bet_id)
        }));
        assert!(merged[2].result.is_none());
    }

    #[test]
    fn test_merged_record_json_and_display() {
        let merged = merge(&bets(), &results());

        let json = merged[0].to_json();
        assert_eq!(json["bet_log"]["bet_id"], B1.to_string());
        assert_eq!(json["bet_log"]["roll_under"], 2);
        assert_eq!(json["bet_result"]["dice_result"], 86);
        assert!(merged[2].to_json()["bet_result"].is_null());

        assert!(merged[0].to_string().ends_with(": rolled 86 (lost)"));
        assert!(merged[2].to_string().ends_with(": pending"));
    }

    #[test]
    fn test_merge_logs_command() {
        let args = MergeArgsBuilder::new()
            .bets(fixture("bet_logs.json"))
            .results(fixture("result_logs.json"))
            .abi(Some(fixture("etheroll_abi.json")))
            .build()
            .expect("failed to build args");

        let result = merge_logs(args).expect("failed to merge");
        assert_eq!(result.records.len(), 3);
        assert_eq!(result.pending(), 1);
        assert_eq!(result.to_json().as_array().map(Vec::len), Some(3));
    }

    #[test]
    fn test_merge_logs_command_without_abi() {
        let args = MergeArgsBuilder::new()
            .bets(fixture("bet_logs.json"))
            .results(fixture("result_logs.json"))
            .build()
            .expect("failed to build args");

        assert!(merge_logs(args).is_err());
    }

    #[test]
    fn test_last_bets_transactions() {
        let bets = last_bets_transactions(&catalog(), CONTRACT, &transactions())
            .expect("failed to read transactions");

        let hashes: Vec<B256> = bets.iter().map(|bet| bet.transaction_hash).collect();
        assert_eq!(
            hashes,
            vec![
                b256!("0440f1013a5eafd88f16be6b5612b6e051a4eb1b0b91a160c680295e7fab5bfe"),
                b256!("72def66d60ecc85268c714e71929953ef94fd4fae37632a5f56ea49bee44dd59"),
                b256!("f363906a9278c4dd300c50a3c9a27900bb85df60596c49f7833c232f2944d1cb"),
            ]
        );

        let first = &bets[0];
        assert_eq!(first.block_number, 5394094);
        assert_eq!(first.roll_under, 14);
        assert_eq!(first.bet_value_ether().expect("valid amount"), 0.5);
        assert_eq!(format_datetime(&first.timestamp), "2018-04-07 00:23:46");
        assert_eq!(first.to_json()["block_number"], 5394094);

        assert_eq!(bets[2].roll_under, 2);
        assert_eq!(bets[2].bet_value_ether().expect("valid amount"), 0.45);
    }

    #[test]
    fn test_last_bets_transactions_skips_other_calls() {
        let mut transactions = transactions();
        // minBet() and an empty input, both sent to the contract
        transactions[0].to = CONTRACT.to_string();
        transactions[0].input = "0x9619367d".to_string();
        let mut plain = transactions[1].clone();
        plain.input = "0x".to_string();
        transactions.push(plain);

        let bets = last_bets_transactions(&catalog(), CONTRACT, &transactions)
            .expect("failed to read transactions");
        assert_eq!(bets.len(), 3);
    }

    #[test]
    fn test_last_bets_transactions_other_contract() {
        let ropsten = address!("e12c6dEb59f37011d2D9FdeC77A6f1A8f3B8B1e8");

        let bets = last_bets_transactions(&catalog(), ropsten, &transactions())
            .expect("failed to read transactions");
        assert!(bets.is_empty());
    }

    #[test]
    fn test_last_bets_transactions_rejects_bad_block_number() {
        let mut transactions = transactions();
        transactions[1].block_number = "latest".to_string();

        assert!(matches!(
            last_bets_transactions(&catalog(), CONTRACT, &transactions),
            Err(Error::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_last_bets_blocks() {
        let bets = last_bets_transactions(&catalog(), CONTRACT, &transactions())
            .expect("failed to read transactions");

        assert_eq!(
            last_bets_blocks(&bets),
            Some(BlockRange { from_block: 5394067, to_block: 5394194 })
        );
        assert_eq!(
            last_bets_blocks(&bets[..1]),
            Some(BlockRange { from_block: 5394093, to_block: 5394194 })
        );
        assert_eq!(last_bets_blocks(&[]), None);
    }

    #[test]
    fn test_bets_command() {
        let args = BetsArgsBuilder::new()
            .transactions(fixture("transactions.json"))
            .contract(CONTRACT.to_string())
            .abi(Some(fixture("etheroll_abi.json")))
            .build()
            .expect("failed to build args");

        let result = bets_command(args).expect("failed to read bets");
        assert_eq!(result.bets.len(), 3);
        assert_eq!(result.blocks, Some(BlockRange { from_block: 5394067, to_block: 5394194 }));
        assert_eq!(result.to_json()["blocks"]["to_block"], 5394194);
        assert!(result.bets[0].to_string().contains("block 5394094, bet 0.50 ETH, roll under 14"));
    }

    #[test]
    fn test_bets_command_requires_contract() {
        let args = BetsArgsBuilder::new()
            .transactions(fixture("transactions.json"))
            .abi(Some(fixture("etheroll_abi.json")))
            .build()
            .expect("failed to build args");

        assert!(matches!(bets_command(args), Err(Error::Eyre(_))));
    }

    #[test]
    fn test_commands_share_the_contract_catalog() {
        let service = DecodeService::new(Chain::Mainnet);
        let args = MergeArgsBuilder::new()
            .bets(fixture("bet_logs.json"))
            .results(fixture("result_logs.json"))
            .abi(Some(fixture("etheroll_abi.json")))
            .build()
            .expect("failed to build args");

        merge_logs_with(&service, args).expect("failed to merge");
        let cached = service.cached_catalog(&CONTRACT).expect("readable").expect("cached catalog");

        // the mainnet deployment's catalog is cached, so the ABI is not read again
        let args = BetsArgsBuilder::new()
            .transactions(fixture("transactions.json"))
            .contract(CONTRACT.to_string())
            .build()
            .expect("failed to build args");
        let result = bets_with(&service, args).expect("failed to read bets");
        assert_eq!(result.bets.len(), 3);

        let reused = service.cached_catalog(&CONTRACT).expect("readable").expect("cached catalog");
        assert!(Arc::ptr_eq(&cached, &reused));
    }

    #[test]
    fn test_merge_logs_command_without_contract_is_not_cached() {
        let service = DecodeService::new(Chain::Morden);
        let args = MergeArgsBuilder::new()
            .bets(fixture("bet_logs.json"))
            .results(fixture("result_logs.json"))
            .abi(Some(fixture("etheroll_abi.json")))
            .build()
            .expect("failed to build args");

        let result = merge_logs_with(&service, args).expect("failed to merge");
        assert_eq!(result.records.len(), 3);
        assert!(service.cached_catalog(&CONTRACT).expect("readable").is_none());
    }
}
