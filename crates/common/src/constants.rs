/// Number of decimal digits ether amounts are rounded to.
pub const ROUND_DIGITS: u32 = 2;

/// The house edge taken by the dice contract on every payout, in percent.
pub const HOUSE_EDGE_PERCENT: f64 = 1.0;

/// Placeholder key accepted by the Etherscan API for unauthenticated, rate-limited requests.
pub const DEFAULT_ETHERSCAN_API_KEY: &str = "YourApiKeyToken";

/// Mainnet chain ID
pub const CHAIN_ID_MAINNET: u64 = 1;
/// Morden testnet chain ID
pub const CHAIN_ID_MORDEN: u64 = 2;
/// Ropsten testnet chain ID
pub const CHAIN_ID_ROPSTEN: u64 = 3;

/// Canonical signature of the event emitted when a bet is placed.
pub const LOG_BET_SIGNATURE: &str =
    "LogBet(bytes32,address,uint256,uint256,uint256,uint256,uint256)";
/// Canonical signature of the event emitted when a bet is resolved.
pub const LOG_RESULT_SIGNATURE: &str =
    "LogResult(uint256,bytes32,address,uint256,uint256,uint256,int256,bytes)";
/// Canonical signature of the function placing a bet.
pub const PLAYER_ROLL_DICE_SIGNATURE: &str = "playerRollDice(uint256)";

/// Number of blocks after a bet within which its result is expected to be logged.
pub const BET_RESOLUTION_BLOCKS: u64 = 100;
