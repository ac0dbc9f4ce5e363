//! Constants used in the deploy scripts

use alloy::primitives::U256;

/// Default RPC endpoint, a local development node
pub const DEFAULT_RPC: &str = "http://127.0.0.1:8545";

/// Default directory holding the compiled contract artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "build/contracts";

/// Default file the deployed addresses are written to
pub const DEFAULT_OUTPUT_FILE: &str = "deployed.json";

/// Artifact name of the block height contract
pub const BLOCK_HEIGHT_CONTRACT: &str = "Ethereum934";

/// Artifact name of the token contract
pub const TOKEN_CONTRACT: &str = "BismuthCoin";

/// Index, in the node account list, of the account given to the block height contract
pub const BLOCK_HEIGHT_ACCOUNT_INDEX: usize = 9;

/// Value sent along the token contract creation, in wei (15 ether)
pub const TOKEN_DEPLOY_VALUE: U256 = U256::from_limbs([15_000_000_000_000_000_000, 0, 0, 0]);
