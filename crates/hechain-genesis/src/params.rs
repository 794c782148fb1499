use hechain_core::chain::{BlockStakeOutput, ChainConstants, CoinOutput};
use hechain_core::constants::{HET_COIN_PRECISION, UNLOCK_HASH_STR_LEN};
use hechain_core::error::HechainError;
use hechain_core::transaction::TransactionVersion;
use hechain_core::types::{Currency, CurrencyUnits, NetAddress, Rational};
use hechain_core::unlock::{UnlockCondition, UnlockHash};

// ── Genesis addresses ────────────────────────────────────────────────────────

/// Receives the testnet genesis coins and block stakes.
pub const TESTNET_GENESIS_ADDRESS: &str =
    "014dd1a21bbd646f572a08f53cbc248efcf7df7af15c7bbb0eaa207093934760a5f359b551bc16";

/// Receives the devnet genesis coins and block stakes. Belongs to the wallet
/// with the public development mnemonic:
///
/// carbon boss inject cover mountain fetch fiber fit tornado cloth wing
/// dinosaur proof joy intact fabric thumb rebel borrow poet chair network
/// expire else
pub const DEVNET_GENESIS_ADDRESS: &str =
    "015a080a9259b9d4aaa550e2156f49b1a79a64c7ea463d810d4493e8242e6791584fbdac553e6f";

/// Every hard-coded address literal, checked by [`verify_genesis_literals`].
pub const GENESIS_ADDRESS_LITERALS: [&str; 2] = [TESTNET_GENESIS_ADDRESS, DEVNET_GENESIS_ADDRESS];

const _: () = assert!(TESTNET_GENESIS_ADDRESS.len() == UNLOCK_HASH_STR_LEN);
const _: () = assert!(DEVNET_GENESIS_ADDRESS.len() == UNLOCK_HASH_STR_LEN);

// ── Shared values ────────────────────────────────────────────────────────────

/// September 5th, 2018 @ 8:00am UTC.
pub const GENESIS_TIMESTAMP: u64 = 1_536_134_400;

/// 1 block per 2 minutes on average.
pub const TESTNET_BLOCK_FREQUENCY: u64 = 120;

/// Coins minted at genesis on every network.
pub const GENESIS_COIN_SUPPLY: u64 = 100 * 1000 * 1000;

/// Block stakes allocated at genesis on every network.
pub const GENESIS_BLOCK_STAKES: u64 = 3_000;

/// Currency units used by all Human Energy networks: 1 HET = 10^9 units.
pub fn currency_units() -> CurrencyUnits {
    CurrencyUnits::with_precision(HET_COIN_PRECISION)
}

/// Decode one of the address literals above. A failure means the binary was
/// built with a broken constant, so the error names the literal.
pub fn unlock_hash_from_literal(literal: &str) -> Result<UnlockHash, HechainError> {
    literal
        .parse()
        .map_err(|e: HechainError| HechainError::MalformedGenesisLiteral {
            literal: literal.to_string(),
            reason: e.to_string(),
        })
}

/// Decode every genesis address literal once. Binaries call this before any
/// other initialisation so a broken constant fails loudly at startup instead
/// of deep inside parameter construction.
pub fn verify_genesis_literals() -> Result<(), HechainError> {
    for literal in GENESIS_ADDRESS_LITERALS {
        unlock_hash_from_literal(literal)?;
    }
    Ok(())
}

/// 100M coins and 3K block stakes, all to `address`.
fn genesis_allocations(
    units: &CurrencyUnits,
    address: &str,
) -> Result<(Vec<CoinOutput>, Vec<BlockStakeOutput>), HechainError> {
    let condition = UnlockCondition::UnlockHash(unlock_hash_from_literal(address)?);
    let coins = vec![CoinOutput {
        value: units.coins(GENESIS_COIN_SUPPLY)?,
        condition: condition.clone(),
    }];
    let block_stakes = vec![BlockStakeOutput {
        value: Currency::from_u64(GENESIS_BLOCK_STAKES),
        condition,
    }];
    Ok((coins, block_stakes))
}

// ── Testnet ──────────────────────────────────────────────────────────────────

/// Explicitly sets all the constants for the genesis block of the testnet.
pub fn testnet_genesis() -> Result<ChainConstants, HechainError> {
    let mut cfg = ChainConstants::baseline();

    cfg.currency_units = currency_units();

    cfg.default_transaction_version = TransactionVersion::ONE;
    cfg.genesis_transaction_version = TransactionVersion::ONE;

    // 2 minute block time
    cfg.block_frequency = TESTNET_BLOCK_FREQUENCY;

    // Payouts take roughly 1 day to mature.
    cfg.maturity_delay = 720;

    cfg.genesis_timestamp = GENESIS_TIMESTAMP;

    // 1000 block window for difficulty
    cfg.target_window = 1_000;

    cfg.max_adjustment_up = Rational::new(25, 10);
    cfg.max_adjustment_down = Rational::new(10, 25);

    cfg.future_threshold = 60 * 60; // 1 hour
    cfg.extreme_future_threshold = 2 * 60 * 60; // 2 hours

    cfg.stake_modifier_delay = 2_000;

    // Block stakes can be used roughly 1 minute after receiving
    cfg.block_stake_aging = 1 << 6;

    cfg.block_creator_fee = cfg.currency_units.coins(10)?;

    // 0.1 coin
    cfg.minimum_transaction_fee = cfg.currency_units.one_coin.div64(10)?;

    let (coins, block_stakes) = genesis_allocations(&cfg.currency_units, TESTNET_GENESIS_ADDRESS)?;
    cfg.genesis_coin_distribution = coins;
    cfg.genesis_block_stake_allocation = block_stakes;

    Ok(cfg)
}

/// Testnet bootstrap node addresses. None are published yet.
pub fn testnet_bootstrap_peers() -> Vec<NetAddress> {
    Vec::new()
}

// ── Devnet ───────────────────────────────────────────────────────────────────

/// Explicitly sets all the constants for the genesis block of the devnet.
pub fn devnet_genesis() -> Result<ChainConstants, HechainError> {
    let mut cfg = ChainConstants::baseline();

    cfg.currency_units = currency_units();

    // no need to keep v0 as genesis transaction version for the dev network
    cfg.default_transaction_version = TransactionVersion::ONE;
    cfg.genesis_transaction_version = TransactionVersion::ONE;

    // 12 seconds: slow enough for developers to see each block,
    // fast enough that blocks don't waste time
    cfg.block_frequency = 12;

    // 120 seconds before a delayed output matures
    cfg.maturity_delay = 10;
    cfg.median_timestamp_window = 11;

    cfg.genesis_timestamp = GENESIS_TIMESTAMP;

    // difficulty is adjusted based on the prior 20 blocks
    cfg.target_window = 20;

    // difficulty adjusts quickly
    cfg.max_adjustment_up = Rational::new(120, 100);
    cfg.max_adjustment_down = Rational::new(100, 120);

    cfg.future_threshold = 2 * 60; // 2 minutes
    cfg.extreme_future_threshold = 4 * 60; // 4 minutes

    cfg.stake_modifier_delay = 2_000;

    cfg.block_stake_aging = 1 << 6;

    cfg.block_creator_fee = cfg.currency_units.coins(10)?;

    cfg.minimum_transaction_fee = cfg.currency_units.coins(1)?;

    let (coins, block_stakes) = genesis_allocations(&cfg.currency_units, DEVNET_GENESIS_ADDRESS)?;
    cfg.genesis_coin_distribution = coins;
    cfg.genesis_block_stake_allocation = block_stakes;

    Ok(cfg)
}
