use serde::{Deserialize, Serialize};

use crate::constants::{
    BASELINE_COIN_PRECISION, BLOCK_SIZE_LIMIT, CHAIN_NAME, CHAIN_VERSION, COIN_UNIT,
    PROTOCOL_VERSION,
};
use crate::error::HechainError;
use crate::transaction::TransactionVersion;
use crate::types::{BlockHeight, Currency, CurrencyUnits, Rational, Timestamp};
use crate::unlock::UnlockCondition;

// ── Genesis outputs ──────────────────────────────────────────────────────────

/// Coins created in the genesis block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinOutput {
    pub value: Currency,
    pub condition: UnlockCondition,
}

/// Block stakes created in the genesis block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockStakeOutput {
    pub value: Currency,
    pub condition: UnlockCondition,
}

// ── ChainConstants ───────────────────────────────────────────────────────────

/// Every constant a node needs to agree on the genesis block and the rules
/// that follow from it. One instance exists per network.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChainConstants {
    /// Maximum serialized block size in bytes.
    pub block_size_limit: u64,
    /// Target seconds between blocks.
    pub block_frequency: BlockHeight,
    /// Blocks a payout waits before it can be spent.
    pub maturity_delay: BlockHeight,
    /// Blocks used to compute the median timestamp.
    pub median_timestamp_window: u64,
    pub genesis_timestamp: Timestamp,
    /// Blocks over which the difficulty target is recomputed.
    pub target_window: BlockHeight,
    pub max_adjustment_up: Rational,
    pub max_adjustment_down: Rational,
    /// Seconds into the future a block timestamp may be before it is delayed.
    pub future_threshold: Timestamp,
    /// Seconds into the future after which a block is rejected outright.
    pub extreme_future_threshold: Timestamp,
    pub stake_modifier_delay: u64,
    /// Seconds before received block stakes may be used to create blocks.
    pub block_stake_aging: u64,
    pub block_creator_fee: Currency,
    pub minimum_transaction_fee: Currency,
    pub default_transaction_version: TransactionVersion,
    pub genesis_transaction_version: TransactionVersion,
    pub currency_units: CurrencyUnits,
    pub genesis_coin_distribution: Vec<CoinOutput>,
    pub genesis_block_stake_allocation: Vec<BlockStakeOutput>,
}

impl ChainConstants {
    /// The protocol's default table. Networks start from here and override
    /// what they need; on its own it has no genesis allocations and will not
    /// pass [`ChainConstants::validate`].
    pub fn baseline() -> Self {
        let units = CurrencyUnits::with_precision(BASELINE_COIN_PRECISION);
        Self {
            block_size_limit: BLOCK_SIZE_LIMIT,
            block_frequency: 600,
            maturity_delay: 144,
            median_timestamp_window: 11,
            genesis_timestamp: 1_424_139_000,
            target_window: 1_000,
            max_adjustment_up: Rational::new(25, 10),
            max_adjustment_down: Rational::new(10, 25),
            future_threshold: 3 * 60 * 60,
            extreme_future_threshold: 5 * 60 * 60,
            stake_modifier_delay: 2_000,
            block_stake_aging: 1 << 17,
            // 10 and 1 baseline coins; 10^25 cannot overflow u128.
            block_creator_fee: Currency::new(10 * units.one_coin.units()),
            minimum_transaction_fee: units.one_coin,
            default_transaction_version: TransactionVersion::ONE,
            genesis_transaction_version: TransactionVersion::ZERO,
            currency_units: units,
            genesis_coin_distribution: Vec::new(),
            genesis_block_stake_allocation: Vec::new(),
        }
    }

    /// Total coins created at genesis.
    pub fn genesis_coin_supply(&self) -> Result<Currency, HechainError> {
        Currency::sum(self.genesis_coin_distribution.iter().map(|o| &o.value))
    }

    /// Total block stakes created at genesis.
    pub fn genesis_block_stake_supply(&self) -> Result<Currency, HechainError> {
        Currency::sum(self.genesis_block_stake_allocation.iter().map(|o| &o.value))
    }

    /// Check the internal consistency of the table. Run once at startup,
    /// before the constants are handed to anything else.
    pub fn validate(&self) -> Result<(), HechainError> {
        let fail = |msg: &str| Err(HechainError::InvalidChainConstants(msg.to_string()));

        if self.block_size_limit == 0 {
            return fail("block size limit must be positive");
        }
        if self.block_frequency == 0 {
            return fail("block frequency must be positive");
        }
        if self.maturity_delay == 0 {
            return fail("maturity delay must be positive");
        }
        if self.median_timestamp_window == 0 {
            return fail("median timestamp window must be positive");
        }
        if self.target_window == 0 {
            return fail("target window must be positive");
        }
        if !self.max_adjustment_up.is_valid() || !self.max_adjustment_up.greater_than_one() {
            return fail("max adjustment up must be greater than one");
        }
        if !self.max_adjustment_down.is_valid() || !self.max_adjustment_down.less_than_one() {
            return fail("max adjustment down must be less than one");
        }
        if self.future_threshold >= self.extreme_future_threshold {
            return fail("future threshold must be below the extreme future threshold");
        }
        if self.currency_units.one_coin.is_zero() {
            return fail("one coin must be worth at least one unit");
        }
        if self.genesis_coin_distribution.is_empty() {
            return fail("genesis coin distribution is empty");
        }
        if self.genesis_block_stake_allocation.is_empty() {
            return fail("genesis block stake allocation is empty");
        }
        if self.genesis_coin_distribution.iter().any(|o| o.value.is_zero()) {
            return fail("genesis coin output with zero value");
        }
        if self
            .genesis_block_stake_allocation
            .iter()
            .any(|o| o.value.is_zero())
        {
            return fail("genesis block stake output with zero value");
        }
        self.genesis_coin_supply()?;
        self.genesis_block_stake_supply()?;
        Ok(())
    }
}

// ── BlockchainInfo ───────────────────────────────────────────────────────────

/// Naming and versioning of a running chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockchainInfo {
    pub name: String,
    pub network_name: String,
    pub coin_unit: String,
    pub chain_version: semver::Version,
    pub protocol_version: semver::Version,
}

impl BlockchainInfo {
    /// HEChain naming on the given network. The version strings are
    /// compile-time constants; a malformed one is a build defect.
    pub fn hechain(network_name: &str) -> Result<Self, HechainError> {
        let parse = |v: &str| {
            semver::Version::parse(v)
                .map_err(|e| HechainError::InvalidChainConstants(format!("version {v:?}: {e}")))
        };
        Ok(Self {
            name: CHAIN_NAME.to_string(),
            network_name: network_name.to_string(),
            coin_unit: COIN_UNIT.to_string(),
            chain_version: parse(CHAIN_VERSION)?,
            protocol_version: parse(PROTOCOL_VERSION)?,
        })
    }

    /// Chain name with its first letter upper-cased, for banners.
    pub fn title_name(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

// ── DaemonConstants ──────────────────────────────────────────────────────────

/// Flattened view of [`BlockchainInfo`] and [`ChainConstants`] that a daemon
/// publishes and a client bootstraps its configuration from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DaemonConstants {
    pub chain_info: BlockchainInfo,
    pub genesis_timestamp: Timestamp,
    pub block_size_limit: u64,
    pub block_frequency: BlockHeight,
    pub future_threshold: Timestamp,
    pub extreme_future_threshold: Timestamp,
    pub block_stake_aging: u64,
    pub block_creator_fee: Currency,
    pub minimum_transaction_fee: Currency,
    pub maturity_delay: BlockHeight,
    pub median_timestamp_window: u64,
    pub target_window: BlockHeight,
    pub max_adjustment_up: Rational,
    pub max_adjustment_down: Rational,
    pub one_coin: Currency,
    pub default_transaction_version: TransactionVersion,
}

impl DaemonConstants {
    pub fn new(info: &BlockchainInfo, constants: &ChainConstants) -> Self {
        Self {
            chain_info: info.clone(),
            genesis_timestamp: constants.genesis_timestamp,
            block_size_limit: constants.block_size_limit,
            block_frequency: constants.block_frequency,
            future_threshold: constants.future_threshold,
            extreme_future_threshold: constants.extreme_future_threshold,
            block_stake_aging: constants.block_stake_aging,
            block_creator_fee: constants.block_creator_fee,
            minimum_transaction_fee: constants.minimum_transaction_fee,
            maturity_delay: constants.maturity_delay,
            median_timestamp_window: constants.median_timestamp_window,
            target_window: constants.target_window,
            max_adjustment_up: constants.max_adjustment_up,
            max_adjustment_down: constants.max_adjustment_down,
            one_coin: constants.currency_units.one_coin,
            default_transaction_version: constants.default_transaction_version,
        }
    }
}
