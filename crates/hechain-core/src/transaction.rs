use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::chain::{BlockStakeOutput, ChainConstants, CoinOutput};
use crate::constants::ARBITRARY_DATA_SIZE_LIMIT;
use crate::error::HechainError;
use crate::types::Currency;

// ── TransactionVersion ───────────────────────────────────────────────────────

/// Format tag selecting which controller validates a transaction.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub struct TransactionVersion(pub u8);

impl TransactionVersion {
    /// Legacy format. Predates hechain and is disabled on all its networks.
    pub const ZERO: TransactionVersion = TransactionVersion(0);
    pub const ONE: TransactionVersion = TransactionVersion(1);
}

impl fmt::Display for TransactionVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Transaction ──────────────────────────────────────────────────────────────

/// The parts of a transaction that version controllers inspect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub version: TransactionVersion,
    #[serde(default)]
    pub coin_outputs: Vec<CoinOutput>,
    #[serde(default)]
    pub block_stake_outputs: Vec<BlockStakeOutput>,
    #[serde(default)]
    pub miner_fees: Vec<Currency>,
    #[serde(default)]
    pub arbitrary_data: Vec<u8>,
}

// ── Controllers ──────────────────────────────────────────────────────────────

/// Validation logic bound to one transaction version.
pub trait TransactionController: fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    fn validate(&self, tx: &Transaction, constants: &ChainConstants) -> Result<(), HechainError>;
}

/// Controller for the legacy version zero format.
#[derive(Debug, Default)]
pub struct LegacyTransactionController;

impl TransactionController for LegacyTransactionController {
    fn name(&self) -> &'static str {
        "legacy"
    }

    fn validate(&self, tx: &Transaction, constants: &ChainConstants) -> Result<(), HechainError> {
        validate_structure(tx, constants)
    }
}

/// Controller for the version one format.
#[derive(Debug, Default)]
pub struct DefaultTransactionController;

impl TransactionController for DefaultTransactionController {
    fn name(&self) -> &'static str {
        "default"
    }

    fn validate(&self, tx: &Transaction, constants: &ChainConstants) -> Result<(), HechainError> {
        validate_structure(tx, constants)
    }
}

/// Checks shared by every built-in controller.
fn validate_structure(tx: &Transaction, constants: &ChainConstants) -> Result<(), HechainError> {
    if tx.arbitrary_data.len() > ARBITRARY_DATA_SIZE_LIMIT {
        return Err(HechainError::ArbitraryDataTooLarge {
            max: ARBITRARY_DATA_SIZE_LIMIT,
            got: tx.arbitrary_data.len(),
        });
    }
    if tx.miner_fees.is_empty() {
        return Err(HechainError::MissingMinerFee);
    }
    for fee in &tx.miner_fees {
        if *fee < constants.minimum_transaction_fee {
            return Err(HechainError::MinerFeeTooLow {
                min: constants.minimum_transaction_fee,
                got: *fee,
            });
        }
    }
    if let Some(index) = tx.coin_outputs.iter().position(|o| o.value.is_zero()) {
        return Err(HechainError::ZeroValueOutput { index });
    }
    Ok(())
}

// ── TransactionRegistry ──────────────────────────────────────────────────────

/// Maps transaction versions to their controllers.
///
/// A version registered with `None` is known but disabled: transactions using
/// it never validate. Built once at startup and passed by reference to
/// whatever needs to look up a controller.
#[derive(Debug, Default)]
pub struct TransactionRegistry {
    controllers: BTreeMap<TransactionVersion, Option<Box<dyn TransactionController>>>,
}

impl TransactionRegistry {
    /// An empty registry; no version validates.
    pub fn new() -> Self {
        Self::default()
    }

    /// The protocol defaults: version zero (legacy) and version one.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(
            TransactionVersion::ZERO,
            Some(Box::new(LegacyTransactionController)),
        );
        registry.register(
            TransactionVersion::ONE,
            Some(Box::new(DefaultTransactionController)),
        );
        registry
    }

    /// Install (or with `None`, disable) the controller for `version`,
    /// replacing whatever was registered before.
    pub fn register(
        &mut self,
        version: TransactionVersion,
        controller: Option<Box<dyn TransactionController>>,
    ) {
        self.controllers.insert(version, controller);
    }

    pub fn controller(
        &self,
        version: TransactionVersion,
    ) -> Result<&dyn TransactionController, HechainError> {
        match self.controllers.get(&version) {
            Some(Some(controller)) => Ok(&**controller),
            Some(None) => Err(HechainError::DisabledTransactionVersion(version.0)),
            None => Err(HechainError::UnknownTransactionVersion(version.0)),
        }
    }

    pub fn is_enabled(&self, version: TransactionVersion) -> bool {
        matches!(self.controllers.get(&version), Some(Some(_)))
    }

    /// Versions the registry knows about, with whether each is enabled.
    pub fn versions(&self) -> impl Iterator<Item = (TransactionVersion, bool)> + '_ {
        self.controllers.iter().map(|(v, c)| (*v, c.is_some()))
    }

    pub fn validate_transaction(
        &self,
        tx: &Transaction,
        constants: &ChainConstants,
    ) -> Result<(), HechainError> {
        self.controller(tx.version)?.validate(tx, constants)
    }
}
