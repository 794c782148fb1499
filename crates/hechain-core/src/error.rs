use thiserror::Error;

use crate::types::Currency;

#[derive(Debug, Error)]
pub enum HechainError {
    // ── Network selection ────────────────────────────────────────────────────
    #[error("network name {0:?} not recognized")]
    UnrecognizedNetwork(String),

    // ── Addresses ────────────────────────────────────────────────────────────
    #[error("invalid unlock hash: {0}")]
    InvalidUnlockHash(String),

    #[error("malformed genesis address literal {literal:?}: {reason}")]
    MalformedGenesisLiteral { literal: String, reason: String },

    // ── Currency ─────────────────────────────────────────────────────────────
    #[error("currency overflow")]
    CurrencyOverflow,

    #[error("currency division by zero")]
    CurrencyDivisionByZero,

    // ── Chain constants ──────────────────────────────────────────────────────
    #[error("invalid chain constants: {0}")]
    InvalidChainConstants(String),

    // ── Transactions ─────────────────────────────────────────────────────────
    #[error("transaction version {0} is disabled on this network")]
    DisabledTransactionVersion(u8),

    #[error("transaction version {0} is not registered")]
    UnknownTransactionVersion(u8),

    #[error("transaction pays no miner fee")]
    MissingMinerFee,

    #[error("miner fee too low: minimum {min}, got {got}")]
    MinerFeeTooLow { min: Currency, got: Currency },

    #[error("coin output {index} has zero value")]
    ZeroValueOutput { index: usize },

    #[error("arbitrary data exceeds maximum size of {max} bytes (got {got})")]
    ArbitraryDataTooLarge { max: usize, got: usize },

    // ── Serialization ────────────────────────────────────────────────────────
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for HechainError {
    fn from(err: serde_json::Error) -> Self {
        HechainError::Serialization(err.to_string())
    }
}
