/// ─── HEChain Protocol Constants ─────────────────────────────────────────────
///
/// Values shared by every network. Per-network chain parameters live in
/// `hechain-genesis`; the baseline table they start from lives in
/// `chain::ChainConstants::baseline`.

// ── Naming ───────────────────────────────────────────────────────────────────

/// Name of the Human Energy chain.
pub const CHAIN_NAME: &str = "hechain";

/// Unit of one Human Energy Token.
pub const COIN_UNIT: &str = "HET";

/// Version of the hechain binaries.
pub const CHAIN_VERSION: &str = "0.1.0";

/// Version of the underlying block protocol the chain speaks.
pub const PROTOCOL_VERSION: &str = "1.0.7";

/// User agent peers must present unless overridden on the command line.
pub const DEFAULT_USER_AGENT: &str = "HEChain-Agent";

// ── Currency ─────────────────────────────────────────────────────────────────

/// Decimal places of one coin in the baseline currency units (1 coin = 10^24).
pub const BASELINE_COIN_PRECISION: u32 = 24;

/// Decimal places of one HET (1 HET = 10^9 smallest units).
pub const HET_COIN_PRECISION: u32 = 9;

// ── Block limits ─────────────────────────────────────────────────────────────

/// Maximum serialized block size in bytes.
pub const BLOCK_SIZE_LIMIT: u64 = 2_000_000;

/// Maximum arbitrary data carried by a single transaction (bytes).
pub const ARBITRARY_DATA_SIZE_LIMIT: usize = 83;

// ── Unlock hashes ────────────────────────────────────────────────────────────

/// Size of the hash part of an unlock hash.
pub const HASH_SIZE: usize = 32;

/// Number of checksum bytes appended to the string form of an unlock hash.
pub const UNLOCK_HASH_CHECKSUM_SIZE: usize = 6;

/// Length of an unlock hash in its hex string form: type + hash + checksum.
pub const UNLOCK_HASH_STR_LEN: usize = 2 * (1 + HASH_SIZE + UNLOCK_HASH_CHECKSUM_SIZE);

// ── Process exit codes ───────────────────────────────────────────────────────

/// Generic failure.
pub const EXIT_CODE_GENERAL: i32 = 1;

/// Invalid command, flag or argument (BSD `EX_USAGE`).
pub const EXIT_CODE_USAGE: i32 = 64;
