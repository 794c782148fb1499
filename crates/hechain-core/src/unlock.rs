use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::constants::{HASH_SIZE, UNLOCK_HASH_CHECKSUM_SIZE, UNLOCK_HASH_STR_LEN};
use crate::error::HechainError;

type Blake2b256 = Blake2b<U32>;

// ── UnlockType ───────────────────────────────────────────────────────────────

/// Selects the kind of condition an unlock hash commits to.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct UnlockType(pub u8);

impl UnlockType {
    pub const PUBLIC_KEY: UnlockType = UnlockType(1);
}

// ── UnlockHash ───────────────────────────────────────────────────────────────

/// Address an output is locked to.
///
/// String form (78 hex chars): `type (1 byte) || hash (32) || checksum (6)`,
/// where the checksum is the head of BLAKE2b-256(type || hash).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnlockHash {
    pub unlock_type: UnlockType,
    pub hash: [u8; HASH_SIZE],
}

impl UnlockHash {
    pub fn new(unlock_type: UnlockType, hash: [u8; HASH_SIZE]) -> Self {
        Self { unlock_type, hash }
    }

    pub fn checksum(&self) -> [u8; UNLOCK_HASH_CHECKSUM_SIZE] {
        let mut hasher = Blake2b256::new();
        hasher.update([self.unlock_type.0]);
        hasher.update(self.hash);
        let digest = hasher.finalize();
        let mut out = [0u8; UNLOCK_HASH_CHECKSUM_SIZE];
        out.copy_from_slice(&digest[..UNLOCK_HASH_CHECKSUM_SIZE]);
        out
    }

    pub fn to_hex(&self) -> String {
        let mut bytes = Vec::with_capacity(UNLOCK_HASH_STR_LEN / 2);
        bytes.push(self.unlock_type.0);
        bytes.extend_from_slice(&self.hash);
        bytes.extend_from_slice(&self.checksum());
        hex::encode(bytes)
    }
}

impl FromStr for UnlockHash {
    type Err = HechainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != UNLOCK_HASH_STR_LEN {
            return Err(HechainError::InvalidUnlockHash(format!(
                "expected {UNLOCK_HASH_STR_LEN} hex characters, got {}",
                s.len()
            )));
        }
        let bytes = hex::decode(s).map_err(|e| HechainError::InvalidUnlockHash(e.to_string()))?;

        let mut hash = [0u8; HASH_SIZE];
        hash.copy_from_slice(&bytes[1..1 + HASH_SIZE]);
        let uh = UnlockHash::new(UnlockType(bytes[0]), hash);

        if bytes[1 + HASH_SIZE..] != uh.checksum() {
            return Err(HechainError::InvalidUnlockHash("checksum mismatch".into()));
        }
        Ok(uh)
    }
}

impl fmt::Display for UnlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for UnlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UnlockHash({}…)", &self.to_hex()[..16])
    }
}

impl Serialize for UnlockHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for UnlockHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

// ── UnlockCondition ──────────────────────────────────────────────────────────

/// Predicate that must be fulfilled to spend an output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum UnlockCondition {
    /// Anyone can spend.
    Nil,
    /// Spendable by whoever proves ownership of the unlock hash.
    UnlockHash(UnlockHash),
}

impl UnlockCondition {
    pub fn unlock_hash(&self) -> Option<&UnlockHash> {
        match self {
            UnlockCondition::Nil => None,
            UnlockCondition::UnlockHash(uh) => Some(uh),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "014dd1a21bbd646f572a08f53cbc248efcf7df7af15c7bbb0eaa207093934760a5f359b551bc16";

    #[test]
    fn parses_and_renders_identically() {
        let uh: UnlockHash = ADDR.parse().expect("valid address");
        assert_eq!(uh.unlock_type, UnlockType::PUBLIC_KEY);
        assert_eq!(uh.to_string(), ADDR);
    }

    #[test]
    fn rejects_bad_checksum() {
        let mut bad = ADDR.to_string();
        bad.replace_range(76.., "17");
        let err = bad.parse::<UnlockHash>().unwrap_err();
        assert!(err.to_string().contains("checksum"));
    }

    #[test]
    fn rejects_wrong_length_and_bad_hex() {
        assert!(ADDR[..70].parse::<UnlockHash>().is_err());
        let not_hex = format!("zz{}", &ADDR[2..]);
        assert!(not_hex.parse::<UnlockHash>().is_err());
    }

    #[test]
    fn condition_round_trips_through_json() {
        let cond = UnlockCondition::UnlockHash(ADDR.parse().unwrap());
        let json = serde_json::to_string(&cond).unwrap();
        assert!(json.contains(ADDR));
        let back: UnlockCondition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cond);
    }
}
