use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::HechainError;

/// Height of a block in the chain (genesis is 0).
pub type BlockHeight = u64;

/// Unix timestamp (seconds, UTC).
pub type Timestamp = u64;

// ── Currency ─────────────────────────────────────────────────────────────────

/// Amount expressed in the smallest currency unit. u128 holds the baseline
/// coin (10^24 units) times any realistic supply.
///
/// Serialized as a decimal string so JSON consumers never lose precision.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Currency(u128);

impl Currency {
    pub const ZERO: Currency = Currency(0);

    pub const fn new(units: u128) -> Self {
        Self(units)
    }

    pub const fn from_u64(units: u64) -> Self {
        Self(units as u128)
    }

    pub const fn units(&self) -> u128 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn mul64(self, n: u64) -> Result<Self, HechainError> {
        self.0
            .checked_mul(n as u128)
            .map(Self)
            .ok_or(HechainError::CurrencyOverflow)
    }

    pub fn div64(self, n: u64) -> Result<Self, HechainError> {
        if n == 0 {
            return Err(HechainError::CurrencyDivisionByZero);
        }
        Ok(Self(self.0 / n as u128))
    }

    pub fn checked_add(self, other: Currency) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Sum a sequence of amounts, failing on overflow.
    pub fn sum<'a>(amounts: impl IntoIterator<Item = &'a Currency>) -> Result<Self, HechainError> {
        amounts
            .into_iter()
            .try_fold(Currency::ZERO, |acc, c| acc.checked_add(*c))
            .ok_or(HechainError::CurrencyOverflow)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Currency({})", self.0)
    }
}

impl Serialize for Currency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse::<u128>().map(Currency).map_err(de::Error::custom)
    }
}

// ── CurrencyUnits ────────────────────────────────────────────────────────────

/// Defines how many smallest units make up one coin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyUnits {
    pub one_coin: Currency,
}

impl CurrencyUnits {
    /// One coin = 10^`precision` smallest units.
    pub const fn with_precision(precision: u32) -> Self {
        Self {
            one_coin: Currency::new(10u128.pow(precision)),
        }
    }

    /// `n` whole coins.
    pub fn coins(&self, n: u64) -> Result<Currency, HechainError> {
        self.one_coin.mul64(n)
    }
}

// ── Rational ─────────────────────────────────────────────────────────────────

/// Exact ratio used for difficulty adjustment bounds. Always stored reduced,
/// so `25/10` and `5/2` compare equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rational {
    num: u64,
    den: u64,
}

impl Rational {
    pub const fn new(num: u64, den: u64) -> Self {
        let g = gcd(num, den);
        if g == 0 {
            return Self { num, den };
        }
        Self {
            num: num / g,
            den: den / g,
        }
    }

    pub const fn numer(&self) -> u64 {
        self.num
    }

    pub const fn denom(&self) -> u64 {
        self.den
    }

    pub const fn is_valid(&self) -> bool {
        self.den != 0
    }

    pub const fn greater_than_one(&self) -> bool {
        self.num > self.den
    }

    pub const fn less_than_one(&self) -> bool {
        self.num < self.den
    }
}

const fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

// ── NetAddress ───────────────────────────────────────────────────────────────

/// `host:port` address of a peer. Only the shape is checked; resolution is
/// left to the networking layer.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NetAddress(String);

impl NetAddress {
    pub fn host(&self) -> &str {
        self.0.rsplit_once(':').map(|(h, _)| h).unwrap_or("")
    }

    pub fn port(&self) -> &str {
        self.0.rsplit_once(':').map(|(_, p)| p).unwrap_or("")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for addresses that only accept local connections.
    pub fn is_loopback(&self) -> bool {
        matches!(self.host(), "localhost" | "127.0.0.1" | "::1" | "[::1]")
    }
}

impl FromStr for NetAddress {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (_, port) = s
            .rsplit_once(':')
            .ok_or_else(|| format!("address {s:?} is missing a port"))?;
        port.parse::<u16>()
            .map_err(|e| format!("address {s:?} has an invalid port: {e}"))?;
        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for NetAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for NetAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NetAddress({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rational_is_reduced() {
        assert_eq!(Rational::new(25, 10), Rational::new(5, 2));
        assert_eq!(Rational::new(100, 120).to_string(), "5/6");
        assert!(Rational::new(120, 100).greater_than_one());
        assert!(Rational::new(10, 25).less_than_one());
        assert!(!Rational::new(1, 0).is_valid());
    }

    #[test]
    fn currency_arithmetic_is_checked() {
        let one = CurrencyUnits::with_precision(9).one_coin;
        assert_eq!(one.div64(10).unwrap(), Currency::new(100_000_000));
        assert!(one.div64(0).is_err());
        assert!(Currency::new(u128::MAX).mul64(2).is_err());
        let total = Currency::sum(&[one, one, one]).unwrap();
        assert_eq!(total, one.mul64(3).unwrap());
    }

    #[test]
    fn currency_serializes_as_string() {
        let json = serde_json::to_string(&Currency::new(10u128.pow(24))).unwrap();
        assert_eq!(json, "\"1000000000000000000000000\"");
        let back: Currency = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Currency::new(10u128.pow(24)));
    }

    #[test]
    fn net_address_loopback() {
        let local: NetAddress = "localhost:23110".parse().unwrap();
        assert!(local.is_loopback());
        assert_eq!((local.host(), local.port()), ("localhost", "23110"));
        let any: NetAddress = ":23112".parse().unwrap();
        assert!(!any.is_loopback());
        assert_eq!((any.host(), any.port()), ("", "23112"));
        let public: NetAddress = "0.0.0.0:23110".parse().unwrap();
        assert!(!public.is_loopback());
        assert!("localhost".parse::<NetAddress>().is_err());
    }
}
