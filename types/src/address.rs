//! Member address type — a 160-bit account identifier rendered as `0x` hex.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::DaoError;

/// A member's account identifier (20 raw bytes).
///
/// Rendered and parsed as a `0x`-prefixed, 40-character hex string. The
/// ledger treats it as opaque; only equality, ordering and hashing matter.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemberAddress([u8; 20]);

impl MemberAddress {
    /// The standard prefix for rendered addresses.
    pub const PREFIX: &'static str = "0x";

    /// Number of raw bytes in an address.
    pub const LEN: usize = 20;

    /// The all-zero address. Never a valid member.
    pub const ZERO: Self = Self([0u8; 20]);

    pub fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Build an address holding `n` big-endian in its low 8 bytes. Handy for fixtures.
    pub fn from_low_u64(n: u64) -> Self {
        let mut bytes = [0u8; 20];
        bytes[12..].copy_from_slice(&n.to_be_bytes());
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Parse a `0x`-prefixed (or bare) hex address.
    ///
    /// The zero address is rejected.
    pub fn from_hex(s: &str) -> Result<Self, DaoError> {
        let trimmed = s.strip_prefix(Self::PREFIX).unwrap_or(s);
        if trimmed.len() != Self::LEN * 2 {
            return Err(DaoError::InvalidAddress(format!(
                "expected {} hex characters, got {}",
                Self::LEN * 2,
                trimmed.len()
            )));
        }
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(trimmed, &mut bytes)
            .map_err(|e| DaoError::InvalidAddress(format!("{s}: {e}")))?;
        let addr = Self(bytes);
        if addr.is_zero() {
            return Err(DaoError::InvalidAddress("zero address".into()));
        }
        Ok(addr)
    }

    /// Render as a lowercase `0x`-prefixed hex string.
    pub fn to_hex(&self) -> String {
        format!("{}{}", Self::PREFIX, hex::encode(self.0))
    }
}

impl fmt::Display for MemberAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for MemberAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MemberAddress({})", self.to_hex())
    }
}

impl FromStr for MemberAddress {
    type Err = DaoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

// Human-readable formats (JSON, TOML) carry the hex string; binary formats
// carry the raw bytes.
impl Serialize for MemberAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for MemberAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Self::from_hex(&s).map_err(serde::de::Error::custom)
        } else {
            <[u8; 20]>::deserialize(deserializer).map(Self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_low_u64_fills_low_bytes_big_endian() {
        let addr = MemberAddress::from_low_u64(0x0102);
        assert_eq!(&addr.as_bytes()[..18], &[0u8; 18]);
        assert_eq!(&addr.as_bytes()[18..], &[0x01, 0x02]);
    }

    #[test]
    fn test_hex_display() {
        let addr = MemberAddress::from_low_u64(0xab);
        assert_eq!(
            addr.to_string(),
            "0x00000000000000000000000000000000000000ab"
        );
    }

    #[test]
    fn test_parse_with_and_without_prefix() {
        let a: MemberAddress = "0x00000000000000000000000000000000000000ab".parse().unwrap();
        let b = MemberAddress::from_hex("00000000000000000000000000000000000000ab").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, MemberAddress::from_low_u64(0xab));
    }

    #[test]
    fn test_parse_rejects_zero_address() {
        let err = MemberAddress::from_hex("0x0000000000000000000000000000000000000000").unwrap_err();
        assert!(matches!(err, DaoError::InvalidAddress(_)));
    }

    #[test]
    fn test_parse_rejects_bad_length_and_chars() {
        assert!(MemberAddress::from_hex("0x1234").is_err());
        assert!(MemberAddress::from_hex("0xzz000000000000000000000000000000000000ab").is_err());
    }

    #[test]
    fn test_json_uses_hex_string() {
        let addr = MemberAddress::from_low_u64(7);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"0x0000000000000000000000000000000000000007\"");
        let back: MemberAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }
}
