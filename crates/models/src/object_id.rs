//! 12-byte document identifiers rendered as 24 hexadecimal characters.
//!
//! Layout: 4-byte big-endian seconds timestamp, 5 random bytes fixed per
//! process, 3-byte counter seeded randomly.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};

use once_cell::sync::Lazy;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

static PROCESS_UNIQUE: Lazy<[u8; 5]> = Lazy::new(|| rand::random());
static COUNTER: Lazy<AtomicU32> = Lazy::new(|| AtomicU32::new(rand::random::<u32>() & 0x00FF_FFFF));

/// Returns whether `s` is exactly 24 hexadecimal characters (either case).
pub fn is_valid(s: &str) -> bool {
    s.len() == 24 && s.bytes().all(|b| b.is_ascii_hexdigit())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Id must have 24 hexadecimal characters")]
pub struct InvalidObjectId;

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    /// Generate a fresh identifier.
    pub fn new() -> Self {
        let secs = chrono::Utc::now().timestamp() as u32;
        let count = COUNTER.fetch_add(1, Ordering::Relaxed) & 0x00FF_FFFF;

        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..9].copy_from_slice(&*PROCESS_UNIQUE);
        bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);
        Self(bytes)
    }

    pub const fn from_bytes(bytes: [u8; 12]) -> Self { Self(bytes) }

    pub const fn bytes(&self) -> [u8; 12] { self.0 }

    /// Seconds since the epoch at which the id was generated.
    pub fn timestamp(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }

    pub fn to_hex(&self) -> String { self.to_string() }
}

impl Default for ObjectId {
    fn default() -> Self { Self::new() }
}

impl FromStr for ObjectId {
    type Err = InvalidObjectId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_valid(s) {
            return Err(InvalidObjectId);
        }
        let mut bytes = [0u8; 12];
        for (i, pair) in s.as_bytes().chunks_exact(2).enumerate() {
            bytes[i] = (nibble(pair[0]) << 4) | nibble(pair[1]);
        }
        Ok(Self(bytes))
    }
}

// callers have already checked `b` is a hex digit
fn nibble(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        _ => b - b'A' + 10,
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0 {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({self})")
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_exactly_24_hex_chars() {
        assert!(is_valid("625748f82d58a7817a3afc49"));
        assert!(is_valid("625748F82D58A7817A3AFC49"));
        assert!(is_valid("000000000000000000000000"));
    }

    #[test]
    fn rejects_boundary_lengths() {
        assert!(!is_valid("625748f82d58a7817a3afc4")); // 23
        assert!(!is_valid("625748f82d58a7817a3afc49a")); // 25
        assert!(!is_valid(""));
    }

    #[test]
    fn rejects_non_hex_characters() {
        assert!(!is_valid("625748f82d58a7817a3afc4g"));
        assert!(!is_valid("625748f82d58a7817a3afc4-"));
        assert!(!is_valid(" 25748f82d58a7817a3afc49"));
        // 24 bytes but multi-byte chars
        assert!(!is_valid("é25748f82d58a7817a3afc4"));
    }

    #[test]
    fn parse_then_display_is_lowercase() {
        let id: ObjectId = "625748F82D58A7817A3AFC49".parse().unwrap();
        assert_eq!(id.to_string(), "625748f82d58a7817a3afc49");
        assert_eq!(id.timestamp(), 0x6257_48f8);
        assert_eq!("nope".parse::<ObjectId>(), Err(InvalidObjectId));
    }

    #[test]
    fn generated_ids_are_unique_and_valid() {
        let a = ObjectId::new();
        let b = ObjectId::new();
        assert_ne!(a, b);
        assert!(is_valid(&a.to_hex()));
        // same process -> same random segment
        assert_eq!(a.bytes()[4..9], b.bytes()[4..9]);
    }

    #[test]
    fn serde_uses_hex_string() {
        let id: ObjectId = "625748f82d58a7817a3afc49".parse().unwrap();
        let json = serde_json::to_value(id).unwrap();
        assert_eq!(json, serde_json::json!("625748f82d58a7817a3afc49"));
        let back: ObjectId = serde_json::from_value(json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_value::<ObjectId>(serde_json::json!("xyz")).is_err());
    }
}
