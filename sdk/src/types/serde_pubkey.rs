//! Serde helpers for base58-encoded public keys.
//!
//! Use with `#[serde(with = "serde_pubkey")]` or, for lists,
//! `#[serde(with = "serde_pubkey::vec")]`.

use serde::{de, Deserialize, Deserializer, Serializer};
use solana_sdk::pubkey::Pubkey;

/// Serializes a key as a base58 string.
///
/// # Errors
///
/// Propagates serializer errors.
pub fn serialize<S: Serializer>(key: &Pubkey, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&bs58::encode(key.as_ref()).into_string())
}

/// Deserializes a base58 string into a key.
///
/// # Errors
///
/// Fails if the string is not base58 or does not decode to 32 bytes.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Pubkey, D::Error> {
    let s = String::deserialize(deserializer)?;
    parse(&s).map_err(de::Error::custom)
}

/// Parses a base58 public key.
///
/// # Errors
///
/// Returns a message describing the decoding failure.
pub fn parse(s: &str) -> Result<Pubkey, String> {
    let bytes = bs58::decode(s)
        .into_vec()
        .map_err(|e| format!("invalid base58 key {s}: {e}"))?;
    let array: [u8; 32] = bytes
        .try_into()
        .map_err(|_| format!("key {s} is not 32 bytes"))?;
    Ok(Pubkey::new_from_array(array))
}

/// Helpers for `Vec<Pubkey>` fields.
pub mod vec {
    use serde::ser::SerializeSeq;
    use serde::{de, Deserialize, Deserializer, Serializer};
    use solana_sdk::pubkey::Pubkey;

    /// Serializes a list of keys as base58 strings.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(keys: &[Pubkey], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(keys.len()))?;
        for key in keys {
            seq.serialize_element(&bs58::encode(key.as_ref()).into_string())?;
        }
        seq.end()
    }

    /// Deserializes a list of base58 strings.
    ///
    /// # Errors
    ///
    /// Fails on the first malformed key.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Pubkey>, D::Error> {
        Vec::<String>::deserialize(deserializer)?
            .iter()
            .map(|s| super::parse(s).map_err(de::Error::custom))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Holder {
        #[serde(with = "super")]
        key: Pubkey,
        #[serde(with = "super::vec")]
        keys: Vec<Pubkey>,
    }

    #[test]
    fn test_pubkey_json() {
        let holder = Holder {
            key: Pubkey::new_unique(),
            keys: vec![Pubkey::new_unique(), Pubkey::new_unique()],
        };
        let json = serde_json::to_string(&holder).expect("serialize");
        assert!(json.contains(&holder.key.to_string()));
        let back: Holder = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, holder);
    }

    #[test]
    fn test_parse_rejects_short_key() {
        let short = bs58::encode([1u8; 16]).into_string();
        assert!(parse(&short).is_err());
        assert!(parse("not-base58!").is_err());
    }
}
