//! Account identifiers and base58check addresses.
//!
//! An account is identified on the wire by its raw 32-byte ed25519 public
//! key. Humans and the indexing service use the textual address form:
//!
//! ```text
//! address  = base58(version || payload || checksum)
//! checksum = SHA-256(SHA-256(version || payload))[0:4]
//! ```
//!
//! using the network's own base58 alphabet.

use std::fmt;
use std::str::FromStr;

use sha2::{Digest, Sha256};

use crate::error::AddressError;
use crate::limits::{PUBLIC_KEY_LEN, VERSION_ACCOUNT_ID};

/// A raw ed25519 public key.
pub type PublicKey = [u8; PUBLIC_KEY_LEN];

/// The network's base58 alphabet.
pub static ALPHABET: bs58::Alphabet =
    bs58::Alphabet::new_unwrap(b"gsphnaf39wBUDNEGHJKLM4PQRST7VWXYZ2bcdeCr65jkm8oFqi1tuvAxyz");

const CHECKSUM_LEN: usize = 4;

/// Identifies an account by its public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId(PublicKey);

impl AccountId {
    /// Wraps a raw public key.
    pub const fn from_public_key(key: PublicKey) -> Self {
        Self(key)
    }

    /// Resolves a textual address to its account id.
    pub fn from_address(address: &str) -> Result<Self, AddressError> {
        let payload = decode_check(VERSION_ACCOUNT_ID, address)?;
        if payload.len() != PUBLIC_KEY_LEN {
            return Err(AddressError::InvalidLength {
                len: payload.len() + 1 + CHECKSUM_LEN,
                expected: PUBLIC_KEY_LEN + 1 + CHECKSUM_LEN,
            });
        }
        let mut key = [0u8; PUBLIC_KEY_LEN];
        key.copy_from_slice(&payload);
        Ok(Self(key))
    }

    /// Returns the raw public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.0
    }

    /// Returns the textual address.
    pub fn address(&self) -> String {
        encode_check(VERSION_ACCOUNT_ID, &self.0)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address())
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", self.address())
    }
}

impl FromStr for AccountId {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_address(s)
    }
}

impl From<PublicKey> for AccountId {
    fn from(key: PublicKey) -> Self {
        Self(key)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for AccountId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.address())
    }
}

fn checksum(data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let hash = Sha256::digest(Sha256::digest(data));
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&hash[..CHECKSUM_LEN]);
    out
}

/// Encodes `payload` with a version byte and checksum.
pub fn encode_check(version: u8, payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(1 + payload.len() + CHECKSUM_LEN);
    data.push(version);
    data.extend_from_slice(payload);
    let sum = checksum(&data);
    data.extend_from_slice(&sum);
    bs58::encode(data).with_alphabet(&ALPHABET).into_string()
}

/// Decodes a base58check string, verifying the version byte and checksum.
///
/// Returns the payload without version byte and checksum.
pub fn decode_check(version: u8, encoded: &str) -> Result<Vec<u8>, AddressError> {
    let data = bs58::decode(encoded)
        .with_alphabet(&ALPHABET)
        .into_vec()
        .map_err(|e| AddressError::InvalidEncoding(e.to_string()))?;

    if data.len() < 1 + CHECKSUM_LEN {
        return Err(AddressError::InvalidLength {
            len: data.len(),
            expected: PUBLIC_KEY_LEN + 1 + CHECKSUM_LEN,
        });
    }

    let (body, sum) = data.split_at(data.len() - CHECKSUM_LEN);
    if checksum(body).as_slice() != sum {
        return Err(AddressError::InvalidChecksum);
    }
    if body[0] != version {
        return Err(AddressError::InvalidVersion {
            expected: version,
            found: body[0],
        });
    }

    Ok(body[1..].to_vec())
}
