//! SHA-384 digest primitive and its transport encoding.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest as _, Sha384};
use std::fmt;
use thiserror::Error;

/// Width of a SHA-384 digest in bytes.
pub const DIGEST_LEN: usize = 48;

/// Digest layer errors.
#[derive(Error, Debug)]
pub enum DigestError {
    #[error("Invalid digest length: expected {DIGEST_LEN} bytes, got {0}")]
    InvalidLength(usize),

    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Fixed-width content digest. Equality is byte-wise; the transport
/// representation is standard base64 text.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    /// Hash an arbitrary byte sequence.
    pub fn of(data: &[u8]) -> Self {
        let mut hasher = Sha384::new();
        hasher.update(data);
        let mut raw = [0u8; DIGEST_LEN];
        raw.copy_from_slice(&hasher.finalize());
        Self(raw)
    }

    /// Hash the concatenation of two digests. Every internal tree node's
    /// digest is computed this way from its children.
    pub fn combine(left: &Digest, right: &Digest) -> Self {
        let mut hasher = Sha384::new();
        hasher.update(left.0);
        hasher.update(right.0);
        let mut raw = [0u8; DIGEST_LEN];
        raw.copy_from_slice(&hasher.finalize());
        Self(raw)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DigestError> {
        let raw: [u8; DIGEST_LEN] = bytes
            .try_into()
            .map_err(|_| DigestError::InvalidLength(bytes.len()))?;
        Ok(Self(raw))
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Encode for transport.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.0)
    }

    /// Decode the transport form.
    pub fn from_base64(text: &str) -> Result<Self, DigestError> {
        let bytes = STANDARD.decode(text)?;
        Self::from_bytes(&bytes)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base64())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", hex::encode(self.0))
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base64())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Digest::from_base64(&text).map_err(serde::de::Error::custom)
    }
}
