//! Content Fingerprints
//!
//! Digests of raw file bytes, used to tell a real content change apart from
//! a touch that left the bytes as they were.

use sha1::{Digest, Sha1};
use std::fmt;

/// Opaque, comparable digest of a file's bytes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Wrap an already computed digest string; for `ContentHasher`
    /// implementations outside this crate
    pub fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Produces fingerprints of raw bytes.
///
/// Implementations must be deterministic: equal bytes give equal
/// fingerprints.
pub trait ContentHasher: Send + Sync {
    fn fingerprint(&self, bytes: &[u8]) -> Fingerprint;
}

/// SHA-1 hex digest hasher
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha1Hasher;

impl ContentHasher for Sha1Hasher {
    fn fingerprint(&self, bytes: &[u8]) -> Fingerprint {
        let mut hasher = Sha1::new();
        hasher.update(bytes);
        Fingerprint::new(hex::encode(hasher.finalize()))
    }
}
