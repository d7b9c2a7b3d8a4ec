//! Short key derivation from a truncated MD5 digest.
//!
//! A key is the first `key_length` characters of the lowercase hexadecimal
//! MD5 digest of the input. The default width is 6, so keys stay compatible
//! with links issued by earlier six-character deployments.
//!
//! Derivation is deterministic and does not guarantee uniqueness: two inputs
//! can share a prefix. Uniqueness is enforced by the store, which re-derives
//! from [`perturb`]ed input on collision.

use md5::{Digest, Md5};

/// Default number of hexadecimal characters in a key.
pub const DEFAULT_KEY_LENGTH: usize = 6;

/// Maximum key length (an MD5 digest is 32 hex characters).
pub const MAX_KEY_LENGTH: usize = 32;

/// Suffix appended to the previous candidate key to form the next input.
const PERTURBATION_SUFFIX: &str = "1";

/// Maps an arbitrary input string to a fixed-length candidate key.
///
/// Implementations must be pure: the same input always yields the same key.
pub trait KeyDeriver: Send + Sync {
    fn derive(&self, input: &str) -> String;
}

/// Truncated-MD5 key deriver.
#[derive(Debug, Clone, Copy)]
pub struct Md5KeyDeriver {
    key_length: usize,
}

impl Md5KeyDeriver {
    /// Creates a deriver producing keys of `key_length` hex characters.
    ///
    /// The length is clamped to `1..=32`.
    pub fn new(key_length: usize) -> Self {
        Self {
            key_length: key_length.clamp(1, MAX_KEY_LENGTH),
        }
    }

    pub fn key_length(&self) -> usize {
        self.key_length
    }
}

impl Default for Md5KeyDeriver {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_LENGTH)
    }
}

impl KeyDeriver for Md5KeyDeriver {
    fn derive(&self, input: &str) -> String {
        let digest = Md5::digest(input.as_bytes());
        let mut key = hex::encode(digest);
        key.truncate(self.key_length);
        key
    }
}

/// Derives a key of [`DEFAULT_KEY_LENGTH`] characters.
pub fn derive_key(input: &str) -> String {
    Md5KeyDeriver::default().derive(input)
}

/// Builds the next derivation input after `previous_key` collided.
///
/// The suffix goes on the previous candidate key, not the original URL, so
/// the sequence of candidates for a given URL is fixed.
pub fn perturb(previous_key: &str) -> String {
    format!("{previous_key}{PERTURBATION_SUFFIX}")
}
