//! Supported PBKDF2 digest variants.
//!
//! Each identifier maps to exactly one HMAC digest. The digest is only ever
//! used as the PRF inside PBKDF2, never as a standalone password hash.

use std::fmt;
use std::str::FromStr;

use md5::Md5;
use pbkdf2::pbkdf2_hmac;
use serde::Serialize;
use sha1::Sha1;
use sha2::{Sha256, Sha512};

use crate::error::HashError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Algorithm {
    #[serde(rename = "pbkdf2_sha1")]
    Pbkdf2Sha1,
    #[serde(rename = "pbkdf2_sha256")]
    Pbkdf2Sha256,
    #[serde(rename = "pbkdf2_sha512")]
    Pbkdf2Sha512,
    #[serde(rename = "pbkdf2_md5")]
    Pbkdf2Md5,
}

impl Algorithm {
    /// Every supported algorithm, in a stable order.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Pbkdf2Sha1,
        Algorithm::Pbkdf2Sha256,
        Algorithm::Pbkdf2Sha512,
        Algorithm::Pbkdf2Md5,
    ];

    /// The identifier written into the first field of a record.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Pbkdf2Sha1 => "pbkdf2_sha1",
            Algorithm::Pbkdf2Sha256 => "pbkdf2_sha256",
            Algorithm::Pbkdf2Sha512 => "pbkdf2_sha512",
            Algorithm::Pbkdf2Md5 => "pbkdf2_md5",
        }
    }

    /// Run PBKDF2-HMAC with this digest, filling `out` completely.
    ///
    /// `out` may be shorter or longer than the digest's native size; the
    /// standard block construction handles both.
    pub(crate) fn derive_into(&self, password: &[u8], salt: &[u8], rounds: u32, out: &mut [u8]) {
        match self {
            Algorithm::Pbkdf2Sha1 => pbkdf2_hmac::<Sha1>(password, salt, rounds, out),
            Algorithm::Pbkdf2Sha256 => pbkdf2_hmac::<Sha256>(password, salt, rounds, out),
            Algorithm::Pbkdf2Sha512 => pbkdf2_hmac::<Sha512>(password, salt, rounds, out),
            Algorithm::Pbkdf2Md5 => pbkdf2_hmac::<Md5>(password, salt, rounds, out),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = HashError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.as_str() == name)
            .ok_or_else(|| HashError::UnsupportedAlgorithm(name.to_string()))
    }
}

/// Resolve an algorithm identifier.
///
/// # Errors
///
/// Returns [`HashError::UnsupportedAlgorithm`] for any name outside
/// [`Algorithm::ALL`].
pub fn get_algorithm(name: &str) -> Result<Algorithm, HashError> {
    name.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_identifier_resolves() {
        for algorithm in Algorithm::ALL {
            assert_eq!(get_algorithm(algorithm.as_str()).unwrap(), algorithm);
        }
    }

    #[test]
    fn unknown_identifier_is_rejected() {
        assert_eq!(
            get_algorithm("pbkdf2_sha999"),
            Err(HashError::UnsupportedAlgorithm("pbkdf2_sha999".to_string()))
        );
        assert!(get_algorithm("").is_err());
        assert!(get_algorithm("PBKDF2_SHA256").is_err());
    }

    #[test]
    fn display_matches_identifier() {
        assert_eq!(Algorithm::Pbkdf2Md5.to_string(), "pbkdf2_md5");
    }

    #[test]
    fn serializes_as_identifier() {
        let json = serde_json::to_string(&Algorithm::Pbkdf2Sha512).unwrap();
        assert_eq!(json, "\"pbkdf2_sha512\"");
    }

    #[test]
    fn digests_produce_distinct_keys() {
        let mut keys = Vec::new();
        for algorithm in Algorithm::ALL {
            let mut out = [0u8; 32];
            algorithm.derive_into(b"pw", b"salt", 2, &mut out);
            keys.push(out);
        }
        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
