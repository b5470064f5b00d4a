//! Encoded password records.
//!
//! Record format:
//! ```text
//! ALGORITHM $ ITERATIONS $ SALT $ BASE64(KEY)
//! ```
//! Exactly four fields. The salt is stored raw and must not contain `$`.

use std::fmt;

use serde::Serialize;
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

use crate::algorithm::Algorithm;
use crate::crypto::KdfParams;
use crate::crypto::kdf::encode_key;
use crate::error::HashError;

/// Field separator.
pub const SEPARATOR: char = '$';

/// A parsed or freshly created password record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    algorithm: Algorithm,
    iterations: u32,
    salt: String,
    hash: String,
}

impl Record {
    /// Hash `password` with `salt` under `kdf`.
    pub fn create(password: &str, salt: &str, kdf: KdfParams) -> Self {
        if salt.contains(SEPARATOR) {
            warn!("salt contains '{SEPARATOR}'; the record will not parse back");
        }

        Self {
            algorithm: kdf.algorithm(),
            iterations: kdf.iterations(),
            salt: salt.to_string(),
            hash: encode_key(password, salt, kdf),
        }
    }

    /// Parses an encoded record.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the record does not have exactly four fields
    /// - the iteration field is not a non-negative integer
    /// - the algorithm is unsupported
    pub fn parse(encoded: &str) -> Result<Self, HashError> {
        let fields: Vec<&str> = encoded.split(SEPARATOR).collect();
        let &[algorithm, iterations, salt, hash] = &fields[..] else {
            return Err(HashError::MalformedRecord(fields.len()));
        };

        let iterations = iterations
            .parse::<u32>()
            .map_err(|_| HashError::InvalidIterations(iterations.to_string()))?;
        let algorithm = algorithm.parse::<Algorithm>()?;

        Ok(Self {
            algorithm,
            iterations,
            salt: salt.to_string(),
            hash: hash.to_string(),
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }

    /// Base64 text of the derived key.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn kdf(&self) -> KdfParams {
        KdfParams::new(self.algorithm, self.iterations)
    }

    /// Re-derive from `candidate` and compare against the stored hash.
    ///
    /// The comparison runs in constant time over the base64 text.
    pub fn verify(&self, candidate: &str) -> bool {
        let fresh = encode_key(candidate, &self.salt, self.kdf());
        let matches: bool = fresh.as_bytes().ct_eq(self.hash.as_bytes()).into();
        if !matches {
            debug!(algorithm = %self.algorithm, "digest mismatch");
        }
        matches
    }

    /// True when the record was made with parameters other than `wanted`.
    pub fn needs_rehash(&self, wanted: KdfParams) -> bool {
        self.kdf() != wanted
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{SEPARATOR}{}{SEPARATOR}{}{SEPARATOR}{}",
            self.algorithm, self.iterations, self.salt, self.hash
        )
    }
}
