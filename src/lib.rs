//! Django-compatible PBKDF2 password hashing.
//!
//! ```
//! let encoded = djhash::make_password("lètmein").unwrap();
//! assert!(djhash::check_password("lètmein", &encoded));
//! assert!(!djhash::check_password("letmein", &encoded));
//! ```

mod algorithm;
mod crypto;
mod error;
mod format;

pub use crate::algorithm::{Algorithm, get_algorithm};
pub use crate::crypto::kdf::{DEFAULT_ALGORITHM, DEFAULT_ITERATIONS};
pub use crate::crypto::salt::DEFAULT_SALT_LENGTH;
pub use crate::crypto::{KEY_LEN, KdfParams, derive_key, encoded_hash, random_string};
pub use crate::error::HashError;
pub use crate::format::{Record, SEPARATOR};

use tracing::debug;

/// Hash `password` with a random salt and the default parameters.
///
/// # Errors
///
/// Fails only if the OS random generator is unavailable.
pub fn make_password(password: &str) -> Result<String, HashError> {
    let salt = random_string(DEFAULT_SALT_LENGTH)?;
    make_password_with_params(
        password,
        &salt,
        DEFAULT_ITERATIONS,
        DEFAULT_ALGORITHM.as_str(),
    )
}

/// Hash `password` with an explicit salt, iteration count and algorithm.
///
/// The record's first field names the algorithm actually used.
///
/// # Errors
///
/// Returns [`HashError::UnsupportedAlgorithm`] if `algorithm` is unknown.
pub fn make_password_with_params(
    password: &str,
    salt: &str,
    iterations: u32,
    algorithm: &str,
) -> Result<String, HashError> {
    let algorithm = get_algorithm(algorithm)?;
    let record = Record::create(password, salt, KdfParams::new(algorithm, iterations));
    Ok(record.to_string())
}

/// Check `password` against an encoded record.
///
/// Malformed records, unknown algorithms and bad iteration fields all
/// yield `false`.
pub fn check_password(password: &str, encoded: &str) -> bool {
    match Record::parse(encoded) {
        Ok(record) => record.verify(password),
        Err(e) => {
            debug!("rejecting record: {e}");
            false
        }
    }
}
