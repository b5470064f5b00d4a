use base64::{Engine as _, engine::general_purpose::STANDARD};
use tracing::debug;
use zeroize::Zeroizing;

use super::KEY_LEN;
use crate::algorithm::{Algorithm, get_algorithm};
use crate::error::HashError;

/// Default number of PBKDF2 iterations.
pub const DEFAULT_ITERATIONS: u32 = 10_000;
/// Default digest.
pub const DEFAULT_ALGORITHM: Algorithm = Algorithm::Pbkdf2Sha256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    algorithm: Algorithm,
    iterations: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            algorithm: DEFAULT_ALGORITHM,
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl KdfParams {
    /// Zero iterations is accepted; PBKDF2 then runs a single round.
    pub fn new(algorithm: Algorithm, iterations: u32) -> Self {
        Self {
            algorithm,
            iterations,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }
}

/// Derive a 32-byte key from `password` and `salt`.
pub fn derive_key(password: &str, salt: &[u8], kdf: KdfParams) -> Zeroizing<[u8; KEY_LEN]> {
    debug!(
        algorithm = %kdf.algorithm,
        iterations = kdf.iterations,
        salt_len = salt.len(),
        "deriving key"
    );

    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    kdf.algorithm
        .derive_into(password.as_bytes(), salt, kdf.iterations, key.as_mut_slice());
    key
}

/// Derive and base64-encode (standard alphabet, padded).
pub(crate) fn encode_key(password: &str, salt: &str, kdf: KdfParams) -> String {
    let key = derive_key(password, salt.as_bytes(), kdf);
    STANDARD.encode(key.as_slice())
}

/// Base64 text of the derived key for an algorithm given by name.
///
/// # Errors
///
/// Returns [`HashError::UnsupportedAlgorithm`] if `algorithm` is unknown.
pub fn encoded_hash(
    password: &str,
    salt: &str,
    iterations: u32,
    algorithm: &str,
) -> Result<String, HashError> {
    let algorithm = get_algorithm(algorithm)?;
    Ok(encode_key(password, salt, KdfParams::new(algorithm, iterations)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn derive_hex(algorithm: Algorithm, iterations: u32) -> String {
        let key = derive_key("password", b"salt", KdfParams::new(algorithm, iterations));
        hex::encode(key.as_slice())
    }

    // Published PBKDF2-HMAC-SHA256 vectors, dkLen = 32.
    #[test]
    fn sha256_known_answers() {
        assert_eq!(
            derive_hex(Algorithm::Pbkdf2Sha256, 1),
            "120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b"
        );
        assert_eq!(
            derive_hex(Algorithm::Pbkdf2Sha256, 2),
            "ae4d0c95af6b46d32d0adff928f06dd02a303f8ef3c251dfd6e2d85a95474c43"
        );
        assert_eq!(
            derive_hex(Algorithm::Pbkdf2Sha256, 4096),
            "c5e478d59288c841aa530db6845c4c8d962893a001ce4e11a4963873aa98134a"
        );
    }

    // RFC 6070 gives 20-byte outputs; they are the first block of ours.
    #[test]
    fn sha1_first_block_matches_rfc6070() {
        assert!(derive_hex(Algorithm::Pbkdf2Sha1, 1)
            .starts_with("0c60c80f961f0e71f3a9b524af6012062fe037a6"));
        assert!(derive_hex(Algorithm::Pbkdf2Sha1, 2)
            .starts_with("ea6c014dc72d6f8ccd1ed92ace1d41f0d8de8957"));
    }

    #[test]
    fn sha512_is_truncated_to_key_len() {
        assert_eq!(
            derive_hex(Algorithm::Pbkdf2Sha512, 1),
            "867f70cf1ade02cff3752599a3a53dc4af34c7a669815ae5d513554e1c8cf252"
        );
    }

    #[test]
    fn md5_is_extended_to_key_len() {
        let key = derive_key("password", b"salt", KdfParams::new(Algorithm::Pbkdf2Md5, 1));
        assert_eq!(key.len(), KEY_LEN);
        // second block must not repeat the first
        assert_ne!(key[..16], key[16..]);
    }

    #[test]
    fn kdf_is_deterministic() {
        let kdf = KdfParams::default();
        let k1 = derive_key("password", b"seasalt", kdf);
        let k2 = derive_key("password", b"seasalt", kdf);
        assert_eq!(*k1, *k2);
    }

    #[test]
    fn kdf_params_affect_output() {
        let k1 = derive_key("pw", b"salt", KdfParams::new(Algorithm::Pbkdf2Sha256, 10));
        let k2 = derive_key("pw", b"salt", KdfParams::new(Algorithm::Pbkdf2Sha256, 11));
        assert_ne!(*k1, *k2);
    }

    #[test]
    fn zero_iterations_behaves_like_one() {
        assert_eq!(
            derive_hex(Algorithm::Pbkdf2Sha256, 0),
            derive_hex(Algorithm::Pbkdf2Sha256, 1)
        );
    }

    #[test]
    fn encoded_hash_is_padded_base64() {
        let hash = encoded_hash("password", "salt", 1, "pbkdf2_sha256").unwrap();
        assert_eq!(hash.len(), 44);
        assert!(hash.ends_with('='));
        assert_eq!(
            STANDARD.decode(&hash).unwrap(),
            hex::decode("120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b")
                .unwrap()
        );
    }

    #[test]
    fn encoded_hash_rejects_unknown_algorithm() {
        assert_eq!(
            encoded_hash("pw", "salt", 1, "pbkdf2_sha999"),
            Err(HashError::UnsupportedAlgorithm("pbkdf2_sha999".into()))
        );
    }
}
