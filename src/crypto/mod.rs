//! Key derivation and salt generation.
//!
//! Provides the PBKDF2 derivation step and the random salt helper.

pub mod kdf;
pub mod salt;

pub use kdf::{KdfParams, derive_key, encoded_hash};
pub use salt::random_string;

/// Length of the derived key (32 bytes), independent of the digest.
pub const KEY_LEN: usize = 32;
/// Characters a generated salt is drawn from.
pub const SALT_CHARSET: &[u8; 62] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
