use getrandom::fill;

use super::SALT_CHARSET;
use crate::error::HashError;

/// Default length of a generated salt.
pub const DEFAULT_SALT_LENGTH: usize = 12;

// Largest multiple of the charset size that fits in a byte.
const ACCEPT_BELOW: u8 = (256 / SALT_CHARSET.len() * SALT_CHARSET.len()) as u8;

/// Fill buffer with cryptographically secure random bytes
fn secure_random(buf: &mut [u8]) -> Result<(), HashError> {
    fill(buf).map_err(|_| HashError::Random)
}

/// Random alphanumeric string of `len` characters.
///
/// Bytes from the OS generator are mapped onto [`SALT_CHARSET`] with
/// rejection sampling, so every character is equally likely. The output
/// never contains `$`.
pub fn random_string(len: usize) -> Result<String, HashError> {
    let mut out = String::with_capacity(len);
    let mut buf = [0u8; 64];

    while out.len() < len {
        secure_random(&mut buf)?;
        for &b in buf.iter().filter(|&&b| b < ACCEPT_BELOW) {
            if out.len() == len {
                break;
            }
            out.push(SALT_CHARSET[(b % SALT_CHARSET.len() as u8) as usize] as char);
        }
    }

    Ok(out)
}
