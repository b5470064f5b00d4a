use thiserror::Error;

/// Errors surfaced by hashing and record parsing.
///
/// Verification never returns these; [`check_password`](crate::check_password)
/// collapses every failure to `false`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HashError {
    /// The algorithm identifier is not one of the supported PBKDF2 variants.
    #[error("unsupported algorithm '{0}'")]
    UnsupportedAlgorithm(String),

    /// The encoded record does not split into exactly four `$`-separated fields.
    #[error("malformed record: expected 4 '$'-separated fields, found {0}")]
    MalformedRecord(usize),

    /// The iteration field is not a non-negative base-10 integer.
    #[error("invalid iteration count '{0}'")]
    InvalidIterations(String),

    #[error("OS random generator unavailable")]
    Random,
}
