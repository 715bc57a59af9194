// Path: crates/jam-codec/src/error.rs
use thiserror::Error;

/// Codec failure taxonomy (spec §4.1, §7). Encoders are total and never
/// produce this type; only `decode_T` is fallible.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("truncated input: need {needed} more byte(s)")]
    Truncated { needed: usize },
    #[error("non-canonical variable-length natural encoding")]
    NonCanonicalNat,
    #[error("variable-length natural overflows u64")]
    OverflowingNat,
    #[error("unknown discriminant tag: {0}")]
    UnknownTag(u8),
    #[error("length mismatch: expected {expected}, found {found}")]
    LengthMismatch { expected: usize, found: usize },
    #[error("trailing bytes after decode: {0}")]
    TrailingBytes(usize),
}
