// Path: crates/jam-crypto/src/error.rs
//! Cryptographic error taxonomy.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("invalid key: {0}")]
    InvalidKey(String),
    #[error("invalid signature encoding: {0}")]
    InvalidSignature(String),
    #[error("signature verification failed")]
    VerificationFailed,
    #[error("invalid ring VRF proof")]
    InvalidRingProof,
    #[error("operation failed: {0}")]
    OperationFailed(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
