// Path: crates/jam-crypto/src/lib.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented
    )
)]
//! The cryptographic primitives the consensus/execution core signs,
//! verifies, and hashes against: Blake2b-256 hashing, Ed25519 dispute
//! signatures, and Bandersnatch ring-VRF tickets/epoch roots/fallback seals.

pub mod bandersnatch;
pub mod ed25519;
pub mod error;
pub mod hash;

pub use error::CryptoError;
pub use hash::{blake2b_256, blake_many, Digest};
