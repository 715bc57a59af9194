// Path: crates/jam-crypto/src/hash.rs
//! Blake2b-256 hashing, the sole hash function used across the schema
//! (spec §4.1, §4.2).
//!
//! `dcrypt`'s Blake2b only exposes a fixed 64-byte digest, so the 256-bit
//! output the protocol actually uses is taken from `blake2b_simd`, which
//! exposes the variable-output builder directly (the same crate
//! `paritytech-polkadot-sdk`'s own hashing primitives depend on).

use blake2b_simd::Params;

/// A 32-byte Blake2b digest.
pub type Digest = [u8; 32];

/// Hashes a single byte string with Blake2b-256.
pub fn blake2b_256(data: &[u8]) -> Digest {
    let hash = Params::new().hash_length(32).to_state().update(data).finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(hash.as_bytes());
    out
}

/// Hashes each input independently and returns the per-part digests in
/// order. This is the `blakeMany(xs)` sequence itself (spec §4.1 "Hash
/// list -> `blake_many`"); callers compose the outer
/// `Blake2b(encode(blakeMany(xs)))` by `encode`ing this sequence (which
/// prepends its `encode_nat(len)` length prefix per the `Seq<T>` rule)
/// and hashing the result — `blake_many` does not hash its own output.
pub fn blake_many(parts: &[&[u8]]) -> Vec<Digest> {
    parts.iter().map(|part| blake2b_256(part)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_deterministic() {
        let a = blake2b_256(b"");
        let b = blake2b_256(b"");
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_inputs_differ() {
        assert_ne!(blake2b_256(b"jam"), blake2b_256(b"JAM"));
    }

    #[test]
    fn blake_many_is_order_sensitive() {
        let a = blake_many(&[b"one", b"two"]);
        let b = blake_many(&[b"two", b"one"]);
        assert_ne!(a, b);
    }

    #[test]
    fn blake_many_empty_is_stable() {
        let a = blake_many(&[]);
        let b = blake_many(&[]);
        assert_eq!(a, b);
    }

    #[test]
    fn blake_many_returns_one_digest_per_part() {
        let digests = blake_many(&[b"one", b"two", b"three"]);
        assert_eq!(digests.len(), 3);
        assert_eq!(digests[0], blake2b_256(b"one"));
        assert_eq!(digests[1], blake2b_256(b"two"));
        assert_eq!(digests[2], blake2b_256(b"three"));
    }
}
