// Path: crates/jam-codec/src/fixed.rs
//! Fixed-width unsigned integers: little-endian, zero-padded (spec §4.1
//! `encode_fixed(n, k)`).

use crate::error::Error;

/// Encodes `n` as `k` little-endian bytes, zero-padded/truncated to width `k`.
pub fn encode_fixed(n: u64, k: usize) -> Vec<u8> {
    let bytes = n.to_le_bytes();
    let mut out = vec![0u8; k];
    let copy_len = k.min(8);
    out[..copy_len].copy_from_slice(&bytes[..copy_len]);
    out
}

/// Decodes a `k`-byte little-endian unsigned integer (`k <= 8`).
pub fn decode_fixed(input: &[u8], k: usize) -> Result<(u64, &[u8]), Error> {
    if k > 8 {
        return Err(Error::LengthMismatch { expected: 8, found: k });
    }
    if input.len() < k {
        return Err(Error::Truncated { needed: k - input.len() });
    }
    let mut bytes = [0u8; 8];
    bytes[..k].copy_from_slice(&input[..k]);
    Ok((u64::from_le_bytes(bytes), &input[k..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_widths() {
        for k in 1..=8 {
            let n = (1u64 << (8 * (k - 1))).wrapping_sub(1).max(1);
            let enc = encode_fixed(n, k);
            assert_eq!(enc.len(), k);
            let (dec, rest) = decode_fixed(&enc, k).unwrap();
            assert_eq!(dec, n);
            assert!(rest.is_empty());
        }
    }

    #[test]
    fn zero_padded() {
        assert_eq!(encode_fixed(1, 4), vec![1, 0, 0, 0]);
    }
}
