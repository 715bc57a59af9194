// Path: crates/jam-codec/src/nat.rs
//! Variable-length natural number encoding (Gray Paper eqs 29-37, spec §4.1).
//!
//! A single tag byte chooses among nine forms: a bare byte for `x < 2^7`,
//! or a tag whose top `l` bits (`l` in `1..=7`) are set followed by a zero
//! separator bit and `7-l` high bits of `x` in its low bits, followed by
//! `l` little-endian octets; or, for the largest values, a `0xFF` tag
//! followed by a full 8-byte little-endian `u64`. The smallest form that
//! fits is the only canonical encoding for a given value.

use crate::error::Error;

/// Largest value representable by the `l`-trailing-octet form, `l` in `0..=7`.
fn max_for_l(l: u32) -> u64 {
    debug_assert!(l <= 7);
    (1u64 << (7 * (l + 1))) - 1
}

/// Encodes `x` using the smallest of the nine forms that can represent it.
pub fn encode_nat(x: u64) -> Vec<u8> {
    if x <= max_for_l(0) {
        return vec![x as u8];
    }
    for l in 1..=7u32 {
        if x <= max_for_l(l) {
            let high = (x >> (8 * l)) as u32;
            let prefix = (256u32 - (1u32 << (8 - l)) + high) as u8;
            let mut out = Vec::with_capacity(1 + l as usize);
            out.push(prefix);
            out.extend_from_slice(&x.to_le_bytes()[..l as usize]);
            return out;
        }
    }
    let mut out = Vec::with_capacity(9);
    out.push(0xFF);
    out.extend_from_slice(&x.to_le_bytes());
    out
}

/// Decodes a variable-length natural, rejecting any non-canonical (not
/// the shortest possible) encoding.
pub fn decode_nat(input: &[u8]) -> Result<(u64, &[u8]), Error> {
    let &tag = input.first().ok_or(Error::Truncated { needed: 1 })?;

    if tag < 0x80 {
        return Ok((tag as u64, &input[1..]));
    }

    if tag == 0xFF {
        if input.len() < 9 {
            return Err(Error::Truncated { needed: 9 - input.len() });
        }
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&input[1..9]);
        let x = u64::from_le_bytes(bytes);
        return finish(x, input, 9);
    }

    let l = tag.leading_ones() as usize;
    debug_assert!((1..=7).contains(&l));
    if input.len() < 1 + l {
        return Err(Error::Truncated { needed: 1 + l - input.len() });
    }
    let high_mask = (1u8 << (7 - l)) - 1;
    let high = u64::from(tag & high_mask);
    let mut low_bytes = [0u8; 8];
    low_bytes[..l].copy_from_slice(&input[1..1 + l]);
    let low = u64::from_le_bytes(low_bytes);
    let x = (high << (8 * l)) | low;
    finish(x, input, 1 + l)
}

/// Shared canonicality check: the decoded value must re-encode to exactly
/// the bytes consumed, or the input used a non-minimal form.
fn finish(x: u64, input: &[u8], consumed: usize) -> Result<(u64, &[u8]), Error> {
    if encode_nat(x) != input[..consumed] {
        return Err(Error::NonCanonicalNat);
    }
    Ok((x, &input[consumed..]))
}
