// Path: crates/jam-codec/src/lib.rs
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
//! The canonical, deterministic binary codec (C1): variable-length
//! naturals, fixed-width integers, sequences, dictionaries, options, and
//! discriminated unions, independent of any particular schema type.
//!
//! Every `encode_T` in this crate is total; every `decode_T` returns
//! `Result<(T, &[u8]), Error>` so callers can chain decoders over the
//! remaining input, matching the Gray Paper's `decode : bytes -> (T, bytes)`
//! shape (spec §4.1).

mod error;
mod fixed;
mod map;
mod nat;
mod option;
mod seq;
mod var_blob;

pub use error::Error;
pub use fixed::{decode_fixed, encode_fixed};
pub use map::{decode_map, encode_map};
pub use nat::{decode_nat, encode_nat};
pub use option::{decode_option, encode_option};
pub use seq::{decode_seq, encode_seq};
pub use var_blob::{decode_var_blob, encode_var_blob};

/// A type with a canonical, deterministic binary encoding.
pub trait Encode {
    fn encode(&self) -> Vec<u8>;
}

/// A type decodable from the canonical binary encoding, returning the
/// decoded value and the unconsumed remainder of the input.
pub trait Decode: Sized {
    fn decode(input: &[u8]) -> Result<(Self, &[u8]), Error>;
}

/// Decodes a value and requires the input be fully consumed, matching the
/// round-trip contract `decode(encode(x)) = (x, epsilon)` (spec §8 property 1).
pub fn decode_all<T: Decode>(input: &[u8]) -> Result<T, Error> {
    let (value, rest) = T::decode(input)?;
    if !rest.is_empty() {
        return Err(Error::TrailingBytes(rest.len()));
    }
    Ok(value)
}

impl Encode for u8 {
    fn encode(&self) -> Vec<u8> {
        vec![*self]
    }
}

impl Decode for u8 {
    fn decode(input: &[u8]) -> Result<(Self, &[u8]), Error> {
        let byte = *input.first().ok_or(Error::Truncated { needed: 1 })?;
        Ok((byte, &input[1..]))
    }
}

impl<const N: usize> Encode for [u8; N] {
    fn encode(&self) -> Vec<u8> {
        self.to_vec()
    }
}

impl<const N: usize> Decode for [u8; N] {
    fn decode(input: &[u8]) -> Result<(Self, &[u8]), Error> {
        if input.len() < N {
            return Err(Error::Truncated { needed: N - input.len() });
        }
        let mut out = [0u8; N];
        out.copy_from_slice(&input[..N]);
        Ok((out, &input[N..]))
    }
}

impl Encode for bool {
    fn encode(&self) -> Vec<u8> {
        vec![if *self { 1 } else { 0 }]
    }
}

impl Decode for bool {
    fn decode(input: &[u8]) -> Result<(Self, &[u8]), Error> {
        let (byte, rest) = u8::decode(input)?;
        match byte {
            0 => Ok((false, rest)),
            1 => Ok((true, rest)),
            other => Err(Error::UnknownTag(other)),
        }
    }
}
