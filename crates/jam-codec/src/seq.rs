// Path: crates/jam-codec/src/seq.rs
//! Variable-length sequences: `encode_nat(|x|) || concat(encode_T(t_i))` (spec §4.1).

use crate::error::Error;
use crate::nat::{decode_nat, encode_nat};

pub fn encode_seq<T>(items: &[T], encode_item: impl Fn(&T) -> Vec<u8>) -> Vec<u8> {
    let mut out = encode_nat(items.len() as u64);
    for item in items {
        out.extend_from_slice(&encode_item(item));
    }
    out
}

pub fn decode_seq<'a, T>(
    input: &'a [u8],
    mut decode_item: impl FnMut(&'a [u8]) -> Result<(T, &'a [u8]), Error>,
) -> Result<(Vec<T>, &'a [u8]), Error> {
    let (len, mut rest) = decode_nat(input)?;
    let mut out = Vec::with_capacity(len.min(1 << 20) as usize);
    for _ in 0..len {
        let (item, next_rest) = decode_item(rest)?;
        out.push(item);
        rest = next_rest;
    }
    Ok((out, rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_byte_sequence() {
        let items: Vec<u8> = vec![1, 2, 3, 4, 5];
        let enc = encode_seq(&items, |b| vec![*b]);
        let (dec, rest) = decode_seq(&enc, |i| {
            let b = *i.first().ok_or(Error::Truncated { needed: 1 })?;
            Ok((b, &i[1..]))
        })
        .unwrap();
        assert_eq!(dec, items);
        assert!(rest.is_empty());
    }

    #[test]
    fn empty_sequence_is_one_byte() {
        let items: Vec<u8> = vec![];
        assert_eq!(encode_seq(&items, |b| vec![*b]), vec![0]);
    }
}
