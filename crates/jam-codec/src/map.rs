// Path: crates/jam-codec/src/map.rs
//! Dictionaries: a sequence of `(K,V)` pairs sorted by the lexicographic
//! order of `encode_K(k)`, making the encoding invariant under insertion
//! order (spec §4.1, §8 property 3).

use crate::error::Error;
use crate::nat::{decode_nat, encode_nat};

pub fn encode_map<K, V>(
    entries: impl IntoIterator<Item = (K, V)>,
    encode_key: impl Fn(&K) -> Vec<u8>,
    encode_value: impl Fn(&V) -> Vec<u8>,
) -> Vec<u8> {
    let mut pairs: Vec<(Vec<u8>, Vec<u8>)> = entries
        .into_iter()
        .map(|(k, v)| (encode_key(&k), encode_value(&v)))
        .collect();
    pairs.sort_by(|a, b| a.0.cmp(&b.0));
    let mut out = encode_nat(pairs.len() as u64);
    for (k_bytes, v_bytes) in pairs {
        out.extend_from_slice(&k_bytes);
        out.extend_from_slice(&v_bytes);
    }
    out
}

pub fn decode_map<'a, K, V>(
    input: &'a [u8],
    mut decode_key: impl FnMut(&'a [u8]) -> Result<(K, &'a [u8]), Error>,
    mut decode_value: impl FnMut(&'a [u8]) -> Result<(V, &'a [u8]), Error>,
) -> Result<(Vec<(K, V)>, &'a [u8]), Error> {
    let (len, mut rest) = decode_nat(input)?;
    let mut out = Vec::with_capacity(len.min(1 << 20) as usize);
    for _ in 0..len {
        let (key, after_key) = decode_key(rest)?;
        let (value, after_value) = decode_value(after_key)?;
        out.push((key, value));
        rest = after_value;
    }
    Ok((out, rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_u8(i: &[u8]) -> Result<(u8, &[u8]), Error> {
        let b = *i.first().ok_or(Error::Truncated { needed: 1 })?;
        Ok((b, &i[1..]))
    }

    #[test]
    fn encoding_is_insertion_order_invariant() {
        let a = vec![(3u8, 30u8), (1, 10), (2, 20)];
        let b = vec![(1u8, 10u8), (2, 20), (3, 30)];
        let enc_a = encode_map(a, |k| vec![*k], |v| vec![*v]);
        let enc_b = encode_map(b, |k| vec![*k], |v| vec![*v]);
        assert_eq!(enc_a, enc_b);

        let (decoded, rest) = decode_map(&enc_a, decode_u8, decode_u8).unwrap();
        assert_eq!(decoded, vec![(1, 10), (2, 20), (3, 30)]);
        assert!(rest.is_empty());
    }
}
