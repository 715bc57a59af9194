// Path: crates/jam-codec/src/option.rs
//! Optional values: tag byte `0` for `None`, `1 || encode_T(v)` for `Some` (spec §4.1).

use crate::error::Error;

pub fn encode_option<T>(value: &Option<T>, encode_inner: impl FnOnce(&T) -> Vec<u8>) -> Vec<u8> {
    match value {
        None => vec![0],
        Some(v) => {
            let mut out = vec![1];
            out.extend_from_slice(&encode_inner(v));
            out
        }
    }
}

pub fn decode_option<T>(
    input: &[u8],
    decode_inner: impl FnOnce(&[u8]) -> Result<(T, &[u8]), Error>,
) -> Result<(Option<T>, &[u8]), Error> {
    let &tag = input.first().ok_or(Error::Truncated { needed: 1 })?;
    match tag {
        0 => Ok((None, &input[1..])),
        1 => {
            let (value, rest) = decode_inner(&input[1..])?;
            Ok((Some(value), rest))
        }
        other => Err(Error::UnknownTag(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::{decode_fixed, encode_fixed};

    #[test]
    fn roundtrip_none_and_some() {
        let none: Option<u64> = None;
        let enc = encode_option(&none, |v| encode_fixed(*v, 4));
        assert_eq!(enc, vec![0]);
        let (dec, rest) = decode_option(&enc, |i| decode_fixed(i, 4)).unwrap();
        assert_eq!(dec, None);
        assert!(rest.is_empty());

        let some = Some(42u64);
        let enc = encode_option(&some, |v| encode_fixed(*v, 4));
        let (dec, rest) = decode_option(&enc, |i| decode_fixed(i, 4)).unwrap();
        assert_eq!(dec, Some(42));
        assert!(rest.is_empty());
    }

    #[test]
    fn rejects_unknown_tag() {
        let res: Result<(Option<u64>, &[u8]), Error> = decode_option(&[7], |i| decode_fixed(i, 4));
        assert_eq!(res, Err(Error::UnknownTag(7)));
    }
}
