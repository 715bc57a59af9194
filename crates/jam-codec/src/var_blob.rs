// Path: crates/jam-codec/src/var_blob.rs
//! Variable-length byte blobs, `var{seq(x)}`: `encode_nat(|x|) || x` (spec §4.1).

use crate::error::Error;
use crate::nat::{decode_nat, encode_nat};

pub fn encode_var_blob(bytes: &[u8]) -> Vec<u8> {
    let mut out = encode_nat(bytes.len() as u64);
    out.extend_from_slice(bytes);
    out
}

pub fn decode_var_blob(input: &[u8]) -> Result<(Vec<u8>, &[u8]), Error> {
    let (len, rest) = decode_nat(input)?;
    let len = len as usize;
    if rest.len() < len {
        return Err(Error::Truncated { needed: len - rest.len() });
    }
    Ok((rest[..len].to_vec(), &rest[len..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let data = b"jam-consensus-core".to_vec();
        let enc = encode_var_blob(&data);
        let (dec, rest) = decode_var_blob(&enc).unwrap();
        assert_eq!(dec, data);
        assert!(rest.is_empty());
    }

    #[test]
    fn empty_blob() {
        let enc = encode_var_blob(&[]);
        assert_eq!(enc, vec![0]);
    }
}
