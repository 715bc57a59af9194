// Path: crates/jam-erasure-coding/src/lib.rs
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
//! Reed-Solomon `(k, n)` shard coding over GF(2^16) with a 684-byte
//! (342-word) blocking size (spec §4.7).
//!
//! Data is padded to a multiple of `k * PIECE_SIZE` bytes, split into `k`
//! equal pieces, and each piece is cut into 342 two-byte words. For every
//! word position, the `k` source words across the pieces are run through
//! an `n x k` Vandermonde matrix over GF(2^16) to produce the matching word
//! of each of the `n` output shards. Any `k` of the `n` shards are enough
//! to invert the corresponding `k x k` submatrix and recover the source
//! words at every position, and therefore the whole padded data.

mod error;
mod gf;
mod matrix;

pub use error::ErasureError;

use gf::Gf;

/// The protocol's fixed shard blocking size, in bytes (spec §4.7).
pub const PIECE_SIZE: usize = 684;
const WORDS_PER_PIECE: usize = PIECE_SIZE / 2;

/// The result of erasure-encoding a byte string: `n` shards of
/// `PIECE_SIZE` bytes each, any `k` of which suffice to reconstruct the
/// original data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedData {
    pub original_length: usize,
    pub k: usize,
    pub n: usize,
    pub shards: Vec<Vec<u8>>,
    pub indices: Vec<usize>,
}

fn check_parameters(k: usize, n: usize) -> Result<(), ErasureError> {
    if k == 0 || k > n {
        return Err(ErasureError::InvalidParameters { k, n });
    }
    Ok(())
}

fn pad_to_piece_multiple(data: &[u8], k: usize) -> Vec<u8> {
    let chunk = k * PIECE_SIZE;
    let mut padded = data.to_vec();
    let remainder = padded.len() % chunk;
    if remainder != 0 {
        padded.resize(padded.len() + (chunk - remainder), 0);
    }
    if padded.is_empty() {
        padded.resize(chunk, 0);
    }
    padded
}

fn words_of(piece: &[u8]) -> Vec<Gf> {
    piece
        .chunks(2)
        .map(|pair| {
            let lo = pair[0];
            let hi = *pair.get(1).unwrap_or(&0);
            Gf(u16::from_le_bytes([lo, hi]))
        })
        .collect()
}

fn bytes_of(words: &[Gf]) -> Vec<u8> {
    let mut out = Vec::with_capacity(words.len() * 2);
    for word in words {
        out.extend_from_slice(&word.0.to_le_bytes());
    }
    out
}

/// Erasure-encodes `data` into `n` shards such that any `k` suffice to
/// reconstruct it. Operates block-by-block over `k * PIECE_SIZE`-byte
/// chunks of the zero-padded input, so `data` of any length is supported.
pub fn encode(data: &[u8], k: usize, n: usize) -> Result<EncodedData, ErasureError> {
    check_parameters(k, n)?;
    let padded = pad_to_piece_multiple(data, k);
    let chunk_size = k * PIECE_SIZE;
    let num_blocks = padded.len() / chunk_size;

    let mut shards: Vec<Vec<u8>> = vec![Vec::with_capacity(num_blocks * PIECE_SIZE); n];
    let generator = matrix::generator_matrix(k, n);

    for block in padded.chunks(chunk_size) {
        let pieces: Vec<&[u8]> = block.chunks(PIECE_SIZE).collect();
        debug_assert_eq!(pieces.len(), k);
        for word_pos in 0..WORDS_PER_PIECE {
            let data_words: Vec<Gf> = pieces
                .iter()
                .map(|piece| words_of(&piece[word_pos * 2..word_pos * 2 + 2])[0])
                .collect();
            for (shard_index, row) in generator.iter().enumerate() {
                let word = row.iter().zip(&data_words).fold(Gf::ZERO, |acc, (m, v)| acc.add(m.mul(*v)));
                shards[shard_index].extend_from_slice(&word.0.to_le_bytes());
            }
        }
    }

    Ok(EncodedData {
        original_length: data.len(),
        k,
        n,
        shards,
        indices: (0..n).collect(),
    })
}

/// Reconstructs the original data from any `k` of `encoded`'s shards,
/// truncated back to `encoded.original_length`.
pub fn decode(encoded: &EncodedData, k: usize) -> Result<Vec<u8>, ErasureError> {
    check_parameters(k, encoded.n)?;
    if encoded.shards.len() < k || encoded.indices.len() < k {
        return Err(ErasureError::NotEnoughShards { expected: k, found: encoded.shards.len() });
    }

    let mut seen = std::collections::BTreeSet::new();
    for &index in encoded.indices.iter().take(k) {
        if index >= encoded.n {
            return Err(ErasureError::ShardIndexOutOfRange { index, n: encoded.n });
        }
        if !seen.insert(index) {
            return Err(ErasureError::DuplicateShardIndex(index));
        }
    }

    for (i, shard) in encoded.shards.iter().take(k).enumerate() {
        if shard.len() % PIECE_SIZE != 0 {
            return Err(ErasureError::ShardLengthMismatch { index: i, expected: PIECE_SIZE, found: shard.len() });
        }
    }

    let generator = matrix::generator_matrix(k, encoded.n);
    let chosen_rows: Vec<Vec<Gf>> = encoded.indices[..k].iter().map(|&i| generator[i].clone()).collect();
    let inverse = matrix::invert(chosen_rows)?;

    let num_blocks = encoded.shards[0].len() / PIECE_SIZE;
    let mut pieces: Vec<Vec<u8>> = vec![Vec::with_capacity(num_blocks * PIECE_SIZE); k];

    for block in 0..num_blocks {
        for word_pos in 0..WORDS_PER_PIECE {
            let offset = block * PIECE_SIZE + word_pos * 2;
            let shard_words: Vec<Gf> = encoded.shards[..k]
                .iter()
                .map(|shard| words_of(&shard[offset..offset + 2])[0])
                .collect();
            let recovered = matrix::apply(&inverse, &shard_words);
            for (piece_index, word) in recovered.iter().enumerate() {
                pieces[piece_index].extend_from_slice(&bytes_of(&[*word]));
            }
        }
    }

    let mut out = Vec::with_capacity(num_blocks * k * PIECE_SIZE);
    for block in 0..num_blocks {
        for piece in &pieces {
            out.extend_from_slice(&piece[block * PIECE_SIZE..(block + 1) * PIECE_SIZE]);
        }
    }
    out.truncate(encoded.original_length);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn roundtrips_with_first_k_shards() {
        let data = b"a small work-package fragment".to_vec();
        let encoded = encode(&data, 3, 6).expect("encode");
        let decoded = decode(&encoded, 3).expect("decode");
        assert_eq!(decoded, data);
    }

    #[test]
    fn roundtrips_with_any_k_subset() {
        let data = vec![7u8; PIECE_SIZE * 3 + 17];
        let encoded = encode(&data, 4, 9).expect("encode");

        let mut subset = EncodedData {
            original_length: encoded.original_length,
            k: encoded.k,
            n: encoded.n,
            shards: vec![
                encoded.shards[1].clone(),
                encoded.shards[4].clone(),
                encoded.shards[5].clone(),
                encoded.shards[8].clone(),
            ],
            indices: vec![1, 4, 5, 8],
        };
        let decoded = decode(&subset, 4).expect("decode from non-leading subset");
        assert_eq!(decoded, data);

        subset.indices = vec![0, 2, 3, 7];
        subset.shards = vec![
            encoded.shards[0].clone(),
            encoded.shards[2].clone(),
            encoded.shards[3].clone(),
            encoded.shards[7].clone(),
        ];
        let decoded_again = decode(&subset, 4).expect("decode from a different subset");
        assert_eq!(decoded_again, data);
    }

    #[test]
    fn roundtrips_empty_input() {
        let encoded = encode(&[], 2, 4).expect("encode empty input");
        let decoded = decode(&encoded, 2).expect("decode empty input");
        assert!(decoded.is_empty());
    }

    #[test]
    fn roundtrips_random_data() {
        let mut rng = rand::thread_rng();
        let len = rng.gen_range(1..5000);
        let data: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
        let encoded = encode(&data, 5, 12).expect("encode random data");
        let decoded = decode(&encoded, 5).expect("decode random data");
        assert_eq!(decoded, data);
    }

    #[test]
    fn rejects_k_greater_than_n() {
        assert_eq!(encode(b"x", 3, 2), Err(ErasureError::InvalidParameters { k: 3, n: 2 }));
    }

    #[test]
    fn rejects_duplicate_shard_indices() {
        let encoded = encode(b"payload", 2, 4).expect("encode");
        let broken = EncodedData {
            indices: vec![0, 0],
            shards: vec![encoded.shards[0].clone(), encoded.shards[0].clone()],
            ..encoded
        };
        assert_eq!(decode(&broken, 2), Err(ErasureError::DuplicateShardIndex(0)));
    }
}
