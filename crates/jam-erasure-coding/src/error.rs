// Path: crates/jam-erasure-coding/src/error.rs
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErasureError {
    #[error("k must be at least 1 and at most n ({k} > {n})")]
    InvalidParameters { k: usize, n: usize },
    #[error("expected {expected} shards for decoding, found {found}")]
    NotEnoughShards { expected: usize, found: usize },
    #[error("shard {index} has length {found}, expected {expected}")]
    ShardLengthMismatch { index: usize, expected: usize, found: usize },
    #[error("duplicate shard index {0} supplied for decoding")]
    DuplicateShardIndex(usize),
    #[error("shard index {index} is out of range for n={n}")]
    ShardIndexOutOfRange { index: usize, n: usize },
    #[error("the generator submatrix for the supplied shard indices is singular")]
    SingularMatrix,
}
