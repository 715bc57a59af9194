// Path: crates/jam-pvm/src/error.rs
//! Errors raised while parsing a program blob or configuring memory, as
//! distinct from the in-band `Status` a run itself terminates with.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PvmError {
    #[error("program blob is empty")]
    EmptyProgram,

    #[error("program blob is truncated: expected at least {expected} bytes, found {found}")]
    Truncated { expected: usize, found: usize },

    #[error("jump table entry {index} references offset {offset}, past code length {code_len}")]
    InvalidJumpTableEntry {
        index: usize,
        offset: u32,
        code_len: usize,
    },

    #[error("bitmask length {bitmask_len} does not match code length {code_len}")]
    BitmaskLengthMismatch { bitmask_len: usize, code_len: usize },

    #[error("element size {0} is not one of {{1, 2, 4, 8}}")]
    InvalidElementSize(u32),

    #[error("page {page} is already initialized")]
    PageAlreadyInitialized { page: u32 },

    #[error("address {addr} with length {len} falls outside the addressable space")]
    AddressOutOfRange { addr: u64, len: usize },
}
