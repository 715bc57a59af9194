// Path: crates/jam-host-abi/src/error.rs
//! Host-call dispatch errors (spec §4.5). These unwind the host dispatch
//! itself; in-band outcomes (`NONE`, `HUH`, `FULL`, `WHO`) are written to
//! `r7` instead and never reach this type.

use thiserror::Error;
use jam_types::error::ErrorCode;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostAbiError {
    /// A host call tried to read or write outside the program's accessible
    /// address space.
    #[error("memory fault at address {0}")]
    MemoryFault(u32),
    /// `ECALLI` carried an id this dispatcher has no handler for.
    #[error("unknown host call id {0}")]
    UnknownHostCall(u64),
}

impl ErrorCode for HostAbiError {
    fn code(&self) -> &'static str {
        match self {
            Self::MemoryFault(_) => "HOST_ABI_MEMORY_FAULT",
            Self::UnknownHostCall(_) => "HOST_ABI_UNKNOWN_CALL",
        }
    }
}
