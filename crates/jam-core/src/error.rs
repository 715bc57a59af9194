// Path: crates/jam-core/src/error.rs
//! The block-application error taxonomy: each phase's own error type,
//! threaded through unchanged (spec §7 "errors propagate with their
//! originating phase's code, never collapsed to a generic failure").

use jam_types::error::ErrorCode;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("codec error: {0}")]
    Codec(#[from] jam_codec::Error),
    #[error("safrole error: {0}")]
    Safrole(#[from] jam_types::error::SafroleError),
    #[error("disputes error: {0}")]
    Disputes(#[from] jam_types::error::DisputesError),
    #[error("host abi error: {0}")]
    HostAbi(#[from] jam_host_abi::HostAbiError),
    #[error("header extrinsic hash does not match body")]
    ExtrinsicHashMismatch,
}

impl ErrorCode for EngineError {
    fn code(&self) -> &'static str {
        match self {
            Self::Codec(_) => "ENGINE_CODEC",
            Self::Safrole(inner) => inner.code(),
            Self::Disputes(inner) => inner.code(),
            Self::HostAbi(_) => "ENGINE_HOST_ABI",
            Self::ExtrinsicHashMismatch => "ENGINE_EXTRINSIC_HASH_MISMATCH",
        }
    }
}
