// Path: crates/jam-types/src/error.rs
//! Shared error taxonomy for the consensus/execution core (spec §7).

use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error,
/// used for structured logging and test assertions.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// Errors raised while (de)serializing a protocol object (C1).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The input ran out of bytes before a value could be fully decoded.
    #[error("truncated input: need {needed} more byte(s)")]
    Truncated {
        /// How many additional bytes the decoder required.
        needed: usize,
    },
    /// A variable-length natural used more octets than the smallest valid encoding.
    #[error("non-canonical variable-length natural encoding")]
    NonCanonicalNat,
    /// A variable-length natural overflowed the representable range.
    #[error("variable-length natural overflows u64")]
    OverflowingNat,
    /// A discriminated union carried a tag byte with no known variant.
    #[error("unknown discriminant tag: {0}")]
    UnknownTag(u8),
    /// A fixed-size field decoded to a length different from what was expected.
    #[error("length mismatch: expected {expected}, found {found}")]
    LengthMismatch {
        /// The length the schema requires.
        expected: usize,
        /// The length actually present in the input.
        found: usize,
    },
    /// Trailing bytes remained after a value was fully decoded where none were expected.
    #[error("trailing bytes after decode: {0}")]
    TrailingBytes(usize),
}

impl ErrorCode for CodecError {
    fn code(&self) -> &'static str {
        match self {
            Self::Truncated { .. } => "CODEC_TRUNCATED",
            Self::NonCanonicalNat => "CODEC_NON_CANONICAL_NAT",
            Self::OverflowingNat => "CODEC_OVERFLOWING_NAT",
            Self::UnknownTag(_) => "CODEC_UNKNOWN_TAG",
            Self::LengthMismatch { .. } => "CODEC_LENGTH_MISMATCH",
            Self::TrailingBytes(_) => "CODEC_TRAILING_BYTES",
        }
    }
}

/// Errors raised while applying a Safrole per-slot transition (C2).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SafroleError {
    /// The block's slot did not advance past the current timeslot.
    #[error("invalid slot: block slot {slot} does not exceed current timeslot {current}")]
    InvalidSlot {
        /// The block's claimed slot.
        slot: u32,
        /// The state's current timeslot.
        current: u32,
    },
    /// The ticket extrinsic carried more proofs than the configured maximum.
    #[error("too many ticket extrinsics: {found} exceeds maximum {max}")]
    TooManyExtrinsics {
        /// Number of ticket proofs submitted.
        found: usize,
        /// Configured `maxTicketsPerExtrinsic`.
        max: usize,
    },
    /// A ticket proof's entry index fell outside `[0, ticketsPerValidator)`.
    #[error("invalid ticket entry index: {index} >= {max}")]
    InvalidEntryIndex {
        /// The submitted entry index.
        index: u32,
        /// Configured `ticketsPerValidator`.
        max: u32,
    },
    /// A ticket with the same id was already present in the accumulator.
    #[error("duplicate ticket id")]
    DuplicateTicket,
    /// A ring-VRF ticket proof failed verification against the active ring root.
    #[error("invalid ring VRF proof")]
    InvalidRingVRF,
    /// The fallback seal signature failed verification.
    #[error("invalid seal signature")]
    InvalidSealSig,
    /// The block header's epoch mark did not match the locally computed one.
    #[error("invalid epoch mark")]
    InvalidEpochMark,
}

impl ErrorCode for SafroleError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidSlot { .. } => "SAFROLE_INVALID_SLOT",
            Self::TooManyExtrinsics { .. } => "SAFROLE_TOO_MANY_EXTRINSICS",
            Self::InvalidEntryIndex { .. } => "SAFROLE_INVALID_ENTRY_INDEX",
            Self::DuplicateTicket => "SAFROLE_DUPLICATE_TICKET",
            Self::InvalidRingVRF => "SAFROLE_INVALID_RING_VRF",
            Self::InvalidSealSig => "SAFROLE_INVALID_SEAL_SIG",
            Self::InvalidEpochMark => "SAFROLE_INVALID_EPOCH_MARK",
        }
    }
}

/// Errors raised while validating a dispute batch (C3).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DisputesError {
    /// A verdict's age was neither the current nor the immediately prior epoch.
    #[error("bad judgement age: {age}")]
    BadJudgementAge {
        /// The verdict's claimed age.
        age: u32,
    },
    /// A judgment's validator index did not resolve to a key in the selected set.
    #[error("bad judgement key: validator index {index}")]
    BadJudgementKey {
        /// The out-of-range or unknown validator index.
        index: u32,
    },
    /// A culprit or fault's key was not a member of the active/previous set.
    #[error("bad guarantor key")]
    BadGuarantorKey,
    /// A fault's key was not a recognized auditor.
    #[error("bad auditor key")]
    BadAuditorKey,
    /// An Ed25519 signature failed to verify.
    #[error("bad signature")]
    BadSignature,
    /// A verdict did not carry the required supermajority of votes.
    #[error("insufficient votes: {found} of {required} required")]
    InsufficientVotes {
        /// Number of votes present.
        found: usize,
        /// Minimum required (`floor(2N/3) + 1`).
        required: usize,
    },
}

impl ErrorCode for DisputesError {
    fn code(&self) -> &'static str {
        match self {
            Self::BadJudgementAge { .. } => "DISPUTES_BAD_JUDGEMENT_AGE",
            Self::BadJudgementKey { .. } => "DISPUTES_BAD_JUDGEMENT_KEY",
            Self::BadGuarantorKey => "DISPUTES_BAD_GUARANTOR_KEY",
            Self::BadAuditorKey => "DISPUTES_BAD_AUDITOR_KEY",
            Self::BadSignature => "DISPUTES_BAD_SIGNATURE",
            Self::InsufficientVotes { .. } => "DISPUTES_INSUFFICIENT_VOTES",
        }
    }
}

/// In-band host-call result codes (spec §4.5, §7). These are not `Error`s:
/// they are written to register `r7` and never unwind the PVM run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostResultCode {
    /// Item not found / slot empty.
    None,
    /// Operation is well-formed but not applicable in the current state.
    Huh,
    /// The operation would push the account below its minimum balance.
    Full,
    /// The referenced service id does not exist.
    Who,
    /// The referenced core index is out of range.
    Core,
}

impl HostResultCode {
    /// The sentinel value written to `r7`, `2^64 - 9` for `NONE` and small
    /// negative-offset values for the others, matching the Gray Paper's
    /// `2^64 - n` convention for out-of-band register values.
    pub const fn as_u64(self) -> u64 {
        match self {
            Self::None => u64::MAX - 8,
            Self::Huh => u64::MAX - 7,
            Self::Full => u64::MAX - 6,
            Self::Who => u64::MAX - 5,
            Self::Core => u64::MAX - 4,
        }
    }
}

impl ErrorCode for HostResultCode {
    fn code(&self) -> &'static str {
        match self {
            Self::None => "HOST_NONE",
            Self::Huh => "HOST_HUH",
            Self::Full => "HOST_FULL",
            Self::Who => "HOST_WHO",
            Self::Core => "HOST_CORE",
        }
    }
}
