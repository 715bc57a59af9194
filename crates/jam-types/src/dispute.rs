// Path: crates/jam-types/src/dispute.rs
//! Dispute evidence: verdicts, culprits, and faults (spec §3, §4.3).

use crate::primitives::H32;
use serde::{Deserialize, Serialize};

/// A single validator's signed vote on a verdict target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Judgment {
    /// `true` signs `"jam_valid"||target`, `false` signs `"jam_invalid"||target`.
    pub vote: bool,
    /// Index into the validator set selected by the verdict's `age`.
    pub index: u32,
    /// Ed25519 signature over the context-tagged target.
    pub signature: [u8; 64],
}

/// A batch of judgments about one reported work-package, requiring a
/// supermajority of the relevant validator set to be valid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// The work-report hash under dispute.
    pub target: H32,
    /// The epoch (current or immediately prior) the judging set is drawn from.
    pub age: u32,
    /// The individual validator votes; `|votes| >= floor(2N/3)+1`.
    pub votes: Vec<Judgment>,
}

impl Verdict {
    /// Whether a strict majority of `votes` voted `true` (the verdict's net outcome).
    pub fn is_valid(&self) -> bool {
        let valid_count = self.votes.iter().filter(|j| j.vote).count();
        valid_count * 2 > self.votes.len()
    }
}

/// A guarantor who signed a now-disputed-invalid report; signs `"jam_guarantee"||target`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Culprit {
    pub target: H32,
    pub key: [u8; 32],
    pub signature: [u8; 64],
}

/// An auditor whose judgment on `target` was contradicted by the verdict's
/// outcome; signs the matching `"jam_valid"`/`"jam_invalid"` context.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fault {
    pub target: H32,
    pub vote: bool,
    pub key: [u8; 32],
    pub signature: [u8; 64],
}

/// A full dispute extrinsic batch, applied atomically.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Dispute {
    pub verdicts: Vec<Verdict>,
    pub culprits: Vec<Culprit>,
    pub faults: Vec<Fault>,
}

pub const CONTEXT_VALID: &[u8] = b"jam_valid";
pub const CONTEXT_INVALID: &[u8] = b"jam_invalid";
pub const CONTEXT_GUARANTEE: &[u8] = b"jam_guarantee";
