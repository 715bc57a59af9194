// Path: crates/jam-types/src/block.rs
//! Block header and extrinsic body (spec §3, §6).

use crate::dispute::Dispute;
use crate::primitives::H32;
use crate::ticket::{Ticket, TicketProof};
use crate::validator::ValidatorKey;
use serde::{Deserialize, Serialize};

/// Marks the block that opens a new epoch: the new entropy, the entropy
/// used to draw winning tickets, and the freshly rotated active set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpochMark {
    pub entropy: H32,
    pub tickets_entropy: H32,
    pub validators: Vec<ValidatorKey>,
}

/// Marks the block that publishes the epoch's winning ticket ids.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinnersMark {
    pub tickets: Vec<Ticket>,
}

/// A solicited preimage, submitted as extrinsic data for a requesting service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preimage {
    pub service: u32,
    pub data: Vec<u8>,
}

/// A work-report guarantee, signed by the core's assigned guarantors. The
/// refinement/accumulation pipeline (jam-core, jam-pvm, jam-host-abi) is the
/// consumer of this extrinsic; its payload is treated as an opaque encoded
/// work-report here, since its full schema lives outside C1-C7's scope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guarantee {
    pub core: u16,
    pub report: Vec<u8>,
    pub signatures: Vec<(u32, [u8; 64])>,
}

/// An assurance that a validator holds its erasure-coded shard of a
/// pending work-report's data for core availability.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assurance {
    pub anchor: H32,
    pub bitfield: Vec<u8>,
    pub validator_index: u32,
    pub signature: [u8; 64],
}

/// The block header (spec §3).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub parent: H32,
    pub prior_state_root: H32,
    pub extrinsic_hash: H32,
    pub timeslot: u32,
    pub epoch_mark: Option<EpochMark>,
    pub winners_mark: Option<WinnersMark>,
    pub offenders_mark: Vec<H32>,
    pub author_index: u16,
    pub vrf_sig: [u8; 96],
    pub seal_sig: [u8; 96],
}

/// The block extrinsic body (spec §3).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Body {
    pub tickets: Vec<TicketProof>,
    pub preimages: Vec<Preimage>,
    pub guarantees: Vec<Guarantee>,
    pub assurances: Vec<Assurance>,
    pub disputes: Vec<Dispute>,
}

/// A full block: header plus extrinsic body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub header: Header,
    pub body: Body,
}
