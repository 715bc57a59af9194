// Path: crates/jam-types/src/ticket.rs
//! Safrole tickets: the VRF outputs ingested into the epoch's seal-key
//! accumulator, and the extrinsic proofs that produce them (spec §3).

use crate::primitives::H32;
use serde::{Deserialize, Serialize};

/// A ticket recorded in the `ticketAccumulator` / `sealTickets` vectors.
/// Unique by `id` within an epoch.
#[derive(Clone, Debug, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Ticket {
    /// The ring-VRF output, used both as the ticket's identity and as the
    /// pseudo-random seal-key selector.
    pub id: H32,
    /// Which of the validator's `ticketsPerValidator` lottery entries this is.
    pub entry_index: u8,
}

/// A ticket-proof extrinsic entry: a ring-VRF proof plus the claimed entry
/// index, submitted by any validator in the active set without revealing
/// which member produced it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketProof {
    /// The claimed lottery entry index, `entryIndex ∈ [0, ticketsPerValidator)`.
    pub entry_index: u8,
    /// The ring-VRF proof bytes (Bandersnatch ring signature over the entry index).
    pub proof: Vec<u8>,
}
