//! Ticket ingestion: verifying a ring-VRF proof and inserting the
//! resulting ticket into the epoch's accumulator while preserving the
//! sorted-unique-by-id invariant (spec §4.2 step 4).

use jam_crypto::bandersnatch;
use jam_types::error::SafroleError;
use jam_types::ticket::TicketProof;
use jam_types::{Ticket, H32};

/// Inserts an already-verified `ticket` into `accumulator`, which must
/// remain sorted ascending by `id` and unique by `id` across calls.
/// Duplicate detection walks the extrinsic in submission order (spec §5
/// "ticket ingestion preserves block-body order for duplicate detection"),
/// which a plain sorted-insert satisfies regardless of submission order
/// since `id` is the sole uniqueness key.
pub fn ingest_ticket(
    accumulator: &mut Vec<Ticket>,
    ticket: Ticket,
    tickets_per_validator: u32,
) -> Result<(), SafroleError> {
    if u32::from(ticket.entry_index) >= tickets_per_validator {
        return Err(SafroleError::InvalidEntryIndex {
            index: u32::from(ticket.entry_index),
            max: tickets_per_validator,
        });
    }
    match accumulator.binary_search_by(|t| t.id.cmp(&ticket.id)) {
        Ok(_) => Err(SafroleError::DuplicateTicket),
        Err(pos) => {
            accumulator.insert(pos, ticket);
            Ok(())
        }
    }
}

/// Verifies a ticket-proof extrinsic entry against the active set's ring
/// root, then ingests the resulting ticket.
pub fn verify_and_ingest_ticket(
    accumulator: &mut Vec<Ticket>,
    ring_root: &bandersnatch::RingCommitment,
    proof: &TicketProof,
    tickets_per_validator: u32,
) -> Result<(), SafroleError> {
    if u32::from(proof.entry_index) >= tickets_per_validator {
        return Err(SafroleError::InvalidEntryIndex {
            index: u32::from(proof.entry_index),
            max: tickets_per_validator,
        });
    }
    let id = bandersnatch::verify_ticket(ring_root, proof.entry_index, &proof.proof)
        .map_err(|_| SafroleError::InvalidRingVRF)?;
    ingest_ticket(
        accumulator,
        Ticket { id: H32(id), entry_index: proof.entry_index },
        tickets_per_validator,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(id_byte: u8, entry_index: u8) -> Ticket {
        Ticket { id: H32([id_byte; 32]), entry_index }
    }

    #[test]
    fn ingest_keeps_accumulator_sorted_by_id() {
        let mut acc = Vec::new();
        ingest_ticket(&mut acc, ticket(5, 0), 3).expect("insert 5");
        ingest_ticket(&mut acc, ticket(1, 0), 3).expect("insert 1");
        ingest_ticket(&mut acc, ticket(9, 0), 3).expect("insert 9");
        let ids: Vec<u8> = acc.iter().map(|t| t.id.as_bytes()[0]).collect();
        assert_eq!(ids, vec![1, 5, 9]);
    }

    #[test]
    fn duplicate_id_is_rejected_regardless_of_submission_order() {
        let mut acc = Vec::new();
        ingest_ticket(&mut acc, ticket(3, 0), 3).expect("first insert");
        let result = ingest_ticket(&mut acc, ticket(3, 1), 3);
        assert_eq!(result, Err(SafroleError::DuplicateTicket));
    }

    #[test]
    fn entry_index_past_max_is_rejected() {
        let mut acc = Vec::new();
        let result = ingest_ticket(&mut acc, ticket(1, 3), 3);
        assert_eq!(result, Err(SafroleError::InvalidEntryIndex { index: 3, max: 3 }));
    }
}
