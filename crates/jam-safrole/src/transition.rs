//! The per-slot state transition (spec §4.2 "Per-slot transition").

use crate::state::SafroleState;
use crate::tickets::verify_and_ingest_ticket;
use jam_crypto::{bandersnatch, hash};
use jam_types::error::SafroleError;
use jam_types::ticket::TicketProof;
use jam_types::{EpochMark, ProtocolConfig, ValidatorSet, WinnersMark, H32};
use tracing::{debug, info, warn};

/// What a successful slot application produced, beyond the mutated state:
/// the two optional header marks a block author/validator must agree on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SlotOutcome {
    pub epoch_mark: Option<EpochMark>,
    pub winners_mark: Option<WinnersMark>,
}

/// Applies one block's worth of Safrole state transition: slot/extrinsic
/// bounds checking, ticket ingestion, tickets-mark publication, and (when
/// the slot crosses an epoch boundary) validator-set rotation and entropy
/// advancement. Fully atomic: on any `Err`, `state` is left untouched.
pub fn apply_slot(
    state: &SafroleState,
    config: &ProtocolConfig,
    slot: u32,
    incoming_entropy: H32,
    extrinsic: &[TicketProof],
) -> Result<(SafroleState, SlotOutcome), SafroleError> {
    let span = tracing::span!(tracing::Level::DEBUG, "safrole", slot);
    let _enter = span.enter();

    if slot <= state.tau {
        warn!(code = "SAFROLE_INVALID_SLOT", slot, current = state.tau, "slot did not advance");
        return Err(SafroleError::InvalidSlot { slot, current: state.tau });
    }
    if extrinsic.len() > config.max_tickets_per_extrinsic as usize {
        warn!(code = "SAFROLE_TOO_MANY_EXTRINSICS", found = extrinsic.len(), "too many ticket proofs");
        return Err(SafroleError::TooManyExtrinsics {
            found: extrinsic.len(),
            max: config.max_tickets_per_extrinsic as usize,
        });
    }

    let mut next = state.clone();

    let current_epoch = state.tau / config.epoch_duration;
    let new_epoch = slot / config.epoch_duration;
    let rotates = new_epoch > current_epoch;

    for proof in extrinsic {
        verify_and_ingest_ticket(
            &mut next.ticket_accumulator,
            &next.epoch_root,
            proof,
            config.tickets_per_validator,
        )?;
        debug!(entry_index = proof.entry_index, "ticket ingested");
    }

    let winners_mark = publish_tickets_mark(&mut next, config);

    let epoch_mark = if rotates {
        Some(rotate_epoch(&mut next, config, slot, incoming_entropy)?)
    } else {
        None
    };

    next.tau = slot;
    info!(epoch_rotated = rotates, tickets_published = winners_mark.is_some(), "slot applied");

    Ok((next, SlotOutcome { epoch_mark, winners_mark }))
}

/// Publishes a `WinnersMark` once the accumulator reaches `epoch_duration`
/// tickets, retaining any surplus for the next publication (spec §4.2 step
/// 6). Computed before the epoch-rotation clear below so a rotating slot
/// still gets credit for tickets it collected this call (a resolved
/// ordering ambiguity in the distilled spec text; see `DESIGN.md`).
fn publish_tickets_mark(state: &mut SafroleState, config: &ProtocolConfig) -> Option<WinnersMark> {
    let e = config.epoch_duration as usize;
    if state.ticket_accumulator.len() < e {
        return None;
    }
    let winners: Vec<_> = state.ticket_accumulator.drain(..e).collect();
    state.seal_tickets = winners.iter().cloned().map(Some).collect();
    Some(WinnersMark { tickets: winners })
}

fn rotate_epoch(
    state: &mut SafroleState,
    config: &ProtocolConfig,
    slot: u32,
    incoming_entropy: H32,
) -> Result<EpochMark, SafroleError> {
    state.previous_set = state.active_set.clone();
    state.active_set = state.pending_set.clone();

    let surviving: Vec<_> = state
        .staging_set
        .validators
        .iter()
        .filter(|v| !state.offenders.contains(&v.ed25519))
        .cloned()
        .collect();
    state.pending_set = ValidatorSet::padded(surviving, config.num_validators as usize);

    state.epoch_root = bandersnatch::build_epoch_root(&state.active_set.bandersnatch_keys())
        .map_err(|_| SafroleError::InvalidEpochMark)?;

    state.ticket_accumulator.clear();
    state.seal_tickets = vec![None; config.epoch_duration as usize];

    let previous_entropy = state.entropy[0];
    let mut preimage = Vec::with_capacity(32 + 4 + 32);
    preimage.extend_from_slice(previous_entropy.as_bytes());
    preimage.extend_from_slice(&slot.to_le_bytes());
    preimage.extend_from_slice(incoming_entropy.as_bytes());
    let fresh = H32(hash::blake2b_256(&preimage));

    state.entropy = [fresh, state.entropy[0], state.entropy[1], state.entropy[2]];

    Ok(EpochMark {
        entropy: fresh,
        tickets_entropy: incoming_entropy,
        validators: state.active_set.validators.clone(),
    })
}

/// The exact bytes a fallback seal's ring-VRF signature is computed over:
/// the unsigned header encoding followed by the `"$jam_fallback"` domain
/// tag and the entropy slot, in that fixed order (spec §4.2.1; "any
/// reordering invalidates the signature").
pub fn fallback_seal_message(unsigned_header: &[u8], entropy_slot: &H32) -> Vec<u8> {
    let mut out = Vec::with_capacity(unsigned_header.len() + 13 + 32);
    out.extend_from_slice(unsigned_header);
    out.extend_from_slice(b"$jam_fallback");
    out.extend_from_slice(entropy_slot.as_bytes());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use jam_types::ValidatorKey;

    fn tiny_config() -> ProtocolConfig {
        let mut c = ProtocolConfig::tiny();
        c.num_validators = 3;
        c.epoch_duration = 2;
        c.tickets_per_validator = 4;
        c.max_tickets_per_extrinsic = 8;
        c
    }

    fn genesis_with_active(config: &ProtocolConfig) -> SafroleState {
        let mut state = SafroleState::genesis(config.num_validators as usize, config.epoch_duration as usize);
        let validators: Vec<ValidatorKey> = (0..config.num_validators)
            .map(|i| ValidatorKey {
                bandersnatch: [i as u8 + 1; 32],
                ed25519: [i as u8 + 1; 32],
                bls: [0u8; 144],
                metadata: [0u8; 128],
            })
            .collect();
        state.active_set = ValidatorSet::padded(validators, config.num_validators as usize);
        state.pending_set = state.active_set.clone();
        state.staging_set = state.active_set.clone();
        state
    }

    #[test]
    fn rejects_non_increasing_slot() {
        let config = tiny_config();
        let mut state = genesis_with_active(&config);
        state.tau = 5;
        let result = apply_slot(&state, &config, 5, H32::zero(), &[]);
        assert_eq!(result.unwrap_err(), SafroleError::InvalidSlot { slot: 5, current: 5 });
    }

    #[test]
    fn rejects_too_many_ticket_extrinsics() {
        let config = tiny_config();
        let state = genesis_with_active(&config);
        let extrinsic: Vec<TicketProof> = (0..9)
            .map(|i| TicketProof { entry_index: i, proof: vec![] })
            .collect();
        let result = apply_slot(&state, &config, 1, H32::zero(), &extrinsic);
        assert_eq!(
            result.unwrap_err(),
            SafroleError::TooManyExtrinsics { found: 9, max: 8 }
        );
    }

    #[test]
    fn slot_within_epoch_does_not_rotate() {
        let config = tiny_config();
        let state = genesis_with_active(&config);
        let (next, outcome) = apply_slot(&state, &config, 1, H32::zero(), &[]).expect("apply");
        assert_eq!(next.tau, 1);
        assert!(outcome.epoch_mark.is_none());
        assert_eq!(next.active_set, state.active_set);
    }

    #[test]
    fn crossing_epoch_boundary_rotates_validator_sets() {
        let config = tiny_config();
        let state = genesis_with_active(&config);
        let (next, outcome) = apply_slot(&state, &config, 2, H32([7u8; 32]), &[]).expect("apply");
        assert!(outcome.epoch_mark.is_some());
        assert_eq!(next.previous_set, state.active_set);
        assert_eq!(next.active_set, state.pending_set);
        assert_eq!(next.entropy[1], state.entropy[0]);
        assert_ne!(next.entropy[0], state.entropy[0]);
    }

    #[test]
    fn rotation_excludes_offenders_from_new_pending_set() {
        let config = tiny_config();
        let mut state = genesis_with_active(&config);
        state.offenders.insert([2u8; 32]);
        let (next, _) = apply_slot(&state, &config, 2, H32::zero(), &[]).expect("apply");
        assert!(!next.pending_set.validators.iter().any(|v| v.ed25519 == [2u8; 32]));
        assert_eq!(next.pending_set.len(), config.num_validators as usize);
    }

    #[test]
    fn same_inputs_produce_the_same_entropy_deterministically() {
        let config = tiny_config();
        let state = genesis_with_active(&config);
        let (a, _) = apply_slot(&state, &config, 2, H32([3u8; 32]), &[]).expect("apply a");
        let (b, _) = apply_slot(&state, &config, 2, H32([3u8; 32]), &[]).expect("apply b");
        assert_eq!(a.entropy, b.entropy);
    }

    #[test]
    fn fallback_seal_message_is_order_sensitive() {
        let header = b"header-bytes";
        let entropy = H32([9u8; 32]);
        let a = fallback_seal_message(header, &entropy);
        let mut tampered = entropy.as_bytes().to_vec();
        tampered.extend_from_slice(header);
        assert_ne!(a, tampered);
    }
}
