// Path: crates/jam-core/src/block.rs
//! The per-block pipeline: validate the extrinsic hash, then run Safrole,
//! Disputes, and Audit in sequence against the posterior state (spec §3
//! "block import order").

use crate::context::EngineContext;
use crate::error::EngineError;
use crate::state::EngineState;
use jam_audit::{select_tranche, CoreEntry, TrancheResult};
use jam_crypto::blake2b_256;
use jam_disputes::{validate_dispute, DisputesContext};
use jam_safrole::SlotOutcome;
use jam_types::{Block, H32};
use std::collections::BTreeSet;
use tracing::{info, warn};

/// Everything a successful `apply_block` produced beyond the mutated
/// state: the Safrole marks for this slot and the tranche-0 audit
/// selection over this block's guarantees.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockOutcome {
    pub slot_outcome: SlotOutcome,
    pub audit: TrancheResult,
}

/// Applies one block atomically: on any `Err`, the caller's `state` is
/// left untouched (this function only ever returns a fresh `EngineState`
/// on success, never mutates its input in place).
pub fn apply_block(
    ctx: &EngineContext,
    state: &EngineState,
    block: &Block,
) -> Result<(EngineState, BlockOutcome), EngineError> {
    let span = tracing::span!(tracing::Level::INFO, "block", slot = block.header.timeslot);
    let _enter = span.enter();

    if block.body.extrinsic_hash() != block.header.extrinsic_hash {
        warn!(code = "ENGINE_EXTRINSIC_HASH_MISMATCH", "body does not match header");
        return Err(EngineError::ExtrinsicHashMismatch);
    }

    let incoming_entropy = H32(blake2b_256(&block.header.vrf_sig));
    let (next_safrole, slot_outcome) = jam_safrole::apply_slot(
        &state.safrole,
        &ctx.config,
        block.header.timeslot,
        incoming_entropy,
        &block.body.tickets,
    )?;

    let mut next = EngineState {
        safrole: next_safrole,
        accounts: state.accounts.clone(),
        recent_history: state.recent_history.clone(),
    };

    let current_epoch = next.safrole.tau / ctx.config.epoch_duration;
    let mut negative_judgment_targets: BTreeSet<H32> = BTreeSet::new();
    for dispute in &block.body.disputes {
        let disputes_ctx = DisputesContext {
            active: &next.safrole.active_set,
            previous: &next.safrole.previous_set,
            offenders: &next.safrole.offenders,
            current_epoch,
        };
        let offenders = validate_dispute(&disputes_ctx, dispute)?;
        next.safrole.offenders.extend(offenders);

        for verdict in &dispute.verdicts {
            if !verdict.is_valid() {
                negative_judgment_targets.insert(verdict.target);
            }
        }
    }

    let entries: Vec<CoreEntry> = {
        let mut by_core: std::collections::BTreeMap<u32, Vec<H32>> = std::collections::BTreeMap::new();
        for guarantee in &block.body.guarantees {
            by_core.entry(u32::from(guarantee.core)).or_default().push(H32(blake2b_256(&guarantee.report)));
        }
        (0..ctx.config.num_cores)
            .map(|core_index| CoreEntry {
                core_index,
                reports: by_core.remove(&core_index).unwrap_or_default(),
            })
            .collect()
    };

    let negative_judgment_cores: BTreeSet<u32> = entries
        .iter()
        .filter(|entry| entry.reports.iter().any(|r| negative_judgment_targets.contains(r)))
        .map(|entry| entry.core_index)
        .collect();

    let audit_vrf = blake2b_256(&block.header.seal_sig);
    let audit = select_tranche(entries, audit_vrf, 0, &negative_judgment_cores);

    info!(
        epoch_rotated = slot_outcome.epoch_mark.is_some(),
        disputes = block.body.disputes.len(),
        audited_cores = audit.selected_cores.len(),
        "block applied"
    );

    Ok((next, BlockOutcome { slot_outcome, audit }))
}
