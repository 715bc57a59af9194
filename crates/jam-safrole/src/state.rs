//! The Safrole per-epoch/per-slot state (spec §3 "Safrole state").

use jam_types::validator::EpochRoot;
use jam_types::{Ticket, ValidatorSet, H32};
use std::collections::BTreeSet;

/// The rotating 4-slot entropy ring; index 0 is the newest (spec §3).
pub type EntropyRing = [H32; 4];

/// The full Safrole state carried between blocks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SafroleState {
    /// `τ`, the timeslot of the most recently applied block.
    pub tau: u32,
    pub pending_set: ValidatorSet,
    pub active_set: ValidatorSet,
    pub previous_set: ValidatorSet,
    pub staging_set: ValidatorSet,
    pub epoch_root: EpochRoot,
    /// The current epoch's per-slot seal-key assignment: `Some(ticket)` for
    /// a slot with a winning ticket, `None` where a fallback seal applies.
    /// Always `epoch_duration` entries long.
    pub seal_tickets: Vec<Option<Ticket>>,
    /// Tickets accumulated so far this epoch, sorted and unique by `id`.
    pub ticket_accumulator: Vec<Ticket>,
    pub entropy: EntropyRing,
    pub offenders: BTreeSet<[u8; 32]>,
}

impl SafroleState {
    /// A fresh state with empty/null validator sets, for tests and genesis
    /// construction; callers fill in the real sets before first use.
    pub fn genesis(n_val: usize, epoch_duration: usize) -> Self {
        Self {
            tau: 0,
            pending_set: ValidatorSet::padded(vec![], n_val),
            active_set: ValidatorSet::padded(vec![], n_val),
            previous_set: ValidatorSet::padded(vec![], n_val),
            staging_set: ValidatorSet::padded(vec![], n_val),
            epoch_root: [0u8; 144],
            seal_tickets: vec![None; epoch_duration],
            ticket_accumulator: Vec::new(),
            entropy: [H32::zero(); 4],
            offenders: BTreeSet::new(),
        }
    }
}
