#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented
    )
)]
//! The Safrole block-production state machine (C2): VRF-driven ticket
//! ingestion, per-epoch validator rotation, ring-VRF epoch root, and
//! fallback seal derivation (spec §4.2).

mod state;
mod tickets;
mod transition;

pub use jam_types::error::SafroleError;
pub use state::{EntropyRing, SafroleState};
pub use tickets::{ingest_ticket, verify_and_ingest_ticket};
pub use transition::{apply_slot, fallback_seal_message, SlotOutcome};
