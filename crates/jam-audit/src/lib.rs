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
//! The audit tranche selector (C6): a deterministic Fisher-Yates shuffle
//! over cores seeded by a Bandersnatch VRF output (spec §4.6).

use jam_types::H32;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::collections::BTreeSet;
use tracing::debug;

/// One core's work-report hashes as of the point auditing runs, the unit
/// the shuffle/selection operates over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreEntry {
    pub core_index: u32,
    pub reports: Vec<H32>,
}

impl CoreEntry {
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

/// Cap on the number of cores an audit tranche selects (spec §4.6 "up to
/// 10 non-empty cores").
pub const MAX_SELECTED_CORES: usize = 10;

/// The outcome of one tranche's selection: the VRF that seeded it, the
/// fully shuffled core sequence, and the chosen subset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrancheResult {
    pub tranche: u32,
    pub vrf_output: [u8; 32],
    pub shuffled: Vec<CoreEntry>,
    pub selected_cores: Vec<CoreEntry>,
}

/// Deterministically shuffles `entries` keyed by `vrf_output` and selects
/// up to `MAX_SELECTED_CORES` non-empty cores (spec §4.6 algorithm). For
/// `tranche >= 1`, any core in `negative_judgment_cores` not already
/// selected is unioned in (spec §4.6 "Properties").
pub fn select_tranche(
    mut entries: Vec<CoreEntry>,
    vrf_output: [u8; 32],
    tranche: u32,
    negative_judgment_cores: &BTreeSet<u32>,
) -> TrancheResult {
    let span = tracing::span!(tracing::Level::DEBUG, "audit", tranche);
    let _enter = span.enter();

    fisher_yates(&mut entries, vrf_output);

    let mut selected: Vec<CoreEntry> = entries
        .iter()
        .filter(|entry| !entry.is_empty())
        .take(MAX_SELECTED_CORES)
        .cloned()
        .collect();

    if tranche >= 1 {
        let already_selected: BTreeSet<u32> = selected.iter().map(|e| e.core_index).collect();
        for entry in &entries {
            if negative_judgment_cores.contains(&entry.core_index)
                && !already_selected.contains(&entry.core_index)
            {
                selected.push(entry.clone());
            }
        }
    }

    debug!(selected = selected.len(), total = entries.len(), "tranche selected");

    TrancheResult { tranche, vrf_output, shuffled: entries, selected_cores: selected }
}

/// An in-place Fisher-Yates shuffle seeded deterministically from a
/// 32-byte VRF output: same seed, same input order, same output order on
/// every implementation (spec §4.6 "Properties").
fn fisher_yates<T>(items: &mut [T], seed: [u8; 32]) {
    let mut rng = ChaCha20Rng::from_seed(seed);
    let n = items.len();
    for i in (1..n).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}
