// Path: crates/jam-types/src/history.rs
//! The recent-history vector: a short rolling window of prior blocks'
//! commitments, referenced by work-report context anchors (spec §3).

use crate::primitives::H32;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One entry in the `recent` state vector. Owned by the vector; hashes are
/// plain values, never back-references into other state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentHistoryEntry {
    /// Hash of the block header this entry describes.
    pub header_hash: H32,
    /// Super-peak of the cumulative accumulation-output Merkle mountain range.
    pub accumulate_log_super_peak: H32,
    /// Posterior state root for this block.
    pub state_root: H32,
    /// Work-package hash -> work-report hash for packages reported in this block.
    pub reported_package_hashes: BTreeMap<H32, H32>,
}
