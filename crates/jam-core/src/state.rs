// Path: crates/jam-core/src/state.rs
//! The full posterior state the consensus/execution core carries between
//! blocks: Safrole's own state (which already owns the offender set, spec
//! §3), service accounts, and the recent-history window.

use jam_safrole::SafroleState;
use jam_types::{RecentHistoryEntry, ServiceAccount};
use std::collections::BTreeMap;

/// How many entries the recent-history window retains (spec §3).
pub const RECENT_HISTORY_LEN: usize = 8;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineState {
    pub safrole: SafroleState,
    pub accounts: BTreeMap<u32, ServiceAccount>,
    pub recent_history: Vec<RecentHistoryEntry>,
}

impl EngineState {
    pub fn genesis(n_val: usize, epoch_duration: usize) -> Self {
        log::info!("initializing genesis engine state with {n_val} validators");
        Self {
            safrole: SafroleState::genesis(n_val, epoch_duration),
            accounts: BTreeMap::new(),
            recent_history: Vec::new(),
        }
    }

    /// Appends a new head entry, dropping the oldest once the window is
    /// full (spec §3 "recent history retains the last `RECENT_HISTORY_LEN`
    /// blocks").
    pub fn push_recent_history(&mut self, entry: RecentHistoryEntry) {
        self.recent_history.push(entry);
        if self.recent_history.len() > RECENT_HISTORY_LEN {
            log::debug!("recent history window full, dropping oldest entry");
            self.recent_history.remove(0);
        }
    }
}
