// Path: crates/jam-host-abi/src/context.rs
//! The execution context a host-call dispatch runs against: the invoking
//! service's own account plus whatever else is visible from inside a
//! refinement/accumulation (spec §4.5).

use jam_types::{ProtocolConfig, ServiceAccount};
use std::collections::BTreeMap;

/// Borrowed state a single host-call dispatch needs: every known service
/// account, which one is currently executing, the present timeslot, and
/// the protocol configuration FETCH's selector 0 exposes.
pub struct HostContext<'a> {
    pub accounts: &'a mut BTreeMap<u32, ServiceAccount>,
    pub self_id: u32,
    pub timeslot: u32,
    pub config: &'a ProtocolConfig,
}

impl<'a> HostContext<'a> {
    pub fn self_account(&self) -> Option<&ServiceAccount> {
        self.accounts.get(&self.self_id)
    }

    pub fn self_account_mut(&mut self) -> Option<&mut ServiceAccount> {
        self.accounts.get_mut(&self.self_id)
    }

    pub fn account(&self, service_id: u32) -> Option<&ServiceAccount> {
        self.accounts.get(&service_id)
    }
}
