// Path: crates/jam-types/src/service.rs
//! Service accounts: the content-addressed store the host ABI (C5) mutates
//! on behalf of in-flight PVM invocations (spec §3, §4.5).

use crate::primitives::H32;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A preimage request's lifecycle slots: 0, 1, 2, or 3 timeslots recording
/// request/availability/expunge transitions (spec §4.5 FORGET state machine).
pub type RequestStatus = Vec<u32>;

/// A single service account (Gray Paper "a").
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAccount {
    /// Hash of the service's refinement/accumulation code.
    pub code_hash: H32,
    /// Balance available to cover the account's minimum-balance requirement.
    pub balance: u64,
    /// Minimum gas the account must supply to an accumulation invocation.
    pub min_acc_gas: u64,
    /// Minimum gas the account must supply to an on-transfer invocation.
    pub min_memo_gas: u64,
    /// Total octets of storage + preimages currently billed against the account.
    pub octets: u64,
    /// Octets exempt from the minimum-balance calculation (subsidized storage).
    pub gratis: u64,
    /// Number of storage + preimage + request items currently billed.
    pub items: u32,
    /// Timeslot the account was created at.
    pub created: u32,
    /// Timeslot of the account's last successful accumulation.
    pub last_acc: u32,
    /// Parent service id this account was forked from (0 if none).
    pub parent: u32,
    /// Arbitrary key/value storage, keyed by the hash of the caller-supplied key.
    pub storage: BTreeMap<H32, Vec<u8>>,
    /// Preimages solicited and (once available) stored, keyed by their hash.
    pub preimages: BTreeMap<H32, Vec<u8>>,
    /// Per-preimage, per-length request lifecycle state.
    pub requests: BTreeMap<H32, BTreeMap<u32, RequestStatus>>,
}

impl ServiceAccount {
    pub fn new(code_hash: H32) -> Self {
        Self {
            code_hash,
            balance: 0,
            min_acc_gas: 0,
            min_memo_gas: 0,
            octets: 0,
            gratis: 0,
            items: 0,
            created: 0,
            last_acc: 0,
            parent: 0,
            storage: BTreeMap::new(),
            preimages: BTreeMap::new(),
            requests: BTreeMap::new(),
        }
    }

    /// The minimum balance the account must hold given its current `items`/`octets`
    /// accounting, per the base-fee-plus-per-item-plus-per-octet formula (Gray Paper).
    pub fn min_balance(&self) -> u64 {
        const BASE_DEPOSIT: u64 = 10;
        const ITEM_DEPOSIT: u64 = 1;
        const OCTET_DEPOSIT: u64 = 1;
        let billable_octets = self.octets.saturating_sub(self.gratis);
        BASE_DEPOSIT
            .saturating_add(ITEM_DEPOSIT.saturating_mul(u64::from(self.items)))
            .saturating_add(OCTET_DEPOSIT.saturating_mul(billable_octets))
    }

    pub fn has_sufficient_balance(&self) -> bool {
        self.balance >= self.min_balance()
    }
}
