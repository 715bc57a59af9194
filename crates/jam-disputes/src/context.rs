//! The validator-set selection context a dispute batch is checked against
//! (spec §4.3: "Validator set selection: κ (active) when age == currentEpoch,
//! else λ (previous)").

use jam_types::error::DisputesError;
use jam_types::{ValidatorKey, ValidatorSet};
use std::collections::BTreeSet;

/// Borrowed references to the state a dispute batch needs: the two
/// validator sets eligible to judge (`κ`/active, `λ`/previous) and the
/// current offender set, which culprits/faults must not already be in.
pub struct DisputesContext<'a> {
    pub active: &'a ValidatorSet,
    pub previous: &'a ValidatorSet,
    pub offenders: &'a BTreeSet<[u8; 32]>,
    pub current_epoch: u32,
}

impl<'a> DisputesContext<'a> {
    /// Picks `κ` or `λ` for a verdict's claimed `age`, rejecting any age
    /// that isn't the current or immediately prior epoch.
    pub fn select_set(&self, age: u32) -> Result<&'a ValidatorSet, DisputesError> {
        if age == self.current_epoch {
            Ok(self.active)
        } else if self.current_epoch > 0 && age == self.current_epoch - 1 {
            Ok(self.previous)
        } else {
            Err(DisputesError::BadJudgementAge { age })
        }
    }

    /// `floor(2N/3) + 1`, the minimum number of votes a verdict must carry.
    pub fn supermajority_threshold(&self, n: usize) -> usize {
        (2 * n) / 3 + 1
    }

    /// Whether `key` belongs to `κ ∪ λ` and is not already a recorded
    /// offender, the eligibility rule for both culprits and faults (spec
    /// §4.3: "`key` MUST appear in `κ ∪ λ \ offenders`").
    pub fn is_eligible_guarantor(&self, key: &[u8; 32]) -> bool {
        if self.offenders.contains(key) {
            return false;
        }
        member(self.active, key) || member(self.previous, key)
    }
}

fn member(set: &ValidatorSet, key: &[u8; 32]) -> bool {
    set.validators.iter().any(|v: &ValidatorKey| &v.ed25519 == key)
}
