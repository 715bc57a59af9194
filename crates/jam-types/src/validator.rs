// Path: crates/jam-types/src/validator.rs
//! Validator key quadruples and the rotating validator sets (spec §3).

use crate::primitives::H32;
use serde::{Deserialize, Serialize};

/// A validator's four public keys, as published in the staging/active/previous sets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorKey {
    /// Bandersnatch public key (ring-VRF tickets, epoch root, fallback seal).
    pub bandersnatch: [u8; 32],
    /// Ed25519 public key (dispute judgments, culprits, faults).
    pub ed25519: [u8; 32],
    /// BLS public key (reserved for future grandpa-style finality gadgets; carried but unused by C2/C3).
    pub bls: [u8; 144],
    /// Opaque validator metadata (network address, telemetry tag, ...).
    pub metadata: [u8; 128],
}

impl ValidatorKey {
    /// The all-zero "null validator" used to pad a set to `N_val` entries.
    pub fn null() -> Self {
        Self {
            bandersnatch: [0u8; 32],
            ed25519: [0u8; 32],
            bls: [0u8; 144],
            metadata: [0u8; 128],
        }
    }

    pub fn is_null(&self) -> bool {
        self.bandersnatch == [0u8; 32] && self.ed25519 == [0u8; 32]
    }
}

/// A fixed-length validator set, always padded to `N_val` entries with null
/// validators so downstream indexing by validator index never panics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorSet {
    pub validators: Vec<ValidatorKey>,
}

impl ValidatorSet {
    pub fn padded(mut validators: Vec<ValidatorKey>, n_val: usize) -> Self {
        validators.truncate(n_val);
        while validators.len() < n_val {
            validators.push(ValidatorKey::null());
        }
        Self { validators }
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    pub fn get(&self, index: u32) -> Option<&ValidatorKey> {
        self.validators.get(index as usize)
    }

    /// Ed25519 keys of every non-offender member, for dispute judgment verification.
    pub fn ed25519_keys_excluding(&self, offenders: &std::collections::BTreeSet<[u8; 32]>) -> Vec<[u8; 32]> {
        self.validators
            .iter()
            .map(|v| v.ed25519)
            .filter(|k| !offenders.contains(k))
            .collect()
    }

    /// Bandersnatch keys, in index order, used to build the ring-VRF commitment.
    pub fn bandersnatch_keys(&self) -> Vec<[u8; 32]> {
        self.validators.iter().map(|v| v.bandersnatch).collect()
    }
}

impl Default for ValidatorSet {
    fn default() -> Self {
        Self { validators: Vec::new() }
    }
}

/// Epoch root commitment over the active validator set's Bandersnatch keys
/// (ring-VRF public commitment, 144 bytes per spec §3).
pub type EpochRoot = [u8; 144];

/// A 32-byte offender key, recorded in the Safrole `offenders` set.
pub type OffenderKey = H32;
