// Path: crates/jam-types/src/config.rs
//! Protocol configuration: every "recognized configuration option" from
//! spec §6, collected into one plain-data struct passed explicitly through
//! every transition entry point (spec §9's "replace global mutable state
//! with an explicit `EngineContext`" redesign note — `ProtocolConfig` is the
//! config half of that context).

use serde::{Deserialize, Serialize};

/// Named configuration preset, mirroring the teacher's
/// enum-of-presets pattern for `ConsensusType`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigPreset {
    Tiny,
    Full,
}

/// Every tunable protocol parameter referenced anywhere in C1-C7.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolConfig {
    pub preset: ConfigPreset,
    /// `C` - number of cores.
    pub num_cores: u32,
    /// `N_val` - number of validators.
    pub num_validators: u32,
    /// `E` - epoch length in slots.
    pub epoch_duration: u32,
    /// `T_max` per validator - lottery entries each validator may submit.
    pub tickets_per_validator: u32,
    /// Maximum ticket proofs allowed in one block's ticket extrinsic.
    pub max_tickets_per_extrinsic: u32,
    /// Gas budget for an entire block's accumulation phase.
    pub max_block_gas: u64,
    /// Gas budget for a single work-item's refinement.
    pub max_refine_gas: u64,
    /// Preimage expunge cool-down period, in timeslots.
    pub preimage_expunge_period: u32,
    /// Slot duration, in seconds.
    pub slot_duration: u32,
    /// Validator-core rotation period, in slots.
    pub rotation_period: u32,
    /// Erasure-coded shard size, in bytes (684 per spec §4.7).
    pub ec_piece_size: u32,
    /// Number of erasure-coded pieces making up one data segment.
    pub num_ec_pieces_per_segment: u32,
    /// Length of a dispute's contest window, in timeslots.
    pub contest_duration: u32,
    /// Maximum age, in slots, of a lookup-anchor a work-report may reference.
    pub max_lookup_anchorage: u32,
}

impl ProtocolConfig {
    /// The "tiny" test preset (5 validators, 12-slot epochs): matches the
    /// 134-byte FETCH-selector-0 blob in spec §6 S1.
    pub fn tiny() -> Self {
        Self {
            preset: ConfigPreset::Tiny,
            num_cores: 2,
            num_validators: 6,
            epoch_duration: 12,
            tickets_per_validator: 3,
            max_tickets_per_extrinsic: 16,
            max_block_gas: 2_500_000_000,
            max_refine_gas: 5_000_000_000,
            preimage_expunge_period: 32,
            slot_duration: 6,
            rotation_period: 4,
            ec_piece_size: 684,
            num_ec_pieces_per_segment: 6,
            contest_duration: 10,
            max_lookup_anchorage: 14,
        }
    }

    /// The "full" production preset (341 cores, 1023 validators, 600-slot
    /// epochs): matches the 134-byte FETCH-selector-0 blob in spec §6.
    pub fn full() -> Self {
        Self {
            preset: ConfigPreset::Full,
            num_cores: 341,
            num_validators: 1023,
            epoch_duration: 600,
            tickets_per_validator: 2,
            max_tickets_per_extrinsic: 16,
            max_block_gas: 3_500_000_000,
            max_refine_gas: 5_000_000_000,
            preimage_expunge_period: 19_200,
            slot_duration: 6,
            rotation_period: 10,
            ec_piece_size: 684,
            num_ec_pieces_per_segment: 6,
            contest_duration: 14_400,
            max_lookup_anchorage: 14_400,
        }
    }

    /// Encodes the system-constants blob returned by FETCH selector 0
    /// (spec §6). Field order and widths are frozen by the Gray Paper: a
    /// fixed run of little-endian fixed-width fields, not the general
    /// var-nat codec. The leading three `u64` constants (10, 1, 100) are
    /// preset-independent protocol constants; `numCores`, the preimage
    /// expunge period, and the epoch duration follow and vary by preset,
    /// matching spec §8 scenario S1's exact byte prefix.
    pub fn system_constants_blob(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(134);
        out.extend_from_slice(&10u64.to_le_bytes());
        out.extend_from_slice(&1u64.to_le_bytes());
        out.extend_from_slice(&100u64.to_le_bytes());
        out.extend_from_slice(&(self.num_cores as u16).to_le_bytes());
        out.extend_from_slice(&self.preimage_expunge_period.to_le_bytes());
        out.extend_from_slice(&(self.epoch_duration as u16).to_le_bytes());
        while out.len() < 134 {
            out.push(0);
        }
        out.truncate(134);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiny_system_constants_blob_matches_s1_prefix() {
        let blob = ProtocolConfig::tiny().system_constants_blob();
        assert_eq!(blob.len(), 134);
        let expected_prefix: [u8; 32] = [
            0x0a, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x64, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x00, 0x20, 0x00,
            0x00, 0x00, 0x0c, 0x00,
        ];
        assert_eq!(&blob[..32], &expected_prefix);
    }

    #[test]
    fn full_system_constants_blob_has_frozen_length() {
        let blob = ProtocolConfig::full().system_constants_blob();
        assert_eq!(blob.len(), 134);
        assert_eq!(&blob[24..26], &341u16.to_le_bytes());
    }
}
