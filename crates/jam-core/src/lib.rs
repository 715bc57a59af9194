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
//! The consensus/execution core: wires the codec (C1), Safrole (C2),
//! Disputes (C3), the PVM (C4), the host-function environment (C5), Audit
//! (C6), and erasure coding (C7) into one per-block pipeline.

mod block;
mod context;
mod error;
mod execution;
mod state;

pub use block::{apply_block, BlockOutcome};
pub use context::EngineContext;
pub use error::EngineError;
pub use execution::{execute_work_item, WorkItemOutcome};
pub use state::{EngineState, RECENT_HISTORY_LEN};

#[cfg(test)]
mod tests {
    use super::*;
    use jam_codec::decode_all;
    use jam_codec::Encode;
    use jam_pvm::{FlatMemory, Pvm};
    use jam_types::{Block, Body, Header, ProtocolConfig, ServiceAccount, H32};

    fn tiny_config() -> ProtocolConfig {
        let mut c = ProtocolConfig::tiny();
        c.num_cores = 1;
        c.num_validators = 3;
        c.epoch_duration = 2;
        c
    }

    fn genesis_block() -> Block {
        let body = Body::default();
        let header = Header {
            parent: H32::zero(),
            prior_state_root: H32::zero(),
            extrinsic_hash: body.extrinsic_hash(),
            timeslot: 1,
            epoch_mark: None,
            winners_mark: None,
            offenders_mark: vec![],
            author_index: 0,
            vrf_sig: [0u8; 96],
            seal_sig: [0u8; 96],
        };
        Block { header, body }
    }

    #[test]
    fn empty_block_applies_cleanly() {
        let config = tiny_config();
        let ctx = EngineContext::new(config.clone());
        let state = EngineState::genesis(config.num_validators as usize, config.epoch_duration as usize);
        let block = genesis_block();

        let (next, outcome) = apply_block(&ctx, &state, &block).expect("apply");
        assert_eq!(next.safrole.tau, 1);
        assert!(outcome.audit.selected_cores.is_empty());
    }

    #[test]
    fn mismatched_extrinsic_hash_is_rejected() {
        let config = tiny_config();
        let ctx = EngineContext::new(config.clone());
        let state = EngineState::genesis(config.num_validators as usize, config.epoch_duration as usize);
        let mut block = genesis_block();
        block.header.extrinsic_hash = H32([0xff; 32]);

        let result = apply_block(&ctx, &state, &block);
        assert_eq!(result.unwrap_err(), EngineError::ExtrinsicHashMismatch);
    }

    #[test]
    fn block_round_trips_through_the_codec() {
        let block = genesis_block();
        let encoded = block.encode();
        let decoded: Block = decode_all(&encoded).expect("decode");
        assert_eq!(decoded, block);
    }

    #[test]
    fn work_item_services_a_fetch_host_call_end_to_end() {
        use jam_codec::encode_nat;
        use jam_host_abi::HostContext;
        use std::collections::BTreeMap;

        // program: ECALLI 0 (FETCH), FALLTHROUGH
        let mut code = vec![10u8];
        code.extend(encode_nat(0));
        code.push(1);
        let mut bitmask = vec![0u8; code.len()];
        bitmask[0] = 1;
        bitmask[code.len() - 1] = 1;

        let mut blob = encode_nat(0);
        blob.push(1);
        blob.extend(encode_nat(code.len() as u64));
        blob.extend_from_slice(&code);
        blob.extend_from_slice(&bitmask);

        let program = jam_pvm::parse(&blob).expect("parse");
        let mut memory = FlatMemory::new(4096);
        memory.write_octets_during_initialization(0, &[0u8; 200]);
        let mut pvm = Pvm::new(program, memory, 1000);
        pvm.registers.set(7, 0); // FETCH selector 0
        pvm.registers.set(8, 0); // out ptr
        pvm.registers.set(9, 200); // out max len

        let config = ProtocolConfig::tiny();
        let mut accounts: BTreeMap<u32, ServiceAccount> = BTreeMap::new();
        accounts.insert(1, ServiceAccount::new(H32::zero()));
        let mut host_ctx = HostContext { accounts: &mut accounts, self_id: 1, timeslot: 1, config: &config };

        let outcome = execute_work_item(&mut pvm, &mut host_ctx);
        assert_eq!(outcome.status, jam_pvm::Status::Halt);
        assert_eq!(pvm.registers.get(7), 134);
    }
}
