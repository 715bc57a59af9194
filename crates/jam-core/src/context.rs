// Path: crates/jam-core/src/context.rs
//! The explicit, passed-everywhere execution context (spec §9's redesign
//! note: no global mutable state, every phase takes its config explicitly).

use jam_types::ProtocolConfig;

pub struct EngineContext {
    pub config: ProtocolConfig,
}

impl EngineContext {
    pub fn new(config: ProtocolConfig) -> Self {
        Self { config }
    }
}
