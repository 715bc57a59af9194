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
//! The host-function environment (C5): the eight calls a suspended PVM run
//! (spec §4.4 `Status::Host`) may invoke against its own service account
//! (spec §4.5).

mod context;
mod error;
mod handlers;

pub use context::HostContext;
pub use error::HostAbiError;

use jam_pvm::{Memory, Registers};
use tracing::trace;

/// Dispatches one host call by id, mutating `regs`/`memory`/`ctx` in
/// place. The caller is expected to follow a successful dispatch with
/// `Pvm::resume_ok(regs.get(7))` to hand control back to the interpreter.
pub fn dispatch(
    host_id: u64,
    regs: &mut Registers,
    memory: &mut dyn Memory,
    ctx: &mut HostContext,
) -> Result<(), HostAbiError> {
    let span = tracing::span!(tracing::Level::TRACE, "host_call", host_id);
    let _enter = span.enter();
    trace!("dispatching");

    match host_id {
        0 => handlers::fetch(regs, memory, ctx),
        1 => handlers::read(regs, memory, ctx),
        2 => handlers::write(regs, memory, ctx),
        3 => handlers::lookup(regs, memory, ctx),
        4 => handlers::info(regs, memory, ctx),
        5 => handlers::solicit(regs, memory, ctx),
        6 => handlers::forget(regs, memory, ctx),
        7 => handlers::query(regs, memory, ctx),
        other => Err(HostAbiError::UnknownHostCall(other)),
    }
}
