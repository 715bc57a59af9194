// Path: crates/jam-core/src/execution.rs
//! Wires a suspended PVM run to the host-function dispatcher (spec §4.4
//! `Status::Host` <-> §4.5 host calls), the glue C4 and C5 don't share
//! directly since neither crate depends on the other.

use jam_host_abi::{dispatch, HostContext};
use jam_pvm::{Memory, Pvm, Status};
use tracing::{trace, warn};

/// What a work-item run ended in: its terminal status and the
/// interpreter's `exitArg` (a fault address, a host-call id for `Host`
/// states that never got resolved, or an opaque program exit code).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkItemOutcome {
    pub status: Status,
    pub exit_arg: u64,
    pub gas_remaining: i64,
}

/// Runs `pvm` to completion, servicing every host call it suspends on
/// against `ctx` until a terminal status is reached. Any host id outside
/// `0..=7` is unknown to this ABI and panics the program, matching the
/// PVM's own unknown-opcode handling (spec §4.5 "unrecognized host call
/// ids trap the invoking program").
pub fn execute_work_item<M: Memory>(
    pvm: &mut Pvm<M>,
    ctx: &mut HostContext,
) -> WorkItemOutcome {
    let span = tracing::span!(tracing::Level::DEBUG, "work_item");
    let _enter = span.enter();

    pvm.run();
    while pvm.status == Status::Host {
        let host_id = pvm.exit_arg;
        if host_id > 7 {
            warn!(host_id, "unknown host call id, panicking program");
            pvm.resume_terminal(Status::Panic, host_id);
            break;
        }

        match dispatch(host_id, &mut pvm.registers, &mut pvm.memory, ctx) {
            Ok(()) => {
                trace!(host_id, "host call serviced");
                let r7 = pvm.registers.get(7);
                pvm.resume_ok(r7);
                pvm.run();
            }
            Err(jam_host_abi::HostAbiError::MemoryFault(addr)) => {
                pvm.resume_terminal(Status::Fault, u64::from(addr));
                break;
            }
            Err(jam_host_abi::HostAbiError::UnknownHostCall(id)) => {
                pvm.resume_terminal(Status::Panic, id);
                break;
            }
        }
    }

    WorkItemOutcome { status: pvm.status, exit_arg: pvm.exit_arg, gas_remaining: pvm.gas }
}
