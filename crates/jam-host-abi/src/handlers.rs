// Path: crates/jam-host-abi/src/handlers.rs
//! One function per host call (spec §4.5). Register conventions follow
//! the Gray Paper's `ω7..ω12` argument-window layout: inputs are read from
//! `r7` upward, and every handler returns its primary result in `r7`
//! (`QUERY` additionally uses `r8`). None of these handlers ever panic;
//! out-of-range memory access surfaces as `HostAbiError::MemoryFault` and
//! aborts the dispatch rather than the whole PVM run.

use crate::context::HostContext;
use crate::error::HostAbiError;
use jam_crypto::hash::blake2b_256;
use jam_pvm::{Memory, Registers};
use jam_types::error::HostResultCode;
use jam_types::H32;

fn fault(f: jam_pvm::MemoryFault) -> HostAbiError {
    HostAbiError::MemoryFault(f.addr)
}

fn read_hash(memory: &dyn Memory, ptr: u32) -> Result<H32, HostAbiError> {
    let bytes = memory.read_octets(ptr, 32).map_err(fault)?;
    // `bytes.len() == 32` by construction above, so this can't fail.
    Ok(H32::from_slice(&bytes).unwrap_or(H32::zero()))
}

/// `r7` = selector. Selector 0 returns the system-constants blob (spec §6);
/// any other selector is unmapped and reads as `NONE`.
pub fn fetch(
    regs: &mut Registers,
    memory: &mut dyn Memory,
    ctx: &HostContext,
) -> Result<(), HostAbiError> {
    let selector = regs.get(7);
    let blob = match selector {
        0 => ctx.config.system_constants_blob(),
        _ => {
            regs.set(7, HostResultCode::None.as_u64());
            return Ok(());
        }
    };
    let out_ptr = regs.get(8) as u32;
    let out_max = regs.get(9) as usize;
    let n = blob.len().min(out_max);
    memory.write_octets(out_ptr, &blob[..n]).map_err(fault)?;
    regs.set(7, n as u64);
    Ok(())
}

/// `r7`/`r8` = key ptr/len, `r9`/`r10` = output buffer ptr/max len.
pub fn read(
    regs: &mut Registers,
    memory: &mut dyn Memory,
    ctx: &HostContext,
) -> Result<(), HostAbiError> {
    let key_ptr = regs.get(7) as u32;
    let key_len = regs.get(8) as usize;
    let out_ptr = regs.get(9) as u32;
    let out_max = regs.get(10) as usize;

    let key_bytes = memory.read_octets(key_ptr, key_len).map_err(fault)?;
    let key_hash = H32(blake2b_256(&key_bytes));

    let account = match ctx.self_account() {
        Some(a) => a,
        None => {
            regs.set(7, HostResultCode::Who.as_u64());
            return Ok(());
        }
    };

    match account.storage.get(&key_hash) {
        Some(value) => {
            let n = value.len().min(out_max);
            memory.write_octets(out_ptr, &value[..n]).map_err(fault)?;
            regs.set(7, value.len() as u64);
        }
        None => regs.set(7, HostResultCode::None.as_u64()),
    }
    Ok(())
}

/// `r7`/`r8` = key ptr/len, `r9`/`r10` = value ptr/len (`len == 0` deletes).
/// Writes are applied, then reverted wholesale if the account's balance
/// would fall below its minimum (spec §4.5 "WRITE ... FULL").
pub fn write(
    regs: &mut Registers,
    memory: &mut dyn Memory,
    ctx: &mut HostContext,
) -> Result<(), HostAbiError> {
    let key_ptr = regs.get(7) as u32;
    let key_len = regs.get(8) as usize;
    let value_ptr = regs.get(9) as u32;
    let value_len = regs.get(10) as usize;

    let key_bytes = memory.read_octets(key_ptr, key_len).map_err(fault)?;
    let key_hash = H32(blake2b_256(&key_bytes));
    let value = if value_len == 0 {
        Vec::new()
    } else {
        memory.read_octets(value_ptr, value_len).map_err(fault)?
    };

    let account = match ctx.self_account_mut() {
        Some(a) => a,
        None => {
            regs.set(7, HostResultCode::Who.as_u64());
            return Ok(());
        }
    };

    let previous = account.storage.get(&key_hash).cloned();
    let previous_len = previous.as_ref().map(|v| v.len() as u64);
    let snapshot_octets = account.octets;
    let snapshot_items = account.items;

    if value_len == 0 {
        if account.storage.remove(&key_hash).is_some() {
            account.items = account.items.saturating_sub(1);
            account.octets = account.octets.saturating_sub(previous_len.unwrap_or(0));
        }
    } else {
        if previous.is_none() {
            account.items = account.items.saturating_add(1);
        }
        account.octets = account
            .octets
            .saturating_sub(previous_len.unwrap_or(0))
            .saturating_add(value.len() as u64);
        account.storage.insert(key_hash, value);
    }

    if !account.has_sufficient_balance() {
        account.items = snapshot_items;
        account.octets = snapshot_octets;
        match previous {
            Some(v) => {
                account.storage.insert(key_hash, v);
            }
            None => {
                account.storage.remove(&key_hash);
            }
        }
        regs.set(7, HostResultCode::Full.as_u64());
        return Ok(());
    }

    regs.set(7, previous_len.unwrap_or_else(|| HostResultCode::None.as_u64()));
    Ok(())
}

/// `r7` = service id (self's id or the `NONE` sentinel both mean "self";
/// any other id is read-only and rejected with `WHO` since this core has
/// no cross-service storage visibility), `r8`/`r9` = key ptr/len,
/// `r10`/`r11` = output buffer ptr/max len.
pub fn lookup(
    regs: &mut Registers,
    memory: &mut dyn Memory,
    ctx: &HostContext,
) -> Result<(), HostAbiError> {
    let service_id = regs.get(7);
    let key_ptr = regs.get(8) as u32;
    let key_len = regs.get(9) as usize;
    let out_ptr = regs.get(10) as u32;
    let out_max = regs.get(11) as usize;

    let is_self = service_id == u64::from(ctx.self_id) || service_id == HostResultCode::None.as_u64();
    if !is_self {
        regs.set(7, HostResultCode::Who.as_u64());
        return Ok(());
    }

    let account = match ctx.self_account() {
        Some(a) => a,
        None => {
            regs.set(7, HostResultCode::Who.as_u64());
            return Ok(());
        }
    };

    let key_bytes = memory.read_octets(key_ptr, key_len).map_err(fault)?;
    let key_hash = H32(blake2b_256(&key_bytes));
    match account.storage.get(&key_hash) {
        Some(value) => {
            let n = value.len().min(out_max);
            memory.write_octets(out_ptr, &value[..n]).map_err(fault)?;
            regs.set(7, value.len() as u64);
        }
        None => regs.set(7, HostResultCode::None.as_u64()),
    }
    Ok(())
}

/// `r7` = service id, `r8` = output buffer ptr. Writes a fixed 96-byte
/// blob: `codeHash(32) | balance(8) | minAccGas(8) | minMemoGas(8) |
/// octets(8) | gratis(8) | items(4) | created(4) | lastAcc(4) | parent(4)`
/// (88 bytes), zero-padded to 96.
pub fn info(
    regs: &mut Registers,
    memory: &mut dyn Memory,
    ctx: &HostContext,
) -> Result<(), HostAbiError> {
    let service_id = regs.get(7) as u32;
    let out_ptr = regs.get(8) as u32;

    let account = match ctx.account(service_id) {
        Some(a) => a,
        None => {
            regs.set(7, HostResultCode::Who.as_u64());
            return Ok(());
        }
    };

    let mut blob = Vec::with_capacity(96);
    blob.extend_from_slice(account.code_hash.as_bytes());
    blob.extend_from_slice(&account.balance.to_le_bytes());
    blob.extend_from_slice(&account.min_acc_gas.to_le_bytes());
    blob.extend_from_slice(&account.min_memo_gas.to_le_bytes());
    blob.extend_from_slice(&account.octets.to_le_bytes());
    blob.extend_from_slice(&account.gratis.to_le_bytes());
    blob.extend_from_slice(&account.items.to_le_bytes());
    blob.extend_from_slice(&account.created.to_le_bytes());
    blob.extend_from_slice(&account.last_acc.to_le_bytes());
    blob.extend_from_slice(&account.parent.to_le_bytes());
    blob.resize(96, 0);

    memory.write_octets(out_ptr, &blob).map_err(fault)?;
    regs.set(7, 0);
    Ok(())
}

/// `r7` = preimage hash ptr (32 bytes), `r8` = declared preimage length.
/// Creates a fresh `[t]` request if none exists for this `(hash, length)`
/// pair; a request already awaiting availability (`len == 1`) is left
/// untouched and reported `HUH`; anything else (already expunged, or
/// mid-expunge) is reset to a fresh `[t]` (spec §4.5 "SOLICIT").
pub fn solicit(
    regs: &mut Registers,
    memory: &dyn Memory,
    ctx: &mut HostContext,
) -> Result<(), HostAbiError> {
    let hash_ptr = regs.get(7) as u32;
    let length = regs.get(8) as u32;
    let t = ctx.timeslot;
    let hash = read_hash(memory, hash_ptr)?;

    let account = match ctx.self_account_mut() {
        Some(a) => a,
        None => {
            regs.set(7, HostResultCode::Who.as_u64());
            return Ok(());
        }
    };

    let by_length = account.requests.entry(hash).or_default();
    let status = by_length.entry(length).or_default();
    if status.len() == 1 {
        regs.set(7, HostResultCode::Huh.as_u64());
    } else {
        *status = vec![t];
        regs.set(7, 0);
    }
    Ok(())
}

/// `r7` = preimage hash ptr (32 bytes), `r8` = declared preimage length.
/// Walks the `FORGET` state machine (spec §4.5): empty request state is
/// `HUH`; `[x]` (pending availability) appends the current slot and
/// always succeeds; `[x, y]` and `[x, y, z]` only collapse once the most
/// recent recorded slot is older than `preimageExpungePeriod`, otherwise
/// `HUH`.
pub fn forget(
    regs: &mut Registers,
    memory: &dyn Memory,
    ctx: &mut HostContext,
) -> Result<(), HostAbiError> {
    let hash_ptr = regs.get(7) as u32;
    let length = regs.get(8) as u32;
    let t = ctx.timeslot;
    let expunge = ctx.config.preimage_expunge_period;
    let hash = read_hash(memory, hash_ptr)?;

    let account = match ctx.self_account_mut() {
        Some(a) => a,
        None => {
            regs.set(7, HostResultCode::Who.as_u64());
            return Ok(());
        }
    };

    let expunge_eligible = |slot: u32| slot < t.saturating_sub(expunge);

    let outcome = match account.requests.get_mut(&hash).and_then(|m| m.get_mut(&length)) {
        None => None,
        Some(status) => match status.len() {
            0 => Some(false),
            1 => {
                status.push(t);
                Some(true)
            }
            2 => {
                if expunge_eligible(status[1]) {
                    status.clear();
                    Some(true)
                } else {
                    Some(false)
                }
            }
            _ => {
                if expunge_eligible(status[2]) {
                    *status = vec![t];
                    Some(true)
                } else {
                    Some(false)
                }
            }
        },
    };

    match outcome {
        None => regs.set(7, HostResultCode::Huh.as_u64()),
        Some(false) => regs.set(7, HostResultCode::Huh.as_u64()),
        Some(true) => {
            if matches!(
                account.requests.get(&hash).and_then(|m| m.get(&length)).map(|s| s.len()),
                Some(0) | None
            ) {
                if let Some(by_length) = account.requests.get_mut(&hash) {
                    by_length.remove(&length);
                    if by_length.is_empty() {
                        account.requests.remove(&hash);
                    }
                }
            }
            regs.set(7, 0);
        }
    }
    Ok(())
}

/// `r7` = preimage hash ptr (32 bytes), `r8` = declared preimage length.
/// Encodes the request's lifecycle into `(r7, r8)`: `[]` to `(0, 0)`;
/// `[x]` to `(1 + x << 32, 0)`; `[x, y]` to `(2 + x << 32, y)`. A status
/// with three or more recorded slots (mid-expunge-collapse) reports the
/// same shape as the two-slot case using its first two entries, since the
/// third slot is already implied to be "now" by `FORGET`'s own state
/// machine (a resolved ambiguity; see `DESIGN.md`).
pub fn query(
    regs: &mut Registers,
    memory: &dyn Memory,
    ctx: &HostContext,
) -> Result<(), HostAbiError> {
    let hash_ptr = regs.get(7) as u32;
    let length = regs.get(8) as u32;
    let hash = read_hash(memory, hash_ptr)?;

    let account = match ctx.self_account() {
        Some(a) => a,
        None => {
            regs.set(7, HostResultCode::Who.as_u64());
            regs.set(8, 0);
            return Ok(());
        }
    };

    match account.requests.get(&hash).and_then(|m| m.get(&length)) {
        None => {
            regs.set(7, HostResultCode::None.as_u64());
            regs.set(8, 0);
        }
        Some(status) => {
            let (r7, r8) = encode_query_status(status);
            regs.set(7, r7);
            regs.set(8, r8);
        }
    }
    Ok(())
}

fn encode_query_status(status: &[u32]) -> (u64, u64) {
    match status.len() {
        0 => (0, 0),
        1 => (1 + (u64::from(status[0]) << 32), 0),
        _ => (2 + (u64::from(status[0]) << 32), u64::from(status[1])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jam_pvm::FlatMemory;
    use jam_types::{ProtocolConfig, ServiceAccount};
    use std::collections::BTreeMap;

    fn ctx_with<'a>(
        accounts: &'a mut BTreeMap<u32, ServiceAccount>,
        config: &'a ProtocolConfig,
    ) -> HostContext<'a> {
        HostContext { accounts, self_id: 1, timeslot: 100, config }
    }

    fn funded_account() -> ServiceAccount {
        let mut a = ServiceAccount::new(H32::zero());
        a.balance = 1_000_000;
        a
    }

    #[test]
    fn fetch_selector_zero_writes_system_constants() {
        let config = ProtocolConfig::tiny();
        let mut accounts = BTreeMap::new();
        let mut mem = FlatMemory::new(256);
        let mut regs = Registers::new();
        regs.set(7, 0);
        regs.set(8, 0);
        regs.set(9, 200);
        let ctx = ctx_with(&mut accounts, &config);
        fetch(&mut regs, &mut mem, &ctx).expect("fetch");
        assert_eq!(regs.get(7), 134);
        let blob = mem.read_octets(0, 134).expect("read back");
        assert_eq!(blob, config.system_constants_blob());
    }

    #[test]
    fn write_then_read_roundtrips() {
        let config = ProtocolConfig::tiny();
        let mut accounts = BTreeMap::new();
        accounts.insert(1, funded_account());
        let mut mem = FlatMemory::new(256);
        mem.write_octets_during_initialization(0, b"mykey");
        mem.write_octets_during_initialization(16, b"myvalue!");

        let mut regs = Registers::new();
        regs.set(7, 0);
        regs.set(8, 5);
        regs.set(9, 16);
        regs.set(10, 8);
        {
            let mut ctx = ctx_with(&mut accounts, &config);
            write(&mut regs, &mut mem, &mut ctx).expect("write");
        }
        assert_eq!(regs.get(7), HostResultCode::None.as_u64());

        regs.set(7, 0);
        regs.set(8, 5);
        regs.set(9, 64);
        regs.set(10, 64);
        {
            let ctx = ctx_with(&mut accounts, &config);
            read(&mut regs, &mut mem, &ctx).expect("read");
        }
        assert_eq!(regs.get(7), 8);
        assert_eq!(mem.read_octets(64, 8).expect("read back"), b"myvalue!");
    }

    #[test]
    fn write_deletion_zeroes_out_item_and_octet_accounting() {
        let config = ProtocolConfig::tiny();
        let mut accounts = BTreeMap::new();
        accounts.insert(1, funded_account());
        let mut mem = FlatMemory::new(256);
        mem.write_octets_during_initialization(0, b"k");
        mem.write_octets_during_initialization(16, b"value");

        let mut regs = Registers::new();
        regs.set(7, 0);
        regs.set(8, 1);
        regs.set(9, 16);
        regs.set(10, 5);
        {
            let mut ctx = ctx_with(&mut accounts, &config);
            write(&mut regs, &mut mem, &mut ctx).expect("write");
        }
        assert_eq!(accounts.get(&1).expect("account").items, 1);

        regs.set(7, 0);
        regs.set(8, 1);
        regs.set(9, 0);
        regs.set(10, 0);
        {
            let mut ctx = ctx_with(&mut accounts, &config);
            write(&mut regs, &mut mem, &mut ctx).expect("delete");
        }
        let account = accounts.get(&1).expect("account");
        assert_eq!(account.items, 0);
        assert_eq!(account.octets, 0);
    }

    #[test]
    fn write_reverts_when_balance_would_go_negative() {
        let config = ProtocolConfig::tiny();
        let mut accounts = BTreeMap::new();
        let mut poor = ServiceAccount::new(H32::zero());
        poor.balance = 5;
        accounts.insert(1, poor);
        let mut mem = FlatMemory::new(256);
        mem.write_octets_during_initialization(0, b"k");
        mem.write_octets_during_initialization(16, &[7u8; 64]);

        let mut regs = Registers::new();
        regs.set(7, 0);
        regs.set(8, 1);
        regs.set(9, 16);
        regs.set(10, 64);
        {
            let mut ctx = ctx_with(&mut accounts, &config);
            write(&mut regs, &mut mem, &mut ctx).expect("write");
        }
        assert_eq!(regs.get(7), HostResultCode::Full.as_u64());
        assert_eq!(accounts.get(&1).expect("account").items, 0);
    }

    #[test]
    fn lookup_rejects_non_self_service_id() {
        let config = ProtocolConfig::tiny();
        let mut accounts = BTreeMap::new();
        accounts.insert(1, funded_account());
        let mut mem = FlatMemory::new(64);
        let mut regs = Registers::new();
        regs.set(7, 9);
        let ctx = ctx_with(&mut accounts, &config);
        lookup(&mut regs, &mut mem, &ctx).expect("lookup");
        assert_eq!(regs.get(7), HostResultCode::Who.as_u64());
    }

    #[test]
    fn solicit_then_forget_roundtrip() {
        let config = ProtocolConfig::tiny();
        let mut accounts = BTreeMap::new();
        accounts.insert(1, funded_account());
        let mut mem = FlatMemory::new(64);
        mem.write_octets_during_initialization(0, &[5u8; 32]);

        let mut regs = Registers::new();
        regs.set(7, 0);
        regs.set(8, 12);
        {
            let mut ctx = ctx_with(&mut accounts, &config);
            solicit(&mut regs, &mem, &mut ctx).expect("solicit");
        }
        assert_eq!(regs.get(7), 0);

        regs.set(7, 0);
        regs.set(8, 12);
        {
            let mut ctx = ctx_with(&mut accounts, &config);
            forget(&mut regs, &mem, &mut ctx).expect("forget pending");
        }
        assert_eq!(regs.get(7), 0);

        regs.set(7, 0);
        regs.set(8, 12);
        {
            let mut ctx = ctx_with(&mut accounts, &config);
            query(&mut regs, &mem, &ctx).expect("query after append");
        }
        assert_eq!(regs.get(7) & 0xFFFF_FFFF, 2);
    }

    #[test]
    fn forget_deletes_eligible_two_slot_request() {
        let config = ProtocolConfig::tiny();
        let mut accounts = BTreeMap::new();
        let mut account = funded_account();
        // A request already in `[x, y]` with `y` older than the expunge
        // period (32 slots, tiny preset) relative to `timeslot = 100`.
        account.requests.entry(H32([5u8; 32])).or_default().insert(12, vec![1, 10]);
        accounts.insert(1, account);
        let mut mem = FlatMemory::new(64);
        mem.write_octets_during_initialization(0, &[5u8; 32]);

        let mut regs = Registers::new();
        regs.set(7, 0);
        regs.set(8, 12);
        {
            let mut ctx = ctx_with(&mut accounts, &config);
            forget(&mut regs, &mem, &mut ctx).expect("forget eligible two-slot request");
        }
        assert_eq!(regs.get(7), 0);
        assert!(!accounts
            .get(&1)
            .expect("account")
            .requests
            .get(&H32([5u8; 32]))
            .is_some_and(|by_length| by_length.contains_key(&12)));

        regs.set(7, 0);
        regs.set(8, 12);
        {
            let ctx = ctx_with(&mut accounts, &config);
            query(&mut regs, &mem, &ctx).expect("query after forget");
        }
        assert_eq!(regs.get(7), HostResultCode::None.as_u64());
    }

    #[test]
    fn query_on_unknown_request_is_none() {
        let config = ProtocolConfig::tiny();
        let mut accounts = BTreeMap::new();
        accounts.insert(1, funded_account());
        let mem = FlatMemory::new(64);
        let mut regs = Registers::new();
        regs.set(7, 0);
        regs.set(8, 1);
        let ctx = ctx_with(&mut accounts, &config);
        query(&mut regs, &mem, &ctx).expect("query");
        assert_eq!(regs.get(7), HostResultCode::None.as_u64());
        assert_eq!(regs.get(8), 0);
    }
}
