// Path: crates/jam-pvm/src/program.rs
//! Program blob parsing ("deblob"): `E_nat(|J|) ‖ E1(z) ‖ E_nat(|c|) ‖
//! E_z(J) ‖ c ‖ k` (spec §4.1's schema summary, §4.4's "Program parse").
//!
//! `J` is the jump table (each entry a `z`-byte little-endian code
//! offset), `c` is the instruction stream, and `k` is the opcode-start
//! bitmask: one byte per element of `c`, `k[i] = 1` iff `c[i]` begins an
//! instruction.

use crate::error::PvmError;
use jam_codec::decode_nat;

/// The farthest an operand run may extend past its opcode before
/// `Fskip` gives up and reports "no opcode within range" (spec §4.4).
const MAX_SKIP: u32 = 24;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Program {
    pub code: Vec<u8>,
    pub bitmask: Vec<u8>,
    pub jump_table: Vec<u32>,
    pub element_size: u32,
}

impl Program {
    /// The operand-skip distance from an opcode at `pc`: the number of
    /// bytes to its immediate operands, i.e. `min{j in 1..=24 :
    /// bitmask[pc+j] == 1} - 1`, or `24` if no later opcode start falls
    /// within the window (also what's returned once `pc` runs past the
    /// end of `code`).
    pub fn fskip(&self, pc: u32) -> u32 {
        for j in 1..=MAX_SKIP {
            let probe = pc as u64 + j as u64;
            if probe >= self.bitmask.len() as u64 {
                break;
            }
            if self.bitmask[probe as usize] == 1 {
                return j - 1;
            }
        }
        MAX_SKIP
    }

    /// The opcode byte at `pc`, or `None` once execution has run past the
    /// end of the instruction stream.
    pub fn opcode_at(&self, pc: u32) -> Option<u8> {
        self.code.get(pc as usize).copied()
    }

    /// The operand bytes following the opcode at `pc`.
    pub fn operands_at(&self, pc: u32) -> &[u8] {
        let skip = self.fskip(pc) as usize;
        let start = pc as usize + 1;
        let end = (start + skip).min(self.code.len());
        if start >= self.code.len() {
            return &[];
        }
        &self.code[start..end]
    }

    /// Looks up jump table entry `index` (1-based per the protocol's
    /// `JUMP_IND` convention: entry `0` is reserved and always invalid),
    /// returning the code offset it names.
    pub fn jump_target(&self, index: u32) -> Option<u32> {
        if index == 0 {
            return None;
        }
        self.jump_table.get(index as usize - 1).copied()
    }
}

fn fixed_width_le(bytes: &[u8], width: u32) -> Option<u32> {
    if bytes.len() < width as usize {
        return None;
    }
    let mut buf = [0u8; 4];
    buf[..width as usize].copy_from_slice(&bytes[..width as usize]);
    Some(u32::from_le_bytes(buf))
}

/// Parses a program blob into `{code, bitmask, jumpTable, elementSize}`.
pub fn parse(blob: &[u8]) -> Result<Program, PvmError> {
    if blob.is_empty() {
        return Err(PvmError::EmptyProgram);
    }

    let (jump_count, rest) = decode_nat(blob).map_err(|_| PvmError::Truncated {
        expected: 1,
        found: blob.len(),
    })?;

    let &element_size = rest.first().ok_or(PvmError::Truncated {
        expected: 1,
        found: rest.len(),
    })?;
    if ![1u8, 2, 4, 8].contains(&element_size) {
        return Err(PvmError::InvalidElementSize(element_size as u32));
    }
    let rest = &rest[1..];

    let (code_len, rest) = decode_nat(rest).map_err(|_| PvmError::Truncated {
        expected: 1,
        found: rest.len(),
    })?;

    let jump_table_bytes = jump_count as usize * element_size as usize;
    if rest.len() < jump_table_bytes {
        return Err(PvmError::Truncated {
            expected: jump_table_bytes,
            found: rest.len(),
        });
    }
    let (jump_table_raw, rest) = rest.split_at(jump_table_bytes);
    let jump_table: Vec<u32> = jump_table_raw
        .chunks(element_size as usize)
        .map(|chunk| fixed_width_le(chunk, element_size as u32).unwrap_or(0))
        .collect();

    let code_len = code_len as usize;
    if rest.len() < code_len {
        return Err(PvmError::Truncated {
            expected: code_len,
            found: rest.len(),
        });
    }
    let (code, rest) = rest.split_at(code_len);

    if rest.len() < code_len {
        return Err(PvmError::BitmaskLengthMismatch {
            bitmask_len: rest.len(),
            code_len,
        });
    }
    let bitmask = rest[..code_len].to_vec();

    for &target in &jump_table {
        if (target as usize) > code_len {
            return Err(PvmError::InvalidJumpTableEntry {
                index: 0,
                offset: target,
                code_len,
            });
        }
    }

    Ok(Program {
        code: code.to_vec(),
        bitmask,
        jump_table,
        element_size: element_size as u32,
    })
}
