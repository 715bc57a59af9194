// Path: crates/jam-types/src/primitives.rs
//! Fixed-width digest newtypes shared across the schema.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 32-byte digest (Blake2b-256 output, Bandersnatch/Ed25519 keys, ticket ids, ...).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct H32(pub [u8; 32]);

/// A 64-byte digest (Bandersnatch/Ed25519 signatures truncated forms, BLS halves, ...).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct H64(pub [u8; 64]);

macro_rules! impl_hash_newtype {
    ($name:ident, $len:expr) => {
        impl $name {
            pub const LEN: usize = $len;

            pub const fn zero() -> Self {
                Self([0u8; $len])
            }

            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            pub fn from_slice(bytes: &[u8]) -> Option<Self> {
                if bytes.len() != $len {
                    return None;
                }
                let mut out = [0u8; $len];
                out.copy_from_slice(bytes);
                Some(Self(out))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::zero()
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}(0x{})", stringify!($name), hex_string(&self.0))
            }
        }
    };
}

impl_hash_newtype!(H32, 32);
impl_hash_newtype!(H64, 64);

fn hex_string(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        s.push_str(&format!("{:02x}", b));
    }
    s
}

/// A non-negative integer of unbounded size, used only where the schema's
/// `Nat` notation must be carried losslessly (the var-nat codec handles the
/// common bounded cases as native `u64`s).
pub type Nat = u128;
