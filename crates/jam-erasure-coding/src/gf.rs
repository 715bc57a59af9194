// Path: crates/jam-erasure-coding/src/gf.rs
//! Arithmetic over GF(2^16), the field the shard coder operates on (spec §4.7).
//!
//! Elements are 16-bit words reduced modulo the primitive polynomial
//! `x^16 + x^12 + x^3 + x + 1` (`0x1100B`). Multiplication and inversion go
//! through a pair of exp/log tables built once and shared across calls,
//! the standard technique for small-field Reed-Solomon coders.

use std::sync::OnceLock;

/// The primitive polynomial defining the field, with the degree-16 term implicit.
const PRIMITIVE_POLY: u32 = 0x1100B;
const FIELD_SIZE: usize = 1 << 16;

struct Tables {
    exp: Vec<u16>,
    log: Vec<u16>,
}

fn tables() -> &'static Tables {
    static TABLES: OnceLock<Tables> = OnceLock::new();
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> Tables {
    let mut exp = vec![0u16; 2 * FIELD_SIZE];
    let mut log = vec![0u16; FIELD_SIZE];
    let mut x: u32 = 1;
    for i in 0..(FIELD_SIZE - 1) {
        exp[i] = x as u16;
        log[x as usize] = i as u16;
        x <<= 1;
        if x & FIELD_SIZE as u32 != 0 {
            x ^= PRIMITIVE_POLY;
        }
    }
    for i in (FIELD_SIZE - 1)..(2 * FIELD_SIZE) {
        exp[i] = exp[i - (FIELD_SIZE - 1)];
    }
    Tables { exp, log }
}

/// An element of GF(2^16).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Gf(pub u16);

impl Gf {
    pub const ZERO: Gf = Gf(0);
    pub const ONE: Gf = Gf(1);

    pub fn add(self, other: Gf) -> Gf {
        Gf(self.0 ^ other.0)
    }

    pub fn mul(self, other: Gf) -> Gf {
        if self.0 == 0 || other.0 == 0 {
            return Gf::ZERO;
        }
        let t = tables();
        let log_sum = u32::from(t.log[self.0 as usize]) + u32::from(t.log[other.0 as usize]);
        Gf(t.exp[log_sum as usize])
    }

    pub fn inv(self) -> Option<Gf> {
        if self.0 == 0 {
            return None;
        }
        let t = tables();
        let log_self = u32::from(t.log[self.0 as usize]);
        let log_inv = (FIELD_SIZE as u32 - 1 - log_self) % (FIELD_SIZE as u32 - 1);
        Some(Gf(t.exp[log_inv as usize]))
    }

    pub fn div(self, other: Gf) -> Option<Gf> {
        other.inv().map(|inv| self.mul(inv))
    }

    /// The `n`-th nonzero power of the field's generator, used to pick `n`
    /// distinct nonzero evaluation points for the generator matrix.
    pub fn generator_power(n: usize) -> Gf {
        let t = tables();
        Gf(t.exp[n % (FIELD_SIZE - 1)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplicative_identity() {
        let a = Gf(4321);
        assert_eq!(a.mul(Gf::ONE), a);
    }

    #[test]
    fn zero_annihilates() {
        assert_eq!(Gf(999).mul(Gf::ZERO), Gf::ZERO);
    }

    #[test]
    fn inverse_roundtrips() {
        let a = Gf(12345);
        let inv = a.inv().expect("nonzero element has an inverse");
        assert_eq!(a.mul(inv), Gf::ONE);
    }

    #[test]
    fn zero_has_no_inverse() {
        assert_eq!(Gf::ZERO.inv(), None);
    }

    #[test]
    fn distinct_generator_powers() {
        let a = Gf::generator_power(1);
        let b = Gf::generator_power(2);
        assert_ne!(a, b);
        assert_ne!(a, Gf::ZERO);
    }

    #[test]
    fn addition_is_its_own_inverse() {
        let a = Gf(555);
        let b = Gf(777);
        assert_eq!(a.add(b).add(b), a);
    }
}
