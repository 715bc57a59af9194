// Path: crates/jam-erasure-coding/src/matrix.rs
//! The `(k, n)` Vandermonde generator matrix and the Gauss-Jordan solver
//! used to recover the original `k` rows from any `k` encoded rows.

use crate::error::ErasureError;
use crate::gf::Gf;

/// Row `i` is `[x_i^0, x_i^1, ..., x_i^{k-1}]` for `n` distinct nonzero
/// field elements `x_i`, so encoding is `shard_i = row_i . data`.
pub fn generator_matrix(k: usize, n: usize) -> Vec<Vec<Gf>> {
    (0..n)
        .map(|i| {
            let x = Gf::generator_power(i + 1);
            let mut row = Vec::with_capacity(k);
            let mut power = Gf::ONE;
            for _ in 0..k {
                row.push(power);
                power = power.mul(x);
            }
            row
        })
        .collect()
}

/// Inverts a `k x k` matrix over GF(2^16) via Gauss-Jordan elimination with
/// partial pivoting, returning `ErasureError::SingularMatrix` if the
/// selected rows are linearly dependent (should not occur for a Vandermonde
/// submatrix built from distinct evaluation points).
pub fn invert(mut matrix: Vec<Vec<Gf>>) -> Result<Vec<Vec<Gf>>, ErasureError> {
    let k = matrix.len();
    let mut inverse: Vec<Vec<Gf>> = (0..k)
        .map(|i| {
            let mut row = vec![Gf::ZERO; k];
            row[i] = Gf::ONE;
            row
        })
        .collect();

    for col in 0..k {
        let pivot_row = (col..k).find(|&r| matrix[r][col] != Gf::ZERO).ok_or(ErasureError::SingularMatrix)?;
        matrix.swap(col, pivot_row);
        inverse.swap(col, pivot_row);

        let pivot_inv = matrix[col][col].inv().ok_or(ErasureError::SingularMatrix)?;
        for entry in matrix[col].iter_mut() {
            *entry = entry.mul(pivot_inv);
        }
        for entry in inverse[col].iter_mut() {
            *entry = entry.mul(pivot_inv);
        }

        for row in 0..k {
            if row == col {
                continue;
            }
            let factor = matrix[row][col];
            if factor == Gf::ZERO {
                continue;
            }
            for c in 0..k {
                let scaled = matrix[col][c].mul(factor);
                matrix[row][c] = matrix[row][c].add(scaled);
                let scaled_inv = inverse[col][c].mul(factor);
                inverse[row][c] = inverse[row][c].add(scaled_inv);
            }
        }
    }

    Ok(inverse)
}

/// Multiplies a `k x k` matrix by a length-`k` column vector.
pub fn apply(matrix: &[Vec<Gf>], vector: &[Gf]) -> Vec<Gf> {
    matrix
        .iter()
        .map(|row| row.iter().zip(vector).fold(Gf::ZERO, |acc, (m, v)| acc.add(m.mul(*v))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submatrix_of_vandermonde_inverts() {
        let gen = generator_matrix(3, 5);
        let sub = vec![gen[0].clone(), gen[2].clone(), gen[4].clone()];
        let inv = invert(sub.clone()).expect("vandermonde submatrix is invertible");
        // inv * sub should be the identity: apply inv's rows to each column of sub.
        let identity_check = {
            let mut ok = true;
            for i in 0..3 {
                let mut column = vec![Gf::ZERO; 3];
                for (r, row) in sub.iter().enumerate() {
                    column[r] = row[i];
                }
                let recovered = apply(&inv, &column);
                let mut expected = vec![Gf::ZERO; 3];
                expected[i] = Gf::ONE;
                if recovered != expected {
                    ok = false;
                }
            }
            ok
        };
        assert!(identity_check);
    }

    #[test]
    fn encode_then_recover_roundtrips() {
        let k = 4;
        let gen = generator_matrix(k, 7);
        let data = vec![Gf(11), Gf(22), Gf(33), Gf(44)];
        let encoded: Vec<Gf> = gen.iter().map(|row| apply(&[row.clone()], &data)[0]).collect();

        let chosen = [1usize, 3, 4, 6];
        let sub: Vec<Vec<Gf>> = chosen.iter().map(|&i| gen[i].clone()).collect();
        let shards: Vec<Gf> = chosen.iter().map(|&i| encoded[i]).collect();
        let inv = invert(sub).expect("chosen rows are independent");
        let recovered = apply(&inv, &shards);
        assert_eq!(recovered, data);
    }
}
