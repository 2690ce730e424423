// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

use crate::regs::{MATRIX_DIM, MATRIX_WORDS};
use ufmt::{uDisplay, uWrite, uwrite};

/// A 4x4 matrix of signed 32-bit integers, laid out row-major exactly like the
/// accelerator's operand and result registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Matrix {
    rows: [[i32; MATRIX_DIM]; MATRIX_DIM],
}

impl Matrix {
    pub const fn from_rows(rows: [[i32; MATRIX_DIM]; MATRIX_DIM]) -> Matrix {
        Matrix { rows }
    }

    pub const fn zero() -> Matrix {
        Matrix {
            rows: [[0; MATRIX_DIM]; MATRIX_DIM],
        }
    }

    pub const fn identity() -> Matrix {
        let mut rows = [[0; MATRIX_DIM]; MATRIX_DIM];
        let mut i = 0;
        while i < MATRIX_DIM {
            rows[i][i] = 1;
            i += 1;
        }
        Matrix { rows }
    }

    /// The values `1..=16`, row by row.
    pub const fn ascending() -> Matrix {
        let mut rows = [[0; MATRIX_DIM]; MATRIX_DIM];
        let mut i = 0;
        while i < MATRIX_WORDS {
            rows[i / MATRIX_DIM][i % MATRIX_DIM] = i as i32 + 1;
            i += 1;
        }
        Matrix { rows }
    }

    /// Build a matrix from the raw register words, row-major.
    pub fn from_words(words: [u32; MATRIX_WORDS]) -> Matrix {
        let mut m = Matrix::zero();
        for (i, w) in words.into_iter().enumerate() {
            m.rows[i / MATRIX_DIM][i % MATRIX_DIM] = w as i32;
        }
        m
    }

    /// The register words of this matrix, row-major.
    pub fn words(&self) -> impl Iterator<Item = u32> + '_ {
        self.rows.iter().flatten().map(|&v| v as u32)
    }

    pub fn rows(&self) -> &[[i32; MATRIX_DIM]; MATRIX_DIM] {
        &self.rows
    }

    pub fn get(&self, row: usize, col: usize) -> i32 {
        self.rows[row][col]
    }

    /// Matrix product with the wrap-around semantics of 32-bit hardware.
    pub fn wrapping_mul(&self, rhs: &Matrix) -> Matrix {
        let mut out = Matrix::zero();
        for (r, out_row) in out.rows.iter_mut().enumerate() {
            for (c, out_cell) in out_row.iter_mut().enumerate() {
                *out_cell = (0..MATRIX_DIM).fold(0i32, |acc, k| {
                    acc.wrapping_add(self.rows[r][k].wrapping_mul(rhs.rows[k][c]))
                });
            }
        }
        out
    }
}

impl uDisplay for Matrix {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        for row in &self.rows {
            uwrite!(f, "[{} {} {} {}]", row[0], row[1], row[2], row[3])?;
        }
        Ok(())
    }
}

impl core::fmt::Display for Matrix {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for row in &self.rows {
            write!(f, "[{} {} {} {}]", row[0], row[1], row[2], row[3])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascending_is_row_major() {
        let m = Matrix::ascending();
        assert_eq!(m.get(0, 0), 1);
        assert_eq!(m.get(0, 3), 4);
        assert_eq!(m.get(1, 0), 5);
        assert_eq!(m.get(3, 3), 16);
    }

    #[test]
    fn identity_has_ones_on_diagonal() {
        let m = Matrix::identity();
        for r in 0..MATRIX_DIM {
            for c in 0..MATRIX_DIM {
                assert_eq!(m.get(r, c), i32::from(r == c));
            }
        }
    }

    #[test]
    fn words_round_trip_negative_values() {
        let m = Matrix::from_rows([[-1, 2, -3, 4], [0; 4], [i32::MIN, 0, 0, i32::MAX], [0; 4]]);
        let mut words = [0u32; MATRIX_WORDS];
        for (slot, w) in words.iter_mut().zip(m.words()) {
            *slot = w;
        }
        assert_eq!(words[0], u32::MAX);
        assert_eq!(words[8], 0x8000_0000);
        assert_eq!(Matrix::from_words(words), m);
    }

    #[test]
    fn multiply_by_identity() {
        let a = Matrix::ascending();
        assert_eq!(a.wrapping_mul(&Matrix::identity()), a);
        assert_eq!(Matrix::identity().wrapping_mul(&a), a);
    }

    #[test]
    fn multiply_small_product() {
        let a = Matrix::ascending();
        let c = a.wrapping_mul(&a);
        // first row of A times the columns of A
        assert_eq!(c.rows()[0], [90, 100, 110, 120]);
        assert_eq!(c.rows()[3], [426, 484, 542, 600]);
    }

    #[test]
    fn multiply_wraps() {
        let big = Matrix::from_rows([[i32::MAX, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let two = Matrix::from_rows([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert_eq!(big.wrapping_mul(&two).get(0, 0), -2);
    }
}
