// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0
/*! Register map of the matrix-multiply accelerator.

All registers are 32 bits wide and live in one contiguous block:

| Offset | Register   | Words | Access |
|--------|------------|-------|--------|
| `0x00` | `MATRIX_A` | 16    | RW     |
| `0x40` | `MATRIX_B` | 16    | RW     |
| `0x80` | `MATRIX_C` | 16    | RO     |
| `0xC0` | `CONTROL`  | 1     | WO     |
| `0xC4` | `STATUS`   | 1     | RO     |

Matrices are stored row-major.
*/

/// Base address of the accelerator in the default memory map.
pub const ACCEL_BASE: usize = 0x1000_0000;

/// Number of rows and columns of every operand and result matrix.
pub const MATRIX_DIM: usize = 4;
/// Number of 32-bit words a matrix occupies.
pub const MATRIX_WORDS: usize = MATRIX_DIM * MATRIX_DIM;

pub const MATRIX_A: usize = 0x00;
pub const MATRIX_B: usize = 0x40;
pub const MATRIX_C: usize = 0x80;
pub const CONTROL: usize = 0xC0;
pub const STATUS: usize = 0xC4;

/// Size of a single register access in bytes.
pub const WORD_SIZE: usize = core::mem::size_of::<u32>();

/// Number of bytes covered by the register block.
pub const REGISTER_SPAN: usize = STATUS + WORD_SIZE;
/// Number of words covered by the register block.
pub const REGISTER_WORDS: usize = REGISTER_SPAN / WORD_SIZE;

/// Control register bits.
pub mod control {
    /// Writing this bit starts a multiplication of `MATRIX_A` by `MATRIX_B`.
    pub const START: u32 = 1 << 0;
}

/// Status register bits.
pub mod status {
    /// Set by hardware once `MATRIX_C` holds a valid result.
    pub const DONE: u32 = 1 << 1;
}

/// Byte offset of word `index` of the matrix starting at `matrix`.
pub const fn matrix_word(matrix: usize, index: usize) -> usize {
    matrix + index * WORD_SIZE
}
