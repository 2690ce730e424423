// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0
/*! Register-level model of the accelerator, for running the driver without
hardware.

The model behaves like the device as seen from the bus: writing the start bit
arms it, and after a configurable number of status reads it raises the done bit
and fills `MATRIX_C` with `A × B`. Every write is recorded so tests can check
access order.
*/

use core::cell::{Cell, RefCell};

use heapless::Vec;

use crate::matrix::Matrix;
use crate::mmio::Registers;
use crate::regs::{self, control, status, MATRIX_WORDS, REGISTER_WORDS, WORD_SIZE};
use crate::time::{Duration, Instant, TimeSource};

/// Number of writes the model remembers. Later writes still take effect but
/// are not recorded.
pub const WRITE_LOG_CAPACITY: usize = 128;

/// When the model reports completion after being started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The n-th status read after the start bit is written sees the done bit,
    /// as does every read after it. `0` behaves like `1`.
    AfterReads(u32),
    /// The done bit is never raised.
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterWrite {
    pub offset: usize,
    pub value: u32,
}

pub struct SimulatedAccelerator {
    words: [Cell<u32>; REGISTER_WORDS],
    completion: Completion,
    armed: Cell<bool>,
    status_reads: Cell<u32>,
    writes: RefCell<Vec<RegisterWrite, WRITE_LOG_CAPACITY>>,
}

impl SimulatedAccelerator {
    pub fn new(completion: Completion) -> SimulatedAccelerator {
        SimulatedAccelerator {
            words: core::array::from_fn(|_| Cell::new(0)),
            completion,
            armed: Cell::new(false),
            status_reads: Cell::new(0),
            writes: RefCell::new(Vec::new()),
        }
    }

    /// Status reads since the model was last started.
    pub fn status_reads(&self) -> u32 {
        self.status_reads.get()
    }

    /// Writes in the order they reached the model.
    pub fn writes(&self) -> Vec<RegisterWrite, WRITE_LOG_CAPACITY> {
        self.writes.borrow().clone()
    }

    /// Current contents of a register word, without the side effects of a bus
    /// read.
    pub fn peek(&self, offset: usize) -> u32 {
        self.words[offset / WORD_SIZE].get()
    }

    pub fn peek_matrix(&self, base: usize) -> Matrix {
        let mut words = [0u32; MATRIX_WORDS];
        for (i, w) in words.iter_mut().enumerate() {
            *w = self.peek(regs::matrix_word(base, i));
        }
        Matrix::from_words(words)
    }

    fn store(&self, offset: usize, value: u32) {
        self.words[offset / WORD_SIZE].set(value);
    }

    fn complete(&self) {
        let product = self
            .peek_matrix(regs::MATRIX_A)
            .wrapping_mul(&self.peek_matrix(regs::MATRIX_B));
        for (i, w) in product.words().enumerate() {
            self.store(regs::matrix_word(regs::MATRIX_C, i), w);
        }
        self.store(regs::STATUS, status::DONE);
    }

    fn read_status(&self) -> u32 {
        if !self.armed.get() {
            return self.peek(regs::STATUS);
        }
        let reads = self.status_reads.get().saturating_add(1);
        self.status_reads.set(reads);
        if let Completion::AfterReads(n) = self.completion {
            if reads >= n.max(1) && self.peek(regs::STATUS) & status::DONE == 0 {
                self.complete();
            }
        }
        self.peek(regs::STATUS)
    }
}

impl Registers for SimulatedAccelerator {
    fn read(&self, offset: usize) -> u32 {
        assert!(offset < regs::REGISTER_SPAN, "read outside the register block");
        if offset == regs::STATUS {
            self.read_status()
        } else {
            self.peek(offset)
        }
    }

    fn write(&self, offset: usize, value: u32) {
        assert!(offset < regs::REGISTER_SPAN, "write outside the register block");
        let _ = self.writes.borrow_mut().push(RegisterWrite { offset, value });

        match offset {
            regs::CONTROL => {
                if value & control::START != 0 {
                    self.armed.set(true);
                    self.status_reads.set(0);
                    self.store(regs::STATUS, 0);
                }
            }
            // read-only from the bus
            o if o == regs::STATUS || (regs::MATRIX_C..regs::CONTROL).contains(&o) => {}
            _ => self.store(offset, value),
        }
    }
}

/// A [`TimeSource`] that moves forward by `step` every time it is read.
pub struct SimulatedClock {
    now: Cell<Instant>,
    step: Duration,
}

impl SimulatedClock {
    pub fn new(step: Duration) -> SimulatedClock {
        SimulatedClock {
            now: Cell::new(Instant::from_micros(0)),
            step,
        }
    }
}

impl TimeSource for SimulatedClock {
    fn now(&self) -> Instant {
        let now = self.now.get();
        self.now.set(now + self.step);
        now
    }
}
