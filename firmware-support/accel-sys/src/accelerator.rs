// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

use log::{debug, warn};
use ufmt::derive::uDebug;

use crate::config::AccelConfig;
use crate::error::WaitError;
use crate::matrix::Matrix;
use crate::mmio::{Mmio, Registers};
use crate::poll::PollStrategy;
use crate::regs::{self, control, status, MATRIX_WORDS};

/// Operand written to `MATRIX_A` by [`Accelerator::load_operands`].
pub const OPERAND_A: Matrix = Matrix::ascending();
/// Operand written to `MATRIX_B` by [`Accelerator::load_operands`].
pub const OPERAND_B: Matrix = Matrix::identity();

/// Where the handle is in its single computation.
///
/// There is no way back to `Idle`: one handle drives one computation.
#[derive(Debug, uDebug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    Loaded,
    Started,
    Done,
}

/// Driver handle for the matrix-multiply accelerator.
///
/// ```no_run
/// use accel_sys::{Accelerator, PollStrategy};
///
/// let mut accel = unsafe { Accelerator::new(0x1000_0000 as *mut u8) };
/// accel.run(PollStrategy::Unbounded).ok();
/// ```
pub struct Accelerator<R> {
    regs: R,
    state: State,
}

impl Accelerator<Mmio> {
    /// Create a handle for an accelerator mapped at `base_addr`.
    ///
    /// # Safety
    ///
    /// `base_addr` must point to the register block of a matrix-multiply
    /// accelerator, mapped uncached, for the whole lifetime of the handle.
    pub const unsafe fn new(base_addr: *mut u8) -> Accelerator<Mmio> {
        Accelerator::with_registers(Mmio::new(base_addr))
    }

    /// # Safety
    ///
    /// `config` must describe the hardware this code runs on.
    pub unsafe fn from_config(config: &AccelConfig) -> Accelerator<Mmio> {
        Accelerator::new(config.base_addr as *mut u8)
    }
}

impl<R: Registers> Accelerator<R> {
    pub const fn with_registers(regs: R) -> Accelerator<R> {
        Accelerator {
            regs,
            state: State::Idle,
        }
    }

    pub fn registers(&self) -> &R {
        &self.regs
    }

    pub fn state(&self) -> State {
        self.state
    }

    fn transition(&mut self, next: State) {
        debug!("accelerator: {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn write_matrix(&self, base: usize, matrix: &Matrix) {
        for (i, word) in matrix.words().enumerate() {
            self.regs.write(regs::matrix_word(base, i), word);
        }
    }

    fn read_matrix(&self, base: usize) -> Matrix {
        let mut words = [0u32; MATRIX_WORDS];
        for (i, word) in words.iter_mut().enumerate() {
            *word = self.regs.read(regs::matrix_word(base, i));
        }
        Matrix::from_words(words)
    }

    pub fn write_matrix_a(&mut self, matrix: &Matrix) {
        self.write_matrix(regs::MATRIX_A, matrix);
    }

    pub fn write_matrix_b(&mut self, matrix: &Matrix) {
        self.write_matrix(regs::MATRIX_B, matrix);
    }

    pub fn read_matrix_a(&self) -> Matrix {
        self.read_matrix(regs::MATRIX_A)
    }

    pub fn read_matrix_b(&self) -> Matrix {
        self.read_matrix(regs::MATRIX_B)
    }

    /// Read the result. Only meaningful once [`is_done`](Self::is_done) holds.
    pub fn read_matrix_c(&self) -> Matrix {
        self.read_matrix(regs::MATRIX_C)
    }

    /// Write the fixed operands: `1..=16` row-major to `MATRIX_A` and the
    /// identity to `MATRIX_B`. Writes are unconditional; a bus fault is not
    /// something this driver can observe.
    pub fn load_operands(&mut self) {
        self.write_matrix_a(&OPERAND_A);
        self.write_matrix_b(&OPERAND_B);
        self.transition(State::Loaded);
    }

    /// Set the start bit in the control register.
    pub fn start(&mut self) {
        self.regs.write(regs::CONTROL, control::START);
        self.transition(State::Started);
    }

    /// A single read of the status register.
    pub fn is_done(&self) -> bool {
        self.regs.read(regs::STATUS) & status::DONE != 0
    }

    /// Read the status register until the done bit is set or `strategy` gives
    /// up. Returns the number of status reads performed.
    pub fn wait(&mut self, strategy: PollStrategy<'_>) -> Result<u32, WaitError> {
        if !strategy.is_bounded() {
            debug!("accelerator: waiting for completion without a bound");
        }
        let polls = match strategy {
            PollStrategy::Unbounded => self.poll_while(|_| true),
            PollStrategy::MaxAttempts(max) => self.poll_while(|polls| polls < max),
            PollStrategy::Deadline { clock, timeout } => {
                let start = clock.now();
                self.poll_while(|polls| {
                    polls == 0 || clock.now().saturating_duration_since(start) < timeout
                })
            }
        };

        match polls {
            Ok(polls) => {
                self.transition(State::Done);
                Ok(polls)
            }
            Err(polls) => {
                warn!("accelerator: no completion after {} status reads", polls);
                Err(WaitError::Timeout { polls })
            }
        }
    }

    /// Poll while `keep_going(polls_so_far)` holds. `Ok` carries the number of
    /// reads up to and including the one that saw the done bit, `Err` the
    /// number of reads before giving up.
    fn poll_while(&self, mut keep_going: impl FnMut(u32) -> bool) -> Result<u32, u32> {
        let mut polls: u32 = 0;
        loop {
            if !keep_going(polls) {
                return Err(polls);
            }
            polls = polls.saturating_add(1);
            if self.is_done() {
                return Ok(polls);
            }
            core::hint::spin_loop();
        }
    }

    /// Start the computation and wait for it to finish.
    ///
    /// With [`PollStrategy::Unbounded`] this never returns an error, and never
    /// returns at all if the hardware never raises the done bit.
    pub fn start_and_wait(&mut self, strategy: PollStrategy<'_>) -> Result<u32, WaitError> {
        self.start();
        self.wait(strategy)
    }

    /// Load the fixed operands, start, and wait. The result is left in
    /// `MATRIX_C`; this does not read or check it.
    pub fn run(&mut self, strategy: PollStrategy<'_>) -> Result<u32, WaitError> {
        self.load_operands();
        self.start_and_wait(strategy)
    }
}
