// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

use crate::regs::WORD_SIZE;

/// Word-sized access to a block of device registers.
///
/// Offsets are in bytes, relative to the start of the block, and must be a
/// multiple of four. Every call must turn into exactly one bus access.
pub trait Registers {
    fn read(&self, offset: usize) -> u32;
    fn write(&self, offset: usize, value: u32);
}

impl<R: Registers + ?Sized> Registers for &R {
    fn read(&self, offset: usize) -> u32 {
        (**self).read(offset)
    }

    fn write(&self, offset: usize, value: u32) {
        (**self).write(offset, value)
    }
}

/// Registers backed by memory-mapped I/O.
#[derive(Clone, Copy)]
pub struct Mmio {
    base_addr: *mut u32,
}

impl Mmio {
    /// Create a new [`Mmio`] instance given a base address.
    ///
    /// # Safety
    ///
    /// `base_addr` must be word aligned and point to a mapped register block
    /// that stays valid for as long as the returned value is used.
    pub const unsafe fn new(base_addr: *mut u8) -> Mmio {
        Mmio {
            base_addr: base_addr.cast(),
        }
    }

    pub fn base_addr(&self) -> *mut u8 {
        self.base_addr.cast()
    }

    fn word(&self, offset: usize) -> *mut u32 {
        debug_assert!(offset % WORD_SIZE == 0, "unaligned register offset");
        unsafe { self.base_addr.add(offset / WORD_SIZE) }
    }
}

impl Registers for Mmio {
    fn read(&self, offset: usize) -> u32 {
        unsafe { self.word(offset).read_volatile() }
    }

    fn write(&self, offset: usize, value: u32) {
        unsafe { self.word(offset).write_volatile(value) }
    }
}
