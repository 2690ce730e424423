// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

pub mod log;

const TX_FULL: u8 = 0b01;

pub struct UartStatus {
    pub transmit_buffer_full: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub struct TransmitBufferFull;

/// Transmit side of the console UART, used for test reports and log output.
///
/// The data byte is at offset `0`, the flags byte at offset `4`.
#[derive(Clone, Copy)]
pub struct Uart {
    payload_addr: *mut u8,
    flags_addr: *const u8,
}

impl Uart {
    /// Create a new [`Uart`] instance given a base address.
    ///
    /// # Safety
    ///
    /// The `base_addr` pointer MUST BE a valid pointer that is backed
    /// by a memory mapped UART instance.
    pub const unsafe fn new(base_addr: *mut u8) -> Uart {
        Uart {
            payload_addr: base_addr,
            flags_addr: base_addr.wrapping_add(4),
        }
    }

    pub fn read_status(&self) -> UartStatus {
        let flags = unsafe { self.flags_addr.read_volatile() };
        UartStatus {
            transmit_buffer_full: flags & TX_FULL != 0,
        }
    }

    /// Block until the transmit buffer has room, then send `data`.
    pub fn send(&self, data: u8) {
        while self.try_send(data).is_err() {}
    }

    pub fn try_send(&self, data: u8) -> Result<(), TransmitBufferFull> {
        if self.read_status().transmit_buffer_full {
            Err(TransmitBufferFull)
        } else {
            unsafe { self.payload_addr.write_volatile(data) };
            Ok(())
        }
    }
}

impl ufmt::uWrite for Uart {
    type Error = ();

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        s.bytes().for_each(|b| self.send(b));
        Ok(())
    }
}

impl core::fmt::Write for Uart {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        s.bytes().for_each(|b| self.send(b));
        Ok(())
    }
}
