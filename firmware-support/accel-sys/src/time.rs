// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0
/*! Time structures.

Bounded waiting on the accelerator needs some sense of time. This module
provides it on top of a free-running cycle counter peripheral.

 - [`Instant`] is used to represent absolute time.
 - [`Duration`] is used to represent relative time.
 - [`TimeSource`] is anything that can report the current [`Instant`].
 - [`Clock`] reads the timer peripheral and provides busy-wait helpers.
*/

use core::ops;
use ufmt::derive::uDebug;
use ufmt::{uDisplay, uWrite, uwrite};

const MICROS_PER_MILLI: u64 = 1_000;
const MICROS_PER_SEC: u64 = 1_000_000;

/// A point in time, in microseconds since system startup.
#[derive(Debug, uDebug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Instant {
    micros: u64,
}

impl Instant {
    /// Create a new `Instant` from a cycle count and the frequency it was
    /// counted at. Saturates at `u64::MAX` microseconds.
    pub fn from_cycles(cycles: u64, frequency: u64) -> Instant {
        if frequency == 0 {
            panic!("Tried to create an Instant with a frequency of 0 hertz.")
        }
        let micros = (cycles as u128 * MICROS_PER_SEC as u128) / frequency as u128;
        Instant {
            micros: u64::try_from(micros).unwrap_or(u64::MAX),
        }
    }

    pub const fn from_micros(micros: u64) -> Instant {
        Instant { micros }
    }

    pub const fn from_millis(millis: u64) -> Instant {
        Instant {
            micros: millis * MICROS_PER_MILLI,
        }
    }

    pub const fn from_secs(secs: u64) -> Instant {
        Instant {
            micros: secs * MICROS_PER_SEC,
        }
    }

    /// The number of whole seconds represented by this `Instant`.
    pub const fn secs(&self) -> u64 {
        self.micros / MICROS_PER_SEC
    }

    /// The number of whole milliseconds represented by this `Instant`.
    pub const fn millis(&self) -> u64 {
        self.micros / MICROS_PER_MILLI
    }

    pub const fn micros(&self) -> u64 {
        self.micros
    }

    /// Time passed between `earlier` and `self`, zero if `earlier` is later.
    pub fn saturating_duration_since(&self, earlier: Instant) -> Duration {
        Duration::from_micros(self.micros.saturating_sub(earlier.micros))
    }
}

impl ops::Add<Duration> for Instant {
    type Output = Instant;

    fn add(self, rhs: Duration) -> Instant {
        Instant {
            micros: self.micros + rhs.micros,
        }
    }
}

impl ops::AddAssign<Duration> for Instant {
    fn add_assign(&mut self, rhs: Duration) {
        self.micros += rhs.micros;
    }
}

/// Saturates at zero when `rhs` is later than `self`.
impl ops::Sub<Instant> for Instant {
    type Output = Duration;

    fn sub(self, rhs: Instant) -> Duration {
        self.saturating_duration_since(rhs)
    }
}

impl uDisplay for Instant {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        uwrite!(f, "{}us", self.micros)
    }
}

/// A representation of a relative time, stored in microseconds.
#[derive(Debug, uDebug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Duration {
    micros: u64,
}

impl Duration {
    pub const fn from_micros(micros: u64) -> Duration {
        Duration { micros }
    }

    pub const fn from_millis(millis: u64) -> Duration {
        Duration {
            micros: millis * MICROS_PER_MILLI,
        }
    }

    pub const fn from_secs(secs: u64) -> Duration {
        Duration {
            micros: secs * MICROS_PER_SEC,
        }
    }

    pub const fn secs(&self) -> u64 {
        self.micros / MICROS_PER_SEC
    }

    pub const fn millis(&self) -> u64 {
        self.micros / MICROS_PER_MILLI
    }

    pub const fn micros(&self) -> u64 {
        self.micros
    }

    /// The number of clock cycles represented by this Duration given the
    /// frequency, saturating at `u64::MAX`.
    pub fn cycles(&self, frequency: u64) -> u64 {
        let cycles = (self.micros as u128 * frequency as u128) / MICROS_PER_SEC as u128;
        u64::try_from(cycles).unwrap_or(u64::MAX)
    }
}

impl ops::Add<Duration> for Duration {
    type Output = Duration;

    fn add(self, rhs: Duration) -> Duration {
        Duration {
            micros: self.micros + rhs.micros,
        }
    }
}

impl ops::Sub<Duration> for Duration {
    type Output = Duration;

    fn sub(self, rhs: Duration) -> Duration {
        Duration {
            micros: self.micros.saturating_sub(rhs.micros),
        }
    }
}

/// Anything that can tell the current time.
pub trait TimeSource {
    fn now(&self) -> Instant;
}

/// Hardware abstraction for the timer peripheral.
///
/// Register layout:
///  - `0x00`: freeze command, a write latches the counter
///  - `0x08`: latched cycle counter (`u64`)
///  - `0x10`: counter frequency in hertz (`u64`)
#[derive(Clone, Copy)]
pub struct Clock {
    command: *mut u32,
    counter: *const u64,
    frequency: *const u64,
}

impl Clock {
    /// Create a new Clock instance.
    ///
    /// # Safety
    ///
    /// `addr` needs to point to a mapped memory address for a timer component.
    pub const unsafe fn new(addr: *mut u8) -> Clock {
        Clock {
            command: addr.cast(),
            counter: addr.wrapping_add(0x08).cast(),
            frequency: addr.wrapping_add(0x10).cast(),
        }
    }

    /// Busy-wait for a `Duration`.
    pub fn wait(&self, duration: Duration) {
        self.wait_until(self.now() + duration);
    }

    /// Busy-wait until we have passed an `Instant`.
    pub fn wait_until(&self, target: Instant) {
        while self.now() < target {
            core::hint::spin_loop();
        }
    }

    pub fn frequency(&self) -> u64 {
        unsafe { self.frequency.read_volatile() }
    }

    fn freeze(&self) {
        unsafe { self.command.write_volatile(0) }
    }

    fn counter(&self) -> u64 {
        unsafe { self.counter.read_volatile() }
    }
}

impl TimeSource for Clock {
    fn now(&self) -> Instant {
        self.freeze();
        Instant::from_cycles(self.counter(), self.frequency())
    }
}
