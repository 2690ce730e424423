// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

use crate::time::{Duration, TimeSource};

/// How long [`Accelerator::wait`](crate::Accelerator::wait) keeps reading the
/// status register before giving up.
#[derive(Clone, Copy, Default)]
pub enum PollStrategy<'a> {
    /// Spin until the done bit is set, however long that takes. If the
    /// hardware never finishes, neither does the caller.
    #[default]
    Unbounded,
    /// Read the status register at most this many times.
    MaxAttempts(u32),
    /// Keep reading until `timeout` has passed according to `clock`. The status
    /// register is read at least once.
    Deadline {
        clock: &'a dyn TimeSource,
        timeout: Duration,
    },
}

impl PollStrategy<'_> {
    pub fn is_bounded(&self) -> bool {
        !matches!(self, PollStrategy::Unbounded)
    }
}

impl core::fmt::Debug for PollStrategy<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PollStrategy::Unbounded => f.write_str("Unbounded"),
            PollStrategy::MaxAttempts(n) => f.debug_tuple("MaxAttempts").field(n).finish(),
            PollStrategy::Deadline { timeout, .. } => f
                .debug_struct("Deadline")
                .field("timeout", timeout)
                .finish_non_exhaustive(),
        }
    }
}
