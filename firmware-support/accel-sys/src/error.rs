// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

use ufmt::derive::uDebug;

/// Returned by a bounded [`PollStrategy`](crate::PollStrategy) that gave up
/// before the accelerator reported completion.
#[derive(Debug, uDebug, Clone, Copy, PartialEq, Eq)]
pub enum WaitError {
    /// The done bit was still clear after `polls` status reads.
    Timeout { polls: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FdtLoadError {
    FdtNodeNotFound(&'static str),
    RegNotFound {
        component: &'static str,
    },
    SizeMismatch {
        property: &'static str,
        expected: usize,
        found: usize,
    },
    Misaligned {
        component: &'static str,
        address: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InitialisationError {
    FdtError(fdt::FdtError),
    AcceleratorLoadError(FdtLoadError),
}
