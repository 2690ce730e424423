// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

#![no_std]

pub mod accelerator;
pub mod config;
pub mod error;
pub mod matrix;
pub mod mmio;
pub mod poll;
pub mod regs;
#[cfg(any(test, feature = "sim"))]
pub mod sim;
pub mod time;
pub mod uart;

pub use accelerator::{Accelerator, State};
pub use config::AccelConfig;
pub use error::{FdtLoadError, InitialisationError, WaitError};
pub use matrix::Matrix;
pub use mmio::{Mmio, Registers};
pub use poll::PollStrategy;

/// Build an accelerator handle from a flattened device tree that lives at a
/// known memory-mapped address.
///
/// # Safety
///
/// A valid FDT must be readable at `fdt_addr`, and it must describe the
/// hardware this code is executing on.
pub unsafe fn initialise(fdt_addr: *const u8) -> Result<Accelerator<Mmio>, InitialisationError> {
    let fdt = fdt::Fdt::from_ptr(fdt_addr).map_err(InitialisationError::FdtError)?;
    initialise_from_fdt(&fdt)
}

/// Build an accelerator handle from a flattened device tree.
///
/// # Safety
///
/// The FDT must appropriately describe the hardware configuration that this
/// code is being executed on.
pub unsafe fn initialise_from_fdt(
    fdt: &fdt::Fdt,
) -> Result<Accelerator<Mmio>, InitialisationError> {
    let config = AccelConfig::from_fdt(fdt).map_err(InitialisationError::AcceleratorLoadError)?;
    Ok(Accelerator::from_config(&config))
}
