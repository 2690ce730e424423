// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

use crate::error::FdtLoadError;
use crate::regs::{ACCEL_BASE, REGISTER_SPAN, WORD_SIZE};

/// Device tree path of the accelerator node.
pub const FDT_NODE: &str = "/matmul-accelerator";

/// Where to find the accelerator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccelConfig {
    pub base_addr: usize,
}

impl AccelConfig {
    /// The address from the default memory map.
    pub const fn fixed() -> AccelConfig {
        AccelConfig {
            base_addr: ACCEL_BASE,
        }
    }

    /// Load the accelerator location from a flattened-devicetree. The node's
    /// first `reg` entry must cover the whole register block.
    pub fn from_fdt(fdt: &fdt::Fdt) -> Result<AccelConfig, FdtLoadError> {
        let node = fdt
            .find_node(FDT_NODE)
            .ok_or(FdtLoadError::FdtNodeNotFound(FDT_NODE))?;

        let component = "matmul_accelerator";
        let reg = node
            .reg()
            .ok_or(FdtLoadError::RegNotFound { component })?
            .next()
            .ok_or(FdtLoadError::RegNotFound { component })?;

        if let Some(size) = reg.size {
            if size < REGISTER_SPAN {
                return Err(FdtLoadError::SizeMismatch {
                    property: "register block size",
                    expected: REGISTER_SPAN,
                    found: size,
                });
            }
        }

        let base_addr = reg.starting_address as usize;
        if base_addr % WORD_SIZE != 0 {
            return Err(FdtLoadError::Misaligned {
                component,
                address: base_addr,
            });
        }

        Ok(AccelConfig { base_addr })
    }
}

impl Default for AccelConfig {
    fn default() -> Self {
        AccelConfig::fixed()
    }
}
