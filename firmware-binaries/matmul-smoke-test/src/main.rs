// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0
#![cfg_attr(target_arch = "riscv32", no_std)]
#![cfg_attr(target_arch = "riscv32", no_main)]

//! Single-shot smoke test for the matrix-multiply accelerator.
//!
//! On the RISC-V target this loads the fixed operands, starts the
//! accelerator, waits for the done bit and then idles forever. Built for any
//! other architecture, the same sequence runs against the simulated
//! accelerator and the process exits.

#[cfg(target_arch = "riscv32")]
mod firmware;

#[cfg(not(target_arch = "riscv32"))]
mod host;

#[cfg(not(target_arch = "riscv32"))]
fn main() -> std::process::ExitCode {
    host::main()
}
