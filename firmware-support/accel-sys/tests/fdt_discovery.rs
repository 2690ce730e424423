// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

use accel_sys::config::FDT_NODE;
use accel_sys::regs::{ACCEL_BASE, REGISTER_SPAN};
use accel_sys::{initialise, initialise_from_fdt, AccelConfig, FdtLoadError, InitialisationError};

mod fdt_common;
use fdt_common::accelerator_tree;

fn parse(blob: &[u8]) -> fdt::Fdt<'_> {
    fdt::Fdt::new(blob).unwrap()
}

#[test]
fn finds_accelerator_reg() {
    let blob = accelerator_tree("matmul-accelerator", Some((ACCEL_BASE as u64, 0x100)));
    let config = AccelConfig::from_fdt(&parse(&blob)).unwrap();
    assert_eq!(config, AccelConfig::fixed());
}

#[test]
fn unit_address_in_node_name_is_accepted() {
    let blob = accelerator_tree("matmul-accelerator@20000000", Some((0x2000_0000, 0xC8)));
    let config = AccelConfig::from_fdt(&parse(&blob)).unwrap();
    assert_eq!(config.base_addr, 0x2000_0000);
}

#[test]
fn missing_node() {
    let blob = accelerator_tree("uart", Some((0x4000_0000, 0x8)));
    assert_eq!(
        AccelConfig::from_fdt(&parse(&blob)),
        Err(FdtLoadError::FdtNodeNotFound(FDT_NODE))
    );
}

#[test]
fn missing_reg() {
    let blob = accelerator_tree("matmul-accelerator", None);
    assert!(matches!(
        AccelConfig::from_fdt(&parse(&blob)),
        Err(FdtLoadError::RegNotFound { .. })
    ));
}

#[test]
fn region_too_small() {
    let blob = accelerator_tree("matmul-accelerator", Some((ACCEL_BASE as u64, 0xC4)));
    assert_eq!(
        AccelConfig::from_fdt(&parse(&blob)),
        Err(FdtLoadError::SizeMismatch {
            property: "register block size",
            expected: REGISTER_SPAN,
            found: 0xC4,
        })
    );
}

#[test]
fn misaligned_base() {
    let blob = accelerator_tree("matmul-accelerator", Some((0x1000_0002, 0x100)));
    assert!(matches!(
        AccelConfig::from_fdt(&parse(&blob)),
        Err(FdtLoadError::Misaligned {
            address: 0x1000_0002,
            ..
        })
    ));
}

#[test]
fn initialise_builds_mmio_handle() {
    let blob = accelerator_tree("matmul-accelerator", Some((ACCEL_BASE as u64, 0x100)));

    let from_tree = unsafe { initialise_from_fdt(&parse(&blob)) }.unwrap();
    assert_eq!(from_tree.registers().base_addr(), ACCEL_BASE as *mut u8);

    let from_ptr = unsafe { initialise(blob.as_ptr()) }.unwrap();
    assert_eq!(from_ptr.registers().base_addr(), ACCEL_BASE as *mut u8);
}

#[test]
fn initialise_reports_missing_accelerator() {
    let blob = accelerator_tree("uart", Some((0x4000_0000, 0x8)));
    assert!(matches!(
        unsafe { initialise(blob.as_ptr()) },
        Err(InitialisationError::AcceleratorLoadError(
            FdtLoadError::FdtNodeNotFound(_)
        ))
    ));
}

#[test]
fn initialise_rejects_non_device_tree() {
    let blank = [0u8; 64];
    assert!(matches!(
        unsafe { initialise(blank.as_ptr()) },
        Err(InitialisationError::FdtError(_))
    ));
}
