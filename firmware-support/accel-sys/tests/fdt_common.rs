// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

#![allow(dead_code)]

const FDT_MAGIC: u32 = 0xd00d_feed;
const FDT_BEGIN_NODE: u32 = 1;
const FDT_END_NODE: u32 = 2;
const FDT_PROP: u32 = 3;
const FDT_END: u32 = 9;

const HEADER_SIZE: usize = 40;
const MEM_RSVMAP_SIZE: usize = 16;

/// Minimal flattened-devicetree writer, enough to describe a handful of nodes
/// with properties.
#[derive(Default)]
pub struct DtbBuilder {
    structs: Vec<u8>,
    strings: Vec<u8>,
}

impl DtbBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_u32(&mut self, value: u32) {
        self.structs.extend_from_slice(&value.to_be_bytes());
    }

    fn pad(&mut self) {
        while self.structs.len() % 4 != 0 {
            self.structs.push(0);
        }
    }

    fn string_offset(&mut self, name: &str) -> u32 {
        let offset = self.strings.len() as u32;
        self.strings.extend_from_slice(name.as_bytes());
        self.strings.push(0);
        offset
    }

    pub fn begin_node(&mut self, name: &str) -> &mut Self {
        self.push_u32(FDT_BEGIN_NODE);
        self.structs.extend_from_slice(name.as_bytes());
        self.structs.push(0);
        self.pad();
        self
    }

    pub fn end_node(&mut self) -> &mut Self {
        self.push_u32(FDT_END_NODE);
        self
    }

    pub fn prop(&mut self, name: &str, value: &[u8]) -> &mut Self {
        let name_offset = self.string_offset(name);
        self.push_u32(FDT_PROP);
        self.push_u32(value.len() as u32);
        self.push_u32(name_offset);
        self.structs.extend_from_slice(value);
        self.pad();
        self
    }

    pub fn prop_cells(&mut self, name: &str, cells: &[u32]) -> &mut Self {
        let value: Vec<u8> = cells.iter().flat_map(|c| c.to_be_bytes()).collect();
        self.prop(name, &value)
    }

    pub fn build(&mut self) -> Vec<u8> {
        self.push_u32(FDT_END);

        let off_struct = HEADER_SIZE + MEM_RSVMAP_SIZE;
        let off_strings = off_struct + self.structs.len();
        let total = off_strings + self.strings.len();

        let header = [
            FDT_MAGIC,
            total as u32,
            off_struct as u32,
            off_strings as u32,
            HEADER_SIZE as u32,
            17,
            16,
            0,
            self.strings.len() as u32,
            self.structs.len() as u32,
        ];

        let mut blob: Vec<u8> = header.iter().flat_map(|w| w.to_be_bytes()).collect();
        blob.extend_from_slice(&[0; MEM_RSVMAP_SIZE]);
        blob.extend_from_slice(&self.structs);
        blob.extend_from_slice(&self.strings);
        blob
    }
}

/// A tree with a root that uses two address cells and one size cell, and
/// one accelerator node named `node_name`. `reg` is omitted when `None`.
pub fn accelerator_tree(node_name: &str, reg: Option<(u64, u32)>) -> Vec<u8> {
    let mut b = DtbBuilder::new();
    b.begin_node("")
        .prop_cells("#address-cells", &[2])
        .prop_cells("#size-cells", &[1]);
    b.begin_node(node_name)
        .prop("compatible", b"matmul-accelerator\0");
    if let Some((addr, size)) = reg {
        b.prop_cells("reg", &[(addr >> 32) as u32, addr as u32, size]);
    }
    b.end_node();
    b.end_node();
    b.build()
}
