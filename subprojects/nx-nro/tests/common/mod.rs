//! Shared fixtures for the integration tests.
//!
//! Each integration test file compiles as a separate crate and uses only part of
//! this module.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use nx_nro::raw::{
    FixedStr,
    nacp::NacpStruct,
    nro::{
        ASSET_MAGIC, NRO_MAGIC, NroAssetHeader, NroAssetSection, NroFileHeader, NroSegment,
    },
};
use zerocopy::{FromZeros, IntoBytes};

/// Size of the sample icon payload.
pub const ICON_LEN: usize = 0x321;

/// Size of the sample RomFS payload.
pub const ROMFS_LEN: usize = 0x1234;

/// Assembles NRO images with an asset block.
pub struct NroFixture {
    text: Vec<u8>,
    icon: Vec<u8>,
    nacp: Vec<u8>,
    romfs: Vec<u8>,
}

impl NroFixture {
    /// Fixture with every section populated.
    pub fn new() -> Self {
        Self {
            text: pattern(0x180, 0x11),
            icon: jpeg_like(ICON_LEN),
            nacp: sample_nacp("Sample App", "Sample Author", "0.1.0"),
            romfs: pattern(ROMFS_LEN, 0x5a),
        }
    }

    pub fn icon(mut self, data: Vec<u8>) -> Self {
        self.icon = data;
        self
    }

    pub fn nacp(mut self, data: Vec<u8>) -> Self {
        self.nacp = data;
        self
    }

    pub fn romfs(mut self, data: Vec<u8>) -> Self {
        self.romfs = data;
        self
    }

    /// Build the complete file image.
    pub fn build(&self) -> Vec<u8> {
        let text_padded = pad_to_alignment(&self.text, 0x1000);
        let text_offset = size_of::<NroFileHeader>() as u32;
        let nro_size = text_offset + text_padded.len() as u32;

        let mut header = NroFileHeader::new_zeroed();
        header.start.mod0_offset = 0x8u32.into();
        header.header.magic = NRO_MAGIC;
        header.header.size = nro_size.into();
        header.header.segments[0] = NroSegment {
            file_off: text_offset.into(),
            size: (self.text.len() as u32).into(),
        };
        header.header.build_id = [0xb1; 0x20];

        let mut buf = Vec::new();
        buf.extend_from_slice(header.as_bytes());
        buf.extend_from_slice(&text_padded);

        let mut asset_offset = size_of::<NroAssetHeader>() as u64;
        let mut section = |data: &[u8]| {
            if data.is_empty() {
                return NroAssetSection {
                    offset: 0u64.into(),
                    size: 0u64.into(),
                };
            }
            let off = asset_offset;
            asset_offset += data.len() as u64;
            NroAssetSection {
                offset: off.into(),
                size: (data.len() as u64).into(),
            }
        };

        let mut asset_header = NroAssetHeader::new_zeroed();
        asset_header.magic = ASSET_MAGIC;
        asset_header.icon = section(&self.icon);
        asset_header.nacp = section(&self.nacp);
        asset_header.romfs = section(&self.romfs);

        buf.extend_from_slice(asset_header.as_bytes());
        buf.extend_from_slice(&self.icon);
        buf.extend_from_slice(&self.nacp);
        buf.extend_from_slice(&self.romfs);
        buf
    }

    /// Build the image and write it to `dir/name`.
    pub fn write_to(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, self.build()).unwrap();
        path
    }
}

/// Absolute offset of the asset header in a fixture image.
pub fn asset_offset(image: &[u8]) -> usize {
    u32::from_le_bytes(image[0x18..0x1c].try_into().unwrap()) as usize
}

/// A 0x4000-byte NACP with every language entry set.
pub fn sample_nacp(name: &str, publisher: &str, version: &str) -> Vec<u8> {
    let mut nacp = NacpStruct::new_zeroed();
    for entry in &mut nacp.lang {
        entry.name = FixedStr::new(name).unwrap();
        entry.publisher = FixedStr::new(publisher).unwrap();
    }
    nacp.display_version = FixedStr::new(version).unwrap();
    nacp.supported_language_flag = 0xffffu32.into();
    nacp.save_data_owner_id = 0x0100_0000_0000_1234u64.into();

    let mut bytes = nacp.as_bytes().to_vec();
    // Non-zero reserved tail, must survive a rewrite
    bytes[0x3ff0..].fill(0xee);
    bytes
}

fn pattern(len: usize, seed: u8) -> Vec<u8> {
    (0..len).map(|i| seed.wrapping_add(i as u8)).collect()
}

fn jpeg_like(len: usize) -> Vec<u8> {
    let mut data = pattern(len, 0x30);
    data[..2].copy_from_slice(&[0xff, 0xd8]);
    data
}

fn pad_to_alignment(data: &[u8], alignment: usize) -> Vec<u8> {
    let padded_len = data.len().div_ceil(alignment) * alignment;
    let mut padded = data.to_vec();
    padded.resize(padded_len, 0);
    padded
}
