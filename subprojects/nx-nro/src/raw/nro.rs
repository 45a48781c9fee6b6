use core::fmt;

use static_assertions::const_assert_eq;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, little_endian::*};

/// NRO magic: "NRO0".
pub const NRO_MAGIC: [u8; 4] = *b"NRO0";

/// Asset block magic: "ASET".
///
/// Found in the asset header appended after the loadable NRO image.
pub const ASSET_MAGIC: [u8; 4] = *b"ASET";

/// NRO segment descriptor.
///
/// Describes location and size of a segment within the NRO file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, KnownLayout, Immutable)]
#[repr(C)]
pub struct NroSegment {
    /// File offset to segment data
    pub file_off: U32,
    /// Size of segment in bytes
    pub size: U32,
}

// Verify struct size - https://switchbrew.org/wiki/NRO#SegmentHeader
const_assert_eq!(size_of::<NroSegment>(), 0x8);

/// NRO start stub (first 0x10 bytes of the file).
///
/// Only the MOD0 offset carries information; the core keeps it opaque.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, KnownLayout, Immutable)]
#[repr(C)]
pub struct NroStart {
    /// Unused (typically a branch instruction)
    pub unused: U32,
    /// Offset to MOD0 header (relative to NRO start)
    pub mod0_offset: U32,
    /// Padding
    _padding: [u8; 8],
}

// Verify struct size - https://switchbrew.org/wiki/NRO#Start
const_assert_eq!(size_of::<NroStart>(), 0x10);

/// NRO header (0x70 bytes, follows [`NroStart`] at offset 0x10).
///
/// See: <https://switchbrew.org/wiki/NRO#Header>
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, KnownLayout, Immutable)]
#[repr(C)]
pub struct NroHeader {
    /// Magic (must be [`NRO_MAGIC`])
    pub magic: [u8; 4],
    /// Format version (usually 0)
    pub version: U32,
    /// Size of the loadable image; the asset header starts at this offset
    pub size: U32,
    /// Flags
    pub flags: U32,
    /// Segment descriptors: [text, rodata, data]
    pub segments: [NroSegment; 3],
    /// BSS section size in bytes
    pub bss_size: U32,
    /// Reserved
    _reserved: U32,
    /// 32-byte build ID
    pub build_id: [u8; 0x20],
    /// Reserved
    _reserved2: U64,
    /// Second segment table (API info, .dynstr and .dynsym on current toolchains)
    pub segments2: [NroSegment; 3],
}

// Verify struct size - https://switchbrew.org/wiki/NRO#Header
const_assert_eq!(size_of::<NroHeader>(), 0x70);

/// Start stub and header as they sit at file offset 0.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, KnownLayout, Immutable)]
#[repr(C)]
pub struct NroFileHeader {
    /// Start stub at offset 0x0
    pub start: NroStart,
    /// NRO header at offset 0x10
    pub header: NroHeader,
}

const_assert_eq!(size_of::<NroFileHeader>(), 0x80);

/// Asset section descriptor.
///
/// Locates one payload (icon, NACP or RomFS) relative to the asset header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, KnownLayout, Immutable)]
#[repr(C)]
pub struct NroAssetSection {
    /// Offset to asset data (relative to asset header)
    pub offset: U64,
    /// Size of asset data in bytes
    pub size: U64,
}

// Verify struct size - https://switchbrew.org/wiki/NRO#AssetSection
const_assert_eq!(size_of::<NroAssetSection>(), 0x10);

impl NroAssetSection {
    /// Whether the section carries any data.
    pub fn is_present(&self) -> bool {
        self.size.get() != 0
    }
}

/// Asset header, located at file offset [`NroHeader::size`].
///
/// See: <https://switchbrew.org/wiki/NRO#AssetHeader>
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, KnownLayout, Immutable)]
#[repr(C)]
pub struct NroAssetHeader {
    /// Magic (must be [`ASSET_MAGIC`])
    pub magic: [u8; 4],
    /// Asset format version
    pub version: U32,
    /// Icon asset descriptor (JPEG image)
    pub icon: NroAssetSection,
    /// NACP asset descriptor
    pub nacp: NroAssetSection,
    /// RomFS asset descriptor
    pub romfs: NroAssetSection,
}

// Verify struct size - https://switchbrew.org/wiki/NRO#AssetHeader
const_assert_eq!(size_of::<NroAssetHeader>(), 0x38);

impl NroAssetHeader {
    /// Get the descriptor for one asset kind.
    pub fn section(&self, kind: AssetKind) -> &NroAssetSection {
        match kind {
            AssetKind::Icon => &self.icon,
            AssetKind::Control => &self.nacp,
            AssetKind::RomFs => &self.romfs,
        }
    }

    /// Get a mutable descriptor for one asset kind.
    pub fn section_mut(&mut self, kind: AssetKind) -> &mut NroAssetSection {
        match kind {
            AssetKind::Icon => &mut self.icon,
            AssetKind::Control => &mut self.nacp,
            AssetKind::RomFs => &mut self.romfs,
        }
    }
}

/// The three payloads of an asset block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// Icon image
    Icon,
    /// Application control property record (NACP)
    Control,
    /// Embedded RomFS image
    RomFs,
}

impl AssetKind {
    /// All asset kinds in on-disk order.
    pub const ALL: [AssetKind; 3] = [AssetKind::Icon, AssetKind::Control, AssetKind::RomFs];
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AssetKind::Icon => "icon",
            AssetKind::Control => "NACP",
            AssetKind::RomFs => "RomFS",
        })
    }
}
