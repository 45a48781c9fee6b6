use core::{fmt, ops::Range};
use std::{
    borrow::Cow,
    io::{self, Read, Seek, SeekFrom},
    path::{Path, PathBuf},
    vec::Vec,
};

use fs_err::{File, OpenOptions};
use zerocopy::{FromZeros, IntoBytes};

use super::nacp::{FromBytesError as NacpFromBytesError, Nacp};
use crate::raw::nro::{
    ASSET_MAGIC, AssetKind, NRO_MAGIC, NroAssetHeader, NroAssetSection, NroFileHeader, NroHeader,
    NroStart,
};

/// An NRO file loaded together with its asset block.
///
/// The icon, NACP and RomFS payloads are owned copies; the file handle is kept open
/// only for the in-place writers and is released when the value is dropped or
/// [closed](Nro::close).
pub struct Nro {
    pub(crate) file: File,
    pub(crate) file_len: u64,
    pub(crate) header: NroFileHeader,
    pub(crate) asset_header: NroAssetHeader,
    pub(crate) icon: Vec<u8>,
    pub(crate) nacp: Option<Nacp>,
    /// Control section bounds as validated at load time
    pub(crate) control_range: Option<Range<u64>>,
    pub(crate) romfs: Vec<u8>,
}

impl Nro {
    /// Open an NRO for reading and in-place update, and load its asset block.
    ///
    /// Any failure drops the partially read state, including the file handle.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|source| LoadError::NotFound {
                path: path.to_path_buf(),
                source,
            })?;
        let file_len = file.metadata()?.len();

        let header_len = size_of::<NroFileHeader>();
        if file_len < header_len as u64 {
            return Err(LoadError::CorruptHeader {
                required: header_len,
                available: file_len,
            });
        }

        let mut header = NroFileHeader::new_zeroed();
        file.read_exact(header.as_mut_bytes())?;

        if header.header.magic != NRO_MAGIC {
            return Err(LoadError::BadMagic {
                structure: MagicKind::Nro,
                expected: NRO_MAGIC,
                found: header.header.magic,
            });
        }

        // The asset block starts where the loadable image ends
        let asset_offset = u64::from(header.header.size.get());
        let asset_header_end = asset_offset + size_of::<NroAssetHeader>() as u64;
        if asset_header_end > file_len {
            return Err(LoadError::UnsupportedNro {
                asset_offset,
                file_len,
            });
        }

        let mut asset_header = NroAssetHeader::new_zeroed();
        file.seek(SeekFrom::Start(asset_offset))?;
        file.read_exact(asset_header.as_mut_bytes())?;

        if asset_header.magic != ASSET_MAGIC {
            return Err(LoadError::BadMagic {
                structure: MagicKind::Asset,
                expected: ASSET_MAGIC,
                found: asset_header.magic,
            });
        }

        let (_, icon) =
            read_section(&mut file, file_len, asset_offset, &asset_header, AssetKind::Icon)?;
        let (control_range, control) =
            read_section(&mut file, file_len, asset_offset, &asset_header, AssetKind::Control)?;
        let (_, romfs) =
            read_section(&mut file, file_len, asset_offset, &asset_header, AssetKind::RomFs)?;

        let nacp = match control_range {
            Some(_) => Some(Nacp::try_from_bytes(&control)?),
            None => None,
        };

        log::debug!(
            "loaded {}: image {:#x} bytes, icon {} bytes, NACP {} bytes, RomFS {} bytes",
            path.display(),
            asset_offset,
            icon.len(),
            control.len(),
            romfs.len()
        );

        Ok(Self {
            file,
            file_len,
            header,
            asset_header,
            icon,
            nacp,
            control_range,
            romfs,
        })
    }

    /// Path the NRO was opened from.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Length of the backing file when it was loaded.
    pub fn file_len(&self) -> u64 {
        self.file_len
    }

    /// Get the NRO start structure.
    pub fn start(&self) -> &NroStart {
        &self.header.start
    }

    /// Get the NRO header.
    pub fn header(&self) -> &NroHeader {
        &self.header.header
    }

    /// Get the asset header.
    pub fn asset_header(&self) -> &NroAssetHeader {
        &self.asset_header
    }

    /// Mutable access to the start stub and header, persisted by [`Nro::save`].
    ///
    /// Changing `header.size` moves where the asset header is written.
    pub fn file_header_mut(&mut self) -> &mut NroFileHeader {
        &mut self.header
    }

    /// Mutable access to the asset header, persisted by [`Nro::save`].
    ///
    /// The loaded payloads are not moved when section offsets change.
    pub fn asset_header_mut(&mut self) -> &mut NroAssetHeader {
        &mut self.asset_header
    }

    /// Get the 32-byte build ID.
    pub fn build_id(&self) -> &[u8; 32] {
        &self.header.header.build_id
    }

    /// Absolute file offset of the asset header.
    pub fn asset_offset(&self) -> u64 {
        u64::from(self.header.header.size.get())
    }

    /// Descriptor of one asset section.
    pub fn section(&self, kind: AssetKind) -> &NroAssetSection {
        self.asset_header.section(kind)
    }

    /// Whether an asset section is present (declared size > 0).
    pub fn has_section(&self, kind: AssetKind) -> bool {
        self.section(kind).is_present()
    }

    /// Absolute byte range of an asset section within the file.
    ///
    /// `None` if the section is absent or its bounds do not fit in a `u64`.
    pub fn section_range(&self, kind: AssetKind) -> Option<Range<u64>> {
        section_bounds(self.asset_offset(), self.section(kind))
    }

    /// Icon bytes; empty if the NRO has no icon.
    pub fn icon(&self) -> &[u8] {
        &self.icon
    }

    /// RomFS bytes; empty if the NRO has no RomFS.
    pub fn romfs(&self) -> &[u8] {
        &self.romfs
    }

    /// Parsed NACP, if the NRO has one.
    pub fn nacp(&self) -> Option<&Nacp> {
        self.nacp.as_ref()
    }

    /// Mutable parsed NACP, if the NRO has one.
    pub fn nacp_mut(&mut self) -> Option<&mut Nacp> {
        self.nacp.as_mut()
    }

    /// Name from the first NACP language entry; empty without a NACP.
    pub fn name(&self) -> Cow<'_, str> {
        self.nacp.as_ref().map_or(Cow::Borrowed(""), Nacp::name)
    }

    /// Publisher from the first NACP language entry; empty without a NACP.
    pub fn publisher(&self) -> Cow<'_, str> {
        self.nacp.as_ref().map_or(Cow::Borrowed(""), Nacp::publisher)
    }

    /// NACP display version; empty without a NACP.
    pub fn display_version(&self) -> Cow<'_, str> {
        self.nacp
            .as_ref()
            .map_or(Cow::Borrowed(""), Nacp::display_version)
    }

    /// Multi-line report of the title metadata and asset availability.
    pub fn summary(&self) -> String {
        let yes_no = |kind| if self.has_section(kind) { "Yes" } else { "No" };
        format!(
            "NRO:\n  Name: {}\n  Author: {}\n  Version: {}\n\n  Icon available: {}\n  NACP available: {}\n  RomFS available: {}\n",
            or_not_set(&self.name()),
            or_not_set(&self.publisher()),
            or_not_set(&self.display_version()),
            yes_no(AssetKind::Icon),
            yes_no(AssetKind::Control),
            yes_no(AssetKind::RomFs),
        )
    }

    /// Flush pending writes and release the file handle.
    pub fn close(self) -> io::Result<()> {
        self.file.sync_all()
    }
}

impl fmt::Display for Nro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} v{} by {}",
            or_not_set(&self.name()),
            or_not_set(&self.display_version()),
            or_not_set(&self.publisher())
        )
    }
}

impl fmt::Debug for Nro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Nro")
            .field("path", &self.path())
            .field("header", &self.header.header)
            .field("asset_header", &self.asset_header)
            .field("nacp", &self.nacp)
            .finish_non_exhaustive()
    }
}

fn or_not_set(value: &str) -> &str {
    if value.is_empty() { "<not set>" } else { value }
}

fn section_bounds(asset_offset: u64, section: &NroAssetSection) -> Option<Range<u64>> {
    if !section.is_present() {
        return None;
    }
    let start = asset_offset.checked_add(section.offset.get())?;
    let end = start.checked_add(section.size.get())?;
    Some(start..end)
}

/// Read one asset section along with its absolute range.
///
/// Zero-size sections yield no range and an empty payload without a read.
fn read_section(
    file: &mut File,
    file_len: u64,
    asset_offset: u64,
    asset_header: &NroAssetHeader,
    kind: AssetKind,
) -> Result<(Option<Range<u64>>, Vec<u8>), LoadError> {
    let section = asset_header.section(kind);
    let size = section.size.get();
    if size == 0 {
        return Ok((None, Vec::new()));
    }

    let Some(Range { start: offset, end }) = section_bounds(asset_offset, section) else {
        return Err(LoadError::Truncated {
            section: kind,
            offset: section.offset.get(),
            size,
            file_len,
        });
    };
    if end > file_len {
        return Err(LoadError::Truncated {
            section: kind,
            offset,
            size,
            file_len,
        });
    }

    log::debug!("{kind} section at {offset:#x}..{end:#x}");

    let mut buf = vec![0u8; size as usize];
    file.seek(SeekFrom::Start(offset))?;
    file.read_exact(&mut buf)?;
    Ok((Some(offset..end), buf))
}

/// Structure whose magic failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MagicKind {
    /// NRO header ("NRO0")
    Nro,
    /// Asset header ("ASET")
    Asset,
}

impl fmt::Display for MagicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MagicKind::Nro => "NRO header",
            MagicKind::Asset => "asset header",
        })
    }
}

/// Errors that can occur when loading an NRO
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The path could not be opened for reading and writing
    #[error("cannot open {}", .path.display())]
    NotFound {
        /// Path that was opened
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
    /// File is shorter than the start stub and NRO header
    #[error("corrupt header: need {required} bytes, file has {available}")]
    CorruptHeader {
        /// Number of bytes required
        required: usize,
        /// Length of the file
        available: u64,
    },
    /// Magic number does not match
    #[error(
        "invalid {structure} magic: expected \"{}\", found \"{}\"",
        .expected.escape_ascii(),
        .found.escape_ascii()
    )]
    BadMagic {
        /// Structure that was validated
        structure: MagicKind,
        /// Expected magic
        expected: [u8; 4],
        /// Found magic
        found: [u8; 4],
    },
    /// No asset header follows the loadable image
    #[error(
        "unsupported NRO: no asset block at {asset_offset:#x} (file is {file_len:#x} bytes)"
    )]
    UnsupportedNro {
        /// Offset the asset header was expected at
        asset_offset: u64,
        /// Length of the file
        file_len: u64,
    },
    /// An asset section extends past the end of the file
    #[error(
        "{section} section truncated: {size:#x} bytes at {offset:#x} exceed file length {file_len:#x}"
    )]
    Truncated {
        /// Offending section
        section: AssetKind,
        /// Absolute offset of the section (relative offset if it overflowed)
        offset: u64,
        /// Declared size of the section
        size: u64,
        /// Length of the file
        file_len: u64,
    },
    /// The control section is too small to hold a NACP
    #[error("invalid NACP section")]
    Control(#[from] NacpFromBytesError),
    /// Read failure
    #[error(transparent)]
    Io(#[from] io::Error),
}
