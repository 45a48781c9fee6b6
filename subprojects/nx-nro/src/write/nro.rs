//! In-place NRO writers.

use std::io::{self, Seek, SeekFrom, Write};

use fs_err::File;
use zerocopy::IntoBytes;

use super::nacp::EditError;
use crate::{
    raw::AssetKind,
    read::{Nacp, Nro},
};

impl Nro {
    /// Set the application name for all languages.
    pub fn set_name(&mut self, name: &str) -> Result<(), EditError> {
        self.nacp_for_edit()?.set_name(name)
    }

    /// Set the publisher for all languages.
    pub fn set_publisher(&mut self, publisher: &str) -> Result<(), EditError> {
        self.nacp_for_edit()?.set_publisher(publisher)
    }

    /// Set the display version string.
    pub fn set_display_version(&mut self, version: &str) -> Result<(), EditError> {
        self.nacp_for_edit()?.set_display_version(version)
    }

    fn nacp_for_edit(&mut self) -> Result<&mut Nacp, EditError> {
        self.nacp.as_mut().ok_or(EditError::Unavailable)
    }

    /// Write the start stub, NRO header and asset header back to the file.
    ///
    /// Only needed after header-level changes; text edits go through
    /// [`Nro::save_control`].
    pub fn save(&mut self) -> Result<(), SaveError> {
        let asset_offset = self.asset_offset();
        write_at(&mut self.file, 0, self.header.as_bytes())?;
        write_at(&mut self.file, asset_offset, self.asset_header.as_bytes())?;
        self.file.flush()?;
        Ok(())
    }

    /// Write the NACP back over the control section.
    ///
    /// Writes over the control section range validated at load; bytes outside that
    /// range, including the icon and RomFS payloads, are not touched. Changes to the
    /// control descriptor made through [`Nro::asset_header_mut`] do not move it.
    pub fn save_control(&mut self) -> Result<(), SaveError> {
        let (Some(nacp), Some(range)) = (self.nacp.as_ref(), self.control_range.clone()) else {
            return Err(SaveError::Unavailable {
                section: AssetKind::Control,
            });
        };

        // The record serializes to exactly the bytes it was parsed from
        let bytes = nacp.to_bytes();
        debug_assert_eq!(bytes.len() as u64, range.end - range.start);

        write_at(&mut self.file, range.start, &bytes)?;
        self.file.flush()?;
        Ok(())
    }
}

fn write_at(file: &mut File, offset: u64, bytes: &[u8]) -> io::Result<()> {
    log::debug!(
        "writing {:#x}..{:#x} of {}",
        offset,
        offset + bytes.len() as u64,
        file.path().display()
    );
    file.seek(SeekFrom::Start(offset))?;
    file.write_all(bytes)
}

/// Error returned by [`Nro::save`] and [`Nro::save_control`].
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// The section to write is not present in the NRO.
    #[error("no {section} available")]
    Unavailable {
        /// Missing section
        section: AssetKind,
    },
    /// Write failure, including short writes
    #[error(transparent)]
    Io(#[from] io::Error),
}
