//! Payload extraction to standalone files.

use std::{borrow::Cow, io, path::Path};

use crate::{raw::AssetKind, read::Nro};

impl Nro {
    /// Write the icon to `dest`.
    pub fn extract_icon(&self, dest: impl AsRef<Path>) -> Result<(), ExtractError> {
        self.extract(AssetKind::Icon, dest.as_ref())
    }

    /// Write the NACP, including any unsaved edits, to `dest`.
    pub fn extract_control(&self, dest: impl AsRef<Path>) -> Result<(), ExtractError> {
        self.extract(AssetKind::Control, dest.as_ref())
    }

    /// Write the RomFS image to `dest`.
    pub fn extract_romfs(&self, dest: impl AsRef<Path>) -> Result<(), ExtractError> {
        self.extract(AssetKind::RomFs, dest.as_ref())
    }

    /// Write one payload to `dest`, creating or truncating it.
    ///
    /// Sections with a declared size of zero report [`ExtractError::Unavailable`]
    /// and leave `dest` untouched.
    pub fn extract(&self, kind: AssetKind, dest: &Path) -> Result<(), ExtractError> {
        let payload = self
            .payload(kind)
            .ok_or(ExtractError::Unavailable { section: kind })?;

        log::debug!(
            "extracting {} bytes of {kind} to {}",
            payload.len(),
            dest.display()
        );
        fs_err::write(dest, payload)?;
        Ok(())
    }

    /// Bytes of one payload, or None if the section is absent.
    ///
    /// The NACP is serialized from its in-memory state.
    pub fn payload(&self, kind: AssetKind) -> Option<Cow<'_, [u8]>> {
        if !self.has_section(kind) {
            return None;
        }
        match kind {
            AssetKind::Icon => Some(Cow::Borrowed(&self.icon)),
            AssetKind::Control => self.nacp.as_ref().map(|nacp| Cow::Owned(nacp.to_bytes())),
            AssetKind::RomFs => Some(Cow::Borrowed(&self.romfs)),
        }
    }
}

/// Error returned by the `extract_*` methods.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The section has a declared size of zero.
    #[error("no {section} available")]
    Unavailable {
        /// Missing section
        section: AssetKind,
    },
    /// Write failure
    #[error(transparent)]
    Io(#[from] io::Error),
}
